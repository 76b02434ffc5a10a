/// Ratatui view of a `GameState`. Pure drawing, no game logic.
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color as TermColor, Modifier, Style};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::core::game::{GameState, Status};

pub struct GameRenderer;

impl GameRenderer {
    pub fn render(frame: &mut Frame, state: &GameState) {
        let [header, target, options, status, help] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Percentage(45),
            Constraint::Min(5),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        let title = Paragraph::new(format!("HUEMATCH  ·  Score: {}", state.score))
            .alignment(Alignment::Center)
            .style(Style::default().fg(TermColor::Cyan).add_modifier(Modifier::BOLD));
        frame.render_widget(title, header);

        let [_, swatch, _] = Layout::horizontal([
            Constraint::Percentage(30),
            Constraint::Percentage(40),
            Constraint::Percentage(30),
        ])
        .areas(target);
        frame.render_widget(
            Block::default()
                .borders(Borders::ALL)
                .title(" TARGET ")
                .style(Style::default().bg(TermColor::from(state.target))),
            swatch,
        );

        Self::render_options(frame, state, options);

        let status_style = match state.status {
            Status::Idle => Style::default(),
            Status::Correct => Style::default().fg(TermColor::Green).add_modifier(Modifier::BOLD),
            Status::Wrong => Style::default().fg(TermColor::Red).add_modifier(Modifier::BOLD),
        };
        let message = Paragraph::new(state.status_text())
            .alignment(Alignment::Center)
            .style(status_style)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(message, status);

        let keys = Paragraph::new(format!("1-{} pick a swatch · s skip · n new game · Esc quit", state.options.len()))
            .alignment(Alignment::Center)
            .style(Style::default().fg(TermColor::Gray));
        frame.render_widget(keys, help);
    }

    fn render_options(frame: &mut Frame, state: &GameState, area: Rect) {
        if state.options.is_empty() {
            return;
        }
        let slots = Layout::horizontal(vec![Constraint::Ratio(1, state.options.len() as u32); state.options.len()])
            .spacing(1)
            .split(area);

        for (index, (color, slot)) in state.options.iter().zip(slots.iter()).enumerate() {
            let mut style = Style::default().bg(TermColor::from(*color));
            if state.locked {
                style = style.add_modifier(Modifier::DIM);
            }
            let label = Paragraph::new(format!("{}", index + 1))
                .alignment(Alignment::Center)
                .style(style)
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(label, *slot);
        }
    }
}
