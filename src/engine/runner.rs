use std::time::Duration;

use anyhow::Result;
use crossterm::event::{Event, EventStream, KeyCode, KeyEventKind};
use futures_util::StreamExt;
use rand::Rng;
use ratatui::DefaultTerminal;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::core::config::GameConfig;
use crate::core::game::{FeedbackTicket, GameEngine};
use crate::core::renderer::GameRenderer;
use crate::core::timer::{FeedbackTimer, TokioTimer};

/// Fallback redraw cadence; state changes redraw immediately.
const RENDER_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flow {
    Continue,
    Quit,
}

/// Runs a session on the current terminal until the player quits.
pub async fn run<R: Rng>(config: GameConfig, rng: R) -> Result<()> {
    let (ticket_tx, mut ticket_rx) = mpsc::unbounded_channel();
    let (redraw_tx, mut redraw_rx) = mpsc::unbounded_channel::<()>();

    let mut engine = GameEngine::new(config, rng, TokioTimer::new(ticket_tx)).with_notify(move |_| {
        let _ = redraw_tx.send(());
    });

    let mut terminal = ratatui::init();
    info!("session started");

    let result = event_loop(&mut terminal, &mut engine, &mut ticket_rx, &mut redraw_rx).await;

    ratatui::restore();
    info!(score = engine.state().score, "session ended");
    result
}

async fn event_loop<R: Rng, T: FeedbackTimer>(
    terminal: &mut DefaultTerminal,
    engine: &mut GameEngine<R, T>,
    ticket_rx: &mut mpsc::UnboundedReceiver<FeedbackTicket>,
    redraw_rx: &mut mpsc::UnboundedReceiver<()>,
) -> Result<()> {
    let mut events = EventStream::new();
    let mut render_timer = tokio::time::interval(RENDER_INTERVAL);

    loop {
        tokio::select! {
            Some(ticket) = ticket_rx.recv() => {
                engine.feedback_elapsed(ticket);
            }

            Some(()) = redraw_rx.recv() => {
                draw(terminal, engine)?;
            }

            _ = render_timer.tick() => {
                draw(terminal, engine)?;
            }

            maybe_event = events.next() => match maybe_event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    if apply_key(engine, key.code) == Flow::Quit {
                        return Ok(());
                    }
                }
                Some(Ok(Event::Resize(..))) => draw(terminal, engine)?,
                Some(Ok(_)) => {}
                Some(Err(err)) => return Err(err.into()),
                None => return Ok(()),
            },
        }
    }
}

fn draw<R: Rng, T: FeedbackTimer>(terminal: &mut DefaultTerminal, engine: &GameEngine<R, T>) -> Result<()> {
    terminal.draw(|f| GameRenderer::render(f, engine.state()))?;
    Ok(())
}

/// Maps a key press onto an engine intent.
pub(crate) fn apply_key<R: Rng, T: FeedbackTimer>(engine: &mut GameEngine<R, T>, code: KeyCode) -> Flow {
    match code {
        KeyCode::Esc | KeyCode::Char('q') => return Flow::Quit,
        KeyCode::Char('n') => engine.reset_score(),
        KeyCode::Char('s') => engine.start_new_game(),
        KeyCode::Char(c) => {
            let picked = c
                .to_digit(10)
                .and_then(|d| (d as usize).checked_sub(1))
                .and_then(|index| engine.state().options.get(index).copied());
            match picked {
                Some(color) => {
                    engine.submit_guess(color);
                }
                None => debug!(key = %c, "no option for key"),
            }
        }
        _ => {}
    }
    Flow::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::game::Status;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    struct NoopTimer;

    impl FeedbackTimer for NoopTimer {
        fn schedule(&mut self, _delay: Duration, _ticket: FeedbackTicket) {}
    }

    fn engine() -> GameEngine<StdRng, NoopTimer> {
        GameEngine::new(GameConfig::default(), StdRng::seed_from_u64(21), NoopTimer)
    }

    #[test]
    fn digit_keys_guess_the_matching_option() {
        let mut engine = engine();
        let index = engine.state().options.iter().position(|c| *c == engine.state().target).unwrap();
        let key = char::from_digit(index as u32 + 1, 10).unwrap();

        assert_eq!(apply_key(&mut engine, KeyCode::Char(key)), Flow::Continue);
        assert_eq!(engine.state().status, Status::Correct);
        assert_eq!(engine.state().score, 1);
    }

    #[test]
    fn out_of_range_keys_do_nothing() {
        let mut engine = engine();
        let before = engine.state().clone();
        apply_key(&mut engine, KeyCode::Char('0'));
        apply_key(&mut engine, KeyCode::Char('7'));
        apply_key(&mut engine, KeyCode::Char('x'));
        apply_key(&mut engine, KeyCode::Enter);
        assert_eq!(engine.state(), &before);
    }

    #[test]
    fn n_starts_over_and_quit_keys_stop() {
        let mut engine = engine();
        let round = engine.state().round;
        apply_key(&mut engine, KeyCode::Char('n'));
        assert_eq!(engine.state().round, round + 1);
        assert_eq!(engine.state().score, 0);

        assert_eq!(apply_key(&mut engine, KeyCode::Esc), Flow::Quit);
        assert_eq!(apply_key(&mut engine, KeyCode::Char('q')), Flow::Quit);
    }

    #[test]
    fn s_skips_to_a_new_round_keeping_score() {
        let mut engine = engine();
        let target = engine.state().target;
        engine.submit_guess(target);
        assert_eq!(engine.state().score, 1);
        let round = engine.state().round;

        assert_eq!(apply_key(&mut engine, KeyCode::Char('s')), Flow::Continue);
        assert_eq!(engine.state().round, round + 1);
        assert_eq!(engine.state().score, 1);
        assert!(!engine.state().locked);
    }

    #[tokio::test(start_paused = true)]
    async fn tokio_timer_drives_the_round_forward() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut engine = GameEngine::new(GameConfig::default(), StdRng::seed_from_u64(22), TokioTimer::new(tx));
        let target = engine.state().target;

        engine.submit_guess(target);
        let ticket = rx.recv().await.unwrap();
        assert!(engine.feedback_elapsed(ticket));
        assert_eq!(engine.state().round, 2);
        assert!(!engine.state().locked);
    }
}
