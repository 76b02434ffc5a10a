/// Round state machine for the color matching game.
///
/// `Idle --guess--> Correct|Wrong --feedback elapsed--> Idle`. A correct guess starts a
/// fresh round once the feedback window closes; a wrong one only unlocks the same round.
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::color::Color;
use super::config::{GameConfig, MAX_OPTIONS};
use super::palette::{self, PALETTE};
use super::timer::FeedbackTimer;

/// Attempts at drawing a decoy that does not collide with the options so far.
const MAX_DECOY_ATTEMPTS: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Idle,
    Correct,
    Wrong,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    Correct,
    Wrong,
    /// The feedback window of an earlier guess is still open.
    Ignored,
}

/// Identifies the guess a timer firing belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FeedbackTicket {
    pub round: u64,
    pub guess: u64,
}

/// Read-only snapshot handed to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub round: u64,
    pub target: Color,
    pub options: Vec<Color>,
    pub score: u32,
    pub status: Status,
    pub locked: bool,
    /// Wrong guesses made in this round.
    pub misses: u32,
}

impl GameState {
    pub fn status_text(&self) -> &'static str {
        match self.status {
            Status::Idle if self.misses > 0 => "Not that one. Try again 😅",
            Status::Idle => "Which swatch matches the target?",
            Status::Correct => "Correct! 🎉",
            Status::Wrong => "Wrong guess! Try again 😅",
        }
    }
}

/// Called with the fresh state after every mutation.
pub type Notify = Box<dyn FnMut(&GameState)>;

pub struct GameEngine<R: Rng, T: FeedbackTimer> {
    state: GameState,
    config: GameConfig,
    rng: R,
    timer: T,
    guesses: u64,
    pending: Option<FeedbackTicket>,
    notify: Option<Notify>,
}

impl<R: Rng, T: FeedbackTimer> GameEngine<R, T> {
    /// Creates the engine with its first round already dealt.
    pub fn new(config: GameConfig, rng: R, timer: T) -> Self {
        let mut engine = Self {
            state: GameState {
                round: 0,
                target: PALETTE[0],
                options: Vec::new(),
                score: 0,
                status: Status::Idle,
                locked: false,
                misses: 0,
            },
            config,
            rng,
            timer,
            guesses: 0,
            pending: None,
            notify: None,
        };
        engine.start_new_game();
        engine
    }

    pub fn with_notify(mut self, notify: impl FnMut(&GameState) + 'static) -> Self {
        self.notify = Some(Box::new(notify));
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Deals a new round. Score carries over.
    pub fn start_new_game(&mut self) {
        let target = palette::random_color(&mut self.rng);
        let options = self.deal_options(target);

        self.state.round += 1;
        self.state.target = target;
        self.state.options = options;
        self.state.status = Status::Idle;
        self.state.locked = false;
        self.state.misses = 0;
        self.pending = None;

        info!(round = self.state.round, %target, score = self.state.score, "new round");
        self.notify();
    }

    /// Explicit "new game": fresh round with the score back at zero.
    pub fn reset_score(&mut self) {
        info!(previous = self.state.score, "score reset");
        self.state.score = 0;
        self.start_new_game();
    }

    pub fn submit_guess(&mut self, chosen: Color) -> GuessOutcome {
        if self.state.locked {
            debug!(%chosen, "guess ignored while feedback is showing");
            return GuessOutcome::Ignored;
        }

        self.state.locked = true;
        let outcome = if chosen == self.state.target {
            self.state.score += 1;
            self.state.status = Status::Correct;
            GuessOutcome::Correct
        } else {
            self.state.status = Status::Wrong;
            self.state.misses += 1;
            GuessOutcome::Wrong
        };

        self.guesses += 1;
        let ticket = FeedbackTicket { round: self.state.round, guess: self.guesses };
        self.pending = Some(ticket);
        self.timer.schedule(self.config.feedback_delay(), ticket);

        info!(round = ticket.round, %chosen, ?outcome, score = self.state.score, "guess");
        self.notify();
        outcome
    }

    /// Timer callback. Returns false for a firing that no longer refers to the active guess.
    pub fn feedback_elapsed(&mut self, ticket: FeedbackTicket) -> bool {
        if self.pending != Some(ticket) {
            debug!(?ticket, round = self.state.round, "stale feedback timer");
            return false;
        }
        self.pending = None;
        self.state.locked = false;

        if self.state.status == Status::Correct {
            self.start_new_game();
        } else {
            self.state.status = Status::Idle;
            self.notify();
        }
        true
    }

    fn deal_options(&mut self, target: Color) -> Vec<Color> {
        let count = self.config.option_count.clamp(1, MAX_OPTIONS);
        let mut options = Vec::with_capacity(count);
        options.push(target);

        for _ in 0..self.config.decoys.min(count - 1) {
            let decoy = (0..MAX_DECOY_ATTEMPTS)
                .map(|_| target.perturbed(&mut self.rng, self.config.decoy_spread))
                .find(|decoy| !options.contains(decoy));
            match decoy {
                Some(decoy) => options.push(decoy),
                None => debug!(%target, "no distinct decoy found, filling from palette"),
            }
        }

        while options.len() < count {
            let color = palette::random_color(&mut self.rng);
            if !options.contains(&color) {
                options.push(color);
            }
        }

        options.shuffle(&mut self.rng);
        debug!(?options, "dealt options");
        options
    }

    fn notify(&mut self) {
        if let Some(notify) = self.notify.as_mut() {
            notify(&self.state);
        }
    }
}
