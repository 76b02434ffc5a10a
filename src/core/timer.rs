/// Host timer facility for the feedback window after a guess.
use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;

use super::game::FeedbackTicket;

/// Schedules a one-shot delivery of `ticket` after `delay`.
/// Deliveries cannot be cancelled; the engine discards stale tickets itself.
pub trait FeedbackTimer {
    fn schedule(&mut self, delay: Duration, ticket: FeedbackTicket);
}

/// Spawns a sleeping task per ticket and hands the ticket back over a channel.
pub struct TokioTimer {
    tx: UnboundedSender<FeedbackTicket>,
}

impl TokioTimer {
    pub fn new(tx: UnboundedSender<FeedbackTicket>) -> Self {
        Self { tx }
    }
}

impl FeedbackTimer for TokioTimer {
    fn schedule(&mut self, delay: Duration, ticket: FeedbackTicket) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver gone means the session ended
            if tx.send(ticket).is_err() {
                tracing::debug!(?ticket, "feedback fired after shutdown");
            }
        });
    }
}
