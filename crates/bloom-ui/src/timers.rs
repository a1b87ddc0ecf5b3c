//! Repeating timers that post messages to the controller.
//!
//! All timers of one [`Scheduler`] share a cancellation token. Cancelling it
//! (or dropping the scheduler) stops every timer, so nothing is posted to a
//! display that has been torn down. Timers hold only a weak sender and never
//! keep the channel open on their own.

use std::time::Duration;

use tokio::sync::mpsc::WeakUnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

#[derive(Debug, Default)]
pub struct Scheduler {
    token: CancellationToken,
    tasks: Vec<JoinHandle<()>>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Post `message` after `first_delay`, then every `period`. Stops on
    /// cancel, once the receiver is gone, or once every strong sender is
    /// dropped. Must be called inside a tokio runtime.
    pub fn every<T>(
        &mut self,
        first_delay: Duration,
        period: Duration,
        tx: WeakUnboundedSender<T>,
        message: T,
    ) where
        T: Clone + Send + 'static,
    {
        if period.is_zero() {
            tracing::warn!("Ignoring timer with a zero period");
            return;
        }

        let token = self.token.child_token();
        let task = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + first_delay, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = interval.tick() => {
                        let Some(tx) = tx.upgrade() else { break };
                        if tx.send(message.clone()).is_err() {
                            break;
                        }
                    }
                }
            }
        });
        self.tasks.retain(|task| !task.is_finished());
        self.tasks.push(task);
    }

    pub fn cancel(&mut self) {
        if !self.token.is_cancelled() {
            tracing::debug!("Cancelling {} timers", self.tasks.len());
        }
        self.token.cancel();
        self.tasks.clear();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}
