//! Bounded, timed re-evaluation against an eventually consistent source.
//!
//! A [`RetrySchedule`] is an ordered list of delays. [`RetrySchedule::run`]
//! sleeps for each delay in turn and then calls the attempt closure, which
//! reads whatever the source looks like at that moment. The first attempt
//! that reports [`Attempt::Done`] ends the schedule.

use std::future::Future;
use std::time::Duration;

/// Delays used when capturing a generated answer.
pub const DEFAULT_CAPTURE_DELAYS_MS: [u64; 3] = [800, 1500, 2000];

/// What one attempt concluded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attempt<T> {
    /// Stop with this value.
    Done(T),
    /// Nothing conclusive yet; try again after the next delay.
    Retry,
}

/// How a schedule ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryOutcome<T> {
    /// An attempt concluded. `attempt` is 1-based.
    Completed { value: T, attempt: usize },
    /// Every attempt asked for a retry.
    Exhausted { attempts: usize },
}

impl<T> RetryOutcome<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            RetryOutcome::Completed { value, .. } => Some(value),
            RetryOutcome::Exhausted { .. } => None,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self, RetryOutcome::Exhausted { .. })
    }
}

/// Ordered delays preceding each attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrySchedule {
    delays: Vec<Duration>,
}

impl Default for RetrySchedule {
    fn default() -> Self {
        Self::from_millis(&DEFAULT_CAPTURE_DELAYS_MS)
    }
}

impl RetrySchedule {
    pub fn new(delays: Vec<Duration>) -> Self {
        Self { delays }
    }

    pub fn from_millis(delays: &[u64]) -> Self {
        Self::new(delays.iter().copied().map(Duration::from_millis).collect())
    }

    pub fn delays(&self) -> &[Duration] {
        &self.delays
    }

    pub fn max_attempts(&self) -> usize {
        self.delays.len()
    }

    /// Total time from start to the last attempt.
    pub fn total_delay(&self) -> Duration {
        self.delays.iter().sum()
    }

    /// Drives the schedule. Attempts run strictly one after another.
    pub async fn run<T, F, Fut>(&self, mut attempt: F) -> RetryOutcome<T>
    where
        F: FnMut(usize) -> Fut,
        Fut: Future<Output = Attempt<T>>,
    {
        for (index, delay) in self.delays.iter().enumerate() {
            tokio::time::sleep(*delay).await;
            let number = index + 1;
            if let Attempt::Done(value) = attempt(number).await {
                return RetryOutcome::Completed {
                    value,
                    attempt: number,
                };
            }
        }
        RetryOutcome::Exhausted {
            attempts: self.delays.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future::ready;
    use tokio::time::Instant;

    #[test]
    fn default_schedule_matches_capture_delays() {
        let schedule = RetrySchedule::default();
        assert_eq!(schedule.max_attempts(), 3);
        assert_eq!(schedule.total_delay(), Duration::from_millis(4300));
    }

    #[tokio::test(start_paused = true)]
    async fn attempts_fire_at_cumulative_offsets() {
        let start = Instant::now();
        let mut fired = Vec::new();

        let outcome: RetryOutcome<()> = RetrySchedule::default()
            .run(|_| {
                fired.push(start.elapsed());
                ready(Attempt::Retry)
            })
            .await;

        assert_eq!(outcome, RetryOutcome::Exhausted { attempts: 3 });
        assert_eq!(
            fired,
            vec![
                Duration::from_millis(800),
                Duration::from_millis(2300),
                Duration::from_millis(4300)
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn stops_on_first_conclusive_attempt() {
        let mut calls = 0;
        let outcome = RetrySchedule::default()
            .run(|n| {
                calls += 1;
                ready(if n == 2 { Attempt::Done("found") } else { Attempt::Retry })
            })
            .await;

        assert_eq!(
            outcome,
            RetryOutcome::Completed {
                value: "found",
                attempt: 2
            }
        );
        assert_eq!(calls, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn empty_schedule_is_immediately_exhausted() {
        let outcome: RetryOutcome<()> = RetrySchedule::new(vec![])
            .run(|_| ready(Attempt::Retry))
            .await;
        assert!(outcome.is_exhausted());
        assert_eq!(outcome.value(), None);
    }
}
