//! The poll loop: fetch, validate, compare, maybe notify, sleep.

mod state;

pub use state::{LoopState, Phase};

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Local, TimeZone};
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use crate::error::PollError;
use crate::notifier::Notifier;
use crate::practicum::{
    Homework, HomeworkSource, format_homework, format_verdict, validate_response,
};

/// What a single poll cycle ended with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The response carried no homeworks.
    NoHomeworks,
    /// The latest homework still has the last notified status.
    Unchanged { status: String },
    /// A new status reached the chat.
    Notified { status: String },
    /// A new status was seen but the send failed; it is retried next cycle.
    NotifyFailed { status: String },
    /// The cycle hit a [`PollError`]; `message` is its display text.
    Failed { message: String },
}

pub fn startup_message<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: fmt::Display,
{
    format!(
        "{}: Начали отслеживать статус домашки.",
        now.format("%d.%m.%y %H:%M")
    )
}

pub fn failure_message(err: &PollError) -> String {
    format!("Сбой в работе программы: {err}")
}

/// Fetch once and render the line `check` prints: the verdict for the
/// latest homework, or a note that nothing changed since `from_date`.
pub async fn check_report(
    source: &impl HomeworkSource,
    from_date: i64,
) -> Result<String, PollError> {
    let body = source.homework_statuses(from_date).await?;
    let response = validate_response(body)?;

    match response.homeworks.first() {
        Some(latest) => Ok(format_verdict(latest)?),
        None => Ok(format!("No homework updates since {from_date}.")),
    }
}

/// Drives one homework source and one notifier on a fixed interval.
pub struct Poller<S, N> {
    source: S,
    notifier: N,
    retry_period: Duration,
    state: LoopState,
}

impl<S: HomeworkSource, N: Notifier> Poller<S, N> {
    pub fn new(source: S, notifier: N, retry_period: Duration, from_date: i64) -> Self {
        Self {
            source,
            notifier,
            retry_period,
            state: LoopState::new(from_date),
        }
    }

    pub fn state(&self) -> &LoopState {
        &self.state
    }

    /// Announce that tracking has begun. A failed send is not fatal.
    pub async fn start(&mut self) -> bool {
        let sent = self.notifier.send(&startup_message(&Local::now())).await;
        if sent {
            info!(from_date = self.state.from_date(), "homework tracking started");
        } else {
            warn!("startup notification was not delivered, continuing");
        }
        self.state.begin_poll();
        sent
    }

    /// One cycle, with every failure surfaced to the caller.
    pub async fn poll_once(&mut self) -> Result<CycleOutcome, PollError> {
        self.state.begin_poll();
        let from_date = self.state.from_date();
        debug!(from_date, "polling homework statuses");

        let body = self.source.homework_statuses(from_date).await?;
        let response = validate_response(body)?;

        let Some(latest) = response.homeworks.first() else {
            debug!(from_date, "no homeworks in response");
            return Ok(CycleOutcome::NoHomeworks);
        };

        // A broken latest record fails the cycle even if its status is unchanged.
        let homework = Homework::from_value(latest)?;
        let message = format_homework(&homework)?;
        let status = homework.raw_status()?;

        if !self.state.is_new_status(status) {
            info!(
                status,
                retry_in_secs = self.retry_period.as_secs(),
                "homework status unchanged"
            );
            return Ok(CycleOutcome::Unchanged {
                status: status.to_string(),
            });
        }

        self.state.begin_notify();

        if self.notifier.send(&message).await {
            self.state
                .confirm_notified(status, response.current_date);
            info!(
                status,
                from_date = self.state.from_date(),
                "status change notification sent"
            );
            Ok(CycleOutcome::Notified {
                status: status.to_string(),
            })
        } else {
            self.state.notify_failed();
            warn!(status, "status change not delivered, will retry next cycle");
            Ok(CycleOutcome::NotifyFailed {
                status: status.to_string(),
            })
        }
    }

    /// One cycle with failures caught, logged and relayed to the chat.
    pub async fn tick(&mut self) -> CycleOutcome {
        match self.poll_once().await {
            Ok(outcome) => outcome,
            Err(err) => {
                self.state.fail();
                error!(error = %err, phase = %self.state.phase(), "poll cycle failed");
                if !self.notifier.send(&failure_message(&err)).await {
                    warn!("failure report was not delivered");
                }
                CycleOutcome::Failed {
                    message: err.to_string(),
                }
            }
        }
    }

    /// Run until the process is stopped.
    pub async fn run(&mut self) {
        self.start().await;
        loop {
            self.tick().await;
            sleep(self.retry_period).await;
        }
    }
}
