use std::time::Duration;

use tracing::{debug, error, info};

use crate::config::{CursorPolicy, PollConfig};
use crate::error::CycleError;
use crate::homework;
use crate::messenger::{self, Messenger};
use crate::practicum::StatusSource;

/// What a single poll cycle ended with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A new message (status or failure report) was delivered.
    Sent,
    /// The message matched the last one delivered; nothing was sent.
    Unchanged,
    /// The response carried no homework records.
    NoUpdates,
    /// Delivery of a new message failed; it will be retried next cycle.
    NotSent,
}

/// Result of the fetch/validate/extract half of a cycle.
struct Poll {
    message: Option<String>,
    current_date: Option<i64>,
}

/// Owns the cursor and the last delivered message across cycles.
pub struct Poller<S, M> {
    source: S,
    messenger: M,
    chat_id: String,
    retry_period: Duration,
    cursor_policy: CursorPolicy,
    cursor: i64,
    last_message: Option<String>,
}

impl<S: StatusSource, M: Messenger> Poller<S, M> {
    pub fn new(
        source: S,
        messenger: M,
        chat_id: impl Into<String>,
        poll: &PollConfig,
        cursor: i64,
    ) -> Self {
        Self {
            source,
            messenger,
            chat_id: chat_id.into(),
            retry_period: poll.retry_period(),
            cursor_policy: poll.cursor_policy,
            cursor,
            last_message: None,
        }
    }

    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    /// Poll forever, sleeping the retry period after every cycle.
    pub async fn run(mut self) {
        info!(
            cursor = self.cursor,
            retry_period_secs = self.retry_period.as_secs(),
            "Starting homework status polling"
        );
        loop {
            let outcome = self.run_cycle().await;
            debug!(?outcome, cursor = self.cursor(), "Cycle finished");
            tokio::time::sleep(self.retry_period).await;
        }
    }

    async fn poll(&self) -> Result<Poll, CycleError> {
        let response = self.source.fetch(self.cursor).await?;
        let homeworks = homework::check_response(&response)?;
        let message = match homeworks.first() {
            Some(record) => Some(homework::parse_status(record)?),
            None => None,
        };
        Ok(Poll {
            message,
            current_date: homework::current_date(&response),
        })
    }

    pub async fn run_cycle(&mut self) -> CycleOutcome {
        let (message, current_date) = match self.poll().await {
            Ok(Poll {
                message,
                current_date,
            }) => {
                if self.cursor_policy == CursorPolicy::Always {
                    self.advance_cursor(current_date);
                }
                match message {
                    Some(message) => (message, current_date),
                    None => {
                        debug!("No new homework statuses");
                        return CycleOutcome::NoUpdates;
                    }
                }
            }
            Err(e) => {
                let message = format!("Program failure: {}", e);
                error!("{}", message);
                (message, None)
            }
        };

        if self.last_message.as_deref() == Some(message.as_str()) {
            debug!("Status unchanged, not sending: {}", message);
            return CycleOutcome::Unchanged;
        }

        if !messenger::send_message(&self.messenger, &self.chat_id, &message).await {
            return CycleOutcome::NotSent;
        }

        self.last_message = Some(message);
        if self.cursor_policy == CursorPolicy::OnDelivery {
            self.advance_cursor(current_date);
        }
        CycleOutcome::Sent
    }

    fn advance_cursor(&mut self, current_date: Option<i64>) {
        if let Some(date) = current_date {
            self.cursor = date;
        }
    }
}
