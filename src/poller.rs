use std::time::Duration;

use chrono::NaiveDate;
use tracing::{debug, error, info, warn};

use crate::error::BotError;
use crate::platform::{ChatTransport, Notifier};
use crate::review::{check_response, current_date, parse_status, ReviewApi};

/// Last report that actually reached the chat.
#[derive(Debug, Default)]
pub struct NotificationState {
    last_report: Option<String>,
}

impl NotificationState {
    pub fn is_new(&self, report: &str) -> bool {
        self.last_report.as_deref() != Some(report)
    }

    pub fn record(&mut self, report: String) {
        self.last_report = Some(report);
    }

    #[allow(dead_code)]
    pub fn last_report(&self) -> Option<&str> {
        self.last_report.as_deref()
    }
}

/// What a single poll cycle ended with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A new report was delivered.
    Notified,
    /// The report matched the last delivered one.
    Unchanged,
    /// A new report could not be delivered; it will be retried next cycle.
    DeliveryFailed,
    /// Nothing to report.
    Silent,
}

pub struct PollerSettings {
    pub retry_period: Duration,
    pub initial_cursor: i64,
    pub report_empty: bool,
    /// Local date shown in the "nothing new" report.
    pub started_on: NaiveDate,
}

/// Drives the fetch, diff and notify cycle.
pub struct Poller<A, T> {
    api: A,
    notifier: Notifier<T>,
    settings: PollerSettings,
    cursor: i64,
    state: NotificationState,
}

fn failure_report(err: &BotError) -> String {
    format!("Сбой в работе программы: {}", err)
}

fn nothing_new_report(since: NaiveDate) -> String {
    format!(
        "За период от {} до настоящего момента домашних работ нет.",
        since
    )
}

impl<A: ReviewApi, T: ChatTransport> Poller<A, T> {
    pub fn new(api: A, notifier: Notifier<T>, settings: PollerSettings) -> Self {
        let cursor = settings.initial_cursor;
        Self {
            api,
            notifier,
            settings,
            cursor,
            state: NotificationState::default(),
        }
    }

    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    #[allow(dead_code)]
    pub fn state(&self) -> &NotificationState {
        &self.state
    }

    /// Poll forever, sleeping the fixed retry period after every cycle.
    pub async fn run(mut self) {
        info!(
            "Polling every {:?}, notifying chat {}",
            self.settings.retry_period,
            self.notifier.chat_id()
        );
        loop {
            let outcome = self.tick().await;
            debug!("Cycle finished: {:?} (cursor={})", outcome, self.cursor());
            tokio::time::sleep(self.settings.retry_period).await;
        }
    }

    /// Run one cycle: fetch, build the report, deliver it if it changed.
    pub async fn tick(&mut self) -> CycleOutcome {
        let report = match self.poll().await {
            Ok(Some(report)) => report,
            Ok(None) => {
                debug!("No homeworks in response");
                return CycleOutcome::Silent;
            }
            Err(e) => {
                error!("Poll cycle failed: {:?}", e);
                failure_report(&e)
            }
        };

        if !self.state.is_new(&report) {
            debug!("No new statuses to report");
            return CycleOutcome::Unchanged;
        }

        match self.notifier.notify(&report).await {
            Ok(()) => {
                self.state.record(report);
                CycleOutcome::Notified
            }
            Err(e) => {
                warn!("Report kept for the next cycle: {}", e);
                CycleOutcome::DeliveryFailed
            }
        }
    }

    async fn poll(&mut self) -> Result<Option<String>, BotError> {
        let payload = self.api.fetch(self.cursor).await?;
        if let Some(next) = current_date(&payload) {
            debug!("Advancing cursor {} -> {}", self.cursor, next);
            self.cursor = next;
        }

        let homeworks = check_response(&payload)?;

        let report = match homeworks.first() {
            Some(latest) => Some(parse_status(latest)?),
            None if self.settings.report_empty => {
                Some(nothing_new_report(self.settings.started_on))
            }
            None => None,
        };

        Ok(report)
    }
}
