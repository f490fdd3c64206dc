//! crates/daily_learning_core/src/dispatcher.rs
//!
//! Orchestrates one invocation: look up today's record, branch on the event
//! type, and send at most one email.

use crate::compose;
use crate::domain::{DispatchReport, EventKind, ReportDetail, TodayContent};
use crate::notifier::Notifier;
use crate::ports::{Clock, ContentRepository, PortError, PortResult};
use chrono::{FixedOffset, NaiveDate};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Wires the repository, notifier and clock together for a single invocation.
#[derive(Clone)]
pub struct DailyDispatcher {
    repository: Arc<dyn ContentRepository>,
    notifier: Notifier,
    clock: Arc<dyn Clock>,
    utc_offset: FixedOffset,
}

impl DailyDispatcher {
    /// Creates a dispatcher whose "today" is the calendar date at `utc_offset`.
    pub fn new(
        repository: Arc<dyn ContentRepository>,
        notifier: Notifier,
        clock: Arc<dyn Clock>,
        utc_offset: FixedOffset,
    ) -> Self {
        Self {
            repository,
            notifier,
            clock,
            utc_offset,
        }
    }

    /// The calendar date used as the lookup key.
    pub fn today(&self) -> NaiveDate {
        self.clock.now().with_timezone(&self.utc_offset).date_naive()
    }

    /// Fetches today's content. Repository errors are fatal and propagate.
    pub async fn fetch_today(&self) -> PortResult<TodayContent> {
        let today = self.today();
        debug!(learning_date = %today, "Looking up today's learning record");

        let record = self.repository.find_by_learning_date(today).await?;
        if record.is_none() {
            info!(learning_date = %today, "No learning record for today");
        }
        Ok(TodayContent::from_record(record))
    }

    /// Runs one invocation for the given `detail-type` value.
    ///
    /// The record is fetched before branching, so a repository failure aborts
    /// the invocation even for unknown event types. Question text is only
    /// required by the evening branch.
    pub async fn dispatch(&self, event_type: &str) -> PortResult<DispatchReport> {
        let today = self.fetch_today().await?;
        let mut report = DispatchReport::for_content(&today);

        match EventKind::parse(event_type) {
            EventKind::MorningContent => match today.url() {
                Some(url) => {
                    let email = compose::morning_email(url);
                    let outcome = self.notifier.deliver(&email).await;
                    report.email_sent = outcome.is_sent();
                    report.message = if report.email_sent {
                        "Morning content email sent successfully"
                    } else {
                        "Failed to send morning content email"
                    }
                    .to_string();
                    report.detail = Some(ReportDetail::ContentUrl(url.to_string()));
                }
                None => {
                    report.message = "No content URL found for today".to_string();
                }
            },
            EventKind::EveningQuestions => match today.questions() {
                Some(questions) => {
                    let email = compose::evening_email(questions)
                        .map_err(|e| PortError::MalformedRecord(e.to_string()))?;
                    let outcome = self.notifier.deliver(&email).await;
                    report.email_sent = outcome.is_sent();
                    report.message = if report.email_sent {
                        "Evening questions email sent successfully"
                    } else {
                        "Failed to send evening questions email"
                    }
                    .to_string();
                    report.detail = Some(ReportDetail::QuestionsCount(questions.len()));
                }
                None => {
                    report.message = "No follow-up questions found for today".to_string();
                }
            },
            EventKind::Unknown(other) => {
                warn!(event_type = %other, "Unknown event type");
                report.message = format!("Unknown event type: {}", other);
            }
        }

        info!(
            email_sent = report.email_sent,
            message = %report.message,
            "Dispatch finished"
        );
        Ok(report)
    }
}
