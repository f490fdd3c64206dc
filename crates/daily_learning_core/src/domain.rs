//! crates/daily_learning_core/src/domain.rs
//!
//! Defines the pure, core data structures for the dispatcher.
//! These structs are independent of any database, mail or serialization format.

use chrono::NaiveDate;

/// The two event types the scheduler sends, as they appear in `detail-type`.
pub const MORNING_CONTENT: &str = "morning_content";
pub const EVENING_QUESTIONS: &str = "evening_questions";

/// A single follow-up question attached to a day's learning content.
///
/// `question` is `None` when the stored entry carries no question text. Such
/// entries still count towards "questions found"; only the evening email,
/// which needs the text, rejects them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FollowupQuestion {
    pub question: Option<String>,
}

impl FollowupQuestion {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: Some(question.into()),
        }
    }

    /// An entry with no usable question text.
    pub fn untitled() -> Self {
        Self { question: None }
    }

    pub fn text(&self) -> Option<&str> {
        self.question.as_deref()
    }
}

/// One calendar day's learning content, as written by the external producer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyLearningRecord {
    pub learning_date: NaiveDate,
    pub content_url: Option<String>,
    pub followup_questions: Option<Vec<FollowupQuestion>>,
}

/// What was found for today.
///
/// Both fields are `None` when no record matched. When a record matched,
/// absent fields are substituted with `""` and an empty list, so callers must
/// treat empty and absent the same way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodayContent {
    pub content_url: Option<String>,
    pub followup_questions: Option<Vec<FollowupQuestion>>,
}

impl TodayContent {
    pub fn from_record(record: Option<DailyLearningRecord>) -> Self {
        match record {
            Some(record) => Self {
                content_url: Some(record.content_url.unwrap_or_default()),
                followup_questions: Some(record.followup_questions.unwrap_or_default()),
            },
            None => Self::default(),
        }
    }

    /// The content URL, if there is a non-empty one.
    pub fn url(&self) -> Option<&str> {
        self.content_url.as_deref().filter(|url| !url.is_empty())
    }

    /// The follow-up questions, if there is at least one.
    pub fn questions(&self) -> Option<&[FollowupQuestion]> {
        self.followup_questions
            .as_deref()
            .filter(|questions| !questions.is_empty())
    }
}

/// The event discriminator, parsed from the inbound payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    MorningContent,
    EveningQuestions,
    Unknown(String),
}

impl EventKind {
    pub fn parse(event_type: &str) -> Self {
        match event_type {
            MORNING_CONTENT => Self::MorningContent,
            EVENING_QUESTIONS => Self::EveningQuestions,
            other => Self::Unknown(other.to_string()),
        }
    }
}

/// A composed email, ready to hand to a mail transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub subject: String,
    pub body: String,
}

/// The result of a single send attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Sent,
    Failed { reason: String },
}

impl DeliveryOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, Self::Sent)
    }
}

/// Event-specific extras carried in the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportDetail {
    ContentUrl(String),
    QuestionsCount(usize),
}

/// Outcome of one dispatch, before it is shaped into the invocation response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchReport {
    pub content_url_found: bool,
    pub followup_questions_found: bool,
    pub email_sent: bool,
    pub message: String,
    pub detail: Option<ReportDetail>,
}

impl DispatchReport {
    pub(crate) fn for_content(today: &TodayContent) -> Self {
        Self {
            content_url_found: today.url().is_some(),
            followup_questions_found: today.questions().is_some(),
            email_sent: false,
            message: String::new(),
            detail: None,
        }
    }

    /// 200 only when an email actually went out; everything else is 500,
    /// including days with nothing to send.
    pub fn status_code(&self) -> u16 {
        if self.email_sent {
            200
        } else {
            500
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_record_leaves_both_fields_unset() {
        let today = TodayContent::from_record(None);
        assert_eq!(today.content_url, None);
        assert_eq!(today.followup_questions, None);
    }

    #[test]
    fn absent_fields_are_substituted_with_empty_values() {
        let record = DailyLearningRecord {
            learning_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            content_url: None,
            followup_questions: None,
        };
        let today = TodayContent::from_record(Some(record));
        assert_eq!(today.content_url.as_deref(), Some(""));
        assert_eq!(today.followup_questions, Some(vec![]));
        assert!(today.url().is_none());
        assert!(today.questions().is_none());
    }

    #[test]
    fn event_kind_parses_known_and_unknown_values() {
        assert_eq!(EventKind::parse("morning_content"), EventKind::MorningContent);
        assert_eq!(EventKind::parse("evening_questions"), EventKind::EveningQuestions);
        assert_eq!(EventKind::parse(""), EventKind::Unknown(String::new()));
        assert_eq!(
            EventKind::parse("Morning_Content"),
            EventKind::Unknown("Morning_Content".to_string())
        );
    }

    #[test]
    fn status_code_follows_email_sent() {
        let mut report = DispatchReport::for_content(&TodayContent::default());
        assert_eq!(report.status_code(), 500);
        report.email_sent = true;
        assert_eq!(report.status_code(), 200);
    }
}
