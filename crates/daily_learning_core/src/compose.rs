//! crates/daily_learning_core/src/compose.rs
//!
//! Builds the subject and body of the two daily emails.

use crate::domain::{EmailMessage, FollowupQuestion};

pub const MORNING_SUBJECT: &str = "Daily Learning Content";
pub const EVENING_SUBJECT: &str = "Daily Learning Follow-up Questions";

/// The morning email: a single line carrying today's content URL.
pub fn morning_email(content_url: &str) -> EmailMessage {
    EmailMessage {
        subject: MORNING_SUBJECT.to_string(),
        body: format!("Today's Learning Content URL: {}", content_url),
    }
}

/// The evening email: a header line followed by a 1-based numbered list,
/// one question per line, each line newline-terminated.
///
/// Fails with the 1-based position of the first entry that has no question text.
pub fn evening_email(questions: &[FollowupQuestion]) -> Result<EmailMessage, MissingQuestion> {
    let mut body = String::from("Today's Follow-up Questions:\n");
    for (index, q) in questions.iter().enumerate() {
        let text = q.text().ok_or(MissingQuestion(index + 1))?;
        body.push_str(&format!("{}. {}\n", index + 1, text));
    }

    Ok(EmailMessage {
        subject: EVENING_SUBJECT.to_string(),
        body,
    })
}

/// A follow-up question entry without question text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("follow-up question {0} has no question text")]
pub struct MissingQuestion(pub usize);

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn morning_body_embeds_the_url() {
        let email = morning_email("https://x");
        assert_eq!(email.subject, "Daily Learning Content");
        assert_eq!(email.body, "Today's Learning Content URL: https://x");
    }

    #[test]
    fn evening_body_is_a_numbered_list() {
        let email =
            evening_email(&[FollowupQuestion::new("A?"), FollowupQuestion::new("B?")]).unwrap();
        assert_eq!(email.subject, "Daily Learning Follow-up Questions");
        assert_eq!(email.body, "Today's Follow-up Questions:\n1. A?\n2. B?\n");
    }

    #[test]
    fn evening_numbering_goes_past_nine() {
        let questions: Vec<_> = (1..=10)
            .map(|i| FollowupQuestion::new(format!("Q{}", i)))
            .collect();
        let email = evening_email(&questions).unwrap();
        assert!(email.body.ends_with("9. Q9\n10. Q10\n"));
    }

    #[test]
    fn evening_rejects_entries_without_text() {
        let questions = [FollowupQuestion::new("A?"), FollowupQuestion::untitled()];
        assert_eq!(evening_email(&questions), Err(MissingQuestion(2)));
    }
}
