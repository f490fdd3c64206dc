//! services/dispatcher/src/lambda/protocol.rs
//!
//! Defines the invocation protocol between the scheduler and the dispatcher:
//! how the event type is read from the inbound payload and how the response
//! object is shaped.

use daily_learning_core::domain::{DispatchReport, ReportDetail};
use serde::Serialize;
use serde_json::Value;

/// The payload field that carries the event type.
pub const EVENT_TYPE_FIELD: &str = "detail-type";

//=========================================================================================
// Inbound Event
//=========================================================================================

/// Reads the event type from the payload.
///
/// A missing field (or a payload that is not an object) yields `""`. A
/// non-string value is rendered as its JSON text so it still shows up in the
/// "Unknown event type" message.
pub fn event_type(event: &Value) -> String {
    match event.get(EVENT_TYPE_FIELD) {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

//=========================================================================================
// Outbound Response
//=========================================================================================

/// The JSON object serialized into the response `body`.
///
/// Field order is part of the contract; the event-specific extras come last
/// and are omitted when they do not apply.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ResponseBody {
    pub event_received: Value,
    pub content_url_found: bool,
    pub followup_questions_found: bool,
    pub email_sent: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub questions_count: Option<usize>,
}

impl ResponseBody {
    pub fn new(event: Value, report: &DispatchReport) -> Self {
        let (content_url, questions_count) = match &report.detail {
            Some(ReportDetail::ContentUrl(url)) => (Some(url.clone()), None),
            Some(ReportDetail::QuestionsCount(count)) => (None, Some(*count)),
            None => (None, None),
        };

        Self {
            event_received: event,
            content_url_found: report.content_url_found,
            followup_questions_found: report.followup_questions_found,
            email_sent: report.email_sent,
            message: report.message.clone(),
            content_url,
            questions_count,
        }
    }
}

/// What the function returns to the runtime: a status code and the body as a
/// JSON string.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct InvocationResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

impl InvocationResponse {
    pub fn from_report(event: Value, report: &DispatchReport) -> Result<Self, serde_json::Error> {
        let body = serde_json::to_string(&ResponseBody::new(event, report))?;
        Ok(Self {
            status_code: report.status_code(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn report(email_sent: bool, message: &str, detail: Option<ReportDetail>) -> DispatchReport {
        DispatchReport {
            content_url_found: true,
            followup_questions_found: false,
            email_sent,
            message: message.to_string(),
            detail,
        }
    }

    #[test]
    fn event_type_reads_detail_type() {
        assert_eq!(event_type(&json!({ "detail-type": "morning_content" })), "morning_content");
        assert_eq!(event_type(&json!({ "source": "aws.events" })), "");
        assert_eq!(event_type(&json!("morning_content")), "");
        assert_eq!(event_type(&json!({ "detail-type": 42 })), "42");
    }

    #[test]
    fn morning_response_carries_the_url_and_status_200() {
        let event = json!({ "detail-type": "morning_content" });
        let response = InvocationResponse::from_report(
            event.clone(),
            &report(
                true,
                "Morning content email sent successfully",
                Some(ReportDetail::ContentUrl("https://x".to_string())),
            ),
        )
        .unwrap();

        assert_eq!(response.status_code, 200);
        let body: Value = serde_json::from_str(&response.body).unwrap();
        assert_eq!(
            body,
            json!({
                "event_received": event,
                "content_url_found": true,
                "followup_questions_found": false,
                "email_sent": true,
                "message": "Morning content email sent successfully",
                "content_url": "https://x",
            })
        );
    }

    #[test]
    fn body_fields_keep_their_order() {
        let response = InvocationResponse::from_report(
            json!({}),
            &report(false, "Failed to send evening questions email", Some(ReportDetail::QuestionsCount(3))),
        )
        .unwrap();

        assert_eq!(response.status_code, 500);
        assert_eq!(
            response.body,
            r#"{"event_received":{},"content_url_found":true,"followup_questions_found":false,"email_sent":false,"message":"Failed to send evening questions email","questions_count":3}"#
        );
    }

    #[test]
    fn response_serializes_status_code_in_camel_case() {
        let response = InvocationResponse {
            status_code: 500,
            body: "{}".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({ "statusCode": 500, "body": "{}" })
        );
    }
}
