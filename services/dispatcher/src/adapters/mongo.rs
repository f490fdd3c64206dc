//! services/dispatcher/src/adapters/mongo.rs
//!
//! This module contains the document store adapter, which is the concrete
//! implementation of the `ContentRepository` port from the `core` crate. It reads
//! the `daily_learnings` collection using the official `mongodb` driver.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use daily_learning_core::domain::{DailyLearningRecord, FollowupQuestion};
use daily_learning_core::ports::{ContentRepository, PortError, PortResult};
use mongodb::bson::{doc, Bson, DateTime as BsonDateTime, Document};
use mongodb::error::{Error as MongoError, ErrorKind};
use mongodb::{Client, Collection};
use serde::Deserialize;
use tracing::debug;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A repository adapter that implements the `ContentRepository` port.
#[derive(Clone)]
pub struct MongoContentRepository {
    collection: Collection<LearningDocument>,
}

impl MongoContentRepository {
    /// Creates a new `MongoContentRepository` on an existing client.
    pub fn new(client: &Client, database: &str, collection: &str) -> Self {
        Self {
            collection: client.database(database).collection(collection),
        }
    }

    /// Opens a client for `uri` and binds it to `database.collection`.
    ///
    /// The driver connects lazily, so an unreachable server surfaces on the
    /// first query rather than here.
    pub async fn connect(uri: &str, database: &str, collection: &str) -> Result<Self, MongoError> {
        let client = Client::with_uri_str(uri).await?;
        Ok(Self::new(&client, database, collection))
    }
}

//=========================================================================================
// "Impure" Document Structs
//=========================================================================================

/// The projected shape of a `daily_learnings` document.
///
/// Both fields are kept as raw BSON: the producer's schema is not validated
/// here, and a malformed question entry must not break the morning email.
#[derive(Debug, Deserialize)]
struct LearningDocument {
    #[serde(default)]
    content_url: Option<Bson>,
    #[serde(default)]
    followup_questions: Option<Bson>,
}

impl LearningDocument {
    fn to_domain(self, learning_date: NaiveDate) -> DailyLearningRecord {
        DailyLearningRecord {
            learning_date,
            content_url: self.content_url.as_ref().and_then(field_text),
            followup_questions: self.followup_questions.as_ref().and_then(question_list),
        }
    }
}

/// Renders a scalar field as text. `null` is absent; falsy values (`false`,
/// zero, empty containers) become `""` so they read as "not found".
fn field_text(value: &Bson) -> Option<String> {
    let text = match value {
        Bson::Null | Bson::Undefined => return None,
        Bson::String(s) => s.clone(),
        Bson::Boolean(true) => "True".to_string(),
        Bson::Boolean(false) => String::new(),
        Bson::Int32(0) | Bson::Int64(0) => String::new(),
        Bson::Int32(n) => n.to_string(),
        Bson::Int64(n) => n.to_string(),
        Bson::Double(n) if *n == 0.0 => String::new(),
        Bson::Double(n) => n.to_string(),
        Bson::Array(items) if items.is_empty() => String::new(),
        Bson::Document(d) if d.is_empty() => String::new(),
        other => other.to_string(),
    };
    Some(text)
}

/// Reads `followup_questions`. Array entries are kept one-for-one; an entry
/// without a `question` key has no text. A non-array value counts as a single
/// entry without text when truthy, and as an empty list otherwise.
fn question_list(value: &Bson) -> Option<Vec<FollowupQuestion>> {
    match value {
        Bson::Null | Bson::Undefined => None,
        Bson::Array(items) => Some(items.iter().map(question_entry).collect()),
        other => match field_text(other) {
            Some(text) if !text.is_empty() => Some(vec![FollowupQuestion::untitled()]),
            _ => Some(Vec::new()),
        },
    }
}

fn question_entry(entry: &Bson) -> FollowupQuestion {
    let text = match entry {
        Bson::Document(d) => d.get("question").map(|q| match q {
            Bson::String(s) => s.clone(),
            other => other.to_string(),
        }),
        _ => None,
    };
    FollowupQuestion { question: text }
}

//=========================================================================================
// Query Construction
//=========================================================================================

/// The stored key for `date`: midnight UTC as a BSON datetime.
fn midnight(date: NaiveDate) -> BsonDateTime {
    let millis = Utc
        .from_utc_datetime(&date.and_time(NaiveTime::MIN))
        .timestamp_millis();
    BsonDateTime::from_millis(millis)
}

/// Exact-equality filter on `learning_date`.
fn learning_date_filter(date: NaiveDate) -> Document {
    doc! { "learning_date": midnight(date) }
}

fn content_projection() -> Document {
    doc! { "content_url": 1, "followup_questions": 1, "_id": 0 }
}

fn to_port_error(e: MongoError) -> PortError {
    match *e.kind {
        ErrorKind::ServerSelection { .. } => PortError::Connection(e.to_string()),
        _ => PortError::Query(e.to_string()),
    }
}

//=========================================================================================
// `ContentRepository` Trait Implementation
//=========================================================================================

#[async_trait]
impl ContentRepository for MongoContentRepository {
    async fn find_by_learning_date(
        &self,
        date: NaiveDate,
    ) -> PortResult<Option<DailyLearningRecord>> {
        debug!(
            collection = %self.collection.name(),
            learning_date = %date,
            "Querying daily learning record"
        );

        let document = self
            .collection
            .find_one(learning_date_filter(date))
            .projection(content_projection())
            .await
            .map_err(to_port_error)?;

        Ok(document.map(|d| d.to_domain(date)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::from_document;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn filter_matches_midnight_utc_exactly() {
        let filter = learning_date_filter(date(2024, 3, 1));
        // 2024-03-01T00:00:00Z
        let expected = BsonDateTime::from_millis(1_709_251_200_000);
        assert_eq!(filter, doc! { "learning_date": expected });
    }

    #[test]
    fn projection_keeps_only_the_two_content_fields() {
        let projection = content_projection();
        assert_eq!(projection.get_i32("content_url").unwrap(), 1);
        assert_eq!(projection.get_i32("followup_questions").unwrap(), 1);
        assert_eq!(projection.get_i32("_id").unwrap(), 0);
        assert_eq!(projection.len(), 3);
    }

    #[test]
    fn full_document_maps_to_record() {
        let raw = doc! {
            "content_url": "https://example.com/lesson",
            "followup_questions": [
                { "question": "What is ownership?" },
                { "question": "Why borrow?" },
            ],
        };
        let parsed: LearningDocument = from_document(raw).unwrap();
        let record = parsed.to_domain(date(2024, 3, 1));

        assert_eq!(record.learning_date, date(2024, 3, 1));
        assert_eq!(record.content_url.as_deref(), Some("https://example.com/lesson"));
        assert_eq!(
            record.followup_questions,
            Some(vec![
                FollowupQuestion::new("What is ownership?"),
                FollowupQuestion::new("Why borrow?"),
            ])
        );
    }

    #[test]
    fn absent_fields_stay_absent() {
        let parsed: LearningDocument = from_document(doc! {}).unwrap();
        let record = parsed.to_domain(date(2024, 3, 1));
        assert_eq!(record.content_url, None);
        assert_eq!(record.followup_questions, None);
    }

    #[test]
    fn null_fields_are_treated_as_absent() {
        let raw = doc! { "content_url": null, "followup_questions": null };
        let record = from_document::<LearningDocument>(raw)
            .unwrap()
            .to_domain(date(2024, 3, 1));
        assert_eq!(record.content_url, None);
        assert_eq!(record.followup_questions, None);
    }

    #[test]
    fn question_entries_without_text_still_decode() {
        let raw = doc! {
            "content_url": "https://x",
            "followup_questions": [
                { "prompt": "no question key" },
                { "question": 5 },
                "bare string",
            ],
        };
        let record = from_document::<LearningDocument>(raw)
            .unwrap()
            .to_domain(date(2024, 3, 1));

        assert_eq!(record.content_url.as_deref(), Some("https://x"));
        assert_eq!(
            record.followup_questions,
            Some(vec![
                FollowupQuestion::untitled(),
                FollowupQuestion::new("5"),
                FollowupQuestion::untitled(),
            ])
        );
    }

    #[test]
    fn non_string_content_url_is_rendered_as_text() {
        let record = from_document::<LearningDocument>(doc! { "content_url": 42 })
            .unwrap()
            .to_domain(date(2024, 3, 1));
        assert_eq!(record.content_url.as_deref(), Some("42"));

        let record = from_document::<LearningDocument>(doc! { "content_url": false })
            .unwrap()
            .to_domain(date(2024, 3, 1));
        assert_eq!(record.content_url.as_deref(), Some(""));
    }

    #[test]
    fn non_array_questions_follow_truthiness() {
        let record = from_document::<LearningDocument>(doc! { "followup_questions": "" })
            .unwrap()
            .to_domain(date(2024, 3, 1));
        assert_eq!(record.followup_questions, Some(vec![]));

        let record = from_document::<LearningDocument>(doc! { "followup_questions": "A?" })
            .unwrap()
            .to_domain(date(2024, 3, 1));
        assert_eq!(record.followup_questions, Some(vec![FollowupQuestion::untitled()]));
    }
}
