//! Note domain model.
//!
//! A [`Note`] pairs what the user threw into the jar with the affirmation that
//! came back. Notes are immutable once created; the store only ever inserts or
//! removes whole notes. The serialized shape uses camelCase keys and epoch
//! milliseconds so files written by earlier versions of the jar load unchanged.

use chrono::{Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// A saved journal entry.
///
/// # Fields
///
/// - `id`: Unique identifier, compared for idempotent saves
/// - `original_text`: The draft the user wrote
/// - `transformed_text`: First-person affirmation returned by the gateway
/// - `quote`: Attributed quotation, absent on notes written without one
/// - `created_at`: Epoch milliseconds when the transformation completed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub original_text: String,
    pub transformed_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote: Option<String>,
    pub created_at: i64,
}

impl Note {
    /// Creates a note from a draft and its transformation.
    ///
    /// Assigns a fresh UUID v4 id and stamps `created_at` with the current time.
    ///
    /// # Examples
    ///
    /// ```
    /// use emotion_jar::domain::{Note, Transformation};
    ///
    /// let note = Note::new("今天很累", Transformation::new("我允许自己休息。", "—— 某人"));
    /// assert_eq!(note.original_text, "今天很累");
    /// assert_eq!(note.quote.as_deref(), Some("—— 某人"));
    /// ```
    #[must_use]
    pub fn new(original_text: impl Into<String>, transformation: Transformation) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            original_text: original_text.into(),
            transformed_text: transformation.transformed_text,
            quote: Some(transformation.quote),
            created_at: Utc::now().timestamp_millis(),
        }
    }

    /// Returns the creation date as `YYYY-MM-DD` in local time.
    ///
    /// Out-of-range timestamps render as an empty string.
    #[must_use]
    pub fn created_date(&self) -> String {
        Local
            .timestamp_millis_opt(self.created_at)
            .single()
            .map(|dt| dt.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }
}

/// The pair of display strings produced for one draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transformation {
    pub transformed_text: String,
    pub quote: String,
}

impl Transformation {
    #[must_use]
    pub fn new(transformed_text: impl Into<String>, quote: impl Into<String>) -> Self {
        Self {
            transformed_text: transformed_text.into(),
            quote: quote.into(),
        }
    }

    /// Returns `true` when both strings carry visible content.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.transformed_text.trim().is_empty() && !self.quote.trim().is_empty()
    }
}

/// Returns `true` if the draft may be submitted (contains non-whitespace).
#[must_use]
pub fn is_submittable(draft: &str) -> bool {
    !draft.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_notes_get_distinct_ids() {
        let a = Note::new("a", Transformation::new("x", "y"));
        let b = Note::new("a", Transformation::new("x", "y"));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let note = Note {
            id: "1700000000000".to_string(),
            original_text: "累".to_string(),
            transformed_text: "我在呢".to_string(),
            quote: None,
            created_at: 1_700_000_000_000,
        };
        let json = serde_json::to_value(&note).unwrap();
        assert_eq!(json["originalText"], "累");
        assert_eq!(json["createdAt"], 1_700_000_000_000_i64);
        assert!(json.get("quote").is_none());
    }

    #[test]
    fn reads_notes_without_quote() {
        let raw = r#"{"id":"1","originalText":"o","transformedText":"t","createdAt":5}"#;
        let note: Note = serde_json::from_str(raw).unwrap();
        assert_eq!(note.quote, None);
        assert_eq!(note.created_at, 5);
    }

    #[test]
    fn whitespace_drafts_are_not_submittable() {
        assert!(!is_submittable(""));
        assert!(!is_submittable("  \n\t "));
        assert!(is_submittable(" 今天很累 "));
    }

    #[test]
    fn blank_fields_make_transformation_incomplete() {
        assert!(Transformation::new("a", "b").is_complete());
        assert!(!Transformation::new(" ", "b").is_complete());
        assert!(!Transformation::new("a", "").is_complete());
    }

    #[test]
    fn created_date_has_calendar_shape() {
        let note = Note::new("a", Transformation::new("x", "y"));
        let date = note.created_date();
        assert_eq!(date.len(), 10);
        assert_eq!(date.matches('-').count(), 2);
    }
}
