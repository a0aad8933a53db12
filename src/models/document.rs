use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A server-tracked file plus the metadata the service derives for it.
///
/// Always a deserialization target, never constructed locally. The
/// classification fields (`category`, `doc_type`, `supplier`, amounts,
/// confidence) are populated asynchronously by the service and may be
/// absent; absence is distinct from an empty string. The client treats
/// every instance as an immutable snapshot — mutations go through the
/// service keyed by `id`, followed by a full re-fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Opaque stable identity; the sole key for delete and signed-url calls.
    pub id: String,
    pub file_name: String,
    /// Direct link to the stored file, when the service exposes one.
    pub file_url: Option<String>,
    pub category: Option<String>,
    pub doc_type: Option<String>,
    pub supplier: Option<String>,
    /// Text extracted by the service, searched by the free-text filter.
    pub text_content: Option<String>,
    pub amount: Option<f64>,
    /// Opaque score; the client never interprets its range.
    pub ai_confidence: Option<f64>,
    pub issue_date: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub deleted_at: Option<String>,
    /// Legacy timestamp some server revisions emit instead of `created_at`.
    pub uploaded_at: Option<String>,
    pub user_id: Option<String>,
}

impl Document {
    /// Resolve the date used for range filtering: `issue_date`, else
    /// `created_at`, else `uploaded_at`. Returns `None` when no field
    /// yields a parseable calendar date.
    pub fn representative_date(&self) -> Option<NaiveDate> {
        [&self.issue_date, &self.created_at, &self.uploaded_at]
            .into_iter()
            .flatten()
            .find_map(|raw| parse_day(raw))
    }
}

/// Extract the calendar day from an ISO-8601-like string, tolerating a
/// trailing time component (`2024-03-15T10:30:00Z` parses as `2024-03-15`).
pub(crate) fn parse_day(raw: &str) -> Option<NaiveDate> {
    let day = raw.get(..10)?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

#[cfg(test)]
impl Document {
    /// Minimal fixture for tests; set the fields a case cares about with
    /// struct update syntax.
    pub(crate) fn stub(id: &str) -> Self {
        Document {
            id: id.to_string(),
            file_name: format!("{id}.pdf"),
            file_url: None,
            category: None,
            doc_type: None,
            supplier: None,
            text_content: None,
            amount: None,
            ai_confidence: None,
            issue_date: None,
            created_at: None,
            updated_at: None,
            deleted_at: None,
            uploaded_at: None,
            user_id: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_with_only_required_fields() {
        let doc: Document =
            serde_json::from_str(r#"{"id":"d1","file_name":"scan.pdf"}"#).unwrap();
        assert_eq!(doc.id, "d1");
        assert_eq!(doc.file_name, "scan.pdf");
        assert!(doc.category.is_none());
        assert!(doc.amount.is_none());
    }

    #[test]
    fn absent_field_differs_from_empty_string() {
        let absent: Document =
            serde_json::from_str(r#"{"id":"d1","file_name":"a"}"#).unwrap();
        let empty: Document =
            serde_json::from_str(r#"{"id":"d1","file_name":"a","supplier":""}"#).unwrap();
        assert_eq!(absent.supplier, None);
        assert_eq!(empty.supplier, Some(String::new()));
    }

    #[test]
    fn representative_date_prefers_issue_date() {
        let doc = Document {
            issue_date: Some("2024-01-10".into()),
            created_at: Some("2024-02-20T08:00:00Z".into()),
            ..Document::stub("d")
        };
        assert_eq!(
            doc.representative_date(),
            NaiveDate::from_ymd_opt(2024, 1, 10)
        );
    }

    #[test]
    fn representative_date_falls_back_through_created_and_uploaded() {
        let doc = Document {
            created_at: Some("2024-02-20T08:00:00Z".into()),
            ..Document::stub("d")
        };
        assert_eq!(
            doc.representative_date(),
            NaiveDate::from_ymd_opt(2024, 2, 20)
        );

        let doc = Document {
            uploaded_at: Some("2023-12-01".into()),
            ..Document::stub("d")
        };
        assert_eq!(
            doc.representative_date(),
            NaiveDate::from_ymd_opt(2023, 12, 1)
        );
    }

    #[test]
    fn unparseable_dates_resolve_to_none() {
        let doc = Document {
            issue_date: Some("last tuesday".into()),
            ..Document::stub("d")
        };
        assert_eq!(doc.representative_date(), None);
        assert_eq!(Document::stub("d").representative_date(), None);
    }

    #[test]
    fn parse_day_strips_time_component() {
        assert_eq!(
            parse_day("2024-03-15T23:59:59.999Z"),
            NaiveDate::from_ymd_opt(2024, 3, 15)
        );
        assert_eq!(parse_day("2024-3-5"), None);
        assert_eq!(parse_day(""), None);
    }
}
