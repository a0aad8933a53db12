//! Derived-view filtering and facet derivation.
//!
//! Pure functions over a snapshot; the store is never mutated. All
//! criteria combine with logical AND. Facets are always derived from the
//! full unfiltered collection so choice controls keep showing every value.

use crate::models::{Document, FilterCriteria};

/// Apply criteria to a collection, preserving input order.
pub fn apply(documents: &[Document], criteria: &FilterCriteria) -> Vec<Document> {
    documents
        .iter()
        .filter(|doc| matches(doc, criteria))
        .cloned()
        .collect()
}

/// Distinct non-empty category values, sorted ascending.
pub fn categories(documents: &[Document]) -> Vec<String> {
    facet(documents, |doc| doc.category.as_deref())
}

/// Distinct non-empty doc_type values, sorted ascending.
pub fn doc_types(documents: &[Document]) -> Vec<String> {
    facet(documents, |doc| doc.doc_type.as_deref())
}

fn facet(documents: &[Document], field: impl Fn(&Document) -> Option<&str>) -> Vec<String> {
    let mut values: Vec<String> = documents
        .iter()
        .filter_map(&field)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect();
    values.sort();
    values.dedup();
    values
}

fn matches(doc: &Document, criteria: &FilterCriteria) -> bool {
    if !criteria.query.is_empty() {
        let haystack = format!(
            "{} {} {}",
            doc.file_name,
            doc.supplier.as_deref().unwrap_or(""),
            doc.text_content.as_deref().unwrap_or(""),
        )
        .to_lowercase();
        if !haystack.contains(&criteria.query.to_lowercase()) {
            return false;
        }
    }

    if !criteria.category.is_empty() && doc.category.as_deref() != Some(criteria.category.as_str())
    {
        return false;
    }

    if !criteria.doc_type.is_empty() && doc.doc_type.as_deref() != Some(criteria.doc_type.as_str())
    {
        return false;
    }

    if criteria.date_from.is_some() || criteria.date_to.is_some() {
        // Comparison happens at day granularity, so `to` is inclusive
        // through the end of that day by construction.
        let Some(day) = doc.representative_date() else {
            return false;
        };
        if let Some(from) = criteria.date_from {
            if day < from {
                return false;
            }
        }
        if let Some(to) = criteria.date_to {
            if day > to {
                return false;
            }
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn dated(id: &str, category: &str, issue_date: &str) -> Document {
        Document {
            category: Some(category.into()),
            issue_date: Some(issue_date.into()),
            ..Document::stub(id)
        }
    }

    fn day(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn empty_criteria_is_identity() {
        let docs = vec![
            dated("a", "Invoice", "2024-01-10"),
            dated("b", "Receipt", "2024-02-20"),
            Document::stub("c"),
        ];
        let result = apply(&docs, &FilterCriteria::default());
        assert_eq!(result, docs, "order and count preserved");
    }

    #[test]
    fn apply_is_idempotent() {
        let docs = vec![
            dated("a", "Invoice", "2024-01-10"),
            dated("b", "Receipt", "2024-02-20"),
            dated("c", "Invoice", "2024-03-01"),
        ];
        let criteria = FilterCriteria {
            category: "Invoice".into(),
            date_from: day(2024, 1, 1),
            ..FilterCriteria::default()
        };
        let once = apply(&docs, &criteria);
        let twice = apply(&once, &criteria);
        assert_eq!(once, twice);
    }

    #[test]
    fn category_exact_match_scenario() {
        let docs = vec![
            dated("a", "Invoice", "2024-01-10"),
            dated("b", "Receipt", "2024-02-20"),
        ];
        let criteria = FilterCriteria {
            category: "Invoice".into(),
            ..FilterCriteria::default()
        };
        let result = apply(&docs, &criteria);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "a");
    }

    #[test]
    fn category_match_is_exact_not_substring() {
        let docs = vec![dated("a", "Invoice", "2024-01-10")];
        let criteria = FilterCriteria {
            category: "Invoic".into(),
            ..FilterCriteria::default()
        };
        assert!(apply(&docs, &criteria).is_empty());
    }

    #[test]
    fn query_searches_name_supplier_and_text_case_insensitively() {
        let docs = vec![
            Document {
                supplier: Some("ACME GmbH".into()),
                ..Document::stub("a")
            },
            Document {
                text_content: Some("Total due: 42 EUR from acme".into()),
                ..Document::stub("b")
            },
            Document::stub("c"),
        ];
        let criteria = FilterCriteria {
            query: "acme".into(),
            ..FilterCriteria::default()
        };
        let filtered = apply(&docs, &criteria);
        let ids: Vec<&str> = filtered.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn query_matches_file_name() {
        let docs = vec![Document::stub("tax-return")];
        let criteria = FilterCriteria {
            query: "TAX".into(),
            ..FilterCriteria::default()
        };
        assert_eq!(apply(&docs, &criteria).len(), 1);
    }

    #[test]
    fn same_day_range_is_inclusive() {
        let docs = vec![dated("a", "Invoice", "2024-03-15")];

        let criteria = FilterCriteria {
            date_from: day(2024, 3, 15),
            date_to: day(2024, 3, 15),
            ..FilterCriteria::default()
        };
        assert_eq!(apply(&docs, &criteria).len(), 1);

        let criteria = FilterCriteria {
            date_from: day(2024, 3, 16),
            ..FilterCriteria::default()
        };
        assert!(apply(&docs, &criteria).is_empty());
    }

    #[test]
    fn to_bound_includes_timestamps_within_that_day() {
        let docs = vec![Document {
            created_at: Some("2024-03-15T23:59:59Z".into()),
            ..Document::stub("a")
        }];
        let criteria = FilterCriteria {
            date_to: day(2024, 3, 15),
            ..FilterCriteria::default()
        };
        assert_eq!(apply(&docs, &criteria).len(), 1);
    }

    #[test]
    fn undated_document_fails_any_range() {
        let docs = vec![Document::stub("a")];
        let criteria = FilterCriteria {
            date_to: day(2030, 1, 1),
            ..FilterCriteria::default()
        };
        assert!(apply(&docs, &criteria).is_empty());
    }

    #[test]
    fn criteria_combine_with_and() {
        let docs = vec![
            dated("a", "Invoice", "2024-01-10"),
            dated("b", "Invoice", "2024-06-10"),
        ];
        let criteria = FilterCriteria {
            category: "Invoice".into(),
            date_to: day(2024, 3, 1),
            ..FilterCriteria::default()
        };
        let result = apply(&docs, &criteria);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "a");
    }

    #[test]
    fn facets_are_sorted_deduplicated_and_skip_empties() {
        let docs = vec![
            dated("a", "Receipt", "2024-01-01"),
            dated("b", "Invoice", "2024-01-02"),
            dated("c", "Receipt", "2024-01-03"),
            Document {
                category: Some(String::new()),
                ..Document::stub("d")
            },
            Document::stub("e"),
        ];
        assert_eq!(categories(&docs), vec!["Invoice", "Receipt"]);
    }

    #[test]
    fn facets_reflect_full_collection_not_filtered_view() {
        let docs = vec![
            dated("a", "Invoice", "2024-01-10"),
            dated("b", "Receipt", "2024-02-20"),
        ];
        let criteria = FilterCriteria {
            category: "Invoice".into(),
            ..FilterCriteria::default()
        };
        let filtered = apply(&docs, &criteria);
        assert_eq!(filtered.len(), 1);
        // Facets stay derived from the unfiltered snapshot.
        assert_eq!(categories(&docs), vec!["Invoice", "Receipt"]);
    }

    #[test]
    fn doc_type_facet_mirrors_category_behavior() {
        let docs = vec![
            Document {
                doc_type: Some("pdf".into()),
                ..Document::stub("a")
            },
            Document {
                doc_type: Some("image".into()),
                ..Document::stub("b")
            },
            Document {
                doc_type: Some("pdf".into()),
                ..Document::stub("c")
            },
        ];
        assert_eq!(doc_types(&docs), vec!["image", "pdf"]);

        let criteria = FilterCriteria {
            doc_type: "image".into(),
            ..FilterCriteria::default()
        };
        let result = apply(&docs, &criteria);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "b");
    }
}
