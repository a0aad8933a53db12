use chrono::NaiveDate;

/// Criteria for deriving a filtered view of the document collection.
///
/// Empty strings are wildcards; `None` date bounds are open-ended. Owned by
/// the filter engine, never persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    /// Case-insensitive substring match over file name, supplier, and
    /// extracted text. Empty matches everything.
    pub query: String,
    /// Exact category match; empty = any.
    pub category: String,
    /// Exact document-type match; empty = any.
    pub doc_type: String,
    /// Inclusive lower bound on the document's representative date.
    pub date_from: Option<NaiveDate>,
    /// Inclusive upper bound, through the end of that day.
    pub date_to: Option<NaiveDate>,
}

impl FilterCriteria {
    /// True when every criterion is a wildcard.
    pub fn is_empty(&self) -> bool {
        self.query.is_empty()
            && self.category.is_empty()
            && self.doc_type.is_empty()
            && self.date_from.is_none()
            && self.date_to.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_empty() {
        assert!(FilterCriteria::default().is_empty());
    }

    #[test]
    fn any_set_criterion_is_not_empty() {
        let criteria = FilterCriteria {
            category: "Invoice".into(),
            ..FilterCriteria::default()
        };
        assert!(!criteria.is_empty());

        let criteria = FilterCriteria {
            date_to: NaiveDate::from_ymd_opt(2024, 1, 1),
            ..FilterCriteria::default()
        };
        assert!(!criteria.is_empty());
    }
}
