use std::collections::BTreeSet;

use crate::api::{Document, Preference, User};

/// Something that can sit in a paginated list and be searched locally.
pub trait ListItem: Clone + 'static {
    fn key(&self) -> &str;

    /// Fields matched by the free-text predicate.
    fn search_fields(&self) -> Vec<&str>;

    fn labels(&self) -> &[String] {
        &[]
    }
}

impl ListItem for Document {
    fn key(&self) -> &str {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![
            self.file_name.as_str(),
            self.description.as_str(),
            self.uploaded_by.as_str(),
        ];
        fields.extend(self.labels.iter().map(String::as_str));
        fields
    }

    fn labels(&self) -> &[String] {
        &self.labels
    }
}

impl ListItem for User {
    fn key(&self) -> &str {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.user_name.as_str(),
            self.email.as_str(),
            self.user_type.as_str(),
        ]
    }
}

impl ListItem for Preference {
    fn key(&self) -> &str {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.key.as_str(), self.value.as_str()]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub text: String,
    pub labels: BTreeSet<String>,
}

impl SearchQuery {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            labels: BTreeSet::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.labels.insert(label.into());
        self
    }

    pub fn toggle_label(&mut self, label: &str) {
        if !self.labels.remove(label) {
            self.labels.insert(label.to_string());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty() && self.labels.is_empty()
    }

    /// Case-insensitive substring on any search field, and every selected
    /// label present on the item.
    pub fn matches<T: ListItem>(&self, item: &T) -> bool {
        let needle = self.text.trim().to_lowercase();
        let text_ok = needle.is_empty()
            || item
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(&needle));
        let labels_ok = self
            .labels
            .iter()
            .all(|wanted| item.labels().iter().any(|label| label == wanted));
        text_ok && labels_ok
    }

    /// Re-scans the whole retained list; the source is never modified.
    pub fn apply<T: ListItem>(&self, items: &[T]) -> Vec<T> {
        if self.is_empty() {
            return items.to_vec();
        }
        items
            .iter()
            .filter(|item| self.matches(*item))
            .cloned()
            .collect()
    }
}

/// Sorted union of the labels carried by `items`.
pub fn available_labels<T: ListItem>(items: &[T]) -> Vec<String> {
    items
        .iter()
        .flat_map(|item| item.labels().iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Splits a comma separated label input into trimmed, unique labels.
pub fn parse_labels(input: &str) -> Vec<String> {
    let mut seen = BTreeSet::new();
    input
        .split(',')
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .filter(|label| seen.insert(label.to_string()))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn doc(id: &str, name: &str, labels: &[&str]) -> Document {
        Document {
            id: id.into(),
            file_name: name.into(),
            size: "1 KB".into(),
            uploaded_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            uploaded_by: "alice".into(),
            labels: labels.iter().map(|l| l.to_string()).collect(),
            description: String::new(),
            content_type: "application/pdf".into(),
        }
    }

    fn sample() -> Vec<Document> {
        vec![
            doc("1", "Invoice March.pdf", &["tax", "2024"]),
            doc("2", "Passport.pdf", &["id"]),
            doc("3", "invoice april.pdf", &["tax"]),
        ]
    }

    #[test]
    fn text_match_is_case_insensitive() {
        let hits = SearchQuery::text("INVOICE").apply(&sample());
        let ids: Vec<_> = hits.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn labels_must_all_be_present() {
        let query = SearchQuery::default().with_label("tax").with_label("2024");
        let hits = query.apply(&sample());
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "1");
    }

    #[test]
    fn label_text_is_searchable() {
        let hits = SearchQuery::text("passport").apply(&sample());
        assert_eq!(hits.len(), 1);
        let by_label = SearchQuery::text("id").apply(&sample());
        assert_eq!(by_label[0].id, "2");
    }

    #[test]
    fn empty_query_returns_everything() {
        assert_eq!(SearchQuery::text("   ").apply(&sample()), sample());
    }

    #[test]
    fn filtering_is_idempotent_and_pure() {
        let source = sample();
        let query = SearchQuery::text("invoice").with_label("tax");
        let once = query.apply(&source);
        let twice = query.apply(&once);
        assert_eq!(once, twice);
        assert_eq!(source, sample());
    }

    #[test]
    fn toggle_label_adds_then_removes() {
        let mut query = SearchQuery::default();
        query.toggle_label("tax");
        assert!(query.labels.contains("tax"));
        query.toggle_label("tax");
        assert!(query.is_empty());
    }

    #[test]
    fn available_labels_are_sorted_and_unique() {
        assert_eq!(available_labels(&sample()), vec!["2024", "id", "tax"]);
    }

    #[test]
    fn parse_labels_trims_and_dedupes() {
        assert_eq!(
            parse_labels(" tax, 2024 ,,tax, legal "),
            vec!["tax", "2024", "legal"]
        );
    }

    #[test]
    fn users_and_preferences_search_their_own_fields() {
        let user = User {
            id: "u1".into(),
            user_name: "Bob".into(),
            email: "bob@example.test".into(),
            user_type: crate::api::UserType::Admin,
            created_at: None,
        };
        assert!(SearchQuery::text("admin").matches(&user));
        assert!(SearchQuery::text("example").matches(&user));

        let pref = Preference {
            id: "p1".into(),
            user_id: "u1".into(),
            key: "theme".into(),
            value: "dark".into(),
            updated_at: None,
        };
        assert!(SearchQuery::text("DARK").matches(&pref));
        assert!(!SearchQuery::default().with_label("x").matches(&pref));
    }
}
