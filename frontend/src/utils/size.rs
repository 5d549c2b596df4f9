use std::cmp::Ordering;

use crate::api::Document;

/// Parses a human size such as `"512 KB"` into kilobytes.
/// A bare number is read as bytes.
pub fn parse_size_kb(size: &str) -> Option<f64> {
    let trimmed = size.trim();
    let split = trimmed
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(trimmed.len());
    let (number, unit) = trimmed.split_at(split);
    let value: f64 = number.parse().ok()?;
    let factor = match unit.trim().to_ascii_uppercase().as_str() {
        "" | "B" => 1.0 / 1024.0,
        "KB" => 1.0,
        "MB" => 1024.0,
        "GB" => 1024.0 * 1024.0,
        _ => return None,
    };
    Some(value * factor)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    Name,
    Size,
    #[default]
    UploadedAt,
}

impl SortField {
    pub fn label(&self) -> &'static str {
        match self {
            SortField::Name => "Name",
            SortField::Size => "Size",
            SortField::UploadedAt => "Uploaded",
        }
    }

    pub fn from_key(key: &str) -> Self {
        match key {
            "name" => SortField::Name,
            "size" => SortField::Size,
            _ => SortField::UploadedAt,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            SortField::Name => "name",
            SortField::Size => "size",
            SortField::UploadedAt => "uploaded",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

fn compare_sizes(a: &str, b: &str) -> Ordering {
    // Unparseable sizes rank below every real size.
    match (parse_size_kb(a), parse_size_kb(b)) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

pub fn compare_documents(a: &Document, b: &Document, field: SortField) -> Ordering {
    match field {
        SortField::Name => a
            .file_name
            .to_lowercase()
            .cmp(&b.file_name.to_lowercase()),
        SortField::Size => compare_sizes(&a.size, &b.size),
        SortField::UploadedAt => a.uploaded_at.cmp(&b.uploaded_at),
    }
}

pub fn sort_documents(items: &mut [Document], field: SortField, direction: SortDirection) {
    items.sort_by(|a, b| {
        let cmp = compare_documents(a, b, field);
        match direction {
            SortDirection::Ascending => cmp,
            SortDirection::Descending => cmp.reverse(),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn doc(name: &str, size: &str, day: u32) -> Document {
        Document {
            id: name.into(),
            file_name: name.into(),
            size: size.into(),
            uploaded_at: Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap(),
            uploaded_by: "alice".into(),
            labels: vec![],
            description: String::new(),
            content_type: "application/pdf".into(),
        }
    }

    #[test]
    fn sizes_normalise_to_kilobytes() {
        let b = parse_size_kb("500 B").unwrap();
        assert!((b - 0.488).abs() < 0.01);
        assert_eq!(parse_size_kb("2 KB"), Some(2.0));
        assert_eq!(parse_size_kb("1 MB"), Some(1024.0));
        assert_eq!(parse_size_kb("1.5 gb"), Some(1.5 * 1024.0 * 1024.0));
        assert_eq!(parse_size_kb("2048"), Some(2.0));
        assert_eq!(parse_size_kb("12KB"), Some(12.0));
    }

    #[test]
    fn unknown_sizes_do_not_parse() {
        assert_eq!(parse_size_kb(""), None);
        assert_eq!(parse_size_kb("KB"), None);
        assert_eq!(parse_size_kb("3 TB"), None);
        assert_eq!(parse_size_kb("lots"), None);
    }

    #[test]
    fn size_sort_is_unit_aware() {
        let mut docs = vec![doc("c", "1 MB", 1), doc("a", "500 B", 2), doc("b", "2 KB", 3)];
        sort_documents(&mut docs, SortField::Size, SortDirection::Ascending);
        let sizes: Vec<_> = docs.iter().map(|d| d.size.as_str()).collect();
        assert_eq!(sizes, vec!["500 B", "2 KB", "1 MB"]);

        sort_documents(&mut docs, SortField::Size, SortDirection::Descending);
        let sizes: Vec<_> = docs.iter().map(|d| d.size.as_str()).collect();
        assert_eq!(sizes, vec!["1 MB", "2 KB", "500 B"]);
    }

    #[test]
    fn unparseable_sizes_sort_first_ascending() {
        let mut docs = vec![doc("a", "2 KB", 1), doc("b", "??", 2)];
        sort_documents(&mut docs, SortField::Size, SortDirection::Ascending);
        assert_eq!(docs[0].size, "??");
    }

    #[test]
    fn name_and_date_sorts() {
        let mut docs = vec![doc("beta", "1 KB", 2), doc("Alpha", "1 KB", 3), doc("gamma", "1 KB", 1)];
        sort_documents(&mut docs, SortField::Name, SortDirection::Ascending);
        assert_eq!(docs[0].file_name, "Alpha");

        sort_documents(&mut docs, SortField::UploadedAt, SortDirection::Descending);
        assert_eq!(docs[0].file_name, "Alpha");
        assert_eq!(docs[2].file_name, "gamma");
    }

    #[test]
    fn sort_field_keys_round_trip_through_select_values() {
        for field in [SortField::Name, SortField::Size, SortField::UploadedAt] {
            assert_eq!(SortField::from_key(field.key()), field);
        }
        assert_eq!(SortDirection::Ascending.toggled(), SortDirection::Descending);
    }
}
