//! Default free-text matcher.

use super::record::Record;

/// Whether any field of `record` contains `needle` case-insensitively.
///
/// `needle` must already be lowercase.
pub fn matches<R: Record>(record: &R, needle: &str) -> bool {
    needle.is_empty()
        || R::FIELDS
            .iter()
            .any(|key| record.field(key).to_string().to_lowercase().contains(needle))
}

/// Indices of the records matching `query`, in input order.
pub fn search_indices<R: Record>(records: &[R], query: &str) -> Vec<usize> {
    let needle = query.to_lowercase();
    records
        .iter()
        .enumerate()
        .filter(|(_, r)| matches(*r, &needle))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::testing::{Row, sample};

    fn names(records: &[Row], indices: &[usize]) -> Vec<String> {
        indices.iter().map(|&i| records[i].name.clone()).collect()
    }

    #[test]
    fn test_empty_query_returns_everything() {
        let rows = sample();
        assert_eq!(search_indices(&rows, ""), (0..rows.len()).collect::<Vec<_>>());
    }

    #[test]
    fn test_query_is_case_insensitive() {
        let rows = vec![Row::new(1, "A", 10), Row::new(2, "B", 20)];
        assert_eq!(names(&rows, &search_indices(&rows, "a")), vec!["A"]);
        assert_eq!(names(&rows, &search_indices(&rows, "A")), vec!["A"]);
    }

    #[test]
    fn test_query_matches_numeric_fields() {
        let rows = vec![Row::new(1, "A", 10), Row::new(2, "B", 20)];
        assert_eq!(names(&rows, &search_indices(&rows, "20")), vec!["B"]);
        assert_eq!(names(&rows, &search_indices(&rows, "0")), vec!["A", "B"]);
    }

    #[test]
    fn test_identifier_is_not_searched() {
        let rows = vec![Row::new(77, "A", 10)];
        assert!(search_indices(&rows, "77").is_empty());
    }

    #[test]
    fn test_substring_anywhere() {
        let rows = sample();
        let hits = search_indices(&rows, "ar");
        for i in &hits {
            let row = &rows[*i];
            assert!(row.name.to_lowercase().contains("ar") || row.amount.to_string().contains("ar"));
        }
        let misses = (0..rows.len()).filter(|i| !hits.contains(i));
        for i in misses {
            assert!(!rows[i].name.to_lowercase().contains("ar"));
        }
    }
}
