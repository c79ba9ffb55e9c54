use crate::qc::Subtype;
use crate::table::{TileRow, TileTable};
use itertools::Itertools;

/// Finds negative tiles whose reference position collides with a positive
/// tile of the called subtype. When a frequency-sanity column is present,
/// only rows passing it are considered.
///
/// The collision test is substring containment against the pipe-joined
/// positive positions, so a position like "12" also collides inside "123".
/// This mirrors the established behavior and is deliberately not an exact
/// set-membership test. Negative tiles with an empty position string are
/// skipped outright, since an empty string is a substring of everything
/// and would always be reported.
pub fn get_conflicting_tiles(st: &Subtype, table: &TileTable) -> Vec<String> {
    let subtype = match &st.subtype {
        Some(subtype) => subtype,
        None => return Vec::new(),
    };

    let rows: Vec<&TileRow> = table
        .rows_for_subtype(subtype)
        .filter(|row| row.freq_okay())
        .collect();

    let joined_positives = rows
        .iter()
        .filter(|row| row.is_pos_tile)
        .map(|row| row.refposition.as_str())
        .join("|");

    rows.iter()
        .filter(|row| !row.is_pos_tile)
        .filter(|row| !row.refposition.is_empty() && joined_positives.contains(&row.refposition))
        .map(|row| row.refposition.clone())
        .collect()
}

/// Counts positive and negative tiles for the called subtype; (0, 0) when
/// no subtype was called.
pub fn get_num_pos_neg_tiles(st: &Subtype, table: &TileTable) -> (usize, usize) {
    let subtype = match &st.subtype {
        Some(subtype) => subtype,
        None => return (0, 0),
    };

    let num_pos = table
        .rows_for_subtype(subtype)
        .filter(|row| row.is_pos_tile)
        .count();
    let num_neg = table
        .rows_for_subtype(subtype)
        .filter(|row| !row.is_pos_tile)
        .count();
    (num_pos, num_neg)
}

/// Returns the expected downstream subtypes with no evidence row at all,
/// by exact label match against the subtype column. An empty result means
/// every expected downstream subtype is represented.
pub fn possible_subtypes_exist_in_df(st: &Subtype, table: &TileTable) -> Vec<String> {
    st.possible_downstream_subtypes
        .iter()
        .filter(|label| !table.has_subtype_label(label))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::TileRow;

    fn tile(refposition: &str, subtype: &str, is_pos: bool, freq: Option<bool>) -> TileRow {
        TileRow {
            refposition: refposition.to_string(),
            subtype: subtype.to_string(),
            is_pos_tile: is_pos,
            is_kmer_freq_okay: freq,
        }
    }

    #[test]
    fn test_conflicting_tiles_no_subtype_returns_empty() {
        let table = TileTable::new(vec![tile("10", "1.1", true, None)]);
        let st = Subtype::new("s", None);
        assert!(get_conflicting_tiles(&st, &table).is_empty());
    }

    #[test]
    fn test_conflicting_tiles_exact_collision() {
        // 2 positive, 1 negative, all subtype 1.1, no frequency column.
        let table = TileTable::new(vec![
            tile("775920", "1.1", true, None),
            tile("2154958", "1.1", true, None),
            tile("775920", "1.1", false, None),
        ]);
        let st = Subtype::new("s", Some("1.1"));
        assert_eq!(get_conflicting_tiles(&st, &table), vec!["775920"]);
    }

    #[test]
    fn test_conflicting_tiles_no_collision() {
        let table = TileTable::new(vec![
            tile("775920", "1.1", true, None),
            tile("2154958", "1.1", true, None),
            tile("999999", "1.1", false, None),
        ]);
        let st = Subtype::new("s", Some("1.1"));
        assert!(get_conflicting_tiles(&st, &table).is_empty());
    }

    #[test]
    fn test_conflicting_tiles_substring_false_positive_is_preserved() {
        // "12" occurs inside "123"; the substring test reports a conflict
        // even though the positions differ. Known ambiguity, kept as is.
        let table = TileTable::new(vec![
            tile("123", "1.1", true, None),
            tile("12", "1.1", false, None),
        ]);
        let st = Subtype::new("s", Some("1.1"));
        assert_eq!(get_conflicting_tiles(&st, &table), vec!["12"]);
    }

    #[test]
    fn test_conflicting_tiles_skips_empty_positions() {
        // An empty position string is a substring of any joined positive
        // set and must not be reported as a conflict.
        let table = TileTable::new(vec![
            tile("775920", "1.1", true, None),
            tile("", "1.1", false, None),
        ]);
        let st = Subtype::new("s", Some("1.1"));
        assert!(get_conflicting_tiles(&st, &table).is_empty());
    }

    #[test]
    fn test_conflicting_tiles_respects_frequency_flag() {
        let table = TileTable::new(vec![
            tile("500", "1.1", true, Some(true)),
            tile("500", "1.1", false, Some(false)),
        ]);
        let st = Subtype::new("s", Some("1.1"));
        // The negative tile fails the frequency check and is excluded.
        assert!(get_conflicting_tiles(&st, &table).is_empty());
    }

    #[test]
    fn test_num_pos_neg_tiles() {
        let table = TileTable::new(vec![
            tile("10", "1.1", true, None),
            tile("20", "1.1", true, None),
            tile("30", "1.1", false, None),
            tile("40", "2.2", true, None),
        ]);
        let st = Subtype::new("s", Some("1.1"));
        assert_eq!(get_num_pos_neg_tiles(&st, &table), (2, 1));
    }

    #[test]
    fn test_num_pos_neg_tiles_without_subtype() {
        let table = TileTable::new(vec![tile("10", "1.1", true, None)]);
        let st = Subtype::new("s", None);
        assert_eq!(get_num_pos_neg_tiles(&st, &table), (0, 0));
    }

    #[test]
    fn test_possible_subtypes_all_present() {
        let table = TileTable::new(vec![
            tile("10", "1.1.1", true, None),
            tile("20", "1.1.2", true, None),
        ]);
        let mut st = Subtype::new("s", Some("1.1"));
        st.possible_downstream_subtypes = vec!["1.1.1".to_string(), "1.1.2".to_string()];
        assert!(possible_subtypes_exist_in_df(&st, &table).is_empty());
    }

    #[test]
    fn test_possible_subtypes_none_present() {
        let table = TileTable::new(vec![tile("10", "2.2", true, None)]);
        let mut st = Subtype::new("s", Some("1.1"));
        st.possible_downstream_subtypes = vec!["1.1.1".to_string(), "1.1.2".to_string()];
        assert_eq!(
            possible_subtypes_exist_in_df(&st, &table),
            vec!["1.1.1", "1.1.2"]
        );
    }

    #[test]
    fn test_possible_subtypes_exact_not_substring() {
        // "1.1.1" in the table must not satisfy an expected "1.1".
        let table = TileTable::new(vec![tile("10", "1.1.1", true, None)]);
        let mut st = Subtype::new("s", Some("1"));
        st.possible_downstream_subtypes = vec!["1.1".to_string()];
        assert_eq!(possible_subtypes_exist_in_df(&st, &table), vec!["1.1"]);
    }
}
