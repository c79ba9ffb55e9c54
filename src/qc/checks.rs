use crate::qc::{
    get_conflicting_tiles, get_num_pos_neg_tiles, possible_subtypes_exist_in_df, QcStatus, Subtype,
};
use crate::table::TileTable;
use itertools::Itertools;

/// Fewer positive tiles than this triggers a low-coverage warning.
pub const MIN_POSITIVE_TILES: usize = 5;

fn called_subtype(st: &Subtype) -> &str {
    st.subtype.as_deref().unwrap_or("-")
}

/// Fails the call when positive and negative tiles collide on the same
/// reference position.
pub fn check_is_confident_subtype(st: &Subtype, table: &TileTable) -> (QcStatus, String) {
    let conflicting = get_conflicting_tiles(st, table);
    if conflicting.is_empty() {
        return (QcStatus::Pass, String::new());
    }
    (
        QcStatus::Fail,
        format!(
            "Subtype {} is not confident, {} conflicting tile(s) found at position(s) {}",
            called_subtype(st),
            conflicting.len(),
            conflicting.iter().join(", ")
        ),
    )
}

/// Warns when too few positive tiles back the called subtype.
pub fn check_min_tiles_reached(st: &Subtype, table: &TileTable) -> (QcStatus, String) {
    let (num_pos, num_neg) = get_num_pos_neg_tiles(st, table);
    if num_pos >= MIN_POSITIVE_TILES {
        return (QcStatus::Pass, String::new());
    }
    (
        QcStatus::Warning,
        format!(
            "Only {} positive tile(s) found for subtype {} (minimum {}; {} negative)",
            num_pos,
            called_subtype(st),
            MIN_POSITIVE_TILES,
            num_neg
        ),
    )
}

/// Warns when expected downstream subtypes have no evidence rows at all.
pub fn check_missing_downstream_subtypes(st: &Subtype, table: &TileTable) -> (QcStatus, String) {
    let missing = possible_subtypes_exist_in_df(st, table);
    if missing.is_empty() {
        return (QcStatus::Pass, String::new());
    }
    (
        QcStatus::Warning,
        format!(
            "No tiles exist for downstream subtype(s) {} of subtype {}",
            missing.iter().join(", "),
            called_subtype(st)
        ),
    )
}
