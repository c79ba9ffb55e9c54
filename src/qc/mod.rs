mod checks;
mod qc_utils;

pub use checks::{
    check_is_confident_subtype, check_min_tiles_reached, check_missing_downstream_subtypes,
    MIN_POSITIVE_TILES,
};
pub use qc_utils::{get_conflicting_tiles, get_num_pos_neg_tiles, possible_subtypes_exist_in_df};

use crate::table::TileTable;
use itertools::Itertools;
use std::fmt;

pub const NO_TILES_MESSAGE: &str =
    "FAIL: No matching tiles exist, quality checking was not run.";

/// Overall verdict of a quality check. Ordering encodes escalation:
/// `Fail` dominates `Warning` dominates `Pass`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum QcStatus {
    Pass,
    Warning,
    Fail,
}

impl fmt::Display for QcStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            QcStatus::Pass => "PASS",
            QcStatus::Warning => "WARNING",
            QcStatus::Fail => "FAIL",
        };
        f.write_str(label)
    }
}

/// A subtyping call for one sample. The QC orchestrator reads the call
/// fields and writes `qc_status`/`qc_message`; nothing else mutates it.
#[derive(Debug, Clone, Default)]
pub struct Subtype {
    pub sample: String,
    pub subtype: Option<String>,
    pub possible_downstream_subtypes: Vec<String>,
    pub qc_status: Option<QcStatus>,
    pub qc_message: String,
}

impl Subtype {
    pub fn new(sample: &str, subtype: Option<&str>) -> Self {
        Self {
            sample: sample.to_string(),
            subtype: subtype.map(str::to_string),
            ..Default::default()
        }
    }
}

/// A single pluggable quality check: inspects the call and the evidence
/// table, yields a verdict and a human-readable reason.
pub type QcCheck = fn(&Subtype, &TileTable) -> (QcStatus, String);

/// Checks run in this fixed order by `perform_quality_check`.
pub const QC_CHECKS: &[QcCheck] = &[
    check_is_confident_subtype,
    check_min_tiles_reached,
    check_missing_downstream_subtypes,
];

fn subtype_result_exists(st: &Subtype, table: &TileTable) -> bool {
    match &st.subtype {
        Some(subtype) => table.rows_for_subtype(subtype).next().is_some(),
        None => false,
    }
}

/// Runs the default check list against a subtyping call, mutating its
/// `qc_status` and `qc_message` in place.
pub fn perform_quality_check(st: &mut Subtype, table: &TileTable) {
    perform_quality_check_with(st, table, QC_CHECKS)
}

/// Same as `perform_quality_check` with an explicit check list, so checks
/// can be swapped or extended without touching the orchestrator.
pub fn perform_quality_check_with(st: &mut Subtype, table: &TileTable, checks: &[QcCheck]) {
    if !subtype_result_exists(st, table) {
        st.qc_status = Some(QcStatus::Fail);
        st.qc_message = NO_TILES_MESSAGE.to_string();
        return;
    }

    let mut overall = QcStatus::Pass;
    let mut messages = Vec::new();
    for check in checks {
        let (status, message) = check(st, table);
        if status == QcStatus::Pass {
            continue;
        }
        messages.push(format!("{}: {}", status, message));
        overall = overall.max(status);
    }

    st.qc_status = Some(overall);
    st.qc_message = messages.iter().join(" | ");
}
