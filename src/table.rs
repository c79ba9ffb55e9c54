use crate::utils::Result;
use serde::Deserialize;
use std::{fs::File, io::Read, path::Path};

/// One evidence row: a single diagnostic tile observed for a subtype.
#[derive(Debug, Clone, Deserialize)]
pub struct TileRow {
    pub refposition: String,
    pub subtype: String,
    pub is_pos_tile: bool,
    /// Frequency-sanity flag; `None` when the input table has no such column.
    #[serde(default)]
    pub is_kmer_freq_okay: Option<bool>,
}

impl TileRow {
    /// Rows without a frequency column are treated as passing.
    pub fn freq_okay(&self) -> bool {
        self.is_kmer_freq_okay.unwrap_or(true)
    }
}

/// Read-only evidence table, one row per tile.
#[derive(Debug, Clone, Default)]
pub struct TileTable {
    rows: Vec<TileRow>,
}

impl TileTable {
    pub fn new(rows: Vec<TileRow>) -> Self {
        Self { rows }
    }

    pub fn from_tsv(path: &Path) -> Result<Self> {
        let file =
            File::open(path).map_err(|e| format!("Failed to open {}: {}", path.display(), e))?;
        Self::from_reader(file)
            .map_err(|e| format!("Failed to parse tile table {}: {}", path.display(), e))
    }

    pub fn from_reader<R: Read>(reader: R) -> std::result::Result<Self, csv::Error> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .from_reader(reader);
        let rows = rdr.deserialize().collect::<std::result::Result<_, _>>()?;
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[TileRow] {
        &self.rows
    }

    pub fn rows_for_subtype<'a>(&'a self, subtype: &'a str) -> impl Iterator<Item = &'a TileRow> {
        self.rows.iter().filter(move |row| row.subtype == subtype)
    }

    /// Exact label match against the subtype column, not substring.
    pub fn has_subtype_label(&self, label: &str) -> bool {
        self.rows.iter().any(|row| row.subtype == label)
    }
}

/// One variant call; `ratio` is the numeric attribute whose sign selects
/// the forward/reverse orientation of the schema record pair.
#[derive(Debug, Clone, Deserialize)]
pub struct VariantRow {
    #[serde(rename = "POS")]
    pub pos: usize,
    #[serde(rename = "ALT")]
    pub alt: String,
    pub ratio: f64,
    #[serde(skip)]
    pub ref_window: Option<String>,
    #[serde(skip)]
    pub alt_window: Option<String>,
}

/// Variant calls for one group; gains the derived window columns during
/// schema writing.
#[derive(Debug, Clone, Default)]
pub struct VariantTable {
    pub rows: Vec<VariantRow>,
}

impl VariantTable {
    pub fn new(rows: Vec<VariantRow>) -> Self {
        Self { rows }
    }

    pub fn from_tsv(path: &Path) -> Result<Self> {
        let file =
            File::open(path).map_err(|e| format!("Failed to open {}: {}", path.display(), e))?;
        Self::from_reader(file)
            .map_err(|e| format!("Failed to parse variant table {}: {}", path.display(), e))
    }

    pub fn from_reader<R: Read>(reader: R) -> std::result::Result<Self, csv::Error> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .from_reader(reader);
        let rows = rdr.deserialize().collect::<std::result::Result<_, _>>()?;
        Ok(Self { rows })
    }
}
