use crate::table::VariantTable;
use crate::utils::{open_append, Result};
use std::{collections::BTreeMap, io::Write, path::Path};

/// Parses the reference genome and returns the sequence of its first
/// record. Later records, if any, are ignored.
fn read_first_record(genome_path: &Path) -> Result<String> {
    let records = gb_io::reader::parse_file(genome_path)
        .map_err(|e| format!("Failed to parse genome file {}: {}", genome_path.display(), e))?;
    let first = records
        .into_iter()
        .next()
        .ok_or_else(|| format!("No records found in genome file {}", genome_path.display()))?;
    String::from_utf8(first.seq)
        .map_err(|e| format!("Genome file {} is not valid UTF-8: {}", genome_path.display(), e))
}

/// Slices the reference window around a 1-based variant position, clamped
/// at both ends of the genome. The unclamped window spans `flank_len`
/// bases on each side of the variant base.
pub fn get_sub_sequences(
    pos: usize,
    sequence: &str,
    flank_len: usize,
    genome_len: usize,
) -> Result<String> {
    let start = pos.saturating_sub(flank_len + 1);
    let end = genome_len.min(pos + flank_len);
    sequence
        .get(start..end)
        .map(str::to_string)
        .ok_or_else(|| {
            format!(
                "Window [{}, {}) around position {} is out of bounds for genome of length {}",
                start,
                end,
                pos,
                sequence.len()
            )
        })
}

/// Replaces the centre base of a reference window with the alternate base,
/// keeping up to `flank_len` bases of context on each side. Flank offsets
/// are byte offsets, so a window containing non-ASCII bytes is rejected
/// rather than sliced mid-character.
pub fn alternate_window(ref_window: &str, alt: &str, flank_len: usize) -> Result<String> {
    let left_end = flank_len.min(ref_window.len());
    let right_start = (flank_len + 1).min(ref_window.len());
    let right_end = (2 * flank_len + 1).min(ref_window.len());
    let flanks = ref_window
        .get(..left_end)
        .zip(ref_window.get(right_start..right_end));
    let (left, right) = flanks.ok_or_else(|| {
        format!(
            "Reference window {:?} contains non-ASCII sequence data",
            ref_window
        )
    })?;
    Ok(format!("{}{}{}", left, alt, right))
}

fn write_record<W: Write>(writer: &mut W, name: &str, sequence: &str) -> Result<()> {
    writeln!(writer, ">{}", name)
        .and_then(|_| writeln!(writer, "{}", sequence))
        .map_err(|e| format!("Failed to write schema record {}: {}", name, e))
}

/// Walks every variant of every group, slices the reference and alternate
/// windows around each position and appends a record pair per variant to
/// `{output_dir}/{schema_name}.fasta`. The windows are stored back into
/// the rows and the updated mapping is returned.
///
/// A positive `ratio` puts the alternate window into the forward record
/// (`<pos>-<group>`) and the reference window into the `negative...`
/// record; a non-positive `ratio` reverses the pair.
pub fn write_sequences(
    output_dir: &Path,
    genome_path: &Path,
    mut groups: BTreeMap<String, VariantTable>,
    schema_name: &str,
    flank_len: usize,
) -> Result<BTreeMap<String, VariantTable>> {
    let schema_path = output_dir.join(format!("{}.fasta", schema_name));

    for (group, table) in groups.iter_mut() {
        // The genome is re-parsed per group; the schema contract is one
        // parse per group, first record only.
        let sequence = read_first_record(genome_path)?;
        let genome_len = sequence.len();
        let mut schema_file = open_append(&schema_path)?;

        for row in table.rows.iter_mut() {
            let ref_window = get_sub_sequences(row.pos, &sequence, flank_len, genome_len)?;
            let alt_window = alternate_window(&ref_window, &row.alt, flank_len)?;

            let forward = format!("{}-{}", row.pos, group);
            let reverse = format!("negative{}-{}", row.pos, group);
            if row.ratio > 0.0 {
                write_record(&mut schema_file, &forward, &alt_window)?;
                write_record(&mut schema_file, &reverse, &ref_window)?;
            } else {
                write_record(&mut schema_file, &forward, &ref_window)?;
                write_record(&mut schema_file, &reverse, &alt_window)?;
            }

            row.ref_window = Some(ref_window);
            row.alt_window = Some(alt_window);
        }
        log::info!(
            "Appended {} record pair(s) for group {} to {}",
            table.rows.len(),
            group,
            schema_path.display()
        );
    }

    Ok(groups)
}
