use crate::cli::SchemaArgs;
use crate::schema::write_sequences;
use crate::table::VariantTable;
use crate::utils::{create_file, Result};
use std::{collections::BTreeMap, io::Write, path::Path};

pub fn schema(args: SchemaArgs) -> Result<()> {
    let mut groups = BTreeMap::new();
    for path in &args.variant_tables {
        let group = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .ok_or_else(|| format!("Cannot derive a group label from {}", path.display()))?
            .to_string();
        let table = VariantTable::from_tsv(path)?;
        log::info!("Group {}: {} variant(s) from {}", group, table.rows.len(), path.display());
        if groups.insert(group.clone(), table).is_some() {
            return Err(format!("Duplicate group label: {}", group));
        }
    }

    let groups = write_sequences(
        &args.output_dir,
        &args.genome_path,
        groups,
        &args.schema_name,
        args.flank_len,
    )?;

    for (group, table) in &groups {
        write_windows_table(&args.output_dir, group, table)?;
    }
    Ok(())
}

/// Writes one group's variants back out with the derived window columns.
fn write_windows_table(output_dir: &Path, group: &str, table: &VariantTable) -> Result<()> {
    let path = output_dir.join(format!("{}_windows.tsv", group));
    let mut file = create_file(&path)?;
    let write = |file: &mut std::fs::File, line: String| -> Result<()> {
        writeln!(file, "{}", line).map_err(|e| format!("Failed to write {}: {}", path.display(), e))
    };

    write(&mut file, "POS\tALT\tratio\tref_window\talt_window".to_string())?;
    for row in &table.rows {
        write(
            &mut file,
            format!(
                "{}\t{}\t{}\t{}\t{}",
                row.pos,
                row.alt,
                row.ratio,
                row.ref_window.as_deref().unwrap_or(""),
                row.alt_window.as_deref().unwrap_or("")
            ),
        )?;
    }
    Ok(())
}
