use crate::cli::QcArgs;
use crate::qc::{perform_quality_check, Subtype};
use crate::table::TileTable;
use crate::utils::Result;

pub fn qc(args: QcArgs) -> Result<()> {
    let table = TileTable::from_tsv(&args.tiles_path)?;
    log::info!(
        "Loaded {} tile(s) from {}",
        table.rows().len(),
        args.tiles_path.display()
    );

    let mut st = Subtype::new(&args.sample, args.subtype.as_deref());
    st.possible_downstream_subtypes = args.possible_subtypes;
    perform_quality_check(&mut st, &table);

    // A FAIL verdict is a result, not an error; the exit code stays 0.
    let status = st.qc_status.map(|s| s.to_string()).unwrap_or_default();
    println!(
        "{}\t{}\t{}\t{}",
        st.sample,
        st.subtype.as_deref().unwrap_or("-"),
        status,
        st.qc_message
    );
    log::info!("Sample {}: QC {}", st.sample, status);
    Ok(())
}
