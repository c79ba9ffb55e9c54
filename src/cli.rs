use crate::utils::Result;
use clap::{ArgAction, Parser, Subcommand};
use env_logger::fmt::Color;
use log::{Level, LevelFilter};
use once_cell::sync::Lazy;
use std::{
    io::Write,
    path::{Path, PathBuf},
};

pub static FULL_VERSION: Lazy<String> = Lazy::new(|| env!("CARGO_PKG_VERSION").to_string());

#[derive(Parser)]
#[command(name="snvqc",
          version=&**FULL_VERSION,
          about="Quality control and schema generation for SNV-based genomic subtyping",
          long_about = None,
          disable_help_subcommand = true,
          help_template = "{name} {version}\n{about-section}\n{usage-heading}\n    {usage}\n\n{all-args}",
          )]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[clap(short = 'v')]
    #[clap(long = "verbose")]
    #[clap(action = ArgAction::Count, help = "Specify multiple times to increase verbosity level (e.g., -vv for more verbosity)")]
    pub verbosity: u8,
}

#[derive(Subcommand)]
pub enum Command {
    #[clap(about = "Quality check a subtyping call against a tile table")]
    Qc(QcArgs),
    #[clap(about = "Extract SNV windows from a reference genome into a FASTA schema")]
    Schema(SchemaArgs),
}

#[derive(Parser, Debug)]
#[command(arg_required_else_help(true))]
pub struct QcArgs {
    #[clap(required = true)]
    #[clap(short = 't')]
    #[clap(long = "tiles")]
    #[clap(help = "TSV table of tile evidence (refposition, subtype, is_pos_tile[, is_kmer_freq_okay])")]
    #[clap(value_name = "TSV")]
    #[arg(value_parser = check_file_exists)]
    pub tiles_path: PathBuf,

    #[clap(short = 's')]
    #[clap(long = "subtype")]
    #[clap(help = "Called subtype label (omit for an uncalled sample)")]
    #[clap(value_name = "SUBTYPE")]
    pub subtype: Option<String>,

    #[clap(long = "possible-subtypes")]
    #[clap(help = "Comma-separated downstream subtype labels expected under the call")]
    #[clap(value_name = "SUBTYPES")]
    #[clap(value_delimiter = ',')]
    pub possible_subtypes: Vec<String>,

    #[clap(long = "sample")]
    #[clap(help = "Sample name to report")]
    #[clap(value_name = "SAMPLE")]
    #[clap(default_value = "sample")]
    pub sample: String,
}

#[derive(Parser, Debug)]
#[command(arg_required_else_help(true))]
pub struct SchemaArgs {
    #[clap(required = true)]
    #[clap(short = 'g')]
    #[clap(long = "genome")]
    #[clap(help = "Reference genome in GenBank format (first record is used)")]
    #[clap(value_name = "GENBANK")]
    #[arg(value_parser = check_file_exists)]
    pub genome_path: PathBuf,

    #[clap(required = true)]
    #[clap(short = 'o')]
    #[clap(long = "output-dir")]
    #[clap(help = "Directory for the schema FASTA and augmented variant tables")]
    #[clap(value_name = "DIR")]
    #[arg(value_parser = check_directory_exists)]
    pub output_dir: PathBuf,

    #[clap(long = "schema-name")]
    #[clap(help = "Base name of the output schema file")]
    #[clap(value_name = "NAME")]
    #[clap(default_value = "schema")]
    pub schema_name: String,

    #[clap(short = 'n')]
    #[clap(long = "flank-len")]
    #[clap(help = "Number of flanking bases on each side of a variant")]
    #[clap(value_name = "FLANK_LEN")]
    #[clap(default_value = "16")]
    #[arg(value_parser = flank_len_in_range)]
    pub flank_len: usize,

    #[clap(required = true)]
    #[clap(help = "Variant call tables, one TSV per group (group label = file stem)")]
    #[clap(value_name = "TSV")]
    #[arg(value_parser = check_file_exists)]
    pub variant_tables: Vec<PathBuf>,
}

pub fn init_verbose(args: &Cli) {
    let filter_level: LevelFilter = match args.verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };

    env_logger::Builder::from_default_env()
        .format(|buf, record| {
            let level = record.level();
            let mut style = buf.style();
            match record.level() {
                Level::Error => style.set_color(Color::Red),
                Level::Warn => style.set_color(Color::Yellow),
                Level::Info => style.set_color(Color::Green),
                Level::Debug => style.set_color(Color::Blue),
                Level::Trace => style.set_color(Color::Cyan),
            };

            writeln!(
                buf,
                "{} [{}] - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                style.value(level),
                record.args()
            )
        })
        .filter_level(filter_level)
        .init();
}

fn check_file_exists(s: &str) -> Result<PathBuf> {
    let path = Path::new(s);
    if !path.exists() {
        return Err(format!("File does not exist: {}", path.display()));
    }
    Ok(path.to_path_buf())
}

fn check_directory_exists(s: &str) -> Result<PathBuf> {
    let path = Path::new(s);
    if !path.is_dir() {
        return Err(format!("Directory does not exist: {}", path.display()));
    }
    Ok(path.to_path_buf())
}

fn flank_len_in_range(s: &str) -> Result<usize> {
    const RANGE: std::ops::RangeInclusive<usize> = 1..=500;
    let flank_len: usize = s
        .parse()
        .map_err(|_| format!("`{}` is not a valid flank length", s))?;
    if !RANGE.contains(&flank_len) {
        return Err(format!(
            "Flank length not in range {}-{}",
            RANGE.start(),
            RANGE.end()
        ));
    }
    Ok(flank_len)
}
