use clap::Parser;
use snvqc::{
    cli::{init_verbose, Cli, Command, FULL_VERSION},
    commands::{qc, schema},
    utils::{handle_error_and_exit, Result},
};

fn runner() -> Result<()> {
    let cli = Cli::parse();
    init_verbose(&cli);
    let subcommand_name = match cli.command {
        Command::Qc(_) => "qc",
        Command::Schema(_) => "schema",
    };

    log::info!(
        "Running {}-{} [{}]",
        env!("CARGO_PKG_NAME"),
        *FULL_VERSION,
        subcommand_name
    );
    match cli.command {
        Command::Qc(args) => qc::qc(args)?,
        Command::Schema(args) => schema::schema(args)?,
    }
    log::info!("{} end", env!("CARGO_PKG_NAME"));
    Ok(())
}

fn main() {
    if let Err(e) = runner() {
        handle_error_and_exit(e);
    }
}
