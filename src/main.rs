use clap::Parser;
use ivory::{
    cli::{init_verbose, Cli, Command, FULL_VERSION},
    commands::{align, map, stats},
    utils::{handle_error_and_exit, Result},
};

fn runner() -> Result<()> {
    let cli = Cli::parse();
    init_verbose(&cli);
    let subcommand_name = match cli.command {
        Command::Align(_) => "align",
        Command::Map(_) => "map",
        Command::Stats(_) => "stats",
    };

    log::info!(
        "Running {}-{} [{}]",
        env!("CARGO_PKG_NAME"),
        *FULL_VERSION,
        subcommand_name
    );
    match cli.command {
        Command::Align(args) => align::align(args)?,
        Command::Map(args) => map::map(args)?,
        Command::Stats(args) => stats::stats(args)?,
    }
    log::info!("{} end", env!("CARGO_PKG_NAME"));
    Ok(())
}

fn main() {
    if let Err(e) = runner() {
        handle_error_and_exit(e);
    }
}
