use clap::{Parser, Subcommand};
use tracing::Level;

use self::{train::TrainArg, watch::WatchArg};

mod train;
mod watch;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Increase log verbosity (-v: debug, -vv: trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Evolve a hero policy with the genetic algorithm
    Train(#[clap(flatten)] TrainArg),
    /// Watch a trained hero fight, one battle at a time
    Watch(#[clap(flatten)] WatchArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    let level = match args.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match args.mode {
        Mode::Train(arg) => train::run(&arg)?,
        Mode::Watch(arg) => watch::run(&arg)?,
    }
    Ok(())
}
