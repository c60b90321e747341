use crate::commands::*;
use anyhow::Result;
use clap::{self, Parser, Subcommand};

mod commands;
mod io;

#[derive(Subcommand, Debug)]
enum Command {
    Generate(generate::Args),
    Hint(hint::Args),
    SelfPlay(self_play::Args),
}

#[derive(Parser)]
struct Args {
    #[clap(subcommand)]
    command: Command,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    match args.command {
        Command::Generate(args) => generate::run(args),
        Command::Hint(args) => hint::run(args),
        Command::SelfPlay(args) => self_play::run(args),
    }
}
