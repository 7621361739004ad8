mod cli;
mod tables;

use clap::{Parser, crate_version};
use dess_dispatch::prelude::*;

use crate::cli::{Args, Command, inspect, simulate};

fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().without_time().compact().init();
    info!(version = crate_version!(), "starting…");

    let args = Args::parse();

    match args.command {
        Command::Simulate(args) => simulate(&args)?,
        Command::Inspect(args) => inspect(&args)?,
    }

    info!("done!");
    Ok(())
}
