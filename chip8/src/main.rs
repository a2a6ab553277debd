use clap::Parser;
use log::LevelFilter;

use crate::config::Args;

mod audio;
mod cadence;
mod config;
mod keymap;
mod run;

/// Warnings by default; `--log` raises the interpreter to debug so its state dumps show up.
/// `RUST_LOG` takes precedence over both.
fn init_logger(args: &Args) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(LevelFilter::Warn);
    if args.log {
        builder.filter_module("ch8_core", LevelFilter::Debug);
    }
    builder.parse_default_env().init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logger(&args);
    run::run(&args)
}
