use anyhow::Result;
use clap::Parser;

use ckb_routes::cli::{Cli, Command};
use ckb_routes::config::Config;
use ckb_routes::{commands, logging};

fn main() -> Result<()> {
	let cli = Cli::parse();

	let level = match &cli.log_level {
		Some(level) => level.clone(),
		None => Config::load().map(|c| c.log.level).unwrap_or_else(|_| "info".into()),
	};
	logging::init(&level);

	match &cli.command {
		Command::Routes { command } => commands::routes::run(&cli, command),
		Command::Addresses { path } => commands::addresses::run(&cli, path),
		Command::Keys { path } => commands::keys::run(&cli, path),
		Command::Config { command } => commands::config::run(&cli, command),
	}
}
