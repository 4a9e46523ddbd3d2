use anyhow::Result;

use crate::cli::{Cli, ConfigCommand};
use crate::commands::{print_json, resolve};
use crate::config::Config;
use crate::keys::address_from_private;

pub fn run(cli: &Cli, cmd: &ConfigCommand) -> Result<()> {
	match cmd {
		ConfigCommand::Show => show(cli),
		ConfigCommand::Check => check(cli),
		ConfigCommand::Init { force } => init(*force),
	}
}

fn show(cli: &Cli) -> Result<()> {
	let config = Config::load()?;
	if cli.json {
		return print_json(&config);
	}

	let settings = resolve(cli, &config);
	let level = cli.log_level.as_deref().unwrap_or(&config.log.level);

	println!("Config:    {}", Config::path().display());
	println!("  Network:   {:?}", settings.network);
	println!("  Lowercase: {}", settings.lowercase);
	println!("  Log level: {level}");
	Ok(())
}

fn check(cli: &Cli) -> Result<()> {
	let config = Config::load()?;
	config.validate()?;

	let settings = resolve(cli, &config);
	let network = settings.network;
	let routes = config
		.transfer
		.load_routes(settings.address_check(), settings.lowercase)?;
	let accounts = config
		.transfer
		.load_private_keys(|key: &str| address_from_private(network, key), settings.lowercase)?;

	for route in &routes {
		tracing::debug!(route = %route, "configured route");
	}
	if let Some(accounts) = &accounts {
		let unsigned = routes
			.iter()
			.filter(|r| !accounts.contains_address(r.from_address()))
			.count();
		if unsigned > 0 {
			tracing::warn!(unsigned, "routes whose source address has no private key");
		}
	}

	println!("Config OK: {}", Config::path().display());
	println!("  Routes:   {}", routes.len());
	match &accounts {
		Some(accounts) => println!("  Accounts: {}", accounts.len()),
		None => println!("  Accounts: no private_keys_file"),
	}
	Ok(())
}

fn init(force: bool) -> Result<()> {
	let path = Config::path();
	if path.exists() && !force {
		anyhow::bail!("{} already exists. Use --force to overwrite.", path.display());
	}
	Config::default().save()?;
	println!("Wrote {}", path.display());
	Ok(())
}
