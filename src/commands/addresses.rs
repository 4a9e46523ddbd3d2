use std::path::Path;

use anyhow::Result;

use crate::account::read_addresses_from_file;
use crate::cli::Cli;
use crate::commands::{print_json, resolve};
use crate::config::Config;

pub fn run(cli: &Cli, path: &Path) -> Result<()> {
	let config = Config::load()?;
	let settings = resolve(cli, &config);

	let addresses = read_addresses_from_file(path, settings.address_check(), settings.lowercase)?;

	if cli.json {
		return print_json(&addresses);
	}
	for address in &addresses {
		println!("{address}");
	}
	println!("{} address(es)", addresses.len());
	Ok(())
}
