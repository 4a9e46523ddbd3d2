use std::path::Path;

use anyhow::Result;

use crate::account::AddressToPrivate;
use crate::cli::Cli;
use crate::commands::{print_json, resolve};
use crate::config::Config;
use crate::keys::address_from_private;

/// Load a key file and list the addresses it controls. Keys are never
/// printed.
pub fn run(cli: &Cli, path: &Path) -> Result<()> {
	let config = Config::load()?;
	let settings = resolve(cli, &config);
	let network = settings.network;

	let accounts = AddressToPrivate::from_file(
		path,
		|key: &str| address_from_private(network, key),
		settings.lowercase,
	)?;

	let addresses: Vec<&str> = accounts.addresses().collect();
	if cli.json {
		return print_json(&addresses);
	}
	for address in &addresses {
		println!("{address}");
	}
	println!("{} account(s)", accounts.len());
	Ok(())
}
