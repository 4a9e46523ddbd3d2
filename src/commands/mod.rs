pub mod addresses;
pub mod config;
pub mod keys;
pub mod routes;

use anyhow::Result;
use ckb_sdk::NetworkType;
use serde::Serialize;

use crate::cli::Cli;
use crate::config::Config;

/// Input settings after merging CLI flags over the config file.
pub struct Resolved {
	pub network: NetworkType,
	pub lowercase: bool,
}

impl Resolved {
	/// Address predicate bound to the resolved network.
	pub fn address_check(&self) -> impl Fn(&str) -> bool {
		let network = self.network;
		move |address: &str| crate::keys::is_valid_address(network, address)
	}
}

/// Resolve network and lowercasing from CLI flags or config.
pub fn resolve(cli: &Cli, config: &Config) -> Resolved {
	Resolved {
		network: config.network_type(cli.network.as_ref().map(|n| n.as_str())),
		lowercase: cli.lowercase || config.input.lowercase,
	}
}

/// Print `value` as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
	println!("{}", serde_json::to_string_pretty(value)?);
	Ok(())
}
