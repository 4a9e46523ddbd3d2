use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
	name = "ckb-routes",
	about = "Validate transfer routes and private-key files for Nervos CKB.",
	version
)]
pub struct Cli {
	/// Network the addresses belong to. Defaults to the configured network.
	#[arg(long, global = true)]
	pub network: Option<Network>,

	/// Lowercase input before validating it.
	#[arg(long, global = true)]
	pub lowercase: bool,

	/// Log level or filter directive (overridden by RUST_LOG).
	#[arg(long, global = true)]
	pub log_level: Option<String>,

	/// Print results as JSON.
	#[arg(long, global = true)]
	pub json: bool,

	#[command(subcommand)]
	pub command: Command,
}

#[derive(Debug, Clone, PartialEq, ValueEnum)]
pub enum Network {
	Testnet,
	Mainnet,
}

impl Network {
	pub fn as_str(&self) -> &str {
		match self {
			Self::Testnet => "testnet",
			Self::Mainnet => "mainnet",
		}
	}
}

#[derive(Subcommand)]
pub enum Command {
	/// Parse and validate transfer routes.
	Routes {
		#[command(subcommand)]
		command: RoutesCommand,
	},

	/// Validate a file with one address per line.
	Addresses {
		/// Address file.
		path: PathBuf,
	},

	/// Derive addresses for a file with one private key per line.
	Keys {
		/// Private-key file.
		path: PathBuf,
	},

	/// Inspect or initialize the config file.
	Config {
		#[command(subcommand)]
		command: ConfigCommand,
	},
}

// -- Routes subcommands --

#[derive(Subcommand)]
pub enum RoutesCommand {
	/// Routes written as `from_address to_address`, one per line.
	Inline {
		/// Route text. Read from --file when omitted.
		text: Option<String>,

		/// File holding the route text.
		#[arg(long, conflicts_with = "text")]
		file: Option<PathBuf>,
	},

	/// Pair two address files line by line.
	Pair {
		/// File of source addresses.
		#[arg(long)]
		from: PathBuf,

		/// File of destination addresses.
		#[arg(long)]
		to: PathBuf,
	},
}

// -- Config subcommands --

#[derive(Subcommand)]
pub enum ConfigCommand {
	/// Show the effective configuration.
	Show,

	/// Validate the config file and parse the transfer inputs it names.
	Check,

	/// Write the default configuration file.
	Init {
		/// Overwrite an existing file.
		#[arg(long)]
		force: bool,
	},
}
