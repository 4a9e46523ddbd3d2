use std::fmt;
use std::path::PathBuf;

use ckb_sdk::NetworkType;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::account::{AccountError, AddressToPrivate, TxRoute};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
	pub network: NetworkConfig,
	pub input: InputConfig,
	pub log: LogConfig,
	#[serde(default)]
	pub transfer: TransferConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
	pub default: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
	/// Lowercase route text, address files and derived addresses.
	pub lowercase: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
	pub level: String,
}

/// Where a batch transfer takes its routes and signing keys from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TransferConfig {
	/// Inline routes, `from_address to_address` per line.
	pub routes: Option<String>,
	pub from_file: Option<PathBuf>,
	pub to_file: Option<PathBuf>,
	pub private_keys_file: Option<PathBuf>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("unknown network: {0} (expected testnet or mainnet)")]
	UnknownNetwork(String),

	#[error("transfer.routes and transfer.from_file/to_file are mutually exclusive")]
	MixedRoutes,

	#[error("transfer.from_file and transfer.to_file must be set together")]
	IncompleteRoutePair,

	#[error("transfer.{field}: {source}")]
	Field {
		field: &'static str,
		#[source]
		source: AccountError,
	},
}

impl TransferConfig {
	/// Check that the route fields describe one route source at most.
	pub fn validate(&self) -> Result<(), ConfigError> {
		match (&self.routes, &self.from_file, &self.to_file) {
			(Some(_), Some(_), _) | (Some(_), _, Some(_)) => Err(ConfigError::MixedRoutes),
			(None, Some(_), None) | (None, None, Some(_)) => Err(ConfigError::IncompleteRoutePair),
			_ => Ok(()),
		}
	}

	/// Parse the configured routes from whichever source is set. No source
	/// yields no routes.
	pub fn load_routes<F>(&self, is_address_valid: F, lowercase: bool) -> Result<Vec<TxRoute>, ConfigError>
	where
		F: Fn(&str) -> bool,
	{
		self.validate()?;
		match (&self.from_file, &self.to_file) {
			(Some(from), Some(to)) => TxRoute::from_files(from, to, is_address_valid, lowercase)
				.map_err(|source| ConfigError::Field { field: "from_file/to_file", source }),
			_ => TxRoute::from_str(self.routes.as_deref(), is_address_valid, lowercase)
				.map_err(|source| ConfigError::Field { field: "routes", source }),
		}
	}

	/// Build the address map from `private_keys_file`, if set.
	pub fn load_private_keys<F, E>(
		&self,
		address_from_private: F,
		lowercase: bool,
	) -> Result<Option<AddressToPrivate>, ConfigError>
	where
		F: Fn(&str) -> Result<String, E>,
		E: fmt::Display,
	{
		let Some(path) = &self.private_keys_file else {
			return Ok(None);
		};
		AddressToPrivate::from_file(path, address_from_private, lowercase)
			.map(Some)
			.map_err(|source| ConfigError::Field {
				field: "private_keys_file",
				source,
			})
	}
}

impl Default for Config {
	fn default() -> Self {
		Self {
			network: NetworkConfig {
				default: "testnet".into(),
			},
			input: InputConfig { lowercase: false },
			log: LogConfig { level: "info".into() },
			transfer: TransferConfig::default(),
		}
	}
}

impl Config {
	/// Directory where CLI state is stored (~/.ckb-routes/).
	pub fn dir() -> PathBuf {
		dirs::home_dir()
			.unwrap_or_else(|| PathBuf::from("."))
			.join(".ckb-routes")
	}

	/// Path to the config file.
	pub fn path() -> PathBuf {
		Self::dir().join("config.toml")
	}

	/// Load config from disk, falling back to defaults if no file exists.
	pub fn load() -> anyhow::Result<Self> {
		let path = Self::path();
		if path.exists() {
			let content = std::fs::read_to_string(&path)?;
			Ok(toml::from_str(&content)?)
		} else {
			Ok(Self::default())
		}
	}

	/// Persist the current config to disk, creating the directory if needed.
	pub fn save(&self) -> anyhow::Result<()> {
		let path = Self::path();
		if let Some(parent) = path.parent() {
			std::fs::create_dir_all(parent)?;
		}
		std::fs::write(&path, toml::to_string_pretty(self)?)?;
		Ok(())
	}

	/// Reject field values the CLI would otherwise silently reinterpret.
	pub fn validate(&self) -> Result<(), ConfigError> {
		match self.network.default.as_str() {
			"testnet" | "mainnet" => {}
			other => return Err(ConfigError::UnknownNetwork(other.to_owned())),
		}
		self.transfer.validate()
	}

	/// The CKB network for the given name, or for the configured default
	/// when `None`.
	pub fn network_type(&self, network: Option<&str>) -> NetworkType {
		crate::keys::network_type(network.unwrap_or(&self.network.default))
	}
}
