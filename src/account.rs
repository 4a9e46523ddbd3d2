use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

// -- Errors --

/// Where a rejected address was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressOrigin {
	/// Route text passed directly to [`TxRoute::from_str`].
	Inline,
	/// A one-address-per-line file.
	File(PathBuf),
}

impl fmt::Display for AddressOrigin {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Inline => f.write_str("addresses map"),
			Self::File(path) => write!(f, "{}", path.display()),
		}
	}
}

#[derive(Debug, Error)]
pub enum AccountError {
	#[error("illegal line in addresses map: {line}")]
	InvalidFormat { line: String },

	#[error("illegal address in {origin}: {line}")]
	InvalidAddress { origin: AddressOrigin, line: String },

	#[error("{} is not a file", .path.display())]
	FileNotFound { path: PathBuf },

	#[error("can't read from the file: {}", .path.display())]
	Unreadable {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("address count mismatch: {from} from-addresses, {to} to-addresses")]
	LengthMismatch { from: usize, to: usize },

	#[error("invalid private key: {key} ({reason})")]
	InvalidPrivateKey { key: String, reason: String },
}

pub type Result<T> = std::result::Result<T, AccountError>;

// -- Routes --

/// A validated transfer route: one source address, one destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TxRoute {
	from_address: String,
	to_address: String,
}

impl TxRoute {
	pub fn from_address(&self) -> &str {
		&self.from_address
	}

	pub fn to_address(&self) -> &str {
		&self.to_address
	}

	/// Parse route text where each line holds `from_address to_address`.
	///
	/// `#` starts a comment that runs to the end of the line; blank lines
	/// are skipped. With `lowercase` set the whole text is lowercased
	/// before anything else, so the predicate only ever sees lowercased
	/// tokens. `None` yields no routes.
	pub fn from_str<F>(value: Option<&str>, is_address_valid: F, lowercase: bool) -> Result<Vec<Self>>
	where
		F: Fn(&str) -> bool,
	{
		let Some(value) = value else {
			return Ok(Vec::new());
		};
		let value = if lowercase { value.to_lowercase() } else { value.to_owned() };

		let mut routes = Vec::new();
		for line in content_lines(&value) {
			let tokens: Vec<&str> = line.split_whitespace().collect();
			let [from, to] = tokens[..] else {
				return Err(AccountError::InvalidFormat { line: line.to_owned() });
			};
			if !is_address_valid(from) || !is_address_valid(to) {
				return Err(AccountError::InvalidAddress {
					origin: AddressOrigin::Inline,
					line: line.to_owned(),
				});
			}
			routes.push(Self {
				from_address: from.to_owned(),
				to_address: to.to_owned(),
			});
		}

		debug!(count = routes.len(), "parsed inline routes");
		Ok(routes)
	}

	/// Pair two address files line by line: line `i` of `from_file` sends
	/// to line `i` of `to_file`.
	pub fn from_files<F>(
		from_file: &Path,
		to_file: &Path,
		is_address_valid: F,
		lowercase: bool,
	) -> Result<Vec<Self>>
	where
		F: Fn(&str) -> bool,
	{
		let from_file = expand_home(from_file);
		let to_file = expand_home(to_file);
		ensure_file(&from_file)?;
		ensure_file(&to_file)?;

		let from = read_lines(&from_file, lowercase)?;
		let to = read_lines(&to_file, lowercase)?;
		if from.len() != to.len() {
			return Err(AccountError::LengthMismatch {
				from: from.len(),
				to: to.len(),
			});
		}
		let from = check_addresses(&from_file, from, &is_address_valid)?;
		let to = check_addresses(&to_file, to, &is_address_valid)?;

		Ok(from
			.into_iter()
			.zip(to)
			.map(|(from_address, to_address)| Self { from_address, to_address })
			.collect())
	}
}

impl fmt::Display for TxRoute {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}->{}", self.from_address, self.to_address)
	}
}

/// Read one address per line. Order is preserved and duplicates are kept.
pub fn read_addresses_from_file<F>(source: &Path, is_valid_address: F, lowercase: bool) -> Result<Vec<String>>
where
	F: Fn(&str) -> bool,
{
	let source = expand_home(source);
	ensure_file(&source)?;

	let lines = read_lines(&source, lowercase)?;
	let addresses = check_addresses(&source, lines, is_valid_address)?;

	debug!(path = %source.display(), count = addresses.len(), "read addresses");
	Ok(addresses)
}

/// Read a list of arbitrary items (addresses, keys, amounts), one per line.
///
/// Unlike [`read_addresses_from_file`], blank lines and `#` comments are
/// skipped, so the file may be annotated. Every remaining item must pass
/// `is_valid`.
pub fn read_items_from_file<F>(source: &Path, is_valid: F, lowercase: bool) -> Result<Vec<String>>
where
	F: Fn(&str) -> bool,
{
	let source = expand_home(source);
	ensure_file(&source)?;

	let data = read_trimmed(&source)?;
	let data = if lowercase { data.to_lowercase() } else { data };

	let mut items = Vec::new();
	for line in content_lines(&data) {
		if !is_valid(line) {
			return Err(AccountError::InvalidAddress {
				origin: AddressOrigin::File(source),
				line: line.to_owned(),
			});
		}
		items.push(line.to_owned());
	}

	debug!(path = %source.display(), count = items.len(), "read items");
	Ok(items)
}

// -- Private keys --

/// Private keys indexed by the address each one controls.
///
/// Built once from a list or a file, then read-only.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct AddressToPrivate {
	inner: BTreeMap<String, String>,
}

impl AddressToPrivate {
	/// Derive an address for every key. A single underivable key fails the
	/// whole build. Keys that derive the same address collapse into one
	/// entry holding the last of them.
	pub fn from_list<S, F, E>(private_keys: &[S], address_from_private: F, address_lowercase: bool) -> Result<Self>
	where
		S: AsRef<str>,
		F: Fn(&str) -> std::result::Result<String, E>,
		E: fmt::Display,
	{
		let mut inner = BTreeMap::new();
		for private_key in private_keys {
			let private_key = private_key.as_ref();
			let address = address_from_private(private_key).map_err(|e| AccountError::InvalidPrivateKey {
				key: private_key.to_owned(),
				reason: e.to_string(),
			})?;
			let address = if address_lowercase { address.to_lowercase() } else { address };
			inner.insert(address, private_key.to_owned());
		}

		debug!(keys = private_keys.len(), addresses = inner.len(), "built address map");
		Ok(Self { inner })
	}

	/// Same as [`from_list`](Self::from_list), reading one key per line.
	pub fn from_file<F, E>(private_keys_file: &Path, address_from_private: F, address_lowercase: bool) -> Result<Self>
	where
		F: Fn(&str) -> std::result::Result<String, E>,
		E: fmt::Display,
	{
		let path = expand_home(private_keys_file);
		let data = read_trimmed(&path)?;
		let private_keys: Vec<&str> = data.split('\n').collect();
		Self::from_list(&private_keys[..], address_from_private, address_lowercase)
	}

	pub fn get(&self, address: &str) -> Option<&str> {
		self.inner.get(address).map(String::as_str)
	}

	pub fn contains_address(&self, address: &str) -> bool {
		self.inner.contains_key(address)
	}

	pub fn len(&self) -> usize {
		self.inner.len()
	}

	pub fn is_empty(&self) -> bool {
		self.inner.is_empty()
	}

	/// Addresses in sorted order.
	pub fn addresses(&self) -> impl Iterator<Item = &str> {
		self.inner.keys().map(String::as_str)
	}

	/// `(address, private_key)` pairs in address order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.inner.iter().map(|(a, k)| (a.as_str(), k.as_str()))
	}
}

// Keys stay out of debug output.
impl fmt::Debug for AddressToPrivate {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("AddressToPrivate")
			.field("addresses", &self.inner.keys().collect::<Vec<_>>())
			.finish()
	}
}

// -- Utility --

/// Replace a leading `~` component with the current user's home directory.
///
/// Only the current user's home is known here; `~name/...` paths are
/// returned unchanged.
pub fn expand_home(path: &Path) -> PathBuf {
	match (path.strip_prefix("~"), dirs::home_dir()) {
		(Ok(rest), Some(home)) => home.join(rest),
		_ => path.to_path_buf(),
	}
}

fn ensure_file(path: &Path) -> Result<()> {
	if path.is_file() {
		Ok(())
	} else {
		Err(AccountError::FileNotFound { path: path.to_path_buf() })
	}
}

/// Trimmed file content split on `\n`, optionally lowercased.
fn read_lines(path: &Path, lowercase: bool) -> Result<Vec<String>> {
	let data = read_trimmed(path)?;
	let data = if lowercase { data.to_lowercase() } else { data };
	Ok(data.split('\n').map(str::to_owned).collect())
}

/// Fail on the first line `is_valid` rejects.
fn check_addresses<F>(source: &Path, lines: Vec<String>, is_valid: F) -> Result<Vec<String>>
where
	F: Fn(&str) -> bool,
{
	match lines.iter().find(|line| !is_valid(line.as_str())) {
		Some(line) => Err(AccountError::InvalidAddress {
			origin: AddressOrigin::File(source.to_path_buf()),
			line: line.clone(),
		}),
		None => Ok(lines),
	}
}

fn read_trimmed(path: &Path) -> Result<String> {
	std::fs::read_to_string(path)
		.map(|data| data.trim().to_owned())
		.map_err(|source| AccountError::Unreadable {
			path: path.to_path_buf(),
			source,
		})
}

/// Non-empty lines with `#` comments removed and surrounding whitespace
/// trimmed.
fn content_lines(text: &str) -> impl Iterator<Item = &str> {
	text.lines()
		.map(|line| line.split('#').next().unwrap_or_default().trim())
		.filter(|line| !line.is_empty())
}
