use std::str::FromStr;

use ckb_crypto::secp::Privkey;
use ckb_hash::blake2b_256;
use ckb_sdk::{Address, AddressPayload, CodeHashIndex, NetworkType};
use ckb_types::H160;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum KeyError {
	#[error("not hex: {0}")]
	Hex(#[from] hex::FromHexError),

	#[error("expected 32 bytes, got {0}")]
	Length(usize),

	#[error("not a valid secp256k1 secret: {0}")]
	Secret(String),
}

/// Map a network name to its CKB network. Anything but `mainnet` is
/// treated as testnet.
pub fn network_type(name: &str) -> NetworkType {
	match name {
		"mainnet" => NetworkType::Mainnet,
		_ => NetworkType::Testnet,
	}
}

/// Whether `text` is a CKB address on `network`.
pub fn is_valid_address(network: NetworkType, text: &str) -> bool {
	Address::from_str(text)
		.map(|addr| addr.network() == network)
		.unwrap_or(false)
}

/// Derive the default secp256k1/blake160 lock address for a hex private
/// key (optionally `0x`-prefixed), encoded in full format.
pub fn address_from_private(network: NetworkType, private_key: &str) -> Result<String, KeyError> {
	let hex_key = private_key.strip_prefix("0x").unwrap_or(private_key);
	let bytes = hex::decode(hex_key)?;
	if bytes.len() != 32 {
		return Err(KeyError::Length(bytes.len()));
	}

	let pubkey = Privkey::from_slice(&bytes)
		.pubkey()
		.map_err(|e| KeyError::Secret(e.to_string()))?;
	let hash = blake2b_256(pubkey.serialize());
	let lock_arg = H160::from_slice(&hash[..20]).map_err(|e| KeyError::Secret(e.to_string()))?;

	let payload = AddressPayload::new_short(CodeHashIndex::Sighash, lock_arg);
	Ok(Address::new(network, payload, true).to_string())
}
