//! End-to-end parsing of route, address and key files against real CKB
//! address validation and key derivation.

use std::io::Write;
use std::path::Path;

use ckb_routes::account::{read_addresses_from_file, AccountError, AddressOrigin, AddressToPrivate, TxRoute};
use ckb_routes::keys::{address_from_private, is_valid_address};
use ckb_sdk::NetworkType;
use tempfile::NamedTempFile;

const NET: NetworkType = NetworkType::Testnet;

fn key(byte: u8) -> String {
	format!("0x{}", hex::encode([byte; 32]))
}

fn address(byte: u8) -> String {
	address_from_private(NET, &key(byte)).expect("test key derives")
}

fn valid(text: &str) -> bool {
	is_valid_address(NET, text)
}

fn derive(private_key: &str) -> Result<String, ckb_routes::keys::KeyError> {
	address_from_private(NET, private_key)
}

fn file_with(lines: &[String]) -> NamedTempFile {
	let mut f = NamedTempFile::new().unwrap();
	writeln!(f, "{}", lines.join("\n")).unwrap();
	f
}

#[test]
fn pair_files_positionally() {
	let from = file_with(&[address(1), address(2), address(3)]);
	let to = file_with(&[address(4), address(5), address(6)]);

	let routes = TxRoute::from_files(from.path(), to.path(), valid, false).unwrap();

	assert_eq!(routes.len(), 3);
	for (i, route) in routes.iter().enumerate() {
		let i = i as u8;
		assert_eq!(route.from_address(), address(1 + i));
		assert_eq!(route.to_address(), address(4 + i));
	}
}

#[test]
fn pair_files_length_mismatch() {
	let from = file_with(&["a".into(), "b".into(), "c".into()]);
	let to = file_with(&["d".into(), "e".into()]);

	let err = TxRoute::from_files(from.path(), to.path(), |_| true, false).unwrap_err();
	assert!(matches!(err, AccountError::LengthMismatch { from: 3, to: 2 }));
}

#[test]
fn pair_files_length_mismatch_wins_over_bad_address() {
	let from = file_with(&[address(1), address(2), "bogus".into()]);
	let to = file_with(&[address(4), address(5)]);

	let err = TxRoute::from_files(from.path(), to.path(), valid, false).unwrap_err();
	assert!(
		matches!(err, AccountError::LengthMismatch { from: 3, to: 2 }),
		"unexpected error: {err:?}"
	);
}

#[test]
fn pair_files_equal_length_still_validated() {
	let from = file_with(&[address(1), "bogus".into()]);
	let to = file_with(&[address(4), address(5)]);

	let err = TxRoute::from_files(from.path(), to.path(), valid, false).unwrap_err();
	match err {
		AccountError::InvalidAddress {
			origin: AddressOrigin::File(path),
			line,
		} => {
			assert_eq!(path, from.path());
			assert_eq!(line, "bogus");
		}
		other => panic!("expected InvalidAddress, got {other:?}"),
	}
}

#[test]
fn pair_files_missing_to_file() {
	let from = file_with(&[address(1)]);
	let missing = Path::new("/nonexistent/ckb-routes/to.txt");

	let err = TxRoute::from_files(from.path(), missing, valid, false).unwrap_err();
	assert!(matches!(err, AccountError::FileNotFound { ref path } if path == missing));
}

#[test]
fn address_file_names_file_and_line() {
	let f = file_with(&[address(1), "ckt1qtest".into(), address(2)]);

	let err = read_addresses_from_file(f.path(), valid, false).unwrap_err();
	match err {
		AccountError::InvalidAddress {
			origin: AddressOrigin::File(path),
			line,
		} => {
			assert_eq!(path, f.path());
			assert_eq!(line, "ckt1qtest");
		}
		other => panic!("expected InvalidAddress, got {other:?}"),
	}
}

#[test]
fn address_file_keeps_duplicates_and_order() {
	let f = file_with(&[address(2), address(1), address(2)]);
	let addresses = read_addresses_from_file(f.path(), valid, false).unwrap();
	assert_eq!(addresses, vec![address(2), address(1), address(2)]);
}

#[test]
fn address_file_lowercase_feeds_predicate() {
	let upper = address(1).to_uppercase();
	let f = file_with(&[upper.clone()]);

	let seen = std::cell::RefCell::new(Vec::new());
	let recording = |text: &str| {
		seen.borrow_mut().push(text.to_owned());
		valid(text)
	};
	read_addresses_from_file(f.path(), recording, true).unwrap();
	assert_eq!(*seen.borrow(), vec![address(1)]);

	let unchanged = read_addresses_from_file(f.path(), |t: &str| t == upper, false).unwrap();
	assert_eq!(unchanged, vec![upper.clone()]);
	assert_eq!(read_addresses_from_file(f.path(), valid, true).unwrap(), vec![address(1)]);
}

#[test]
fn inline_routes_with_real_addresses() {
	let text = format!(
		"# batch 1\n{} {}\n\n{} {} # second\n",
		address(1),
		address(2),
		address(3),
		address(4)
	);
	let routes = TxRoute::from_str(Some(text.as_str()), valid, false).unwrap();
	assert_eq!(routes.len(), 2);
	assert_eq!(routes[1].from_address(), address(3));
	assert_eq!(routes[1].to_address(), address(4));

	let bad = format!("{} ckt1qtest", address(1));
	assert!(matches!(
		TxRoute::from_str(Some(bad.as_str()), valid, false),
		Err(AccountError::InvalidAddress { .. })
	));
}

#[test]
fn key_file_builds_address_map() {
	let f = file_with(&[key(1), key(2), key(3)]);

	let map = AddressToPrivate::from_file(f.path(), derive, false).unwrap();

	assert_eq!(map.len(), 3);
	for byte in 1..=3 {
		assert_eq!(map.get(&address(byte)), Some(key(byte).as_str()));
	}
}

#[test]
fn key_list_same_address_keeps_last() {
	// Same secret with and without the 0x prefix derives one address.
	let prefixed = key(7);
	let bare = prefixed[2..].to_owned();

	let map = AddressToPrivate::from_list(&[prefixed, bare.clone()], derive, false).unwrap();
	assert_eq!(map.len(), 1);
	assert_eq!(map.get(&address(7)), Some(bare.as_str()));
}

#[test]
fn key_file_with_bad_key_fails_whole_build() {
	let f = file_with(&[key(1), "0xnothex".into(), key(2)]);

	let err = AddressToPrivate::from_file(f.path(), derive, false).unwrap_err();
	match err {
		AccountError::InvalidPrivateKey { key, .. } => assert_eq!(key, "0xnothex"),
		other => panic!("expected InvalidPrivateKey, got {other:?}"),
	}
}
