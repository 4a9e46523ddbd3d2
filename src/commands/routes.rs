use std::path::Path;

use anyhow::{Context, Result};

use crate::account::{expand_home, TxRoute};
use crate::cli::{Cli, RoutesCommand};
use crate::commands::{print_json, resolve};
use crate::config::Config;

pub fn run(cli: &Cli, cmd: &RoutesCommand) -> Result<()> {
	let config = Config::load()?;
	let settings = resolve(cli, &config);
	let check = settings.address_check();

	let routes = match cmd {
		RoutesCommand::Inline { text, file } => {
			let text = route_text(text.as_deref(), file.as_deref())?;
			TxRoute::from_str(text.as_deref(), check, settings.lowercase)?
		}
		RoutesCommand::Pair { from, to } => TxRoute::from_files(from, to, check, settings.lowercase)?,
	};

	if cli.json {
		return print_json(&routes);
	}
	for route in &routes {
		println!("{} -> {}", route.from_address(), route.to_address());
	}
	println!("{} route(s)", routes.len());
	Ok(())
}

/// Route text given on the command line, else the content of `file`.
fn route_text(text: Option<&str>, file: Option<&Path>) -> Result<Option<String>> {
	match (text, file) {
		(Some(text), _) => Ok(Some(text.to_owned())),
		(None, Some(path)) => {
			let path = expand_home(path);
			let content = std::fs::read_to_string(&path)
				.with_context(|| format!("can't read routes from {}", path.display()))?;
			Ok(Some(content))
		}
		(None, None) => Ok(None),
	}
}
