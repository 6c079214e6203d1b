use std::{
	fs,
	path::{Path, PathBuf},
	str::FromStr,
};

use clap::Parser;
use serde::Deserialize;

use crate::{
	consts::DEFAULT_PATH,
	error::ConfigError,
	params::{FileMode, Params, Payload, SyncMode, Variant},
};

/// Used by clap to derive the command line interface.
#[derive(Parser, Debug)]
#[clap(version, author, about)]
pub struct Args {
	#[clap(flatten, next_help_heading = "Target OPTIONS")]
	pub target_args: TargetArgs,

	#[clap(flatten, next_help_heading = "Durability OPTIONS")]
	pub durability_args: DurabilityArgs,

	/// Display step timings after the run
	#[clap(long)]
	pub stats: bool,

	/// Load the parameters from a TOML file
	///
	/// Target and durability options given on the command line are ignored
	/// when a config file is used.
	#[clap(short, long, value_name = "FILE")]
	pub config: Option<PathBuf>,
}

/// Where to write and what.
#[derive(Parser, Debug)]
pub struct TargetArgs {
	/// The file to create or truncate
	#[clap(default_value = DEFAULT_PATH, env = "DURAWRITE_PATH")]
	pub path: PathBuf,

	/// Permission bits (octal) of a newly created file
	#[clap(short, long, default_value_t, env = "DURAWRITE_MODE")]
	pub mode: FileMode,

	/// Text written to the file
	#[clap(short, long, default_value_t)]
	pub payload: Payload,
}

/// Which checks run after the write.
#[derive(Parser, Debug)]
pub struct DurabilityArgs {
	/// Pipeline variant (basic, verified)
	///
	/// - 'basic' opens, writes and closes
	///
	/// - 'verified' additionally rejects short writes and syncs the file before closing
	#[clap(long, default_value_t, env = "DURAWRITE_VARIANT")]
	pub variant: Variant,

	/// Durability barrier (all, data)
	///
	/// - 'all' syncs file data and metadata (fsync)
	///
	/// - 'data' syncs file data only (fdatasync)
	#[clap(long, default_value_t, env = "DURAWRITE_SYNC")]
	pub sync: SyncMode,

	/// Also sync the directory containing the file
	#[clap(long)]
	pub sync_parent: bool,

	/// Read the file back and compare it with the payload before closing
	#[clap(long)]
	pub read_back: bool,
}

impl Args {
	/// Resolves the parameters of the run, loading the config file if one was given.
	pub fn into_params(mut self) -> Result<Params, ConfigError> {
		match self.config.take() {
			Some(config) => {
				let config = WriterConfig::from_file(&config)?;
				Ok(Params {
					stats: self.stats,
					..Params::from(config)
				})
			}
			None => Ok(Params::from(self)),
		}
	}
}

impl From<Args> for Params {
	fn from(args: Args) -> Self {
		let Args {
			target_args: TargetArgs {
				path,
				mode,
				payload,
			},
			durability_args:
				DurabilityArgs {
					variant,
					sync,
					sync_parent,
					read_back,
				},
			stats,
			config: _,
		} = args;
		Self {
			path,
			payload,
			mode,
			variant,
			sync,
			sync_parent,
			read_back,
			stats,
		}
	}
}

/// Parameters loaded from a TOML file.
///
/// Note that the field names are relevant for the TOML's tables. Every table and
/// key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WriterConfig {
	pub target: TargetConfig,
	pub payload: PayloadConfig,
	pub durability: DurabilityConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TargetConfig {
	pub path: Option<PathBuf>,
	pub mode: Option<FileMode>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PayloadConfig {
	pub text: Option<Payload>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DurabilityConfig {
	pub variant: Option<Variant>,
	pub sync: Option<SyncMode>,
	pub sync_parent: bool,
	pub read_back: bool,
}

impl WriterConfig {
	pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
		debug!("Loading config from {}", path.display());
		let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
			path: path.to_path_buf(),
			source,
		})?;
		contents.parse()
	}
}

impl FromStr for WriterConfig {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Ok(toml::from_str(s)?)
	}
}

impl From<WriterConfig> for Params {
	fn from(config: WriterConfig) -> Self {
		let WriterConfig {
			target: TargetConfig { path, mode },
			payload: PayloadConfig { text },
			durability:
				DurabilityConfig {
					variant,
					sync,
					sync_parent,
					read_back,
				},
		} = config;
		let defaults = Params::default();
		Self {
			path: path.unwrap_or(defaults.path),
			payload: text.unwrap_or(defaults.payload),
			mode: mode.unwrap_or(defaults.mode),
			variant: variant.unwrap_or(defaults.variant),
			sync: sync.unwrap_or(defaults.sync),
			sync_parent,
			read_back,
			stats: false,
		}
	}
}
