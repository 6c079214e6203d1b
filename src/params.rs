use std::{fmt, num::ParseIntError, path::PathBuf, str::FromStr};

use serde::Deserialize;
use thiserror::Error;

use crate::consts::{DEFAULT_MODE, DEFAULT_PATH, DEFAULT_PAYLOAD, MAX_MODE};

/// Everything needed to perform one run of the writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Params {
	/// Target file
	pub path: PathBuf,

	/// Bytes written to the target file
	pub payload: Payload,

	/// Permission bits used if the file is created
	pub mode: FileMode,

	/// Which checks run after the write
	pub variant: Variant,

	/// Durability barrier used by the verified variant
	pub sync: SyncMode,

	/// Also sync the directory containing the target file
	pub sync_parent: bool,

	/// Re-read the file and compare it with the payload before closing
	pub read_back: bool,

	/// Collect and print step timings
	pub stats: bool,
}

impl Default for Params {
	fn default() -> Self {
		Self {
			path: PathBuf::from(DEFAULT_PATH),
			payload: Default::default(),
			mode: Default::default(),
			variant: Default::default(),
			sync: Default::default(),
			sync_parent: false,
			read_back: false,
			stats: false,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct Payload(Vec<u8>);

impl Payload {
	pub fn as_bytes(&self) -> &[u8] {
		&self.0
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl Default for Payload {
	fn default() -> Self {
		Self(DEFAULT_PAYLOAD.to_vec())
	}
}

impl fmt::Display for Payload {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&String::from_utf8_lossy(&self.0))
	}
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("The payload must not be empty")]
pub struct EmptyPayloadError;

impl FromStr for Payload {
	type Err = EmptyPayloadError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		if s.is_empty() {
			Err(EmptyPayloadError)
		} else {
			Ok(Self(s.as_bytes().to_vec()))
		}
	}
}

impl TryFrom<String> for Payload {
	type Error = EmptyPayloadError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		if value.is_empty() {
			Err(EmptyPayloadError)
		} else {
			Ok(Self(value.into_bytes()))
		}
	}
}

/// Permission bits of a newly created file, e.g. `0o755`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct FileMode(u32);

impl FileMode {
	pub fn get(self) -> u32 {
		self.0
	}
}

impl Default for FileMode {
	fn default() -> Self {
		Self(DEFAULT_MODE)
	}
}

impl fmt::Display for FileMode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{:#o}", self.0)
	}
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseModeError {
	#[error("Invalid octal mode: {0}")]
	Parse(#[from] ParseIntError),

	#[error("Mode {0:#o} is out of range (maximum is {max:#o})", max = MAX_MODE)]
	OutOfRange(u32),
}

impl TryFrom<u32> for FileMode {
	type Error = ParseModeError;

	fn try_from(value: u32) -> Result<Self, Self::Error> {
		if value > MAX_MODE {
			Err(ParseModeError::OutOfRange(value))
		} else {
			Ok(Self(value))
		}
	}
}

impl FromStr for FileMode {
	type Err = ParseModeError;

	/// Accepts `755`, `0755` and `0o755`.
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let digits = s.strip_prefix("0o").unwrap_or(s);
		let mode = u32::from_str_radix(digits, 8)?;
		mode.try_into()
	}
}

impl TryFrom<String> for FileMode {
	type Error = ParseModeError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		value.parse()
	}
}

/// Which checks run between the write and the close.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
	/// open, write, close
	Basic,
	/// open, write, check the written length, sync, close
	#[default]
	Verified,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown variant {0:?} (expected basic or verified)")]
pub struct ParseVariantError(String);

impl FromStr for Variant {
	type Err = ParseVariantError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"basic" | "Basic" => Ok(Self::Basic),
			"verified" | "Verified" => Ok(Self::Verified),
			other => Err(ParseVariantError(other.to_string())),
		}
	}
}

impl fmt::Display for Variant {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Basic => f.write_str("basic"),
			Self::Verified => f.write_str("verified"),
		}
	}
}

/// The durability barrier applied to the target file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncMode {
	/// `fsync(2)`: file data and metadata
	#[default]
	All,
	/// `fdatasync(2)`: file data and the metadata needed to read it back
	Data,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown sync mode {0:?} (expected all or data)")]
pub struct ParseSyncModeError(String);

impl FromStr for SyncMode {
	type Err = ParseSyncModeError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"all" | "All" => Ok(Self::All),
			"data" | "Data" => Ok(Self::Data),
			other => Err(ParseSyncModeError(other.to_string())),
		}
	}
}

impl fmt::Display for SyncMode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::All => f.write_str("all"),
			Self::Data => f.write_str("data"),
		}
	}
}
