use std::{io, path::PathBuf};

use thiserror::Error;

pub type WriteResult<T> = Result<T, WriteError>;

/// Failure of one step of the write pipeline.
///
/// Every variant is fatal for the run. The underlying OS error, if any, is
/// available through [`std::error::Error::source`].
#[derive(Error, Debug)]
pub enum WriteError {
	#[error("Error opening file {}: {source}", .path.display())]
	Open {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	#[error("Error writing to file: {0}")]
	Write(#[source] io::Error),

	#[error("Incomplete write. ({written} of {expected} bytes)")]
	IncompleteWrite { written: usize, expected: usize },

	#[error("Error reading back file: {0}")]
	ReadBack(#[source] io::Error),

	#[error("File contents differ from the payload ({found} bytes read, {expected} expected)")]
	ContentMismatch { found: usize, expected: usize },

	#[error("Error syncing file: {0}")]
	Sync(#[source] io::Error),

	#[error("Error syncing directory {}: {source}", .path.display())]
	SyncDir {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	#[error("Error closing file: {0}")]
	Close(#[source] io::Error),
}

/// Plain discriminant of [`WriteError`], convenient for matching and exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
	Open,
	Write,
	IncompleteWrite,
	ReadBack,
	ContentMismatch,
	Sync,
	SyncDir,
	Close,
}

impl WriteError {
	pub fn kind(&self) -> ErrorKind {
		match self {
			Self::Open { .. } => ErrorKind::Open,
			Self::Write(_) => ErrorKind::Write,
			Self::IncompleteWrite { .. } => ErrorKind::IncompleteWrite,
			Self::ReadBack(_) => ErrorKind::ReadBack,
			Self::ContentMismatch { .. } => ErrorKind::ContentMismatch,
			Self::Sync(_) => ErrorKind::Sync,
			Self::SyncDir { .. } => ErrorKind::SyncDir,
			Self::Close(_) => ErrorKind::Close,
		}
	}
}

/// Failure to load a TOML configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
	#[error("Unable to read config file {}: {source}", .path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	#[error(transparent)]
	Toml(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
	use std::error::Error as _;

	use super::*;

	#[test]
	fn test_incomplete_write_message() {
		let err = WriteError::IncompleteWrite {
			written: 3,
			expected: 16,
		};
		assert!(err.to_string().starts_with("Incomplete write."));
		assert_eq!(err.kind(), ErrorKind::IncompleteWrite);
		assert!(err.source().is_none());
	}

	#[test]
	fn test_source_is_kept() {
		let err = WriteError::Close(io::Error::from_raw_os_error(libc::EIO));
		assert_eq!(err.kind(), ErrorKind::Close);
		let source = err.source().unwrap();
		let io_err = source.downcast_ref::<io::Error>().unwrap();
		assert_eq!(io_err.raw_os_error(), Some(libc::EIO));
	}

	#[test]
	fn test_open_message_names_path() {
		let err = WriteError::Open {
			path: PathBuf::from("/nope/test.txt"),
			source: io::ErrorKind::NotFound.into(),
		};
		assert!(err.to_string().contains("/nope/test.txt"));
	}
}
