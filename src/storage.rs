//! The filesystem operations the write pipeline is built from.
//!
//! [`crate::host::HostStorage`] implements them on top of the host OS. Tests
//! substitute implementations that fail or misbehave at a chosen step.

use std::{io, path::Path};

use crate::params::{FileMode, SyncMode};

/// Opens files and syncs directories.
pub trait Storage {
	type Handle: Handle;

	/// Opens `path` for reading and writing, creating it with `mode` if it does not
	/// exist and truncating it otherwise.
	fn open(&mut self, path: &Path, mode: FileMode) -> io::Result<Self::Handle>;

	/// Makes the directory entries of `dir` durable.
	fn sync_dir(&mut self, dir: &Path) -> io::Result<()>;
}

/// An open file exclusively owned by the pipeline.
pub trait Handle {
	/// A single write call. May transfer fewer bytes than `buf.len()`.
	fn write(&mut self, buf: &[u8]) -> io::Result<usize>;

	/// Reads the whole file from its start.
	fn read_back(&mut self) -> io::Result<Vec<u8>>;

	/// Forces written data to stable storage.
	fn sync(&mut self, mode: SyncMode) -> io::Result<()>;

	/// Releases the handle and reports errors the OS surfaces at close time.
	fn close(self) -> io::Result<()>;
}
