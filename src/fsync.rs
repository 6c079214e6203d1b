// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Durability barriers.
//!
//! A synced file can still vanish after a crash if the directory entry that
//! names it was never synced, so newly created files may need both.

use std::{
	fs::{File, OpenOptions},
	io,
	path::Path,
};

use crate::params::SyncMode;

/// Syncs `file` with `fsync(2)` or `fdatasync(2)` depending on `mode`.
pub fn sync_file(file: &File, mode: SyncMode) -> io::Result<()> {
	match mode {
		SyncMode::All => file.sync_all(),
		SyncMode::Data => file.sync_data(),
	}
}

/// Syncs the directory at `dir`, making created or removed entries durable.
pub fn sync_dir(dir: &Path) -> io::Result<()> {
	let dir = OpenOptions::new().read(true).open(dir)?;
	dir.sync_all()
}

/// Returns the directory that holds the entry for `path`.
///
/// A bare file name lives in the current directory.
pub fn parent_dir(path: &Path) -> &Path {
	match path.parent() {
		Some(parent) if !parent.as_os_str().is_empty() => parent,
		_ => Path::new("."),
	}
}
