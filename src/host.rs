// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::{
	fs::{File, OpenOptions},
	io::{self, Read, Seek, SeekFrom, Write},
	os::{
		fd::{AsRawFd, IntoRawFd},
		unix::fs::OpenOptionsExt,
	},
	path::Path,
};

use crate::{
	fsync,
	params::{FileMode, SyncMode},
	storage::{Handle, Storage},
};

/// [`Storage`] backed by the host filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct HostStorage;

impl Storage for HostStorage {
	type Handle = HostFile;

	fn open(&mut self, path: &Path, mode: FileMode) -> io::Result<HostFile> {
		let file = OpenOptions::new()
			.read(true)
			.write(true)
			.create(true)
			.truncate(true)
			.mode(mode.get())
			.open(path)?;
		trace!("Opened {} as fd {}", path.display(), file.as_raw_fd());
		Ok(HostFile(file))
	}

	fn sync_dir(&mut self, dir: &Path) -> io::Result<()> {
		fsync::sync_dir(dir)
	}
}

/// A file opened by [`HostStorage`].
#[derive(Debug)]
pub struct HostFile(File);

impl Handle for HostFile {
	fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
		self.0.write(buf)
	}

	fn read_back(&mut self) -> io::Result<Vec<u8>> {
		self.0.seek(SeekFrom::Start(0))?;
		let mut contents = Vec::new();
		self.0.read_to_end(&mut contents)?;
		Ok(contents)
	}

	fn sync(&mut self, mode: SyncMode) -> io::Result<()> {
		fsync::sync_file(&self.0, mode)
	}

	/// Closes the descriptor with `close(2)` directly, as dropping a [`File`]
	/// discards the result.
	fn close(self) -> io::Result<()> {
		let fd = self.0.into_raw_fd();
		trace!("Closing fd {fd}");
		if unsafe { libc::close(fd) } < 0 {
			Err(io::Error::last_os_error())
		} else {
			Ok(())
		}
	}
}
