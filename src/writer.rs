use std::path::PathBuf;

use crate::{
	error::{WriteError, WriteResult},
	fsync,
	host::HostStorage,
	params::{Params, Variant},
	stats::{Step, WriteStats},
	storage::{Handle, Storage},
};

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct WriteReport {
	pub path: PathBuf,
	pub bytes_written: usize,
	pub stats: WriteStats,
}

/// Writes the payload described by [`Params`] through a [`Storage`].
///
/// The steps run strictly in order: open, write, verify the length, read back,
/// sync, sync the parent directory, close. Only the basic steps (open, write,
/// close) run for [`Variant::Basic`]. The first failure ends the run, but once
/// the file is open its handle is always closed.
pub struct FileWriter<S: Storage> {
	storage: S,
	params: Params,
}

impl<S: Storage> FileWriter<S> {
	pub fn new(storage: S, params: Params) -> Self {
		Self { storage, params }
	}

	pub fn params(&self) -> &Params {
		&self.params
	}

	pub fn run(mut self) -> WriteResult<WriteReport> {
		let mut stats = WriteStats::new();
		stats.start_time_measurement();

		debug!(
			"Writing {:?} ({} bytes) to {} (mode {}, variant {})",
			self.params.payload.to_string(),
			self.params.payload.len(),
			self.params.path.display(),
			self.params.mode,
			self.params.variant,
		);
		if self.params.variant == Variant::Basic
			&& (self.params.read_back || self.params.sync_parent)
		{
			warn!("The basic variant neither reads back nor syncs, ignoring these options...");
		}

		let mut handle = stats
			.measure(Step::Open, || self.storage.open(&self.params.path, self.params.mode))
			.map_err(|source| WriteError::Open {
				path: self.params.path.clone(),
				source,
			})?;

		let written = self.write_and_check(&mut handle, &mut stats);
		let closed = stats.measure(Step::Close, || handle.close());
		stats.stop_time_measurement();

		match (written, closed) {
			(Ok(bytes_written), Ok(())) => {
				debug!("Wrote {bytes_written} bytes to {}", self.params.path.display());
				Ok(WriteReport {
					path: self.params.path,
					bytes_written,
					stats,
				})
			}
			(Ok(_), Err(err)) => Err(WriteError::Close(err)),
			(Err(err), Ok(())) => Err(err),
			(Err(err), Err(close_err)) => {
				warn!(
					"Closing {} after a failed run also failed: {close_err}",
					self.params.path.display()
				);
				Err(err)
			}
		}
	}

	/// Everything between open and close. Returns the number of bytes written.
	fn write_and_check(
		&mut self,
		handle: &mut S::Handle,
		stats: &mut WriteStats,
	) -> WriteResult<usize> {
		let payload = self.params.payload.as_bytes();

		let written = stats
			.measure(Step::Write, || handle.write(payload))
			.map_err(WriteError::Write)?;
		trace!("write returned {written}");

		if self.params.variant == Variant::Basic {
			if written != payload.len() {
				debug!("Accepting short write of {written}/{} bytes", payload.len());
			}
			return Ok(written);
		}

		stats.measure(Step::Verify, || check_complete(written, payload.len()))?;

		if self.params.read_back {
			let contents = stats
				.measure(Step::ReadBack, || handle.read_back())
				.map_err(WriteError::ReadBack)?;
			if contents != payload {
				return Err(WriteError::ContentMismatch {
					found: contents.len(),
					expected: payload.len(),
				});
			}
		}

		let sync = self.params.sync;
		stats
			.measure(Step::Sync, || handle.sync(sync))
			.map_err(WriteError::Sync)?;

		if self.params.sync_parent {
			let dir = fsync::parent_dir(&self.params.path);
			stats
				.measure(Step::SyncDir, || self.storage.sync_dir(dir))
				.map_err(|source| WriteError::SyncDir {
					path: dir.to_path_buf(),
					source,
				})?;
		}

		Ok(written)
	}
}

fn check_complete(written: usize, expected: usize) -> WriteResult<()> {
	if written == expected {
		Ok(())
	} else {
		Err(WriteError::IncompleteWrite { written, expected })
	}
}

/// Runs the pipeline described by `params` against the host filesystem.
pub fn write_payload(params: &Params) -> WriteResult<WriteReport> {
	FileWriter::new(HostStorage, params.clone()).run()
}
