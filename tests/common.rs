#![allow(dead_code)]

use std::{
	fs::read,
	path::{Path, PathBuf},
	process::{Command, Output},
};

use tempfile::TempDir;

/// Creates a scratch directory and returns it along with the path of a file inside it.
pub fn scratch_file(name: &str) -> (TempDir, PathBuf) {
	env_logger::try_init().ok();
	let dir = tempfile::Builder::new()
		.prefix("durawrite-")
		.tempdir()
		.unwrap();
	let path = dir.path().join(name);
	(dir, path)
}

/// Verifies that `path` exists and holds exactly `contents`.
pub fn verify_file_equals(path: &Path, contents: &[u8]) {
	assert!(path.exists(), "{} does not exist", path.display());
	assert_eq!(read(path).unwrap(), contents);
}

/// Runs the `durawrite` binary built by Cargo with `args`.
pub fn run_durawrite<I, S>(args: I) -> Output
where
	I: IntoIterator<Item = S>,
	S: AsRef<std::ffi::OsStr>,
{
	Command::new(env!("CARGO_BIN_EXE_durawrite"))
		.args(args)
		// Keep the environment of the test runner from leaking into the defaults.
		.env_remove("DURAWRITE_PATH")
		.env_remove("DURAWRITE_MODE")
		.env_remove("DURAWRITE_VARIANT")
		.env_remove("DURAWRITE_SYNC")
		.output()
		.expect("failed to execute durawrite")
}
