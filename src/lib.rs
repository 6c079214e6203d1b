#![warn(rust_2018_idioms)]

#[macro_use]
extern crate log;

pub mod args;
pub mod consts;
pub mod error;
pub mod fsync;
pub mod host;
pub mod params;
pub mod stats;
pub mod storage;
pub mod writer;

pub use error::{ErrorKind, WriteError, WriteResult};
pub use writer::{FileWriter, WriteReport, write_payload};
