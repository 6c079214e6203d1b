#![warn(rust_2018_idioms)]

use std::process;

use clap::Parser;
use durawritelib::{args::Args, write_payload};
use log::{error, info};

fn run_durawrite() -> i32 {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

	let params = match Args::parse().into_params() {
		Ok(params) => params,
		Err(err) => {
			eprintln!("{err}");
			return 2;
		}
	};

	match write_payload(&params) {
		Ok(report) => {
			info!(
				"Wrote {} bytes to {}",
				report.bytes_written,
				report.path.display()
			);
			if params.stats {
				println!("{}", report.stats);
			}
			0
		}
		Err(err) => {
			error!("{:?} failed", err.kind());
			eprintln!("{err}");
			1
		}
	}
}

fn main() {
	process::exit(run_durawrite())
}
