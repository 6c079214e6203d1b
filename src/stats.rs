use std::{
	fmt::{self, Display},
	time::{Duration, Instant},
};

/// The steps of the write pipeline, in execution order.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Step {
	Open,
	Write,
	Verify,
	ReadBack,
	Sync,
	SyncDir,
	Close,
}

/// Durations of the steps performed during one run.
#[derive(Debug, Clone, Default)]
pub struct WriteStats {
	steps: Vec<(Step, Duration)>,
	start_time: Option<Instant>,
	runtime: Option<Duration>,
}

impl WriteStats {
	pub(crate) fn new() -> Self {
		Self::default()
	}

	pub(crate) fn start_time_measurement(&mut self) {
		let _ = self.start_time.insert(Instant::now());
	}

	pub(crate) fn stop_time_measurement(&mut self) {
		if let Some(start_time) = self.start_time {
			self.runtime = Some(start_time.elapsed());
		}
	}

	/// Runs `f` and records how long it took as `step`.
	pub(crate) fn measure<T>(&mut self, step: Step, f: impl FnOnce() -> T) -> T {
		let start = Instant::now();
		let ret = f();
		self.steps.push((step, start.elapsed()));
		ret
	}

	/// Performed steps, in order.
	pub fn steps(&self) -> impl Iterator<Item = Step> + '_ {
		self.steps.iter().map(|(step, _)| *step)
	}

	pub fn duration(&self, step: Step) -> Option<Duration> {
		self.steps
			.iter()
			.find(|(s, _)| *s == step)
			.map(|(_, duration)| *duration)
	}

	pub fn runtime(&self) -> Option<Duration> {
		self.runtime
	}
}

impl Display for WriteStats {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		writeln!(f, "Steps:")?;
		for (step, duration) in self.steps.iter() {
			writeln!(f, "  {:<12} {duration:>12?}", format!("{step:?}:"))?;
		}
		if let Some(runtime) = self.runtime {
			writeln!(f, "Total runtime: {runtime:?}")?;
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_stats() {
		let mut stats = WriteStats::new();
		stats.start_time_measurement();
		let written = stats.measure(Step::Write, || 16);
		stats.measure(Step::Close, || ());
		stats.stop_time_measurement();
		println!("{stats}");

		assert_eq!(written, 16);
		assert_eq!(stats.steps().collect::<Vec<_>>(), [Step::Write, Step::Close]);
		assert!(stats.duration(Step::Write).is_some());
		assert!(stats.duration(Step::Sync).is_none());
		assert!(stats.runtime().is_some());

		let output = stats.to_string();
		assert!(output.contains("Write:"));
		assert!(output.contains("Total runtime"));
	}
}
