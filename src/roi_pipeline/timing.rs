//! Wall-clock time spent in each conversion step.

use std::fmt::Write as _;
use std::time::{Duration, Instant};

/// One run of a named step
#[derive(Debug, Clone)]
pub struct StepTiming {
    pub name: String,
    pub duration: Duration,
}

/// Step durations in the order the steps ran.
///
/// A step name may repeat; lookups by name sum every run.
#[derive(Debug, Default, Clone)]
pub struct PipelineTimings {
    steps: Vec<StepTiming>,
}

impl PipelineTimings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_step(&mut self, name: impl Into<String>, duration: Duration) {
        self.steps.push(StepTiming { name: name.into(), duration });
    }

    /// Runs `step` and records its duration under `name`.
    pub fn time<T>(&mut self, name: &str, step: impl FnOnce() -> T) -> T {
        let started = Instant::now();
        let out = step();
        self.add_step(name, started.elapsed());
        out
    }

    pub fn total_duration(&self) -> Duration {
        self.steps.iter().map(|s| s.duration).sum()
    }

    /// Time spent in every run of `name`, or `None` if it never ran.
    pub fn get_step(&self, name: &str) -> Option<Duration> {
        let mut runs = self.steps.iter().filter(|s| s.name == name).peekable();
        runs.peek()?;
        Some(runs.map(|s| s.duration).sum())
    }

    pub fn steps(&self) -> &[StepTiming] {
        &self.steps
    }

    /// Renders one line per step with its share of the total, then the total.
    pub fn report(&self) -> String {
        let total = self.total_duration().as_secs_f64();
        let width = self
            .steps
            .iter()
            .map(|s| s.name.len())
            .chain(["total".len()])
            .max()
            .unwrap_or(0);

        let mut out = String::new();
        for step in &self.steps {
            let secs = step.duration.as_secs_f64();
            let share = if total > 0.0 { secs / total * 100.0 } else { 0.0 };
            let _ = writeln!(out, "{:<width$}  {:>10.3} ms  {:>5.1}%", step.name, secs * 1000.0, share);
        }
        let _ = writeln!(out, "{:<width$}  {:>10.3} ms", "total", total * 1000.0);
        out
    }

    pub fn print_summary(&self) {
        println!("\nStep timings:\n{}", self.report());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_steps_accumulate() {
        let mut timings = PipelineTimings::new();
        timings.add_step("write_raw", Duration::from_millis(3));
        timings.add_step("build_matrix", Duration::from_millis(5));
        timings.add_step("write_raw", Duration::from_millis(2));

        assert_eq!(timings.steps().len(), 3);
        assert_eq!(timings.get_step("write_raw"), Some(Duration::from_millis(5)));
        assert_eq!(timings.get_step("missing"), None);
        assert_eq!(timings.total_duration(), Duration::from_millis(10));
    }

    #[test]
    fn test_time_returns_step_output() {
        let mut timings = PipelineTimings::new();
        let value = timings.time("select_active", || 42);

        assert_eq!(value, 42);
        assert_eq!(timings.steps()[0].name, "select_active");
    }

    #[test]
    fn test_report_lists_steps_and_total() {
        let mut timings = PipelineTimings::new();
        timings.add_step("build_matrix", Duration::from_millis(30));
        timings.add_step("write_raw", Duration::from_millis(10));

        let report = timings.report();
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("build_matrix"));
        assert!(lines[0].ends_with("75.0%"));
        assert!(lines[1].ends_with("25.0%"));
        assert!(lines[2].starts_with("total"));
        assert!(lines[2].contains("40.000 ms"));
    }

    #[test]
    fn test_report_without_steps() {
        let report = PipelineTimings::new().report();
        assert_eq!(report.lines().count(), 1);
        assert!(report.starts_with("total"));
    }
}
