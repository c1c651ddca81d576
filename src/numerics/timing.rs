#![allow(unused)]
use std::cell::RefCell;
use std::time::Duration;

/// Wall-clock time spent in each reconstruction stage.
#[derive(Default, Clone)]
pub struct TimingStats {
    pub gradient_times: Vec<Duration>,
    pub flood_fill_times: Vec<Duration>,
    pub smoothing_times: Vec<Duration>,
    pub total_time: Duration,
}

impl TimingStats {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(feature = "timing")]
    pub fn print_summary(&self) {
        if self.gradient_times.is_empty() && self.flood_fill_times.is_empty() {
            return;
        }

        let stage = |name: &str, times: &[Duration]| {
            let total: Duration = times.iter().sum();
            let avg = if times.is_empty() {
                0.0
            } else {
                total.as_secs_f64() * 1000.0 / times.len() as f64
            };
            println!(
                "  {:<24} {:>9.3}ms  (avg: {:>9.3}ms, n = {})",
                name,
                total.as_secs_f64() * 1000.0,
                avg,
                times.len()
            );
            total
        };

        println!("\n{}", "=".repeat(60));
        println!("{:^60}", "RECONSTRUCTION TIMING SUMMARY");
        println!("{}", "=".repeat(60));
        println!(
            "Total time:                    {:.3}s",
            self.total_time.as_secs_f64()
        );
        println!("{}", "-".repeat(60));
        let accounted = stage("Pressure gradients:", &self.gradient_times)
            + stage("Flood fill:", &self.flood_fill_times)
            + stage("Smoothing:", &self.smoothing_times);
        println!("{}", "=".repeat(60));
        println!(
            "Overhead/Other:                {:>9.3}ms\n",
            self.total_time.saturating_sub(accounted).as_secs_f64() * 1000.0
        );
    }

    #[cfg(not(feature = "timing"))]
    pub fn print_summary(&self) {}
}

#[cfg(feature = "timing")]
thread_local! {
    static TIMING_STATS: RefCell<TimingStats> = RefCell::new(TimingStats::new());
}

#[derive(Clone, Copy, Debug)]
pub enum Stage {
    Gradient,
    FloodFill,
    Smoothing,
}

#[cfg(feature = "timing")]
pub fn reset_timing() {
    TIMING_STATS.with(|stats| {
        *stats.borrow_mut() = TimingStats::new();
    });
}

#[cfg(not(feature = "timing"))]
pub fn reset_timing() {}

#[cfg(feature = "timing")]
pub fn record_stage<F, R>(stage: Stage, f: F) -> R
where
    F: FnOnce() -> R,
{
    let start = std::time::Instant::now();
    let result = f();
    let elapsed = start.elapsed();
    TIMING_STATS.with(|stats| {
        let mut s = stats.borrow_mut();
        match stage {
            Stage::Gradient => s.gradient_times.push(elapsed),
            Stage::FloodFill => s.flood_fill_times.push(elapsed),
            Stage::Smoothing => s.smoothing_times.push(elapsed),
        }
    });
    result
}

#[cfg(not(feature = "timing"))]
pub fn record_stage<F, R>(_stage: Stage, f: F) -> R
where
    F: FnOnce() -> R,
{
    f()
}

#[cfg(feature = "timing")]
pub fn finalize_timing(total_time: Duration) -> TimingStats {
    TIMING_STATS.with(|stats| {
        let mut s = stats.borrow_mut();
        s.total_time = total_time;
        s.clone()
    })
}

#[cfg(not(feature = "timing"))]
pub fn finalize_timing(_total_time: Duration) -> TimingStats {
    TimingStats::new()
}

#[cfg(feature = "timing")]
pub fn finalize_and_print(total_time: Duration) {
    finalize_timing(total_time).print_summary();
}

#[cfg(not(feature = "timing"))]
pub fn finalize_and_print(_total_time: Duration) {}
