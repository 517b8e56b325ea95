use anyhow::Result;
use clap::{ArgAction, Parser};
use latency::{parse_period, PeriodNs, ThreadFactory, ThreadPlan};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Latency tester for the HAL layer.
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// Thread periods; units s, ms, us, μs or ns (bare numbers are ns).
    #[arg(value_parser = parse_period, default_value = "1000000")]
    period: Vec<PeriodNs>,
    /// Generate dummy load on the system.
    #[arg(short, long)]
    load: bool,
    /// Create threads with floating point support.
    #[arg(short = 'f', long = "floating-point", default_value_t = true, action = ArgAction::Set)]
    floating_point: bool,
    /// Debug level; repeat for more output (-ddd).
    #[arg(short, long, action = ArgAction::Count)]
    debug: u8,
}

fn level_for(debug: u8) -> &'static str {
    match debug {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

/// Prints each thread request instead of starting a realtime session.
struct LoggingThreadFactory;

impl ThreadFactory for LoggingThreadFactory {
    fn new_thread(&mut self, name: &str, period: PeriodNs, floating_point: bool) -> Result<()> {
        println!("newthread {name} {} fp={floating_point}", period.0);
        Ok(())
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level_for(args.debug))),
        )
        .init();

    if args.load {
        warn!("dummy load generation requested; no load generator is attached");
    }

    let plan = ThreadPlan::from_periods(args.period.iter().copied(), args.floating_point);
    info!(threads = plan.threads.len(), fp = plan.floating_point, "prepared latency plan");
    plan.apply(&mut LoggingThreadFactory)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_one_millisecond_with_floating_point() {
        let args = Args::try_parse_from(["latency_test"]).expect("args");
        assert_eq!(args.period, vec![PeriodNs(1_000_000)]);
        assert!(args.floating_point);
        assert!(!args.load);
        assert_eq!(args.debug, 0);
    }

    #[test]
    fn parses_units_flags_and_debug_count() {
        let args = Args::try_parse_from(["latency_test", "-l", "-ddd", "-f", "false", "25us", "1ms"])
            .expect("args");
        assert_eq!(args.period, vec![PeriodNs(25_000), PeriodNs(1_000_000)]);
        assert!(args.load);
        assert!(!args.floating_point);
        assert_eq!(level_for(args.debug), "trace");
    }

    #[test]
    fn rejects_out_of_range_period() {
        let err = Args::try_parse_from(["latency_test", "2s"]).expect_err("should fail");
        assert!(err.to_string().contains("allowed limit"));
    }
}
