use clap::Parser;
use nexus_fanout_core_rs::{run_all, run_with, Config, ConfigOption, RunReport, RunnerKind};
use std::env;
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Compare sequential and concurrent fan-out of sleep-then-maybe-fail work", long_about = None)]
struct Args {
  #[clap(long, default_value = "10")]
  count: usize,

  #[clap(long, default_value = "100")]
  delay_ms: u64,

  #[clap(long, default_value = "0.1")]
  failure_rate: f64,

  #[clap(long)]
  seed: Option<u64>,

  /// One of sequential, wait-group, wait-group-go, collecting. Runs all of them when omitted.
  #[clap(long)]
  runner: Option<RunnerKind>,

  #[clap(long)]
  json: bool,
}

fn print_report(report: &RunReport) {
  println!(
    "{:<14} {:>5} units  {:>4} failed  {:>10.3?}",
    report.kind.to_string(),
    report.launched,
    report.failure_count(),
    report.elapsed
  );
}

#[tokio::main]
async fn main() -> ExitCode {
  if env::var("RUST_LOG").is_err() {
    env::set_var("RUST_LOG", "info");
  }
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .init();

  let args = Args::parse();
  let mut options = vec![
    ConfigOption::with_count(args.count),
    ConfigOption::with_unit_delay(Duration::from_millis(args.delay_ms)),
    ConfigOption::with_failure_rate(args.failure_rate),
  ];
  if let Some(seed) = args.seed {
    options.push(ConfigOption::with_seed(seed));
  }
  let config = Config::from(options);

  let result = match args.runner {
    Some(kind) => run_with(kind, &config).await.map(|report| vec![report]),
    None => run_all(&config).await,
  };

  let reports = match result {
    Ok(reports) => reports,
    Err(err) => {
      tracing::error!("{}", err);
      return ExitCode::FAILURE;
    }
  };

  if args.json {
    match serde_json::to_string_pretty(&reports) {
      Ok(json) => println!("{}", json),
      Err(err) => {
        tracing::error!("failed to encode reports: {}", err);
        return ExitCode::FAILURE;
      }
    }
  } else {
    reports.iter().for_each(print_report);
  }
  ExitCode::SUCCESS
}
