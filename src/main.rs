//! tierbench runner
//!
//! Usage: `tierbench [output_file] [scale] [--config path.yaml]`
//!
//! The JSON report always goes to stdout; the optional first positional
//! argument duplicates it to a file. The second positional argument is a
//! float scale factor, parsed and recorded but reserved (no driver consumes
//! it). Logs and the total-time line go to stderr so stdout stays clean.

use std::fs;

use anyhow::Context;

use tierbench::config::BenchConfig;
use tierbench::report::ResultReport;
use tierbench::suite::{BenchmarkSuite, REPORT_VERSION};
use tierbench::timer::Timer;

struct CliArgs {
    output_path: Option<String>,
    scale: Option<f64>,
    config_path: Option<String>,
}

fn parse_args() -> anyhow::Result<CliArgs> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut positionals = Vec::new();
    let mut config_path = None;

    let mut i = 0;
    while i < args.len() {
        if args[i] == "--config" && i + 1 < args.len() {
            config_path = Some(args[i + 1].clone());
            i += 2;
        } else {
            positionals.push(args[i].clone());
            i += 1;
        }
    }

    let scale = match positionals.get(1) {
        Some(raw) => Some(
            raw.parse::<f64>()
                .with_context(|| format!("invalid scale factor: {}", raw))?,
        ),
        None => None,
    };

    Ok(CliArgs {
        output_path: positionals.first().cloned(),
        scale,
        config_path,
    })
}

fn main() -> anyhow::Result<()> {
    let cli = parse_args()?;

    let mut config = match &cli.config_path {
        Some(path) => BenchConfig::load(path)?,
        None => BenchConfig::default(),
    };
    if let Some(scale) = cli.scale {
        config.scale = scale;
    }

    let _log_guard = tierbench::logging::init_logging(&config.logging);

    tracing::info!(
        version = REPORT_VERSION,
        git_hash = env!("GIT_HASH"),
        scale = config.scale,
        "starting benchmark run"
    );

    let mut report = ResultReport::new(REPORT_VERSION);
    let mut suite = BenchmarkSuite::new(config);

    let mut total = Timer::new();
    total.start();
    suite.run_all(&mut report)?;
    total.stop();

    eprintln!("{:<30}: {:.3}", "time taken", total.seconds());

    let json = report.to_json_pretty().context("failed to serialize report")?;
    println!("{}", json);

    if let Some(path) = &cli.output_path {
        fs::write(path, format!("{}\n", json))
            .with_context(|| format!("failed to write report to {}", path))?;
    }

    Ok(())
}
