//! Developer utility scoring a pair of JSON sensitivity reports.

use std::path::PathBuf;

use featscope::config;
use featscope::logging::{self, LogOptions};
use featscope::sensitivity::{SensitivityAnalysis, VulnerabilityReport, load_report};

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let options = parse_args(std::env::args().skip(1).collect())?;
    let log_options = LogOptions {
        write_file: options.log_file,
        ..LogOptions::default()
    };
    if let Err(err) = logging::init(&log_options) {
        eprintln!("Logging disabled: {err}");
    }

    let cfg = match &options.config {
        Some(path) => config::load_from(path),
        None => config::load_or_default(),
    }
    .map_err(|err| err.to_string())?;

    let shuffled = load_report(&options.shuffled).map_err(|err| err.to_string())?;
    let missing = load_report(&options.missing).map_err(|err| err.to_string())?;
    tracing::info!(
        shuffled = %options.shuffled.display(),
        missing = %options.missing.display(),
        features = shuffled.len(),
        "scoring sensitivity reports"
    );

    let analysis = SensitivityAnalysis::new(cfg.sensitivity);
    let report = analysis
        .vulnerability(&shuffled, &missing)
        .map_err(|err| err.to_string())?;

    if options.json {
        let text = serde_json::to_string_pretty(&report).map_err(|err| err.to_string())?;
        println!("{text}");
    } else {
        print_report(&report);
    }
    Ok(())
}

fn print_report(report: &VulnerabilityReport) {
    println!("method:            {}", report.stats.method);
    println!("features:          {}", report.stats.n_features);
    println!("zero impact:       {}", report.stats.n_zero);
    println!("low impact:        {}", report.stats.n_low);
    println!("leakage:           {:.4}", report.leakage);
    println!("too many features: {:.4}", report.too_many_features);
    println!("imputation:        {:.4}", report.imputation);
}

#[derive(Debug, Clone)]
struct CliOptions {
    shuffled: PathBuf,
    missing: PathBuf,
    config: Option<PathBuf>,
    json: bool,
    log_file: bool,
}

fn parse_args(args: Vec<String>) -> Result<CliOptions, String> {
    let mut shuffled: Option<PathBuf> = None;
    let mut missing: Option<PathBuf> = None;
    let mut config: Option<PathBuf> = None;
    let mut json = false;
    let mut log_file = true;

    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "-h" | "--help" => return Err(help_text()),
            "--shuffled" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| "--shuffled requires a value".to_string())?;
                shuffled = Some(PathBuf::from(value));
            }
            "--missing" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| "--missing requires a value".to_string())?;
                missing = Some(PathBuf::from(value));
            }
            "--config" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| "--config requires a value".to_string())?;
                config = Some(PathBuf::from(value));
            }
            "--json" => {
                json = true;
            }
            "--no-log-file" => {
                log_file = false;
            }
            unknown => return Err(format!("Unknown argument: {unknown}\n\n{}", help_text())),
        }
        idx += 1;
    }

    let shuffled = shuffled.ok_or_else(help_text)?;
    let missing = missing.ok_or_else(help_text)?;
    Ok(CliOptions {
        shuffled,
        missing,
        config,
        json,
        log_file,
    })
}

fn help_text() -> String {
    [
        "featscope-diagnose",
        "",
        "Scores leakage, feature bloat and imputation robustness from two sensitivity reports.",
        "",
        "Usage:",
        "  featscope-diagnose --shuffled <file> --missing <file> [options]",
        "",
        "Options:",
        "  --shuffled <file>   JSON report from the shuffle probe (required).",
        "  --missing <file>    JSON report from the missing-value probe (required).",
        "  --config <file>     Config TOML (default: app config directory).",
        "  --json              Print scores as JSON.",
        "  --no-log-file       Log to stderr only.",
    ]
    .join("\n")
}
