//! Vitalwatch CLI
//!
//! The `vitals` command classifies vital-sign readings from the terminal.
//!
//! ## Commands
//!
//! - `assess`: Assess a reading-set and print the overall verdict
//! - `classify`: Classify a single value
//! - `table`: Show the range table for a vital
//! - `languages`: List message catalog languages
//! - `check-config`: Validate a config file and print its digest
//!
//! `assess` exits with 0 when every vital is normal, 1 on warnings and 2 on
//! critical findings. Any command that fails exits with 3.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, Level};

use vitals_core::{
    render_status_text, write_status_json, ConfigFile, OverallStatus, PatientProfile, Reading,
    VitalType, VitalsConfig, VitalsMonitor,
};

#[derive(Parser)]
#[command(name = "vitals")]
#[command(author = "Stevedores Org")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Vital-sign classification and early warning", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json_logs: bool,

    /// Path to a JSON config file (default: $VITALS_CONFIG or built-ins)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Language for messages (default: the config's default language)
    #[arg(long, global = true, env = "VITALS_LANG")]
    lang: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assess a set of readings, e.g. `--temperature 37C --pulse 72`
    Assess {
        /// Body temperature with optional unit suffix (98.6F, 37C, 310K)
        #[arg(long)]
        temperature: Option<String>,

        /// Pulse rate with optional unit suffix (72, 72bpm)
        #[arg(long)]
        pulse: Option<String>,

        /// Oxygen saturation with optional unit suffix (95, 95%)
        #[arg(long)]
        spo2: Option<String>,

        /// Patient age in years; adjusts pulse limits
        #[arg(long)]
        age: Option<u32>,

        /// Print the full status report as JSON
        #[arg(long)]
        json: bool,

        /// Also write the JSON status report to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Classify one value
    Classify {
        /// Vital type (temperature, pulse_rate, spo2)
        #[arg(long)]
        vital: VitalType,

        /// Measured value
        #[arg(long, allow_negative_numbers = true)]
        value: f64,

        /// Unit of the value (default: canonical unit)
        #[arg(long)]
        unit: Option<String>,
    },

    /// Print the range table for a vital
    Table {
        /// Vital type (temperature, pulse_rate, spo2)
        #[arg(long)]
        vital: VitalType,

        /// Patient age in years
        #[arg(long)]
        age: Option<u32>,
    },

    /// List message catalog languages
    Languages,

    /// Validate a config file and print its digest
    CheckConfig {
        /// Path to the JSON config file
        path: PathBuf,
    },
}

/// Exit code for a command that failed before producing a verdict.
const EXIT_ERROR: u8 = 3;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let json_logs = cli.json_logs || vitals_core::telemetry::json_logs_from_env();
    vitals_core::init_tracing(json_logs, level);

    ExitCode::from(outcome_code(run(cli)))
}

/// Map a command outcome to the process exit code, reporting errors on stderr.
fn outcome_code(outcome: Result<u8>) -> u8 {
    match outcome {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            EXIT_ERROR
        }
    }
}

fn run(cli: Cli) -> Result<u8> {
    let lang = cli.lang.as_deref();
    match cli.command {
        Commands::Assess {
            temperature,
            pulse,
            spo2,
            age,
            json,
            output,
        } => {
            let profile = age.map(PatientProfile::with_age);
            let config = load_config(cli.config.as_deref(), profile.as_ref())?;
            let inputs = [
                (VitalType::Temperature, temperature),
                (VitalType::PulseRate, pulse),
                (VitalType::Spo2, spo2),
            ];
            cmd_assess(config, &inputs, lang, json, output.as_deref())
        }
        Commands::Classify { vital, value, unit } => {
            let config = load_config(cli.config.as_deref(), None)?;
            cmd_classify(config, vital, value, unit.as_deref(), lang).map(|_| 0)
        }
        Commands::Table { vital, age } => {
            let profile = age.map(PatientProfile::with_age);
            let config = load_config(cli.config.as_deref(), profile.as_ref())?;
            cmd_table(&config, vital).map(|_| 0)
        }
        Commands::Languages => {
            let config = load_config(cli.config.as_deref(), None)?;
            cmd_languages(&config);
            Ok(0)
        }
        Commands::CheckConfig { path } => cmd_check_config(&path).map(|_| 0),
    }
}

/// Resolve the configuration: `--config` wins over `VITALS_CONFIG`. The
/// `VITALS_LANG` and `VITALS_TOLERANCE_PERCENT` overrides apply either way.
fn load_config(path: Option<&Path>, profile: Option<&PatientProfile>) -> Result<VitalsConfig> {
    let file = match path {
        Some(path) => ConfigFile::read(path)
            .with_context(|| format!("Failed to read config {:?}", path))?
            .with_env_overrides()
            .context("Invalid environment override")?,
        None => ConfigFile::from_env().context("Failed to load config from environment")?,
    };
    file.build(profile).context("Invalid vitals configuration")
}

/// Split `"98.6F"` into `(98.6, Some("F"))`; a bare number has no unit.
fn parse_measurement(raw: &str) -> Result<(f64, Option<String>)> {
    let raw = raw.trim();
    let split = raw
        .char_indices()
        .find(|&(i, c)| {
            let sign = i == 0 && (c == '-' || c == '+');
            !(c.is_ascii_digit() || c == '.' || sign)
        })
        .map(|(i, _)| i)
        .unwrap_or(raw.len());
    let (number, unit) = raw.split_at(split);
    let value: f64 = number
        .parse()
        .with_context(|| format!("Not a measurement: {:?}", raw))?;
    let unit = unit.trim();
    Ok((value, (!unit.is_empty()).then(|| unit.to_string())))
}

fn exit_status(status: OverallStatus) -> u8 {
    match status {
        OverallStatus::Ok => 0,
        OverallStatus::Warning => 1,
        OverallStatus::Critical => 2,
    }
}

fn readings_from(
    config: &VitalsConfig,
    inputs: &[(VitalType, Option<String>)],
) -> Result<Vec<Reading>> {
    let mut readings = Vec::new();
    for (vital, raw) in inputs {
        let Some(raw) = raw else { continue };
        let (value, unit) =
            parse_measurement(raw).with_context(|| format!("Invalid {vital} reading"))?;
        let unit = match unit {
            Some(unit) => unit,
            None => config.units().canonical_unit(*vital)?.to_string(),
        };
        readings.push(Reading::new(*vital, value, unit).with_source("cli"));
    }
    Ok(readings)
}

fn cmd_assess(
    config: VitalsConfig,
    inputs: &[(VitalType, Option<String>)],
    lang: Option<&str>,
    json: bool,
    output: Option<&Path>,
) -> Result<u8> {
    let readings = readings_from(&config, inputs)?;
    if readings.is_empty() {
        anyhow::bail!("No readings given; pass at least one of --temperature, --pulse, --spo2");
    }
    let language = lang.unwrap_or(config.default_language()).to_string();
    debug!(readings = readings.len(), language = %language, "assessing");

    let monitor = VitalsMonitor::new(config);
    let report = monitor
        .report(&readings, &language)
        .context("Assessment failed")?;

    if let Some(path) = output {
        write_status_json(path, &report)
            .with_context(|| format!("Failed to write report {:?}", path))?;
    }
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_status_text(&report));
    }
    Ok(exit_status(report.overall))
}

fn cmd_classify(
    config: VitalsConfig,
    vital: VitalType,
    value: f64,
    unit: Option<&str>,
    lang: Option<&str>,
) -> Result<()> {
    let unit = match unit {
        Some(unit) => unit.to_string(),
        None => config.units().canonical_unit(vital)?.to_string(),
    };
    let language = lang.unwrap_or(config.default_language()).to_string();
    let monitor = VitalsMonitor::new(config);
    let assessment = monitor
        .assess(&Reading::new(vital, value, unit), &language)
        .context("Classification failed")?;
    println!("{}: {}", assessment.condition, assessment.message);
    Ok(())
}

fn cmd_table(config: &VitalsConfig, vital: VitalType) -> Result<()> {
    let table = config.tables().get(vital)?;
    let unit = config.units().canonical_unit(vital)?;
    println!("{} ({})", vital, unit);
    for range in table.ranges() {
        println!("  {}", range);
    }
    Ok(())
}

fn cmd_languages(config: &VitalsConfig) {
    let default = config.default_language();
    for code in config.catalog().languages() {
        if code == default {
            println!("{} (default)", code);
        } else {
            println!("{}", code);
        }
    }
}

fn cmd_check_config(path: &Path) -> Result<()> {
    let config = VitalsConfig::from_file(path)
        .with_context(|| format!("Config {:?} is invalid", path))?;
    println!("OK {}", config.digest()?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_measurement_with_unit() {
        assert_eq!(parse_measurement("98.6F").unwrap(), (98.6, Some("F".to_string())));
        assert_eq!(parse_measurement("37 °C").unwrap(), (37.0, Some("°C".to_string())));
        assert_eq!(parse_measurement("95%").unwrap(), (95.0, Some("%".to_string())));
    }

    #[test]
    fn test_parse_measurement_bare_number() {
        assert_eq!(parse_measurement("72").unwrap(), (72.0, None));
        assert_eq!(parse_measurement("-3.5").unwrap(), (-3.5, None));
    }

    #[test]
    fn test_parse_measurement_rejects_garbage() {
        assert!(parse_measurement("high").is_err());
        assert!(parse_measurement("").is_err());
    }

    #[test]
    fn test_readings_default_to_canonical_unit() {
        let config = VitalsConfig::default();
        let inputs = [
            (VitalType::Temperature, Some("37C".to_string())),
            (VitalType::PulseRate, Some("72".to_string())),
            (VitalType::Spo2, None),
        ];
        let readings = readings_from(&config, &inputs).unwrap();
        assert_eq!(readings.len(), 2);
        assert_eq!(readings[0].unit(), "C");
        assert_eq!(readings[1].unit(), "bpm");
    }

    #[test]
    fn test_exit_code_follows_status() {
        assert_eq!(exit_status(OverallStatus::Ok), 0);
        assert_eq!(exit_status(OverallStatus::Warning), 1);
        assert_eq!(exit_status(OverallStatus::Critical), 2);
    }

    #[test]
    fn test_errors_exit_with_dedicated_code() {
        assert_eq!(outcome_code(Ok(1)), 1);
        assert_eq!(outcome_code(Err(anyhow::anyhow!("boom"))), EXIT_ERROR);
        assert!(OverallStatus::ALL.iter().all(|s| exit_status(*s) != EXIT_ERROR));
    }

    #[test]
    fn test_assess_warning_and_failure_exit_differently() {
        let warning = Cli::parse_from(["vitals", "assess", "--pulse", "99"]);
        assert_eq!(outcome_code(run(warning)), 1);

        let bad_unit = Cli::parse_from(["vitals", "assess", "--temperature", "37X"]);
        assert_eq!(outcome_code(run(bad_unit)), EXIT_ERROR);

        let bad_lang = Cli::parse_from(["vitals", "--lang", "fr", "assess", "--pulse", "72"]);
        assert_eq!(outcome_code(run(bad_lang)), EXIT_ERROR);
    }

    #[test]
    fn test_load_config_reads_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vitals.json");
        std::fs::write(&path, r#"{ "tolerance_percent": 2.5 }"#).unwrap();
        let config = load_config(Some(&path), None).unwrap();
        assert_eq!(config.tolerance_percent(), 2.5);
    }

    #[test]
    fn test_check_config_accepts_valid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vitals.json");
        std::fs::write(&path, r#"{ "tolerance_percent": 2.0 }"#).unwrap();
        assert!(cmd_check_config(&path).is_ok());

        std::fs::write(&path, r#"{ "tolerance_percent": -1.0 }"#).unwrap();
        assert!(cmd_check_config(&path).is_err());
    }

    #[test]
    fn test_cli_parses_assess() {
        let cli = Cli::parse_from([
            "vitals",
            "--lang",
            "de",
            "assess",
            "--temperature",
            "37C",
            "--pulse",
            "72",
        ]);
        assert_eq!(cli.lang.as_deref(), Some("de"));
        assert!(matches!(cli.command, Commands::Assess { age: None, json: false, .. }));
    }
}
