//! Command-line front end for segmented field analysis.
//!
//! - `analyze`: field time series from a signal and a noise recording
//! - `spectrum`: peak and target bin of the full composite waveform
//! - `params`: print a parameter file with the default values

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use fieldscope::analysis::dsp::fft::amplitude_spectrum;
use fieldscope::analysis::dsp::snr::nearest_bin;
use fieldscope::analysis::waveform::build_waveform;
use fieldscope::recording::{load_recording, DEFAULT_SAMPLE_COLUMN};
use fieldscope::{config, AnalysisParams, AnalysisReport};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "fieldscope")]
#[command(author, version, about = "Segmented SNR and field analysis of magnetometer recordings", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Field amplitude per interval
    Analyze {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        params: ParamArgs,

        /// Write the full report as JSON (- for stdout)
        #[arg(long)]
        json: Option<PathBuf>,

        /// Write the time series as CSV
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Full-waveform spectrum peak and the bin nearest the target
    Spectrum {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        params: ParamArgs,
    },

    /// Print a YAML parameter file with default values
    Params,
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Signal recording: a CSV file or a directory of CSV files
    #[arg(short, long)]
    signal: PathBuf,

    /// Noise recording: a CSV file or a directory of CSV files
    #[arg(short, long)]
    noise: PathBuf,

    /// Zero-based CSV column holding the samples
    #[arg(long, default_value_t = DEFAULT_SAMPLE_COLUMN)]
    column: usize,
}

/// Flags override the parameter file, which overrides the defaults.
#[derive(Args, Debug, Default)]
struct ParamArgs {
    /// YAML parameter file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Target frequency in Hz
    #[arg(long)]
    target_freq: Option<f64>,

    /// Bandwidth in Hz
    #[arg(long, visible_alias = "bw")]
    bandwidth: Option<f64>,

    /// Current in amperes
    #[arg(long)]
    current: Option<f64>,

    /// Scaling factor (1000 gives pT)
    #[arg(long)]
    scaling: Option<f64>,

    /// Total measurement duration in seconds (must match the data)
    #[arg(long)]
    duration: Option<f64>,

    /// Segmentation interval in seconds
    #[arg(long)]
    interval: Option<f64>,
}

impl ParamArgs {
    fn resolve(&self) -> Result<AnalysisParams> {
        let mut params = match &self.config {
            Some(path) => config::load_params(path)
                .with_context(|| format!("Failed to load parameters from {}", path.display()))?,
            None => AnalysisParams::default(),
        };
        let overrides = [
            (self.target_freq, &mut params.target_freq),
            (self.bandwidth, &mut params.bandwidth),
            (self.current, &mut params.current),
            (self.scaling, &mut params.scaling_factor),
            (self.duration, &mut params.total_duration_secs),
            (self.interval, &mut params.interval_secs),
        ];
        for (flag, slot) in overrides {
            if let Some(value) = flag {
                *slot = value;
            }
        }
        Ok(params)
    }
}

fn load_inputs(input: &InputArgs) -> Result<(Vec<f64>, Vec<f64>)> {
    let load = |path: &Path, what: &str| {
        load_recording(path, input.column)
            .with_context(|| format!("Failed to load {what} recording {}", path.display()))
    };
    Ok((load(&input.signal, "signal")?, load(&input.noise, "noise")?))
}

fn cmd_analyze(
    input: &InputArgs,
    params: AnalysisParams,
    json: Option<&Path>,
    csv: Option<&Path>,
) -> Result<()> {
    let report = fieldscope::analyze_recordings(&input.signal, &input.noise, input.column, params)
        .context("Analysis failed")?;
    info!(
        "{} segments at {:.3} Hz sampling rate",
        report.len(),
        report.sample_rate
    );

    if let Some(path) = csv {
        report
            .save_csv(path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Wrote time series to {}", path.display());
    }

    match json {
        Some(path) if path == Path::new("-") => {
            report.write_json(std::io::stdout().lock())?;
            println!();
        }
        Some(path) => {
            report
                .save_json(path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote report to {}", path.display());
            print_summary(&report);
        }
        None => print_summary(&report),
    }
    Ok(())
}

fn print_summary(report: &AnalysisReport) {
    println!(
        "Sample rate: {:.3} Hz, target {:.3} Hz, bandwidth {:.3} Hz",
        report.sample_rate, report.params.target_freq, report.params.bandwidth
    );
    println!("{:>10}  {:>14}  {:>16}  {:>12}", "Time (s)", "B_signal (pT)", "Sensitivity (pT)", "SNR");
    for (t, b, s, snr) in report.rows() {
        println!("{t:>10.2}  {b:>14.4}  {s:>16.6}  {snr:>12.3}");
    }
    if !report.skipped_segments.is_empty() {
        println!("Skipped {} segments:", report.skipped_segments.len());
        for seg in &report.skipped_segments {
            println!("{:>10.2}  {}", seg.time_offset, seg.reason);
        }
    }
}

fn cmd_spectrum(input: &InputArgs, params: AnalysisParams) -> Result<()> {
    params.validate()?;
    let (signal, noise) = load_inputs(input)?;
    let waveform = build_waveform(&signal, &noise, params.total_duration_secs)?;
    let spectrum = amplitude_spectrum(waveform.samples(), waveform.sample_rate())?;

    println!(
        "{} samples at {:.3} Hz, {} bins",
        waveform.len(),
        waveform.sample_rate(),
        spectrum.len()
    );
    if let Some(df) = spectrum.freq_resolution() {
        println!("Resolution: {df:.6} Hz");
    }
    if let Some((freq, mag)) = spectrum.peak() {
        println!("Peak: {freq:.3} Hz, amplitude {mag:.6e}");
    }
    if let Some(k) = nearest_bin(&spectrum.frequencies, params.target_freq) {
        println!(
            "Target {:.3} Hz -> bin {k} ({:.3} Hz), amplitude {:.6e}",
            params.target_freq, spectrum.frequencies[k], spectrum.magnitudes[k]
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    // Also picks up `log` records from the library crates.
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Analyze { input, params, json, csv } => {
            cmd_analyze(&input, params.resolve()?, json.as_deref(), csv.as_deref())
        }
        Commands::Spectrum { input, params } => cmd_spectrum(&input, params.resolve()?),
        Commands::Params => {
            print!("{}", config::params_to_yaml(&AnalysisParams::default())?);
            Ok(())
        }
    }
}
