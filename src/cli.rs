use clap::Parser;
use rustfft::num_complex::Complex;
use std::io::{self, Write};
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use harmonic_resynth::config::{self, Config};
use harmonic_resynth::synthesis::{self, SynthesisError, SynthesisParams};

/// Resynthesize a waveform from the harmonic bins of a spectrum
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Spectrum length N (also the number of output samples)
    #[arg(short = 'n', long, required = true)]
    length: usize,

    /// Pitch period T0, in samples [default: from config.toml]
    #[arg(short = 't', long)]
    pitch_period: Option<f64>,

    /// Number of harmonics to sum [default: from config.toml]
    #[arg(short = 'H', long)]
    harmonics: Option<usize>,

    /// Non-zero spectrum bin as K:RE:IM (repeatable; later entries replace earlier ones)
    #[arg(short, long = "bin", value_name = "K:RE:IM", value_parser = parse_bin)]
    bins: Vec<BinSpec>,

    /// Read bins as K:MAGNITUDE:PHASE instead of K:RE:IM
    #[arg(long)]
    polar: bool,

    /// Log parameter and bin details to stderr
    #[arg(short, long)]
    verbose: bool,
}

/// A single spectrum bin as given on the command line
#[derive(Debug, Clone, Copy, PartialEq)]
struct BinSpec {
    index: usize,
    a: f64,
    b: f64,
}

/// Errors from parsing or placing `--bin` values
#[derive(Debug, thiserror::Error, PartialEq)]
enum BinSpecError {
    #[error("expected K:RE:IM, got '{0}'")]
    Format(String),

    #[error("invalid bin index '{0}'")]
    Index(String),

    #[error("invalid number '{0}'")]
    Number(String),

    #[error("bin {index} is outside a spectrum of length {len}")]
    OutOfRange { index: usize, len: usize },
}

fn parse_bin(s: &str) -> Result<BinSpec, BinSpecError> {
    let parts: Vec<&str> = s.split(':').collect();
    let [index, a, b] = parts.as_slice() else {
        return Err(BinSpecError::Format(s.to_string()));
    };

    let index = index
        .trim()
        .parse::<usize>()
        .map_err(|_| BinSpecError::Index(index.to_string()))?;
    let parse_num = |v: &str| {
        v.trim()
            .parse::<f64>()
            .map_err(|_| BinSpecError::Number(v.to_string()))
    };

    Ok(BinSpec {
        index,
        a: parse_num(*a)?,
        b: parse_num(*b)?,
    })
}

/// Builds a length-`len` spectrum that is zero everywhere except the given bins
fn build_spectrum(
    len: usize,
    bins: &[BinSpec],
    polar: bool,
) -> Result<Vec<Complex<f64>>, BinSpecError> {
    let mut spectrum = vec![Complex::new(0.0, 0.0); len];
    for bin in bins {
        let slot = spectrum.get_mut(bin.index).ok_or(BinSpecError::OutOfRange {
            index: bin.index,
            len,
        })?;
        *slot = if polar {
            Complex::from_polar(bin.a, bin.b)
        } else {
            Complex::new(bin.a, bin.b)
        };
    }
    Ok(spectrum)
}

/// Most decimal places printed; f64 carries no more meaningful digits below one
const MAX_PRECISION: usize = 15;

/// Formats samples as a comma-separated list rounded to `precision` decimal places.
///
/// Trailing zeros are dropped and a rounded negative zero prints as `0`.
fn format_waveform(samples: &[f64], precision: usize) -> String {
    let precision = precision.min(MAX_PRECISION);
    samples
        .iter()
        .map(|x| format_sample(*x, precision))
        .collect::<Vec<String>>()
        .join(",")
}

fn format_sample(x: f64, precision: usize) -> String {
    let fixed = format!("{:.*}", precision, x);
    let trimmed = if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.')
    } else {
        fixed.as_str()
    };
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "harmonic_resynth=debug"
    } else {
        "harmonic_resynth=warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

/// Runs one synthesis request and returns the formatted waveform
fn synthesize_request(args: &Args, config: &Config) -> Result<String, Box<dyn std::error::Error>> {
    let params = SynthesisParams::new(
        args.harmonics.unwrap_or(config.synthesis.harmonic_count),
        args.pitch_period.unwrap_or(config.synthesis.pitch_period),
    );
    config.limits.check(args.length, &params)?;

    let spectrum = build_spectrum(args.length, &args.bins, args.polar)?;
    tracing::debug!(nonzero_bins = args.bins.len(), polar = args.polar, "built spectrum");

    let waveform = match synthesis::synthesize(&spectrum, params.harmonic_count, params.pitch_period)
    {
        Err(err @ SynthesisError::BinOutOfRange { .. }) => {
            tracing::warn!(
                "With a pitch period of {} samples, at most {} harmonics fit in {} bins",
                params.pitch_period,
                params.max_harmonics(args.length),
                args.length
            );
            return Err(err.into());
        }
        result => result?,
    };

    Ok(format_waveform(&waveform, config.common.precision))
}

fn run_synthesis(args: &Args, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let output = synthesize_request(args, config)?;

    let mut stdout = io::stdout();
    stdout.write_all(output.as_bytes())?;
    stdout.write_all(b"\n")?;

    Ok(())
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = config::load_config()?;
    run_synthesis(&args, &config)
}

fn main() {
    match run() {
        Ok(_) => {}
        Err(err) => {
            eprintln!("\nERROR: {}\n", err);
            if let Some(SynthesisError::BinOutOfRange { len, .. }) =
                err.downcast_ref::<SynthesisError>()
            {
                eprintln!("Every harmonic l must satisfy floor(l * {} / T0) < {}.", len, len);
                eprintln!("Reduce the harmonic count or increase the pitch period.");
            }
            process::exit(1);
        }
    }
}
