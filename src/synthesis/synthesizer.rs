use super::math::{SpectralMath, StdMath};
use super::types::{SynthesisError, SynthesisParams};
use rustfft::num_complex::Complex;
use std::f64::consts::PI;

/// Resynthesizes a waveform from the harmonic bins of a spectrum.
///
/// The Fourier synthesis equation is:
///
/// x[n] = (2/N) * Σ_{l=1}^{H} |X[k_l]| * cos(2π·l·n/T0 + ∠X[k_l]),  k_l = ⌊l·N/T0⌋
///
/// # Arguments
/// * `spectrum` - Length-N discrete Fourier transform of a real signal
/// * `harmonic_count` - Number of harmonics (H) to sum
/// * `pitch_period` - Fundamental period (T0), in samples
///
/// # Returns
/// * `Result<Vec<f64>, SynthesisError>` - Length-N waveform
///
/// # Errors
/// * `InvalidParams` if the spectrum is empty or the pitch period is not positive
/// * `BinOutOfRange` if any harmonic maps past the end of the spectrum
pub fn synthesize(
    spectrum: &[Complex<f64>],
    harmonic_count: usize,
    pitch_period: f64,
) -> Result<Vec<f64>, SynthesisError> {
    synthesize_with(&StdMath, spectrum, harmonic_count, pitch_period)
}

/// Same as [`synthesize`], with the magnitude/phase/cosine primitives supplied by `math`.
pub fn synthesize_with<M: SpectralMath>(
    math: &M,
    spectrum: &[Complex<f64>],
    harmonic_count: usize,
    pitch_period: f64,
) -> Result<Vec<f64>, SynthesisError> {
    let len = spectrum.len();
    tracing::debug!(len, harmonic_count, pitch_period, "synthesizing waveform");

    let params = SynthesisParams::new(harmonic_count, pitch_period);
    let bins = harmonic_bins(&params, len)?;

    let mut output = vec![0.0; len];

    for (l, &bin) in (1..=harmonic_count).zip(bins.iter()) {
        let magnitude = math.magnitude(spectrum[bin]);
        let phase = math.phase(spectrum[bin]);
        let step = 2.0 * PI * l as f64 / pitch_period;

        for (n, sample) in output.iter_mut().enumerate() {
            *sample += magnitude * math.cos(step * n as f64 + phase);
        }
    }

    let scale = 2.0 / len as f64;
    output.iter_mut().for_each(|x| *x *= scale);

    Ok(output)
}

/// Computes the spectrum bin of every harmonic 1..=harmonic_count.
///
/// All bins are checked before any is returned, so callers never index with
/// an out-of-range bin.
///
/// # Errors
/// * `InvalidParams` if the parameters fail [`SynthesisParams::validate`]
/// * `BinOutOfRange` for the first harmonic whose bin is `>= spectrum_len`
pub fn harmonic_bins(
    params: &SynthesisParams,
    spectrum_len: usize,
) -> Result<Vec<usize>, SynthesisError> {
    params.validate(spectrum_len)?;

    let mut bins = Vec::with_capacity(params.harmonic_count.min(spectrum_len));
    for l in 1..=params.harmonic_count {
        let bin = params.bin_for(l, spectrum_len);
        if bin >= spectrum_len {
            tracing::warn!(
                harmonic = l,
                bin,
                len = spectrum_len,
                "harmonic bin outside spectrum"
            );
            return Err(SynthesisError::BinOutOfRange {
                harmonic: l,
                bin,
                len: spectrum_len,
            });
        }
        bins.push(bin);
    }

    Ok(bins)
}
