/// Parameters for resynthesizing a waveform from a spectrum
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SynthesisParams {
    /// Number of harmonics to sum (harmonics 1..=harmonic_count)
    pub harmonic_count: usize,
    /// Fundamental period of the signal, in samples
    pub pitch_period: f64,
}

/// Errors that can occur during harmonic synthesis
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum SynthesisError {
    /// Invalid parameter values
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    /// A harmonic maps to a bin past the end of the spectrum
    #[error("Harmonic {harmonic} maps to bin {bin}, but the spectrum only has {len} bins")]
    BinOutOfRange {
        harmonic: usize,
        bin: usize,
        len: usize,
    },
}

impl SynthesisParams {
    pub fn new(harmonic_count: usize, pitch_period: f64) -> Self {
        SynthesisParams {
            harmonic_count,
            pitch_period,
        }
    }

    /// Validates the parameters against a spectrum of `spectrum_len` bins
    ///
    /// # Arguments
    /// * `spectrum_len` - Number of bins in the spectrum to synthesize from
    ///
    /// # Returns
    /// * `Ok(())` if the parameters are usable
    /// * `Err(SynthesisError::InvalidParams)` for an empty spectrum or a
    ///   non-positive / non-finite pitch period
    pub fn validate(&self, spectrum_len: usize) -> Result<(), SynthesisError> {
        if spectrum_len == 0 {
            return Err(SynthesisError::InvalidParams(
                "Spectrum must contain at least one bin".to_string(),
            ));
        }

        if !self.pitch_period.is_finite() || self.pitch_period <= 0.0 {
            return Err(SynthesisError::InvalidParams(format!(
                "Pitch period must be a positive number of samples, got {}",
                self.pitch_period
            )));
        }

        Ok(())
    }

    /// Spectrum bin for harmonic `harmonic`: floor(l * N / T0)
    pub fn bin_for(&self, harmonic: usize, spectrum_len: usize) -> usize {
        (harmonic as f64 * spectrum_len as f64 / self.pitch_period).floor() as usize
    }

    /// Largest harmonic count whose bins all fit in a spectrum of `spectrum_len` bins.
    ///
    /// Harmonic `l` stays in range exactly when `l < T0`. Only meaningful for
    /// parameters that passed [`SynthesisParams::validate`].
    pub fn max_harmonics(&self, spectrum_len: usize) -> usize {
        let mut count = self.pitch_period.floor() as usize;
        // Float rounding can land one either side of the true boundary
        while count > 0 && self.bin_for(count, spectrum_len) >= spectrum_len {
            count -= 1;
        }
        while let Some(next) = count.checked_add(1) {
            if self.bin_for(next, spectrum_len) >= spectrum_len {
                break;
            }
            count = next;
        }
        count
    }
}
