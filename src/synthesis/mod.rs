/// Fourier synthesis of waveforms from harmonic spectrum bins.
///
/// This module provides functionality to:
/// - Validate synthesis parameters against a spectrum
/// - Map harmonics to spectrum bins with bounds checking
/// - Sum the harmonic cosines into a time-domain waveform
mod math;
mod synthesizer;
mod types;

pub use math::{SpectralMath, StdMath};
pub use synthesizer::{harmonic_bins, synthesize, synthesize_with};
pub use types::{SynthesisError, SynthesisParams};
