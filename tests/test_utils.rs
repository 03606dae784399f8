// Test utilities and common constants
//
// Shared helpers for the synthesis and config tests: float comparison,
// spectrum construction and an FFT-based spectrum producer.

use rustfft::{num_complex::Complex, FftPlanner};

/// Absolute tolerance for comparing synthesized samples
pub const TOLERANCE: f64 = 1e-9;

/// Assert that two sample sequences match element-wise within `TOLERANCE`.
///
/// # Panics
/// * If the lengths differ or any pair of samples differs by more than `TOLERANCE`
#[allow(dead_code)]
pub fn assert_samples_close(actual: &[f64], expected: &[f64]) {
    assert_eq!(actual.len(), expected.len(), "Sample counts differ");
    for (n, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert!(
            (a - e).abs() < TOLERANCE,
            "Sample {} differs: got {}, expected {}",
            n,
            a,
            e
        );
    }
}

/// Build a length-`len` spectrum that is zero except for the given `(bin, value)` pairs
#[allow(dead_code)]
pub fn sparse_spectrum(len: usize, bins: &[(usize, Complex<f64>)]) -> Vec<Complex<f64>> {
    let mut spectrum = vec![Complex::new(0.0, 0.0); len];
    for &(bin, value) in bins {
        spectrum[bin] = value;
    }
    spectrum
}

/// Forward FFT of a real signal, standing in for an external spectrum producer
#[allow(dead_code)]
pub fn forward_fft(signal: &[f64]) -> Vec<Complex<f64>> {
    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(signal.len());

    let mut buffer: Vec<Complex<f64>> = signal.iter().map(|&x| Complex::new(x, 0.0)).collect();
    fft.process(&mut buffer);

    buffer
}
