use rustfft::num_complex::Complex;

/// Numeric primitives the synthesizer needs from its environment.
///
/// `phase` must follow `atan2(im, re)` semantics, returning a value in (-π, π].
pub trait SpectralMath {
    fn magnitude(&self, bin: Complex<f64>) -> f64;
    fn phase(&self, bin: Complex<f64>) -> f64;
    fn cos(&self, x: f64) -> f64;
}

/// [`SpectralMath`] backed by `num_complex` and the standard float functions
#[derive(Debug, Clone, Copy, Default)]
pub struct StdMath;

impl SpectralMath for StdMath {
    fn magnitude(&self, bin: Complex<f64>) -> f64 {
        bin.norm()
    }

    fn phase(&self, bin: Complex<f64>) -> f64 {
        bin.arg()
    }

    fn cos(&self, x: f64) -> f64 {
        x.cos()
    }
}
