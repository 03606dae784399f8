pub mod config;
pub mod synthesis;

pub use synthesis::{synthesize, synthesize_with, SynthesisError, SynthesisParams};
