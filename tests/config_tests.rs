// Configuration tests
//
// These tests verify parsing of config.toml contents, the defaults applied to
// missing sections, and the request limits enforced by the CLI.

use harmonic_resynth::config::{Config, ConfigError, SynthesisLimits};
use harmonic_resynth::synthesis::{SynthesisError, SynthesisParams};
use std::path::Path;

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.common.precision, 5);
    assert_eq!(config.synthesis.harmonic_count, 1);
    assert_eq!(config.synthesis.pitch_period, 4.0);
    assert!(config.limits.max_samples >= config.limits.min_samples);
}

#[test]
fn test_parse_full_config() {
    let config = Config::from_toml_str(
        r#"
        [common]
        precision = 3

        [synthesis]
        harmonic_count = 8
        pitch_period = 80.0

        [limits]
        min_samples = 16
        max_samples = 4096
        max_harmonics = 32
        min_pitch_period = 2.0
        max_pitch_period = 2048.0
        "#,
    )
    .expect("Failed to parse config");

    assert_eq!(config.common.precision, 3);
    assert_eq!(
        config.synthesis.params(),
        SynthesisParams::new(8, 80.0)
    );
    assert_eq!(config.limits.min_samples, 16);
    assert_eq!(config.limits.max_harmonics, 32);
}

/// Missing sections and keys fall back to their defaults.
#[test]
fn test_partial_config_uses_defaults() {
    let config = Config::from_toml_str(
        r#"
        [synthesis]
        pitch_period = 100.0
        "#,
    )
    .expect("Failed to parse config");

    assert_eq!(config.synthesis.pitch_period, 100.0);
    assert_eq!(config.synthesis.harmonic_count, 1);
    assert_eq!(config.common.precision, 5);
    assert_eq!(config.limits.max_harmonics, SynthesisLimits::default().max_harmonics);

    let empty = Config::from_toml_str("").expect("Failed to parse empty config");
    assert_eq!(empty.synthesis.params(), Config::default().synthesis.params());
}

#[test]
fn test_negative_harmonic_count_rejected() {
    let result = Config::from_toml_str(
        r#"
        [synthesis]
        harmonic_count = -3
        "#,
    );

    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn test_missing_config_file_uses_defaults() {
    let config = Config::load_from(Path::new("tests/does_not_exist.toml"))
        .expect("Missing config file should fall back to defaults");

    assert_eq!(config.common.precision, 5);
}

#[test]
fn test_limits_check() {
    let limits = SynthesisLimits {
        min_samples: 8,
        max_samples: 64,
        max_harmonics: 4,
        min_pitch_period: 2.0,
        max_pitch_period: 32.0,
    };

    assert!(limits.check(8, &SynthesisParams::new(4, 2.0)).is_ok());
    assert!(limits.check(64, &SynthesisParams::new(0, 32.0)).is_ok());

    for (len, params) in [
        (4, SynthesisParams::new(1, 4.0)),
        (128, SynthesisParams::new(1, 4.0)),
        (16, SynthesisParams::new(5, 4.0)),
        (16, SynthesisParams::new(1, 1.5)),
        (16, SynthesisParams::new(1, 64.0)),
    ] {
        assert!(
            matches!(limits.check(len, &params), Err(SynthesisError::InvalidParams(_))),
            "Request of {} samples with {:?} should exceed limits",
            len,
            params
        );
    }
}
