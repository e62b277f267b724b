//! Tests for the validated discretization configuration.

use super::*;

/// Ensures default constants are sane and positive.
///
/// # Examples
/// ```
/// use config::constants::GlobalConfig;
/// let cfg = GlobalConfig::default();
/// assert!(cfg.max_segments >= 3);
/// ```
#[test]
fn default_constants_are_valid() {
    let cfg = GlobalConfig::default();
    assert!(cfg.max_segments >= MIN_SEGMENTS);
    assert!(cfg.min_chord > 0.0);
    assert!(cfg.min_chord <= cfg.max_chord);
    assert_eq!(
        GlobalConfig::new(cfg.max_segments, cfg.min_chord, cfg.max_chord),
        Ok(cfg)
    );
}

/// Validates the builder rejects invalid values.
///
/// # Examples
/// ```
/// use config::constants::GlobalConfig;
/// assert!(GlobalConfig::new(2, 0.1, 1.0).is_err());
/// ```
#[test]
fn new_validates_inputs() {
    assert_eq!(
        GlobalConfig::new(2, 0.1, 1.0).unwrap_err(),
        ConfigError::InvalidSegments(2)
    );
    assert_eq!(
        GlobalConfig::new(ABSOLUTE_MAX_SEGMENTS + 1, 0.1, 1.0).unwrap_err(),
        ConfigError::InvalidSegments(ABSOLUTE_MAX_SEGMENTS + 1)
    );
    assert_eq!(
        GlobalConfig::new(32, 0.0, 1.0).unwrap_err(),
        ConfigError::InvalidChord(0.0)
    );
    assert_eq!(
        GlobalConfig::new(32, 0.5, 0.2).unwrap_err(),
        ConfigError::InvertedChordBounds { min: 0.5, max: 0.2 }
    );
}

#[test]
fn nan_chord_is_rejected() {
    assert!(GlobalConfig::new(32, f64::NAN, 1.0).is_err());
    assert!(GlobalConfig::new(32, 0.1, f64::INFINITY).is_err());
}

#[test]
fn error_messages_name_the_value() {
    let msg = ConfigError::InvertedChordBounds { min: 0.5, max: 0.2 }.to_string();
    assert!(msg.contains("0.5"));
    assert!(msg.contains("0.2"));
}
