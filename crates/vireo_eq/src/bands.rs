//! 10-Band Layout and Gain Bounds
//!
//! Band centers, gain limits and the compact value string used to persist
//! the manual preset (`"0;1.5;-3;0;0;0;0;0;0;0"`).

use crate::error::PresetError;

/// Number of bands in every preset
pub const BAND_COUNT: usize = 10;

/// Standard EQ band frequencies (Hz) - ISO standard octave centers
pub const EQ_BANDS: [f32; BAND_COUNT] = [
    31.0,    // Sub-bass
    62.0,    // Bass
    125.0,   // Low-mid
    250.0,   // Mid
    500.0,   // Mid
    1000.0,  // Upper-mid
    2000.0,  // Presence
    4000.0,  // Brilliance
    8000.0,  // High
    16000.0, // Air
];

/// Lowest gain a band accepts (dB)
pub const MIN_GAIN_DB: f32 = -24.0;

/// Highest gain a band accepts (dB)
pub const MAX_GAIN_DB: f32 = 24.0;

/// Neutral gain every band returns to on reset
pub const NEUTRAL_GAIN_DB: f32 = 0.0;

/// Separator between band values in a value string
pub const VALUE_SEPARATOR: char = ';';

/// Band gains, one per entry of [`EQ_BANDS`]
pub type BandGains = [f32; BAND_COUNT];

/// Clamp a gain into the accepted range. NaN collapses to neutral.
pub fn clamp_gain(gain_db: f32) -> f32 {
    if gain_db.is_nan() {
        return NEUTRAL_GAIN_DB;
    }
    gain_db.clamp(MIN_GAIN_DB, MAX_GAIN_DB)
}

/// Check a band index against [`BAND_COUNT`]
pub fn check_band_index(band: usize) -> Result<(), PresetError> {
    if band >= BAND_COUNT {
        return Err(PresetError::InvalidBandIndex(band));
    }
    Ok(())
}

/// Format gains as a value string
pub fn to_value_string(gains: &BandGains) -> String {
    gains
        .iter()
        .map(|g| g.to_string())
        .collect::<Vec<_>>()
        .join(&VALUE_SEPARATOR.to_string())
}

/// Parse a value string produced by [`to_value_string`]
///
/// Out-of-range gains are clamped rather than rejected, so a settings file
/// edited by hand still loads.
pub fn parse_value_string(value: &str) -> Result<BandGains, PresetError> {
    let parts: Vec<&str> = value.trim().split(VALUE_SEPARATOR).collect();
    if parts.len() != BAND_COUNT {
        return Err(PresetError::BandCountMismatch {
            expected: BAND_COUNT,
            got: parts.len(),
        });
    }

    let mut gains = [NEUTRAL_GAIN_DB; BAND_COUNT];
    for (slot, part) in gains.iter_mut().zip(parts) {
        let parsed: f32 = part
            .trim()
            .parse()
            .map_err(|_| PresetError::InvalidValue(part.trim().to_string()))?;
        *slot = clamp_gain(parsed);
    }
    Ok(gains)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_frequencies_ascending() {
        for pair in EQ_BANDS.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn test_gain_clamping() {
        assert_eq!(clamp_gain(100.0), MAX_GAIN_DB);
        assert_eq!(clamp_gain(-100.0), MIN_GAIN_DB);
        assert_eq!(clamp_gain(3.5), 3.5);
        assert_eq!(clamp_gain(f32::NAN), NEUTRAL_GAIN_DB);
    }

    #[test]
    fn test_band_index_bounds() {
        assert!(check_band_index(0).is_ok());
        assert!(check_band_index(9).is_ok());
        assert!(matches!(check_band_index(10), Err(PresetError::InvalidBandIndex(10))));
    }

    #[test]
    fn test_value_string_format() {
        let mut gains = [0.0; BAND_COUNT];
        gains[1] = 1.5;
        gains[2] = -3.0;
        assert_eq!(to_value_string(&gains), "0;1.5;-3;0;0;0;0;0;0;0");
    }

    #[test]
    fn test_parse_value_string() {
        let gains = parse_value_string(" 6; 5;3;1;0;0;0;0;-2.5;0 ").unwrap();
        assert_eq!(gains[0], 6.0);
        assert_eq!(gains[8], -2.5);
    }

    #[test]
    fn test_parse_rejects_wrong_count() {
        let err = parse_value_string("1;2;3").unwrap_err();
        assert!(matches!(
            err,
            PresetError::BandCountMismatch { expected: 10, got: 3 }
        ));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = parse_value_string("0;0;0;loud;0;0;0;0;0;0").unwrap_err();
        assert!(err.to_string().contains("loud"));
    }

    #[test]
    fn test_parse_clamps_out_of_range() {
        let gains = parse_value_string("99;0;0;0;0;0;0;0;0;-99").unwrap();
        assert_eq!(gains[0], MAX_GAIN_DB);
        assert_eq!(gains[9], MIN_GAIN_DB);
    }
}
