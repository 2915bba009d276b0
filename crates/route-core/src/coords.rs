//! Coordinate display formatting.
//!
//! Patterns follow the map application's tokens: `_` marks degree digits,
//! `#` marks minute/second digits and the leading letter is replaced by the
//! hemisphere.

use crate::models::CoordStyle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordPattern {
    /// `N __.___°`
    LatDecimal,
    /// `W___.___°`
    LonDecimal,
    /// `N __°##'##"`
    LatDms,
    /// `W___°##'##"`
    LonDms,
    /// `N___°##.####'`
    LatDecimalMinutes,
    /// `W___°##.####'`
    LonDecimalMinutes,
}

impl CoordPattern {
    pub fn token(&self) -> &'static str {
        match self {
            CoordPattern::LatDecimal => "N __.___°",
            CoordPattern::LonDecimal => "W___.___°",
            CoordPattern::LatDms => "N __°##'##\"",
            CoordPattern::LonDms => "W___°##'##\"",
            CoordPattern::LatDecimalMinutes => "N___°##.####'",
            CoordPattern::LonDecimalMinutes => "W___°##.####'",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        [
            CoordPattern::LatDecimal,
            CoordPattern::LonDecimal,
            CoordPattern::LatDms,
            CoordPattern::LonDms,
            CoordPattern::LatDecimalMinutes,
            CoordPattern::LonDecimalMinutes,
        ]
        .into_iter()
        .find(|pattern| pattern.token() == token)
    }

    fn is_latitude(&self) -> bool {
        matches!(
            self,
            CoordPattern::LatDecimal | CoordPattern::LatDms | CoordPattern::LatDecimalMinutes
        )
    }
}

/// Formats a single latitude or longitude value for display.
pub trait CoordFormatter: Send + Sync {
    fn format(&self, value: f64, pattern: CoordPattern) -> String;
}

/// Default formatter: hemisphere letter followed by zero-padded fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct HemisphereFormatter;

impl CoordFormatter for HemisphereFormatter {
    fn format(&self, value: f64, pattern: CoordPattern) -> String {
        let hemisphere = match (pattern.is_latitude(), value < 0.0) {
            (true, false) => 'N',
            (true, true) => 'S',
            (false, false) => 'E',
            (false, true) => 'W',
        };
        let abs = value.abs();

        match pattern {
            CoordPattern::LatDecimal => format!("{} {:06.3}°", hemisphere, abs),
            CoordPattern::LonDecimal => format!("{}{:07.3}°", hemisphere, abs),
            CoordPattern::LatDms => {
                let (deg, min, sec) = split_dms(abs);
                format!("{} {:02}°{:02}'{:02}\"", hemisphere, deg, min, sec)
            }
            CoordPattern::LonDms => {
                let (deg, min, sec) = split_dms(abs);
                format!("{}{:03}°{:02}'{:02}\"", hemisphere, deg, min, sec)
            }
            CoordPattern::LatDecimalMinutes | CoordPattern::LonDecimalMinutes => {
                let (deg, min) = split_decimal_minutes(abs);
                format!("{}{:03}°{:07.4}'", hemisphere, deg, min)
            }
        }
    }
}

/// Whole degrees, minutes and rounded seconds, carrying a rounded 60".
fn split_dms(abs: f64) -> (u64, u64, u64) {
    let total_secs = (abs * 3600.0).round() as u64;
    (total_secs / 3600, (total_secs % 3600) / 60, total_secs % 60)
}

/// Whole degrees and minutes rounded to four decimals, carrying 60'.
fn split_decimal_minutes(abs: f64) -> (u64, f64) {
    const UNITS_PER_MINUTE: u64 = 10_000;
    const UNITS_PER_DEGREE: u64 = 60 * UNITS_PER_MINUTE;
    let units = (abs * UNITS_PER_DEGREE as f64).round() as u64;
    let minutes = (units % UNITS_PER_DEGREE) as f64 / UNITS_PER_MINUTE as f64;
    (units / UNITS_PER_DEGREE, minutes)
}

/// Position text for the segment table and the route summary.
pub fn table_position(formatter: &dyn CoordFormatter, style: CoordStyle, lat: f64, lon: f64) -> String {
    let (lat_pattern, lon_pattern) = match style {
        CoordStyle::Decimal => (CoordPattern::LatDecimal, CoordPattern::LonDecimal),
        CoordStyle::Dms => (CoordPattern::LatDms, CoordPattern::LonDms),
    };
    format!(
        "{} - {}",
        formatter.format(lat, lat_pattern),
        formatter.format(lon, lon_pattern)
    )
}

/// Position text for CSV rows; the DMS style uses decimal minutes.
pub fn csv_position(formatter: &dyn CoordFormatter, style: CoordStyle, lat: f64, lon: f64) -> String {
    let (lat_pattern, lon_pattern) = match style {
        CoordStyle::Decimal => (CoordPattern::LatDecimal, CoordPattern::LonDecimal),
        CoordStyle::Dms => (CoordPattern::LatDecimalMinutes, CoordPattern::LonDecimalMinutes),
    };
    format!(
        "{} - {}",
        formatter.format(lat, lat_pattern),
        formatter.format(lon, lon_pattern)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_patterns() {
        let f = HemisphereFormatter;
        assert_eq!(f.format(54.3233, CoordPattern::LatDecimal), "N 54.323°");
        assert_eq!(f.format(-5.5, CoordPattern::LatDecimal), "S 05.500°");
        assert_eq!(f.format(10.1394, CoordPattern::LonDecimal), "E010.139°");
        assert_eq!(f.format(-122.25, CoordPattern::LonDecimal), "W122.250°");
    }

    #[test]
    fn dms_carries_rounded_seconds() {
        let f = HemisphereFormatter;
        assert_eq!(f.format(54.5, CoordPattern::LatDms), "N 54°30'00\"");
        // 59.9999" rounds to a full minute
        assert_eq!(f.format(10.0 + 59.0 / 60.0 + 59.9999 / 3600.0, CoordPattern::LonDms), "E011°00'00\"");
    }

    #[test]
    fn decimal_minutes_pattern() {
        let f = HemisphereFormatter;
        assert_eq!(f.format(54.5, CoordPattern::LatDecimalMinutes), "N054°30.0000'");
        assert_eq!(f.format(-3.25, CoordPattern::LonDecimalMinutes), "W003°15.0000'");
    }

    #[test]
    fn tokens_round_trip() {
        for pattern in [CoordPattern::LatDms, CoordPattern::LonDecimalMinutes] {
            assert_eq!(CoordPattern::from_token(pattern.token()), Some(pattern));
        }
        assert_eq!(CoordPattern::from_token("bogus"), None);
    }

    #[test]
    fn table_position_joins_lat_and_lon() {
        let text = table_position(&HemisphereFormatter, CoordStyle::Decimal, 54.5, 10.25);
        assert_eq!(text, "N 54.500° - E010.250°");
    }
}
