//! Display formatting for repository statistics.

/// Abbreviate a count for display on the card.
///
/// - `>= 1_000_000` → one decimal and `m` (`1.0m`)
/// - `>= 1_000` → one decimal and `k` (`1.5k`)
/// - otherwise the plain integer
///
/// The thousand bucket rounds on its own, so `999_999` renders as `1000.0k`
/// rather than being promoted to `1.0m`.
///
/// Ties round away from zero (`1_250` → `1.3k`).
pub fn format_count(value: u64) -> String {
    if value >= 1_000_000 {
        format!("{}m", one_decimal(value, 1_000_000))
    } else if value >= 1_000 {
        format!("{}k", one_decimal(value, 1_000))
    } else {
        value.to_string()
    }
}

/// `value / unit` with one decimal.
///
/// Only quarter values (`x.25`, `x.75`) are exact ties in binary; those round
/// up. Everything else formats the nearest double.
fn one_decimal(value: u64, unit: u64) -> String {
    if value % (unit / 2) == unit / 4 {
        let tenths = (value + unit / 20) / (unit / 10);
        format!("{}.{}", tenths / 10, tenths % 10)
    } else {
        format!("{:.1}", value as f64 / unit as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_values_are_literal() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(20), "20");
        assert_eq!(format_count(999), "999");
    }

    #[test]
    fn thousands_get_k_suffix() {
        assert_eq!(format_count(1_000), "1.0k");
        assert_eq!(format_count(1_500), "1.5k");
        assert_eq!(format_count(42_000), "42.0k");
    }

    #[test]
    fn millions_get_m_suffix() {
        assert_eq!(format_count(1_000_000), "1.0m");
        assert_eq!(format_count(2_500_000), "2.5m");
    }

    #[test]
    fn ties_round_up() {
        assert_eq!(format_count(1_250), "1.3k");
        assert_eq!(format_count(2_250), "2.3k");
        assert_eq!(format_count(1_750), "1.8k");
        assert_eq!(format_count(999_750), "999.8k");
        assert_eq!(format_count(1_250_000), "1.3m");
        assert_eq!(format_count(2_250_000), "2.3m");
    }

    #[test]
    fn near_ties_follow_the_nearest_double() {
        // 1.15 and 1.45 are stored just below the tie.
        assert_eq!(format_count(1_150), "1.1k");
        assert_eq!(format_count(1_450), "1.4k");
        assert_eq!(format_count(1_260), "1.3k");
        assert_eq!(format_count(1_240), "1.2k");
    }

    /// Values just under a million stay in the thousand bucket and round up
    /// inside it. Kept as observed behavior.
    #[test]
    fn just_under_a_million_renders_as_thousand_k() {
        assert_eq!(format_count(999_999), "1000.0k");
    }
}
