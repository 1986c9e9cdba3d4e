//! Absurd comparison conversions
//!
//! Turns raw climbing totals into shareable equivalents: elephants of
//! weight hauled, Eiffel Towers of height climbed, and so on. Each
//! conversion is one multiplicative constant; every function is total for
//! finite input and returns 0 for a zero count.

use serde::{Deserialize, Serialize};

/// Average African elephant (lbs)
const ELEPHANT_WEIGHT_LBS: f64 = 13_000.0;
/// Eiffel Tower height to the tip (ft)
const EIFFEL_TOWER_HEIGHT_FT: f64 = 1_063.0;
/// Standard Kilter board problem height (ft)
const PROBLEM_HEIGHT_FT: f64 = 12.0;
/// One sitcom episode (minutes)
const EPISODE_MINUTES: f64 = 22.0;
/// Calories in a banana
const BANANA_CALORIES: f64 = 105.0;
/// Rough bouldering estimate per attempt
const CALORIES_PER_ATTEMPT: f64 = 50.0;

/// Body weight assumed when none is supplied (lbs)
pub const DEFAULT_BODY_WEIGHT_LBS: f64 = 150.0;

/// Elephants worth of body weight hauled up the wall:
/// body weight times attempts over one elephant
pub fn elephants_lifted(total_attempts: u32, body_weight_lbs: f64) -> f64 {
    f64::from(total_attempts) * body_weight_lbs / ELEPHANT_WEIGHT_LBS
}

/// Eiffel Towers of height climbed: sends times problem height over the
/// tower
pub fn eiffel_towers(total_sends: u32) -> f64 {
    f64::from(total_sends) * PROBLEM_HEIGHT_FT / EIFFEL_TOWER_HEIGHT_FT
}

/// Sitcom episodes that would have fit into the time on the board
pub fn office_episodes(total_minutes: u32) -> f64 {
    f64::from(total_minutes) / EPISODE_MINUTES
}

/// Bananas of energy burned: attempts times calories-per-attempt over one
/// banana
pub fn bananas_of_energy(total_attempts: u32) -> f64 {
    f64::from(total_attempts) * CALORIES_PER_ATTEMPT / BANANA_CALORIES
}

/// Insert thousands separators into a whole number
fn group_thousands(value: i64) -> String {
    let digits = value.abs().to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if value < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Format a comparison value: integers without a decimal point,
/// non-integers with exactly one decimal place, separators from 1,000 up
fn format_value(value: f64) -> String {
    let tenths = (value * 10.0).round() as i64;
    if tenths == 0 {
        return "0".to_string();
    }
    let whole = group_thousands(tenths / 10);
    let tenth = (tenths % 10).abs();
    if tenth == 0 {
        whole
    } else {
        format!("{whole}.{tenth}")
    }
}

/// Pluralize the unit unless the count is exactly one or the unit is
/// already plural. Multi-word units pluralize their final word.
fn pluralize(value: f64, unit: &str) -> String {
    if value == 1.0 || unit.ends_with('s') {
        unit.to_string()
    } else {
        format!("{unit}s")
    }
}

/// Render a comparison for display, e.g. `format_comparison(5.77,
/// "elephant")` is `"5.8 elephants"`
pub fn format_comparison(value: f64, unit: &str) -> String {
    format!("{} {}", format_value(value), pluralize(value, unit))
}

/// A computed comparison with its display form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comparison {
    pub value: f64,
    pub formatted: String,
}

impl Comparison {
    fn new(value: f64, unit: &str) -> Self {
        Self {
            value,
            formatted: format_comparison(value, unit),
        }
    }
}

/// All comparisons bundled for the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonSet {
    pub elephants_lifted: Comparison,
    pub eiffel_towers: Comparison,
    pub office_episodes: Comparison,
    pub bananas_of_energy: Comparison,
}

pub fn all_comparisons(
    total_attempts: u32,
    total_sends: u32,
    total_minutes: u32,
    body_weight_lbs: f64,
) -> ComparisonSet {
    ComparisonSet {
        elephants_lifted: Comparison::new(
            elephants_lifted(total_attempts, body_weight_lbs),
            "elephant",
        ),
        eiffel_towers: Comparison::new(eiffel_towers(total_sends), "Eiffel Tower"),
        office_episodes: Comparison::new(office_episodes(total_minutes), "episode"),
        bananas_of_energy: Comparison::new(bananas_of_energy(total_attempts), "banana"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_zero_counts_give_zero() {
        assert!((elephants_lifted(0, 180.0) - 0.0).abs() < f64::EPSILON);
        assert!((eiffel_towers(0) - 0.0).abs() < f64::EPSILON);
        assert!((office_episodes(0) - 0.0).abs() < f64::EPSILON);
        assert!((bananas_of_energy(0) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_conversion_constants() {
        // 13000 lbs of attempts at 130 lbs body weight is exactly one
        // elephant
        assert!((elephants_lifted(100, 130.0) - 1.0).abs() < 1e-9);
        // 1063 ft of problems is one tower: 1063 / 12 sends
        assert!((eiffel_towers(1063) - 12.0).abs() < 1e-9);
        assert!((office_episodes(44) - 2.0).abs() < 1e-9);
        // 21 attempts at 50 cal each is exactly 10 bananas
        assert!((bananas_of_energy(21) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_format_singular() {
        assert_eq!(format_comparison(1.0, "elephant"), "1 elephant");
    }

    #[test]
    fn test_format_rounds_to_one_decimal() {
        assert_eq!(format_comparison(5.77, "elephant"), "5.8 elephants");
        assert_eq!(format_comparison(2.0, "episode"), "2 episodes");
        assert_eq!(format_comparison(0.0, "banana"), "0 bananas");
    }

    #[test]
    fn test_format_thousands_separators() {
        assert_eq!(format_comparison(1234.5, "bananas"), "1,234.5 bananas");
        assert_eq!(format_comparison(1000.0, "banana"), "1,000 bananas");
        assert_eq!(format_comparison(1_000_000.0, "banana"), "1,000,000 bananas");
    }

    #[test]
    fn test_format_already_plural_unit() {
        assert_eq!(format_comparison(3.0, "bananas"), "3 bananas");
    }

    #[test]
    fn test_format_multi_word_unit() {
        assert_eq!(format_comparison(2.5, "Eiffel Tower"), "2.5 Eiffel Towers");
        assert_eq!(format_comparison(1.0, "Eiffel Tower"), "1 Eiffel Tower");
    }

    #[test]
    fn test_all_comparisons_bundle() {
        let set = all_comparisons(100, 50, 220, DEFAULT_BODY_WEIGHT_LBS);

        // 100 attempts * 150 lbs / 13000
        assert!((set.elephants_lifted.value - 1.1538).abs() < 0.001);
        assert_eq!(set.elephants_lifted.formatted, "1.2 elephants");

        // 50 sends * 12 ft / 1063
        assert!((set.eiffel_towers.value - 0.5644).abs() < 0.001);
        assert_eq!(set.eiffel_towers.formatted, "0.6 Eiffel Towers");

        assert_eq!(set.office_episodes.formatted, "10 episodes");

        // 100 * 50 / 105 = 47.6
        assert_eq!(set.bananas_of_energy.formatted, "47.6 bananas");
    }
}
