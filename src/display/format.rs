/// Rounds half away from zero at `decimals` places.
pub fn round(value: f64, decimals: u32) -> f64 {
    let multiplier = 10f64.powi(decimals as i32);
    (value * multiplier).round() / multiplier
}

/// [`round`] at one decimal place, the precision nutrients are kept at.
pub fn round1(value: f64) -> f64 {
    round(value, 1)
}

/// Card value: one decimal below 1, whole numbers otherwise.
pub fn display_value(value: f64) -> f64 {
    if value < 1.0 {
        round(value, 1)
    } else {
        value.round()
    }
}

pub fn sodium_to_mg(grams: f64) -> i64 {
    (grams * 1000.0).round() as i64
}

/// Optional nutrients are rendered only when present and positive.
pub fn should_show(value: Option<f64>) -> bool {
    value.is_some_and(|v| v > 0.0)
}

pub fn format_value(value: f64, unit: &str) -> String {
    if value == 0.0 {
        return format!("0{unit}");
    }
    format!("{}{unit}", round1(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_half_up_at_one_decimal() {
        assert_eq!(round(0.25, 1), 0.3);
        assert_eq!(round(10.0, 1), 10.0);
        assert_eq!(round(3.14159, 2), 3.14);
        assert_eq!(round(2.5, 0), 3.0);
    }

    #[test]
    fn display_rule_switches_at_one() {
        assert_eq!(display_value(0.44), 0.4);
        assert_eq!(display_value(0.96), 1.0);
        assert_eq!(display_value(1.4), 1.0);
        assert_eq!(display_value(52.5), 53.0);
        assert_eq!(display_value(0.0), 0.0);
    }

    #[test]
    fn sodium_grams_to_milligrams() {
        assert_eq!(sodium_to_mg(0.2), 200);
        assert_eq!(sodium_to_mg(0.0), 0);
        assert_eq!(sodium_to_mg(0.0016), 2);
    }

    #[test]
    fn should_show_only_positive_values() {
        assert!(!should_show(Some(0.0)));
        assert!(!should_show(None));
        assert!(should_show(Some(5.0)));
        assert!(should_show(Some(0.01)));
    }

    #[test]
    fn formats_value_with_unit() {
        assert_eq!(format_value(0.0, "g"), "0g");
        assert_eq!(format_value(12.34, "g"), "12.3g");
        assert_eq!(format_value(7.0, " kcal"), "7 kcal");
    }
}
