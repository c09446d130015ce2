//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the math/fitting code stays clean and testable
//! - output changes are localized

use crate::domain::FEATURE_LEN;
use crate::fit::{EvaluationReport, TrainingSummary};
use crate::predict::{LocationMatch, Prediction};

/// Currency marker prefixed to every displayed amount.
pub const CURRENCY: &str = "₹";

const FEATURE_NAMES: [&str; FEATURE_LEN] = ["intercept", "square_feet", "bhk", "bathrooms", "location_code"];

/// Render a whole-rupee price with regional digit grouping.
///
/// The rightmost group has three digits and every group to its left has two:
/// `12345678` → `₹ 1,23,45,678`. Negative input is shown as zero.
pub fn format_price(price: i64) -> String {
    let price = price.max(0);
    format!("{CURRENCY} {}", group_digits(&price.to_string()))
}

/// Render a non-integral amount (e.g. an error metric) with two decimals.
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return format!("{CURRENCY} {value}");
    }
    let sign = if value < 0.0 { "-" } else { "" };
    let text = format!("{:.2}", value.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    format!("{CURRENCY} {sign}{}.{frac_part}", group_digits(int_part))
}

/// Metric display: amount, or `n/a` when it is undefined.
pub fn format_metric(value: Option<f64>) -> String {
    value.map(format_amount).unwrap_or_else(|| "n/a".to_string())
}

/// Insert separators into a string of ASCII digits.
fn group_digits(digits: &str) -> String {
    let len = digits.len();
    if len <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(len - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    groups.push(tail);
    groups.join(",")
}

/// Format the training run summary (dataset + split + weights + metrics).
pub fn format_training_summary(summary: &TrainingSummary, locations: &[String]) -> String {
    let mut out = String::new();

    out.push_str("=== homeprice - linear price model ===\n");
    out.push_str(&format!("Trained: {}\n", summary.trained_at.format("%Y-%m-%d %H:%M:%S UTC")));
    out.push_str(&format!(
        "Dataset: n={} | locations={} | skipped rows={}\n",
        summary.records, summary.locations, summary.rows_skipped
    ));
    out.push_str(&format!(
        "Split: train={} test={} (seed={})\n",
        summary.train_size, summary.test_size, summary.seed
    ));
    if summary.low_confidence {
        out.push_str("Warning: very small dataset, predictions may not be reliable.\n");
    }

    out.push_str("\nWeights:\n");
    for (name, w) in FEATURE_NAMES.iter().zip(&summary.weights) {
        out.push_str(&format!("  {name:<14} {w:>18.6}\n"));
    }

    out.push_str("\nEvaluation:\n");
    out.push_str(&format_report_line("train", &summary.train));
    out.push_str(&format_report_line("test", &summary.test));

    if !locations.is_empty() {
        out.push_str("\nLocations (code order):\n");
        for (code, name) in locations.iter().enumerate() {
            out.push_str(&format!("  {code:>3}  {}\n", truncate(name, 40)));
        }
    }

    out
}

fn format_report_line(label: &str, report: &EvaluationReport) -> String {
    format!(
        "  {label:<6} samples={:<6} MAE={:<20} RMSE={}\n",
        report.samples,
        format_metric(report.mae),
        format_metric(report.rmse)
    )
}

/// One-line description of a prediction for terminal output.
pub fn format_prediction(prediction: &Prediction, location: &str) -> String {
    let mut out = format!("Estimated price: {}", format_price(prediction.price_i64()));
    if prediction.location == LocationMatch::Fallback {
        out.push_str(&format!(
            "\nNote: location '{}' is not in the training data; priced as the first known location.",
            truncate(location, 40)
        ));
    }
    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_grouping() {
        assert_eq!(format_price(12_345_678), "₹ 1,23,45,678");
        assert_eq!(format_price(500), "₹ 500");
        assert_eq!(format_price(-10), "₹ 0");
    }

    #[test]
    fn price_grouping_boundaries() {
        assert_eq!(format_price(0), "₹ 0");
        assert_eq!(format_price(999), "₹ 999");
        assert_eq!(format_price(1_000), "₹ 1,000");
        assert_eq!(format_price(99_999), "₹ 99,999");
        assert_eq!(format_price(100_000), "₹ 1,00,000");
        assert_eq!(format_price(10_000_000), "₹ 1,00,00,000");
        assert_eq!(format_price(123_456_789), "₹ 12,34,56,789");
    }

    #[test]
    fn amount_keeps_two_decimals() {
        assert_eq!(format_amount(1_234_567.891), "₹ 12,34,567.89");
        assert_eq!(format_amount(12.5), "₹ 12.50");
        assert_eq!(format_amount(-1500.0), "₹ -1,500.00");
    }

    #[test]
    fn undefined_metric() {
        assert_eq!(format_metric(None), "n/a");
        assert_eq!(format_metric(Some(0.0)), "₹ 0.00");
    }

    #[test]
    fn truncate_long_names() {
        assert_eq!(truncate("Pune", 10), "Pune");
        assert_eq!(truncate("Koramangala", 5), "Kora.");
    }
}
