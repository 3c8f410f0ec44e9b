//! Display helpers shared by the pages.

use ems_core::ExpenseStatus;

/// Colours cycled through the status breakdown.
pub const PALETTE: [&str; 4] = ["#0088FE", "#00C49F", "#FFBB28", "#FF8042"];

/// Amounts are shown as the server sent them, prefixed with the rupee sign.
pub fn money(amount: f64) -> String {
    format!("₹{amount}")
}

/// Width of a bar, in percent of the largest value. Zero when nothing is
/// larger than zero.
pub fn bar_percent(value: f64, max: f64) -> f64 {
    if max <= 0.0 || !value.is_finite() {
        return 0.0;
    }
    (value / max * 100.0).clamp(0.0, 100.0)
}

/// Rounded share of `total`, for the status breakdown legend.
pub fn share_percent(value: f64, total: f64) -> u32 {
    if total <= 0.0 {
        return 0;
    }
    (value / total * 100.0).round().clamp(0.0, 100.0) as u32
}

pub fn palette(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

/// CSS class for a status badge.
pub fn status_class(status: ExpenseStatus) -> &'static str {
    match status {
        ExpenseStatus::Approved => "badge approved",
        ExpenseStatus::Rejected => "badge rejected",
        ExpenseStatus::Pending => "badge pending",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_keeps_server_precision() {
        assert_eq!(money(1200.0), "₹1200");
        assert_eq!(money(12.5), "₹12.5");
    }

    #[test]
    fn bars_scale_to_the_largest_value() {
        assert_eq!(bar_percent(50.0, 200.0), 25.0);
        assert_eq!(bar_percent(200.0, 200.0), 100.0);
        assert_eq!(bar_percent(10.0, 0.0), 0.0);
    }

    #[test]
    fn shares_round_and_survive_empty_totals() {
        assert_eq!(share_percent(1.0, 3.0), 33);
        assert_eq!(share_percent(2.0, 3.0), 67);
        assert_eq!(share_percent(0.0, 0.0), 0);
    }

    #[test]
    fn palette_wraps() {
        assert_eq!(palette(0), palette(4));
    }
}
