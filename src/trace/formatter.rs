use super::ChainStep;
use itertools::Itertools;

/// Formats evaluation traces into human-readable strings
pub struct TraceFormatter;

impl TraceFormatter {
    /// Format the steps of a chain walk as a running calculation.
    ///
    /// `[+5, ×3]` renders as `0 + 5 = 5 → × 3 = 15`. A walk with no steps
    /// renders as the starting value alone.
    pub fn format_steps(steps: &[ChainStep]) -> String {
        let folds = steps
            .iter()
            .filter(|step| !step.is_passthrough())
            .enumerate()
            .map(|(i, step)| {
                let lead = if i == 0 { "0 " } else { "" };
                format!(
                    "{}{} {} = {}",
                    lead,
                    step.symbol,
                    Self::format_number(step.operand),
                    Self::format_number(step.outcome)
                )
            })
            .join(" → ");

        if folds.is_empty() {
            "0".to_string()
        } else {
            folds
        }
    }

    /// Format a number for display, dropping the fraction when it is zero.
    pub fn format_number(n: f64) -> String {
        if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
            format!("{}", n as i64)
        } else {
            format!("{}", n)
        }
    }
}
