//! Formatting helpers shared across report outputs.

/// Format a mood score out of five (e.g., "3.4/5").
pub fn format_score(score: f64) -> String {
    format!("{:.1}/5", score)
}

/// Render a percentage as a fixed-width text bar (e.g., "█████░░░░░").
pub fn format_percentage_bar(percentage: u32, width: usize) -> String {
    let filled = (percentage.min(100) as usize * width + 50) / 100;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// "1 day", "3 days".
pub fn pluralize_days(n: usize) -> String {
    if n == 1 {
        "1 day".to_string()
    } else {
        format!("{} days", n)
    }
}
