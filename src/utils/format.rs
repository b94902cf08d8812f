use unicode_width::UnicodeWidthStr;

/// Format pages as a decimal string, trimming trailing zeros
pub fn format_pages(pages: f64) -> String {
    if pages == pages.floor() {
        format!("{}", pages as i64)
    } else {
        format!("{:.1}", pages)
    }
}

/// "280 days (~9 months)" style span, coarse units only past a month.
pub fn format_days(days: u32) -> String {
    let unit = if days == 1 { "day" } else { "days" };
    if days < 60 {
        format!("{} {}", days, unit)
    } else if days < 730 {
        format!("{} {} (~{} months)", days, unit, (f64::from(days) / 30.44).round() as u32)
    } else {
        format!("{} {} (~{:.1} years)", days, unit, f64::from(days) / 365.25)
    }
}

/// Create a simple ASCII progress bar
pub fn progress_bar(ratio: f64, width: usize) -> String {
    let ratio = if ratio.is_finite() { ratio.clamp(0.0, 1.0) } else { 0.0 };
    let filled_count = (ratio * width as f64).round() as usize;
    let empty_count = width.saturating_sub(filled_count);
    format!("{}{}", "█".repeat(filled_count), "░".repeat(empty_count))
}

/// Left-align `s` to `width` terminal columns.
pub fn pad_right(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    format!("{}{}", s, " ".repeat(width.saturating_sub(w)))
}
