const GIB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Binary gigabytes with two decimals, e.g. `15.53 GB`.
pub fn format_gb(bytes: u64) -> String {
    format!("{:.2} GB", bytes as f64 / GIB)
}

pub fn format_percent(percent: f64) -> String {
    format!("{percent:.1}%")
}

/// Share of `part` in `total` as a percentage, 0 when `total` is 0.
pub fn percent_of(part: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    part as f64 / total as f64 * 100.0
}
