/// Number of decimal places in the shortest decimal rendering of `n`.
pub fn decimal_places(n: f64) -> usize {
    let rendered = format!("{}", n);
    match rendered.find('.') {
        Some(idx) => rendered.len() - idx - 1,
        None => 0,
    }
}

/// Rounds to `places` decimal places, matching the display rounding used by
/// the host map stack.
pub fn format_num(value: f64, places: u32) -> f64 {
    let pow = 10f64.powi(places as i32);
    (value * pow).round() / pow
}

/// Corrects accumulated floating-point drift in a generated bucket value.
/// The naive rendering is kept unless it is longer than the fixed-decimal
/// rendering sized to `places`, in which case the re-parsed fixed rendering
/// wins. Keeps sequences like `0.5, 1, 1.5` free of trailing digits.
pub fn correct_drift(value: f64, places: usize) -> f64 {
    let naive = format!("{}", value);
    let fixed = format!("{:.*}", places, value);
    if naive.len() > fixed.len() {
        fixed.parse().unwrap_or(value)
    } else {
        value
    }
}
