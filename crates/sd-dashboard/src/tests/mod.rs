
/// Lightness component of an `hsl(H S% L%)` fill.
pub(crate) fn lightness_of(fill: &str) -> f64 {
    fill.trim_start_matches("hsl(")
        .trim_end_matches("%)")
        .rsplit(' ')
        .next()
        .and_then(|l| l.parse().ok())
        .unwrap_or_else(|| panic!("not a shaded fill: {fill}"))
}
