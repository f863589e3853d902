/// 1 Astronomical Unit in millimeters (IAU 2012 exact definition, 149,597,870,700 m).
pub const MM_PER_AU: f64 = 149_597_870_700_000.0;

/// Astronomical units in one light-year, rounded to a whole number so the
/// system tier can stay integral.
pub const AU_PER_LY: i64 = 63_241;

/// 1 light-year in millimeters, consistent with [`AU_PER_LY`] rather than the
/// IAU light-year.
pub const MM_PER_LY: f64 = MM_PER_AU * AU_PER_LY as f64;

/// Convert astronomical units to light-years.
pub fn au_to_light_years(au: f64) -> f64 {
    au / AU_PER_LY as f64
}

/// Format a distance in millimeters as a human-readable string,
/// automatically choosing the most appropriate unit.
///
/// Examples:
/// - 500 -> "500 mm"
/// - 1_500 -> "1.500 m"
/// - 5_000_000 -> "5.000 km"
/// - 149_597_870_700_000 -> "1.000 AU"
pub fn format_distance(mm: f64) -> String {
    let abs = mm.abs();
    let sign = if mm < 0.0 { "-" } else { "" };

    if abs >= MM_PER_LY {
        format!("{}{:.3} ly", sign, abs / MM_PER_LY)
    } else if abs >= MM_PER_AU {
        format!("{}{:.3} AU", sign, abs / MM_PER_AU)
    } else if abs >= 1_000_000.0 {
        format!("{}{:.3} km", sign, abs / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("{}{:.3} m", sign, abs / 1_000.0)
    } else {
        format!("{}{} mm", sign, abs.round() as i64)
    }
}
