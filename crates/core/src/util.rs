/// Round `num` to `dec` decimal places.
pub fn round_number(num: f64, dec: u32) -> f64 {
    let factor = 10f64.powi(dec as i32);
    (num * factor).round() / factor
}

/// Format a duration in seconds as a `w d h m s` string, omitting zero
/// units: `694861.0` → `"1w 1d 1h 1m 1s"`.
pub fn format_time_duration(duration: f64) -> String {
    const UNITS: &[(f64, &str)] = &[
        (604_800.0, "w"),
        (86_400.0, "d"),
        (3_600.0, "h"),
        (60.0, "m"),
        (1.0, "s"),
    ];

    let mut remaining = duration;
    let mut parts = Vec::new();
    for &(secs, label) in UNITS {
        let quotient = (remaining / secs).floor();
        if quotient > 0.0 {
            remaining %= secs;
            parts.push(format!("{quotient:.0}{label}"));
        }
    }
    parts.join(" ")
}
