//! Significant-figure rounding and engineering notation.

/// SI magnitude prefixes aligned to decade triples.
const ENG_PREFIXES: [(i32, &str); 9] = [
    (-12, "p"),
    (-9, "n"),
    (-6, "u"),
    (-3, "m"),
    (0, ""),
    (3, "k"),
    (6, "M"),
    (9, "G"),
    (12, "T"),
];

/// Round `x` to `digits` significant figures.
pub fn round_sig(x: f64, digits: usize) -> f64 {
    if x == 0.0 || !x.is_finite() {
        return x;
    }
    let digits = digits.clamp(1, 15) as i32;
    let magnitude = x.abs().log10().floor() as i32;
    let scale = 10f64.powi(digits - 1 - magnitude);
    (x * scale).round() / scale
}

/// Format `x` with `digits` significant figures, trailing zeros and a
/// trailing decimal point trimmed.
pub fn sig(x: f64, digits: usize) -> String {
    if x == 0.0 {
        return "0".to_string();
    }
    if !x.is_finite() {
        return x.to_string();
    }
    let digits = digits.clamp(1, 15);
    let rounded = round_sig(x, digits);
    let magnitude = rounded.abs().log10().floor() as i32;
    let decimals = (digits as i32 - 1 - magnitude).max(0) as usize;
    let mut s = format!("{:.*}", decimals, rounded);
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}

/// Engineering notation: mantissa in [1, 1000) plus an SI magnitude prefix.
/// Values outside the prefix table keep the nearest prefix and let the
/// mantissa grow.
pub fn eng_si(x: f64, digits: usize) -> String {
    if x == 0.0 {
        return "0".to_string();
    }
    if !x.is_finite() {
        return x.to_string();
    }
    // Round first so e.g. 999.96 promotes to 1k instead of printing 1000.
    let rounded = round_sig(x, digits);
    let exponent = rounded.abs().log10().floor() as i32;
    let eng = (exponent.div_euclid(3) * 3).clamp(-12, 12);
    let mantissa = rounded / 10f64.powi(eng);
    let prefix = ENG_PREFIXES
        .iter()
        .find(|&&(e, _)| e == eng)
        .map(|&(_, p)| p)
        .unwrap_or("");
    format!("{}{}", sig(mantissa, digits), prefix)
}
