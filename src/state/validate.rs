//! Masked-input rules for the predictor form.
//!
//! Each validator takes the full candidate text of a field and returns the
//! value to store, or `None` when the keystroke should be ignored. Rejection
//! is silent: the caller keeps whatever it had before.

pub const MAX_RANK: u8 = 25;
pub const MAX_COMPETING_GAMES: u8 = 10;

/// Poll rank. Empty means unranked (0), otherwise 1 through 25.
pub fn rank(raw: &str) -> Option<u8> {
    bounded_count(raw, 1, MAX_RANK)
}

/// Major competing games in the same window. Empty means none (0).
pub fn competing_games(raw: &str) -> Option<u8> {
    bounded_count(raw, 0, MAX_COMPETING_GAMES)
}

fn bounded_count(raw: &str, min: u8, max: u8) -> Option<u8> {
    let v = raw.trim();
    if v.is_empty() {
        return Some(0);
    }
    if !v.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let n = v.parse::<u8>().ok()?;
    (min..=max).contains(&n).then_some(n)
}

/// Betting spread text. Whole or half points only; a trailing `.` is kept
/// while the user is still typing.
pub fn spread(raw: &str) -> Option<String> {
    if raw.is_empty() {
        return Some(String::new());
    }

    let mut parts = raw.splitn(2, '.');
    let whole = parts.next().unwrap_or_default();
    let frac = parts.next();
    let digits_only = |s: &str| s.bytes().all(|b| b.is_ascii_digit());

    if !digits_only(whole) || !frac.is_none_or(digits_only) {
        return None;
    }

    match frac {
        None | Some("") | Some("5") => Some(raw.to_string()),
        Some(_) => None,
    }
}

/// Numeric value of accepted spread text. Empty (or a bare `.`) counts as a
/// pick'em; a transient `3.` counts as 3.
pub fn spread_value(text: &str) -> f64 {
    let trimmed = text.trim_end_matches('.');
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.parse::<f64>().unwrap_or(0.0)
}
