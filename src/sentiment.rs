//! Keyword-based sentiment scoring.
//!
//! A marker counts once if it appears anywhere in the lower-cased text, whole word or not,
//! so "risky" scores like "risk".

const POSITIVE_MARKERS: &[&str] = &[
    "surge",
    "gain",
    "rise",
    "boost",
    "growth",
    "success",
    "positive",
    "breakthrough",
    "innovation",
];

const NEGATIVE_MARKERS: &[&str] = &[
    "drop", "fall", "decline", "crash", "loss", "negative", "concern", "risk", "warning",
];

const MARKER_WEIGHT: f64 = 0.2;

/// Scores `text` in `[-1.0, 1.0]`: `+0.2` per positive marker present, `-0.2` per negative one.
pub fn score(text: &str) -> f64 {
    let lower = text.to_lowercase();

    let hits = |markers: &[&str]| markers.iter().filter(|m| lower.contains(**m)).count() as i32;
    let net = hits(POSITIVE_MARKERS) - hits(NEGATIVE_MARKERS);

    (f64::from(net) * MARKER_WEIGHT).clamp(-1.0, 1.0)
}
