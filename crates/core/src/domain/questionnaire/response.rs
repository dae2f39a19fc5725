//! Interpretation of free-form and quick-reply answers.

const AFFIRMATIVE_MARKERS: [&str; 15] = [
    "yes",
    "a little",
    "somewhat",
    "a lot",
    "often",
    "constantly",
    "most",
    "on and off",
    "only",
    "occasionally",
    "noticeably",
    "quite",
    "very",
    "difficulty",
    "trouble",
];

/// Returns true when the answer reports that a symptom is present, to any degree.
///
/// ```
/// use chatreport_core::domain::questionnaire::response::is_affirmative;
/// assert!(is_affirmative("A little"));
/// assert!(is_affirmative("  Yes, very dry "));
/// assert!(!is_affirmative("No"));
/// assert!(!is_affirmative("Not really"));
/// ```
pub fn is_affirmative(answer: &str) -> bool {
    let answer = answer.trim().to_lowercase();
    AFFIRMATIVE_MARKERS
        .iter()
        .any(|marker| answer.contains(marker))
}

/// Traffic-light band of a 0-10 rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PainBand {
    Mild,
    Moderate,
    Severe,
}

impl PainBand {
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=3 => PainBand::Mild,
            4..=6 => PainBand::Moderate,
            _ => PainBand::Severe,
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            PainBand::Mild => "#22c55e",
            PainBand::Moderate => "#f59e0b",
            PainBand::Severe => "#ef4444",
        }
    }
}

/// Tooltip shown next to each point of the rating scale.
pub fn scale_hint(score: u8) -> &'static str {
    match score {
        0 => "No pain",
        3 => "Mild",
        5 => "Moderate",
        8 => "Severe",
        10 => "Worst",
        _ => "",
    }
}
