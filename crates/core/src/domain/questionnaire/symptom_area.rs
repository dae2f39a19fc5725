use strum::{Display, EnumIter, IntoEnumIterator};

use super::{answer_key::AnswerKey, answers::Answers};

/// Section of the check-in shown in the progress tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum SymptomArea {
    Pain,
    Mouth,
    Swallowing,
    Nutrition,
    Breathing,
    Fatigue,
    Mood,
    Other,
}

impl SymptomArea {
    /// Opening question of the section; the section counts as visited once it is answered.
    pub fn gate(&self) -> AnswerKey {
        match self {
            SymptomArea::Pain => AnswerKey::PainPresent,
            SymptomArea::Mouth => AnswerKey::MouthPresent,
            SymptomArea::Swallowing => AnswerKey::SwallowPresent,
            SymptomArea::Nutrition => AnswerKey::NutritionAppetite,
            SymptomArea::Breathing => AnswerKey::BreathingPresent,
            SymptomArea::Fatigue => AnswerKey::FatigueLevel,
            SymptomArea::Mood => AnswerKey::MoodGeneral,
            SymptomArea::Other => AnswerKey::OtherCough,
        }
    }

    pub fn progress(answers: &Answers) -> Vec<(SymptomArea, bool)> {
        SymptomArea::iter()
            .map(|area| (area, !answers.get_or(area.gate(), "").is_empty()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_marks_answered_gates() {
        let mut answers = Answers::new();
        answers.set(AnswerKey::PainPresent, "No");
        answers.set(AnswerKey::FatigueLevel, "0");

        let progress = SymptomArea::progress(&answers);
        assert_eq!(progress.len(), 8);
        assert!(progress.contains(&(SymptomArea::Pain, true)));
        assert!(progress.contains(&(SymptomArea::Fatigue, true)));
        assert!(progress.contains(&(SymptomArea::Mood, false)));
    }
}
