use strum::Display;

use crate::domain::questionnaire::{AnswerKey, Answers};

/// Pain rating at or above which the pain is flagged as severe.
pub const SEVERE_PAIN: u8 = 7;
/// Pain rating at or above which the pain is worth monitoring.
pub const MODERATE_PAIN: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display)]
pub enum AlertPriority {
    #[strum(serialize = "HIGH PRIORITY")]
    High,
    #[strum(serialize = "MONITOR")]
    Monitor,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClinicalAlert {
    pub priority: AlertPriority,
    pub message: String,
}

impl ClinicalAlert {
    fn high<S: Into<String>>(message: S) -> Self {
        Self {
            priority: AlertPriority::High,
            message: message.into(),
        }
    }

    fn monitor<S: Into<String>>(message: S) -> Self {
        Self {
            priority: AlertPriority::Monitor,
            message: message.into(),
        }
    }
}

/// Flags answers the care team should look at before the appointment.
///
/// High priority alerts come first, each group in evaluation order.
pub fn clinical_alerts(answers: &Answers) -> Vec<ClinicalAlert> {
    let mut alerts = Vec::new();

    let pain = answers.score(AnswerKey::PainSeverity);
    if pain >= SEVERE_PAIN {
        alerts.push(ClinicalAlert::high(format!(
            "Severe pain reported ({pain}/10) — review pain management"
        )));
    } else if pain >= MODERATE_PAIN {
        alerts.push(ClinicalAlert::monitor(format!(
            "Moderate pain ({pain}/10) — monitor closely"
        )));
    }

    if answers.mentions(AnswerKey::SwallowDiet, "only")
        || answers.mentions(AnswerKey::SwallowDiet, "tube")
    {
        alerts.push(ClinicalAlert::high(
            "Patient on liquids only or feeding tube — nutritional consult may be needed",
        ));
    }

    if answers.mentions(AnswerKey::NutritionWeight, "lost") {
        alerts.push(ClinicalAlert::monitor(format!(
            "Weight loss reported: {}",
            answers.get_or(AnswerKey::NutritionWeightAmt, "amount not specified")
        )));
    }

    if answers.mentions(AnswerKey::MoodGeneral, "very distressed")
        || answers.mentions(AnswerKey::MoodGeneral, "quite sad")
    {
        alerts.push(ClinicalAlert::high(
            "Patient reports significant emotional distress — consider psychosocial referral",
        ));
    } else if answers.mentions(AnswerKey::MoodGeneral, "anxious")
        || answers.mentions(AnswerKey::MoodGeneral, "a bit down")
    {
        alerts.push(ClinicalAlert::monitor(
            "Elevated anxiety/low mood — check in during appointment",
        ));
    }

    if answers.is_affirmative(AnswerKey::BreathingPresent) {
        alerts.push(ClinicalAlert::high(
            "Breathing difficulties reported — assess for obstruction or infection",
        ));
    }

    // stable: keeps evaluation order inside each priority
    alerts.sort_by_key(|alert| alert.priority);
    alerts
}
