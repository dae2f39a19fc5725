use std::fmt::{self, Display, Formatter};

use chrono::{DateTime, Local};

use super::alerts::{clinical_alerts, AlertPriority, ClinicalAlert, SEVERE_PAIN};
use crate::domain::questionnaire::{AnswerKey, Answers};

const WIDTH: usize = 62;

/// Plain-text clinical summary handed to the care team.
#[derive(Debug, Clone)]
pub struct SymptomReport<'a> {
    answers: &'a Answers,
    alerts: Vec<ClinicalAlert>,
    generated_at: DateTime<Local>,
}

impl<'a> SymptomReport<'a> {
    pub fn new(answers: &'a Answers, generated_at: DateTime<Local>) -> Self {
        Self {
            answers,
            alerts: clinical_alerts(answers),
            generated_at,
        }
    }

    pub fn alerts(&self) -> &[ClinicalAlert] {
        &self.alerts
    }

    pub fn patient_name(&self) -> &str {
        self.answers.get_or(AnswerKey::PatientName, "Unknown")
    }

    /// Download name, e.g. `ChatReport_Alice_20240305_1407.txt`.
    pub fn file_name(&self) -> String {
        let name: String = self
            .answers
            .get_or(AnswerKey::PatientName, "Patient")
            .chars()
            .filter(|c| c.is_alphanumeric() || *c == '-' || *c == '_')
            .collect();
        let name = if name.is_empty() { "Patient".to_string() } else { name };
        format!(
            "ChatReport_{}_{}.txt",
            name,
            self.generated_at.format("%Y%m%d_%H%M")
        )
    }

    pub fn render(&self) -> String {
        self.to_string()
    }

    fn write_header(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(WIDTH);
        writeln!(f, "{rule}")?;
        writeln!(f, "  CHATREPORT SYMPTOM SUMMARY")?;
        writeln!(f, "  Fox Chase Cancer Center × Temple University")?;
        writeln!(f, "{rule}")?;
        writeln!(f, "  Patient Name  : {}", self.patient_name())?;
        writeln!(
            f,
            "  Report Date   : {}",
            self.generated_at.format("%B %d, %Y at %I:%M %p")
        )?;
        writeln!(f, "  Report Type   : Pre-Appointment Symptom Checkin")?;
        writeln!(f, "{rule}")?;
        writeln!(f)
    }

    fn write_present_symptoms(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let a = self.answers;
        writeln!(f, "🔴  SYMPTOMS PRESENT")?;
        writeln!(f, "{}", "-".repeat(WIDTH))?;
        let mut any_present = false;

        if a.is_affirmative(AnswerKey::PainPresent) {
            any_present = true;
            let severity = a.score(AnswerKey::PainSeverity);
            let flag = if severity >= SEVERE_PAIN { " ⚠️  HIGH" } else { "" };
            writeln!(f)?;
            writeln!(f, "  PAIN — PRESENT")?;
            writeln!(
                f,
                "    Location    : {}",
                a.get_or(AnswerKey::PainLocation, "Not specified")
            )?;
            writeln!(f, "    Severity    : {severity}/10{flag}")?;
            writeln!(
                f,
                "    Frequency   : {}",
                a.get_or(AnswerKey::PainFrequency, "Not reported")
            )?;
            writeln!(
                f,
                "    Management  : {}",
                a.get_or(AnswerKey::PainManagement, "None reported")
            )?;
            writeln!(f, "    Impact      : {}", a.get_or(AnswerKey::PainImpact, "Not described"))?;
        }

        if a.is_affirmative(AnswerKey::MouthPresent) {
            any_present = true;
            writeln!(f)?;
            writeln!(f, "  MOUTH SYMPTOMS — PRESENT")?;
            writeln!(f, "    Dry Mouth   : {}", a.get_or(AnswerKey::MouthDry, "Not specified"))?;
            writeln!(f, "    Mouth Sores : {}", a.get_or(AnswerKey::MouthSores, "Not specified"))?;
            writeln!(f, "    Taste Change: {}", a.get_or(AnswerKey::MouthTaste, "Not specified"))?;
            writeln!(f, "    Impact      : {}", a.get_or(AnswerKey::MouthImpact, "Not described"))?;
        }

        if a.is_affirmative(AnswerKey::SwallowPresent) {
            any_present = true;
            writeln!(f)?;
            writeln!(f, "  SWALLOWING DIFFICULTY — PRESENT")?;
            writeln!(
                f,
                "    Pain w/ swallow: {}",
                a.get_or(AnswerKey::SwallowPain, "Not specified")
            )?;
            writeln!(
                f,
                "    Diet level     : {}",
                a.get_or(AnswerKey::SwallowDiet, "Not specified")
            )?;
            writeln!(
                f,
                "    Choking/cough  : {}",
                a.get_or(AnswerKey::SwallowChoking, "Not reported")
            )?;
        }

        if a.is_affirmative(AnswerKey::BreathingPresent) {
            any_present = true;
            writeln!(f)?;
            writeln!(f, "  BREATHING DIFFICULTY — PRESENT ⚠️")?;
            writeln!(f, "    Details: {}", a.get_or(AnswerKey::BreathingDetail, "Not described"))?;
        }

        if !any_present {
            writeln!(f, "  (No major physical symptoms reported)")?;
        }

        writeln!(f)?;
        writeln!(f, "{}", "=".repeat(WIDTH))
    }

    fn write_section(
        &self,
        f: &mut Formatter<'_>,
        title: &str,
        rows: &[(&str, AnswerKey)],
    ) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "{title}")?;
        writeln!(f, "{}", "-".repeat(WIDTH))?;
        for (label, key) in rows {
            writeln!(f, "  {label:<14}: {}", self.answers.get_or(*key, "Not reported"))?;
        }
        Ok(())
    }

    fn write_wellbeing(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let a = self.answers;

        writeln!(f)?;
        writeln!(f, "📊  NUTRITIONAL STATUS")?;
        writeln!(f, "{}", "-".repeat(WIDTH))?;
        writeln!(
            f,
            "  Appetite      : {}",
            a.get_or(AnswerKey::NutritionAppetite, "Not reported")
        )?;
        writeln!(f, "  Weight        : {}", a.get_or(AnswerKey::NutritionWeight, "Not reported"))?;
        if let Some(amount) = a.get(AnswerKey::NutritionWeightAmt).filter(|v| !v.is_empty()) {
            writeln!(f, "  Weight amt    : {amount}")?;
        }
        writeln!(f, "  Nausea/Vomit  : {}", a.get_or(AnswerKey::NutritionNausea, "Not reported"))?;
        writeln!(
            f,
            "  Supplements   : {}",
            a.get_or(AnswerKey::NutritionSupplements, "Not reported")
        )?;

        writeln!(f)?;
        writeln!(f, "😴  FATIGUE")?;
        writeln!(f, "{}", "-".repeat(WIDTH))?;
        writeln!(f, "  Fatigue Level : {}/10", a.get_or(AnswerKey::FatigueLevel, "Not rated"))?;
        if let Some(impact) = a.get(AnswerKey::FatigueImpact).filter(|v| !v.is_empty()) {
            writeln!(f, "  Impact        : {impact}")?;
        }

        self.write_section(
            f,
            "💭  EMOTIONAL WELLBEING",
            &[
                ("General Mood", AnswerKey::MoodGeneral),
                ("Anxiety", AnswerKey::MoodAnxiety),
                ("Sleep", AnswerKey::MoodSleep),
                ("Support", AnswerKey::MoodSupport),
            ],
        )?;

        self.write_section(
            f,
            "🩺  OTHER SYMPTOMS",
            &[
                ("Cough", AnswerKey::OtherCough),
                ("Skin changes", AnswerKey::OtherSkin),
                ("Concentration", AnswerKey::OtherConcentration),
            ],
        )?;

        if let Some(notes) = a.get(AnswerKey::AdditionalNotes).filter(|v| !v.is_empty()) {
            writeln!(f)?;
            writeln!(f, "📝  ADDITIONAL NOTES (patient's words)")?;
            writeln!(f, "{}", "-".repeat(WIDTH))?;
            writeln!(f, "  {notes}")?;
        }
        Ok(())
    }

    fn write_not_reported(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let not_present: Vec<&str> = [
            ("Pain", AnswerKey::PainPresent),
            ("Mouth symptoms", AnswerKey::MouthPresent),
            ("Swallowing difficulty", AnswerKey::SwallowPresent),
            ("Breathing problems", AnswerKey::BreathingPresent),
        ]
        .into_iter()
        .filter(|(_, key)| {
            let answer = self.answers.get_or(*key, "");
            !answer.is_empty() && !self.answers.is_affirmative(*key)
        })
        .map(|(label, _)| label)
        .collect();

        if not_present.is_empty() {
            return Ok(());
        }

        writeln!(f)?;
        writeln!(f, "✅  SYMPTOMS NOT REPORTED")?;
        writeln!(f, "{}", "-".repeat(WIDTH))?;
        for label in not_present {
            writeln!(f, "  • {label}")?;
        }
        Ok(())
    }

    fn write_alerts(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(WIDTH);
        writeln!(f)?;
        writeln!(f, "{rule}")?;
        writeln!(f, "  CLINICAL ALERTS")?;
        writeln!(f, "{rule}")?;
        for alert in &self.alerts {
            let marker = match alert.priority {
                AlertPriority::High => "🔴",
                AlertPriority::Monitor => "⚠️ ",
            };
            writeln!(f, "  {marker} {}: {}", alert.priority, alert.message)?;
        }
        if self.alerts.is_empty() {
            writeln!(f, "  ✅ No critical alerts at this time.")?;
        }

        writeln!(f)?;
        writeln!(f, "{rule}")?;
        writeln!(f, "  This report was generated by ChatReport (Phase 1 prototype).")?;
        writeln!(f, "  For clinical decisions, consult the treating physician.")?;
        write!(f, "{rule}")
    }
}

impl Display for SymptomReport<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.write_header(f)?;
        self.write_present_symptoms(f)?;
        self.write_wellbeing(f)?;
        self.write_not_reported(f)?;
        self.write_alerts(f)
    }
}
