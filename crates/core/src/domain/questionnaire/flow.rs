use std::sync::LazyLock;

use super::{
    answer_key::AnswerKey,
    answers::Answers,
    step::{Step, StepKind},
};

/// The standard pre-appointment check-in.
pub static CHATREPORT: LazyLock<Questionnaire> = LazyLock::new(Questionnaire::chatreport);

const PRESENCE: &[&str] = &["Yes", "No", "A little"];

/// Ordered conversation steps. Progression is always forward; conditional steps are skipped
/// when their condition does not hold for the answers given so far.
#[derive(Debug, Clone)]
pub struct Questionnaire {
    steps: Vec<Step>,
}

impl Questionnaire {
    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn step_at(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    pub fn step(&self, id: &str) -> Option<&Step> {
        self.steps.iter().find(|step| step.id == id)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.steps.iter().position(|step| step.id == id)
    }

    /// Index of the first visible step after `index`, or `None` when the conversation is over.
    pub fn next_visible(&self, index: usize, answers: &Answers) -> Option<usize> {
        self.steps
            .iter()
            .enumerate()
            .skip(index + 1)
            .find(|(_, step)| step.is_visible(answers))
            .map(|(index, _)| index)
    }

    /// Number of steps that take an answer, visible or not.
    pub fn answer_step_count(&self) -> usize {
        self.steps.iter().filter(|step| step.expects_answer()).count()
    }

    fn chatreport() -> Self {
        use AnswerKey::*;
        use StepKind::*;

        Self::new(vec![
            // Greeting
            Step::info(
                "welcome",
                "👋 Hello! I'm **ChatReport**, a symptom-reporting assistant from Fox Chase \
                 Cancer Center and Temple University.\n\nI'm here to help your care team \
                 understand how you've been feeling before your upcoming appointment. This \
                 should take about **10-15 minutes**.\n\nEverything you share stays private and \
                 goes only to your medical team. You can be as brief or as detailed as you'd like.",
            ),
            Step::ask(
                "name",
                Text,
                PatientName,
                "To get started, what's your **first name**?",
            ),
            Step::info(
                "intro2",
                "Nice to meet you, {name}! 😊 Thank you for taking the time to do this. Let's go \
                 through some questions about how you've been feeling. There are no right or \
                 wrong answers, just share what's true for you.",
            ),
            // Pain
            Step::ask(
                "pain_q1",
                Choice(PRESENCE),
                PainPresent,
                "**Pain** 😣\n\nHave you had any pain since your last appointment?",
            ),
            Step::ask(
                "pain_body",
                BodyMap,
                PainLocation,
                "I'm sorry to hear that. 💙 Can you show me **where** you're feeling the pain? \
                 Tap the area(s) on the diagram below.",
            )
            .when(|a| a.is_affirmative(PainPresent)),
            Step::ask(
                "pain_severity",
                Scale,
                PainSeverity,
                "On a scale of **0 to 10**, where 0 is no pain and 10 is the worst pain you can \
                 imagine, how would you rate your pain **at its worst**?",
            )
            .when(|a| a.is_affirmative(PainPresent)),
            Step::ask(
                "pain_frequency",
                Choice(&[
                    "Constantly",
                    "Most of the day",
                    "On and off",
                    "Only when swallowing",
                    "Only at night",
                ]),
                PainFrequency,
                "How often do you experience this pain?",
            )
            .when(|a| a.is_affirmative(PainPresent)),
            Step::ask(
                "pain_management",
                Text,
                PainManagement,
                "Are you doing anything to manage the pain? For example, medication, ice packs, \
                 or anything else?",
            )
            .when(|a| a.is_affirmative(PainPresent)),
            Step::ask(
                "pain_impact",
                Text,
                PainImpact,
                "How much is the pain affecting your day-to-day life, things like eating, \
                 sleeping, or doing activities?",
            )
            .when(|a| a.is_affirmative(PainPresent)),
            // Mouth
            Step::ask(
                "mouth_q1",
                Choice(PRESENCE),
                MouthPresent,
                "**Mouth Symptoms** 👄\n\nHave you noticed any dryness, sores, or changes in \
                 your mouth?",
            ),
            Step::ask(
                "mouth_dry",
                Choice(&["Yes, very dry", "Somewhat dry", "Not really"]),
                MouthDry,
                "Is your mouth feeling **very dry** (like you can't make enough saliva)?",
            )
            .when(|a| a.is_affirmative(MouthPresent)),
            Step::ask(
                "mouth_sores",
                Choice(&["Yes", "No", "Not sure"]),
                MouthSores,
                "Do you have any **sores or ulcers** inside your mouth?",
            )
            .when(|a| a.is_affirmative(MouthPresent)),
            Step::ask(
                "mouth_taste",
                Choice(&["Yes, very different", "A little different", "No change"]),
                MouthTaste,
                "Have you noticed any **changes in how food tastes**?",
            )
            .when(|a| a.is_affirmative(MouthPresent)),
            Step::ask(
                "mouth_impact",
                Text,
                MouthImpact,
                "How much are these mouth symptoms affecting your ability to **eat or drink**?",
            )
            .when(|a| a.is_affirmative(MouthPresent)),
            // Swallowing
            Step::ask(
                "swallow_q1",
                Choice(PRESENCE),
                SwallowPresent,
                "**Swallowing** 🥤\n\nHave you had any difficulty swallowing since your last \
                 visit?",
            ),
            Step::ask(
                "swallow_pain",
                Choice(&["Yes, a lot", "A little", "No"]),
                SwallowPain,
                "Does swallowing cause you **pain**?",
            )
            .when(|a| a.is_affirmative(SwallowPresent)),
            Step::ask(
                "swallow_diet",
                Choice(&[
                    "Regular food",
                    "Soft foods only",
                    "Pureed foods",
                    "Liquids only",
                    "Feeding tube only",
                ]),
                SwallowDiet,
                "What types of food are you able to eat right now?",
            )
            .when(|a| a.is_affirmative(SwallowPresent)),
            Step::ask(
                "swallow_choking",
                Choice(&["Yes, often", "Occasionally", "No"]),
                SwallowChoking,
                "Have you had any **choking or coughing** episodes when eating or drinking?",
            )
            .when(|a| a.is_affirmative(SwallowPresent)),
            // Nutrition
            Step::ask(
                "nutrition_q1",
                Choice(&["Good", "Reduced", "Very poor", "No appetite at all"]),
                NutritionAppetite,
                "**Nutrition & Appetite** 🍽️\n\nHow is your appetite lately?",
            ),
            Step::ask(
                "nutrition_weight",
                Choice(&[
                    "Yes, lost weight",
                    "Yes, gained weight",
                    "No change",
                    "Not sure",
                ]),
                NutritionWeight,
                "Have you noticed any **weight changes** recently?",
            ),
            Step::ask(
                "nutrition_weight_amt",
                Text,
                NutritionWeightAmt,
                "About how much weight have you lost, and over how long?",
            )
            .when(|a| a.mentions(NutritionWeight, "lost")),
            Step::ask(
                "nutrition_nausea",
                Choice(&["Yes, often", "Occasionally", "No"]),
                NutritionNausea,
                "Have you experienced any **nausea or vomiting**?",
            ),
            Step::ask(
                "nutrition_supplements",
                Choice(&["Yes", "No", "Sometimes"]),
                NutritionSupplements,
                "Are you using any **nutritional supplements** (like Ensure, Boost, or shakes)?",
            ),
            // Breathing
            Step::ask(
                "breathing_q1",
                Choice(PRESENCE),
                BreathingPresent,
                "**Breathing** 🫁\n\nHave you had any shortness of breath or difficulty \
                 breathing?",
            ),
            Step::ask(
                "breathing_detail",
                Text,
                BreathingDetail,
                "Can you describe when it happens? For example, at rest, when walking, or at \
                 night?",
            )
            .when(|a| a.is_affirmative(BreathingPresent)),
            // Fatigue
            Step::ask(
                "fatigue_q1",
                Scale,
                FatigueLevel,
                "**Energy & Fatigue** 😴\n\nOn a scale of 0-10, how would you rate your \
                 **fatigue** or tiredness? (0 = not tired at all, 10 = completely exhausted)",
            ),
            Step::ask(
                "fatigue_impact",
                Text,
                FatigueImpact,
                "How is the fatigue affecting your daily activities, like taking care of \
                 yourself, household tasks, or going out?",
            )
            .when(|a| a.score(FatigueLevel) >= 4),
            // Emotional wellbeing
            Step::ask(
                "mood_q1",
                Choice(&[
                    "Good / Positive",
                    "A bit down",
                    "Anxious or worried",
                    "Quite sad",
                    "Very distressed",
                ]),
                MoodGeneral,
                "**Emotional Wellbeing** 💙\n\nTreatment can be really tough, and it's \
                 completely normal to have a range of feelings. How would you describe your \
                 **mood** lately?",
            ),
            Step::ask(
                "mood_anxiety",
                Choice(&["Yes, a lot", "Sometimes", "Not really"]),
                MoodAnxiety,
                "Have you been feeling **worried or anxious** about your treatment or health?",
            ),
            Step::ask(
                "mood_sleep",
                Choice(&[
                    "Sleeping well",
                    "Some trouble sleeping",
                    "Difficulty most nights",
                    "Can't sleep at all",
                ]),
                MoodSleep,
                "How has your **sleep** been?",
            ),
            Step::ask(
                "mood_support",
                Choice(&["Yes, I feel supported", "Somewhat", "No, I need more support"]),
                MoodSupport,
                "Do you feel you have enough **support** from family, friends, or your care team?",
            ),
            // Other symptoms
            Step::ask(
                "other_q1",
                Choice(PRESENCE),
                OtherCough,
                "**Other Symptoms** 🩺\n\nHave you had any **cough** that's been bothersome?",
            ),
            Step::ask(
                "other_skin",
                Choice(PRESENCE),
                OtherSkin,
                "Have you noticed any **skin changes** in the area being treated, like redness, \
                 peeling, or soreness?",
            ),
            Step::ask(
                "other_concentration",
                Choice(&["Yes, noticeably", "A little", "No"]),
                OtherConcentration,
                "Have you had **difficulty concentrating** or remembering things?",
            ),
            // Closing
            Step::ask(
                "closing_q1",
                Text,
                AdditionalNotes,
                "We're almost done! 🎉\n\nIs there anything else you'd like your care team to \
                 know before your appointment? Anything we haven't covered, or anything you want \
                 to make sure they see?",
            ),
            Step::info(
                "done",
                "Thank you so much, **{name}**! 🙏 You've done a wonderful job sharing how \
                 you've been feeling.\n\nYour responses have been recorded and a summary report \
                 will be sent to your care team before your appointment. They'll review it and \
                 be ready to discuss your concerns with you.\n\nIf you have any urgent concerns \
                 before your appointment, please contact your care team directly. Take care of \
                 yourself! 💙",
            ),
        ])
    }
}
