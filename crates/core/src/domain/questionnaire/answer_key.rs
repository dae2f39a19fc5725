use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Slot under which a check-in answer is stored.
///
/// Declaration order is also the column order of a check-in row, so new variants
/// must be appended at the end to keep existing sheets aligned.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AnswerKey {
    PatientName,
    PainPresent,
    PainLocation,
    PainSeverity,
    PainFrequency,
    PainManagement,
    PainImpact,
    MouthPresent,
    MouthDry,
    MouthSores,
    MouthTaste,
    MouthImpact,
    SwallowPresent,
    SwallowPain,
    SwallowDiet,
    SwallowChoking,
    NutritionAppetite,
    NutritionWeight,
    NutritionWeightAmt,
    NutritionNausea,
    NutritionSupplements,
    BreathingPresent,
    BreathingDetail,
    FatigueLevel,
    FatigueImpact,
    MoodGeneral,
    MoodAnxiety,
    MoodSleep,
    MoodSupport,
    OtherCough,
    OtherSkin,
    OtherConcentration,
    AdditionalNotes,
}
