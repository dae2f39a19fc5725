use strum::{EnumIter, IntoEnumIterator};

use super::step::AnswerError;

/// Stored when the patient confirms the body map without picking a region.
pub const NO_REGION_SELECTED: &str = "Not specified";

/// Selectable area of the pain location diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum BodyRegion {
    Head,
    Neck,
    Jaw,
    Throat,
    ShoulderLeft,
    ShoulderRight,
    Chest,
    ArmLeft,
    ArmRight,
    Abdomen,
    Pelvis,
    LegLeft,
    LegRight,
    EarLeft,
    EarRight,
}

impl BodyRegion {
    pub fn key(&self) -> &'static str {
        match self {
            BodyRegion::Head => "head",
            BodyRegion::Neck => "neck",
            BodyRegion::Jaw => "jaw",
            BodyRegion::Throat => "throat",
            BodyRegion::ShoulderLeft => "shoulder_left",
            BodyRegion::ShoulderRight => "shoulder_right",
            BodyRegion::Chest => "chest",
            BodyRegion::ArmLeft => "arm_left",
            BodyRegion::ArmRight => "arm_right",
            BodyRegion::Abdomen => "abdomen",
            BodyRegion::Pelvis => "pelvis",
            BodyRegion::LegLeft => "leg_left",
            BodyRegion::LegRight => "leg_right",
            BodyRegion::EarLeft => "ear_left",
            BodyRegion::EarRight => "ear_right",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BodyRegion::Head => "Head",
            BodyRegion::Neck => "Neck",
            BodyRegion::Jaw => "Jaw",
            BodyRegion::Throat => "Throat",
            BodyRegion::ShoulderLeft => "Left Shoulder",
            BodyRegion::ShoulderRight => "Right Shoulder",
            BodyRegion::Chest => "Chest",
            BodyRegion::ArmLeft => "Left Arm",
            BodyRegion::ArmRight => "Right Arm",
            BodyRegion::Abdomen => "Abdomen",
            BodyRegion::Pelvis => "Pelvis",
            BodyRegion::LegLeft => "Left Leg",
            BodyRegion::LegRight => "Right Leg",
            BodyRegion::EarLeft => "Left Ear",
            BodyRegion::EarRight => "Right Ear",
        }
    }

    /// Accepts either the label ("Left Shoulder") or the key ("shoulder_left"), ignoring case.
    pub fn parse(token: &str) -> Option<Self> {
        let token = token.trim();
        BodyRegion::iter().find(|region| {
            region.label().eq_ignore_ascii_case(token) || region.key().eq_ignore_ascii_case(token)
        })
    }

    /// Parses a comma-separated selection, dropping duplicates but keeping the patient's order.
    pub fn parse_selection(selection: &str) -> Result<Vec<Self>, AnswerError> {
        let mut regions = Vec::new();
        for token in selection.split(',').map(str::trim) {
            if token.is_empty() || token.eq_ignore_ascii_case(NO_REGION_SELECTED) {
                continue;
            }
            let region =
                BodyRegion::parse(token).ok_or_else(|| AnswerError::UnknownRegion(token.into()))?;
            if !regions.contains(&region) {
                regions.push(region);
            }
        }
        Ok(regions)
    }

    /// Canonical stored form of a selection.
    pub fn describe(regions: &[Self]) -> String {
        if regions.is_empty() {
            return NO_REGION_SELECTED.to_string();
        }
        regions
            .iter()
            .map(BodyRegion::label)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_label_and_key() {
        assert_eq!(BodyRegion::parse("Left Shoulder"), Some(BodyRegion::ShoulderLeft));
        assert_eq!(BodyRegion::parse("ear_right"), Some(BodyRegion::EarRight));
        assert_eq!(BodyRegion::parse(" JAW "), Some(BodyRegion::Jaw));
        assert_eq!(BodyRegion::parse("elbow"), None);
    }

    #[test]
    fn test_parse_selection_dedups_in_order() {
        let regions = BodyRegion::parse_selection("Throat, neck, throat").unwrap();
        assert_eq!(regions, vec![BodyRegion::Throat, BodyRegion::Neck]);
        assert_eq!(BodyRegion::describe(&regions), "Throat, Neck");
    }

    #[test]
    fn test_empty_selection_is_not_specified() {
        let regions = BodyRegion::parse_selection("").unwrap();
        assert!(regions.is_empty());
        assert_eq!(BodyRegion::describe(&regions), NO_REGION_SELECTED);

        let replayed = BodyRegion::parse_selection(NO_REGION_SELECTED).unwrap();
        assert!(replayed.is_empty());
    }

    #[test]
    fn test_unknown_region_is_an_error() {
        let err = BodyRegion::parse_selection("Head, Tail").unwrap_err();
        assert_eq!(err, AnswerError::UnknownRegion("Tail".into()));
    }

    #[test]
    fn test_fifteen_regions() {
        assert_eq!(BodyRegion::iter().count(), 15);
    }
}
