use chrono::{DateTime, Local};
use tracing::debug;

use super::questionnaire::{
    AnswerError, AnswerKey, Answers, Questionnaire, Step, SymptomArea,
};
use super::report::symptom_report::SymptomReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    Bot,
    Patient,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub speaker: Speaker,
    pub text: String,
    pub sent_at: DateTime<Local>,
}

impl ChatMessage {
    fn new(speaker: Speaker, text: String) -> Self {
        Self {
            speaker,
            text,
            sent_at: Local::now(),
        }
    }

    /// Clock time shown under the chat bubble, e.g. `09:41 AM`.
    pub fn timestamp(&self) -> String {
        self.sent_at.format("%I:%M %p").to_string()
    }
}

/// One patient's walk through a [`Questionnaire`].
///
/// Questions are asked strictly one at a time; the next one is only pushed after the current
/// one has been answered.
#[derive(Debug, Clone)]
pub struct Conversation<'q> {
    questionnaire: &'q Questionnaire,
    answers: Answers,
    messages: Vec<ChatMessage>,
    current: Option<usize>,
}

impl<'q> Conversation<'q> {
    pub fn start(questionnaire: &'q Questionnaire) -> Self {
        let mut conversation = Self {
            questionnaire,
            answers: Answers::new(),
            messages: Vec::new(),
            current: None,
        };

        if let Some(first) = questionnaire.step_at(0) {
            conversation.push_bot(first);
            conversation.current = Some(0);
            if !first.expects_answer() {
                conversation.advance_from(0);
            }
        }

        conversation
    }

    /// Rebuilds a conversation by replaying `answers` in flow order.
    ///
    /// Replay stops at the first step without a stored answer; answers to steps that never
    /// became visible are dropped.
    pub fn resume(
        questionnaire: &'q Questionnaire,
        answers: &Answers,
    ) -> Result<Self, AnswerError> {
        let mut conversation = Self::start(questionnaire);

        while let Some(step) = conversation.current_step() {
            let Some(stored) = step.answer_key.and_then(|key| answers.get(key)) else {
                break;
            };
            conversation.answer(stored)?;
        }

        Ok(conversation)
    }

    pub fn answer(&mut self, raw: &str) -> Result<(), AnswerError> {
        let index = self.current.ok_or(AnswerError::Finished)?;
        let Some(step) = self.questionnaire.step_at(index) else {
            self.current = None;
            return Err(AnswerError::Finished);
        };

        let value = step.normalize_answer(raw)?;
        if let Some(key) = step.answer_key {
            debug!(step = step.id, %key, "answer stored");
            self.answers.set(key, value.clone());
            self.messages.push(ChatMessage::new(Speaker::Patient, value));
        }

        self.advance_from(index);
        Ok(())
    }

    /// Pushes the next visible step and keeps going while steps are informational.
    fn advance_from(&mut self, mut index: usize) {
        loop {
            let Some(next) = self.questionnaire.next_visible(index, &self.answers) else {
                self.current = None;
                return;
            };

            self.current = Some(next);
            let Some(step) = self.questionnaire.step_at(next) else {
                self.current = None;
                return;
            };
            self.push_bot(step);

            if step.expects_answer() {
                return;
            }
            index = next;
        }
    }

    fn push_bot(&mut self, step: &Step) {
        let text = step.personalized_message(&self.answers);
        self.messages.push(ChatMessage::new(Speaker::Bot, text));
    }

    pub fn questionnaire(&self) -> &'q Questionnaire {
        self.questionnaire
    }

    /// Step awaiting an answer, `None` once finished.
    pub fn current_step(&self) -> Option<&'q Step> {
        self.current
            .and_then(|index| self.questionnaire.step_at(index))
            .filter(|step| step.expects_answer())
    }

    pub fn is_finished(&self) -> bool {
        self.current_step().is_none()
    }

    pub fn answers(&self) -> &Answers {
        &self.answers
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn patient_name(&self) -> &str {
        self.answers.get_or(AnswerKey::PatientName, "")
    }

    pub fn progress_percent(&self) -> u8 {
        let total = self.questionnaire.answer_step_count().max(1);
        let percent = self.answers.answered_count() * 100 / total;
        percent.min(100) as u8
    }

    pub fn area_progress(&self) -> Vec<(SymptomArea, bool)> {
        SymptomArea::progress(&self.answers)
    }

    /// Clinical summary, available once every visible question has been answered.
    pub fn report(&self, generated_at: DateTime<Local>) -> Option<SymptomReport<'_>> {
        self.is_finished()
            .then(|| SymptomReport::new(&self.answers, generated_at))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::questionnaire::CHATREPORT;
    use crate::domain::test_support::QUIET_PATH;

    fn bot_texts(conversation: &Conversation) -> Vec<String> {
        conversation
            .messages()
            .iter()
            .filter(|m| m.speaker == Speaker::Bot)
            .map(|m| m.text.clone())
            .collect()
    }

    #[test]
    fn test_start_asks_for_name_after_welcome() {
        let conversation = Conversation::start(&CHATREPORT);
        assert_eq!(conversation.messages().len(), 2);
        assert!(conversation.messages()[0].text.contains("ChatReport"));
        assert_eq!(conversation.current_step().unwrap().id, "name");
        assert_eq!(conversation.progress_percent(), 0);
        assert!(!conversation.is_finished());
    }

    #[test]
    fn test_name_is_personalised_in_following_info_step() {
        let mut conversation = Conversation::start(&CHATREPORT);
        conversation.answer("Alice").unwrap();

        let texts = bot_texts(&conversation);
        assert!(texts.iter().any(|t| t.starts_with("Nice to meet you, Alice!")));
        assert_eq!(conversation.current_step().unwrap().id, "pain_q1");
        assert_eq!(conversation.patient_name(), "Alice");
    }

    #[test]
    fn test_invalid_answer_keeps_current_step() {
        let mut conversation = Conversation::start(&CHATREPORT);
        conversation.answer("Alice").unwrap();
        let before = conversation.messages().len();

        let err = conversation.answer("Sometimes").unwrap_err();
        assert_eq!(err, AnswerError::UnknownChoice("Sometimes".into()));
        assert_eq!(conversation.messages().len(), before);
        assert_eq!(conversation.current_step().unwrap().id, "pain_q1");
    }

    #[test]
    fn test_quiet_path_finishes() {
        let mut conversation = Conversation::start(&CHATREPORT);
        for answer in QUIET_PATH {
            conversation.answer(answer).unwrap();
        }

        assert!(conversation.is_finished());
        assert_eq!(conversation.answer("more"), Err(AnswerError::Finished));
        assert!(bot_texts(&conversation)
            .last()
            .unwrap()
            .starts_with("Thank you so much, **Alice**!"));
        assert_eq!(conversation.answers().answered_count(), QUIET_PATH.len());
        assert_eq!(
            conversation.progress_percent() as usize,
            QUIET_PATH.len() * 100 / 33
        );
        assert!(conversation.report(Local::now()).is_some());
    }

    #[test]
    fn test_report_unavailable_until_finished() {
        let conversation = Conversation::start(&CHATREPORT);
        assert!(conversation.report(Local::now()).is_none());
    }

    #[test]
    fn test_pain_branch_collects_follow_ups() {
        let mut conversation = Conversation::start(&CHATREPORT);
        for answer in ["Alice", "Yes", "Throat, Jaw", "8", "Only when swallowing"] {
            conversation.answer(answer).unwrap();
        }
        assert_eq!(conversation.current_step().unwrap().id, "pain_management");
        assert_eq!(
            conversation.answers().get(AnswerKey::PainLocation),
            Some("Throat, Jaw")
        );
        assert_eq!(conversation.answers().get(AnswerKey::PainSeverity), Some("8"));
    }

    #[test]
    fn test_resume_replays_to_same_step() {
        let mut original = Conversation::start(&CHATREPORT);
        for answer in ["Bob", "Yes", "neck", "5"] {
            original.answer(answer).unwrap();
        }

        let resumed = Conversation::resume(&CHATREPORT, original.answers()).unwrap();
        assert_eq!(resumed.current_step().unwrap().id, "pain_frequency");
        assert_eq!(resumed.answers(), original.answers());
        assert_eq!(resumed.messages().len(), original.messages().len());
    }

    #[test]
    fn test_resume_drops_answers_of_hidden_steps() {
        let mut answers = Answers::new();
        answers.set(AnswerKey::PatientName, "Carol");
        answers.set(AnswerKey::PainPresent, "No");
        answers.set(AnswerKey::PainSeverity, "9");

        let resumed = Conversation::resume(&CHATREPORT, &answers).unwrap();
        assert_eq!(resumed.answers().get(AnswerKey::PainSeverity), None);
        assert_eq!(resumed.current_step().unwrap().id, "mouth_q1");
    }

    #[test]
    fn test_resume_rejects_tampered_answers() {
        let mut answers = Answers::new();
        answers.set(AnswerKey::PatientName, "Dan");
        answers.set(AnswerKey::PainPresent, "Perhaps");

        assert_eq!(
            Conversation::resume(&CHATREPORT, &answers).unwrap_err(),
            AnswerError::UnknownChoice("Perhaps".into())
        );
    }

    #[test]
    fn test_empty_questionnaire_is_finished_immediately() {
        let empty = Questionnaire::new(Vec::new());
        let conversation = Conversation::start(&empty);
        assert!(conversation.is_finished());
        assert!(conversation.messages().is_empty());
        assert_eq!(conversation.progress_percent(), 0);
    }
}
