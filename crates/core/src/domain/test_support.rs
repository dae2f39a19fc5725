use chrono::{Local, TimeZone};

use super::conversation::Conversation;
use super::questionnaire::{Answers, CHATREPORT};

/// Shortest path through the standard flow: every gate answered negatively.
pub const QUIET_PATH: [&str; 18] = [
    "Alice",
    "No",
    "No",
    "No",
    "Good",
    "No change",
    "No",
    "No",
    "No",
    "2",
    "Good / Positive",
    "Not really",
    "Sleeping well",
    "Yes, I feel supported",
    "No",
    "No",
    "No",
    "Nothing else, thanks",
];

/// Answers of a conversation driven with `replies`, in order.
pub fn answers_for(replies: &[&str]) -> Answers {
    let mut conversation = Conversation::start(&CHATREPORT);
    for reply in replies {
        conversation
            .answer(reply)
            .unwrap_or_else(|err| panic!("reply {reply:?} rejected: {err}"));
    }
    conversation.answers().clone()
}

pub fn fixed_time() -> chrono::DateTime<Local> {
    Local.with_ymd_and_hms(2024, 3, 5, 14, 7, 0).unwrap()
}
