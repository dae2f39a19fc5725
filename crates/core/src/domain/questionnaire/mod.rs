pub mod answer_key;
pub mod answers;
pub mod body_region;
pub mod flow;
pub mod response;
pub mod step;
pub mod symptom_area;

pub use answer_key::AnswerKey;
pub use answers::Answers;
pub use body_region::BodyRegion;
pub use flow::{Questionnaire, CHATREPORT};
pub use step::{AnswerError, Step, StepKind};
pub use symptom_area::SymptomArea;
