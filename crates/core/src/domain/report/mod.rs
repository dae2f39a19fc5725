pub mod alerts;
pub mod symptom_report;

pub use alerts::{clinical_alerts, AlertPriority, ClinicalAlert};
pub use symptom_report::SymptomReport;
