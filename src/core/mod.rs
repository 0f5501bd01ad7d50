pub mod form_controller;
pub mod relay;

pub use crate::domain::model::{Lead, LeadField, StepOutcome, SubmissionReport};
pub use crate::domain::ports::{EmailSender, FormsStore, RelayNotifier};
pub use crate::utils::error::Result;
