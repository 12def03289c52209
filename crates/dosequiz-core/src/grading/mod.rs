pub mod dose;
pub mod outcome;
pub mod situation;

pub use dose::check_answer;
pub use outcome::{DoseOutcome, SituationOutcome};
pub use situation::check_situation_answer;
