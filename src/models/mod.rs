pub mod submission;

pub use submission::{FormKind, NewSubmission, Submission};
