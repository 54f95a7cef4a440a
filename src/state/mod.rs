//! Application state management modules.

mod session;

pub use session::{LabelingSession, Navigation, RemoveOutcome, SaveOutcome};
