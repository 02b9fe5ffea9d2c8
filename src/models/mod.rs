pub mod session;
pub mod stats;

pub use session::{ActivityKind, Sport, SubKind, TrainingSession};
pub use stats::{Badge, PersonalRecord, UserStats};
