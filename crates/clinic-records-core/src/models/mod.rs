//! Domain models for clinic records.

mod patient;
mod specialty;

pub use patient::*;
pub use specialty::*;
