//! Domain models for the encounter triage system.

mod acuity;
mod encounter;
mod lab;
mod patient;
mod stage;
mod symptoms;
mod vitals;

pub use acuity::*;
pub use encounter::*;
pub use lab::*;
pub use patient::*;
pub use stage::*;
pub use symptoms::*;
pub use vitals::*;
