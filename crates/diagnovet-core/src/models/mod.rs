//! Domain models for DiagnovetAI.

mod animal;
mod appointment;
mod profile;
mod report;
mod session;

pub use animal::*;
pub use appointment::*;
pub use profile::*;
pub use report::*;
pub use session::*;
