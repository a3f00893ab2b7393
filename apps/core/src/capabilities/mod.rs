//! # Capabilities
//!
//! The three downstream actions a routed message can trigger. Each one is a
//! single-operation trait; which implementation backs it is decided once,
//! from configuration, when the application starts.

pub mod directory;
pub mod emergency;
pub mod support;
pub mod traits;

pub use directory::DemoTherapistDirectory;
pub use emergency::TwilioEscalation;
pub use traits::{ConversationalSupport, EmergencyEscalation, TherapistDirectory};
