//! # Triage Module
//!
//! Deterministic routing of a chat message to one of three responses:
//! emergency escalation, a therapist listing, or a supportive reply.
//!
//! ## Components
//! - `intent`: regex classification and location extraction
//! - `router`: invokes the capability for the classified intent

pub mod intent;
pub mod router;

// Classification types are consumed by the test suite and the router.
#[allow(unused_imports)]
pub use intent::{ClassificationResult, Intent, IntentClassifier, DEFAULT_LOCATION};
pub use router::MessageRouter;
#[allow(unused_imports)]
pub use router::RoutedResponse;
