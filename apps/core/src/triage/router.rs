use crate::capabilities::{ConversationalSupport, EmergencyEscalation, TherapistDirectory};
use crate::config::RouterConfig;
use crate::triage::intent::{ClassificationResult, Intent, IntentClassifier};
use tracing::{info, instrument, warn};

/// Outcome of one routed message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutedResponse {
    pub classification: ClassificationResult,
    pub response_text: String,
}

/// Routes a message to exactly one capability.
///
/// Holds no per-call state; a single instance can serve any number of
/// concurrent requests.
pub struct MessageRouter {
    classifier: IntentClassifier,
    config: RouterConfig,
    support: Box<dyn ConversationalSupport>,
    directory: Box<dyn TherapistDirectory>,
    escalation: Box<dyn EmergencyEscalation>,
}

impl MessageRouter {
    pub fn new(
        config: RouterConfig,
        support: Box<dyn ConversationalSupport>,
        directory: Box<dyn TherapistDirectory>,
        escalation: Box<dyn EmergencyEscalation>,
    ) -> Self {
        Self {
            classifier: IntentClassifier::new(),
            config,
            support,
            directory,
            escalation,
        }
    }

    pub fn config(&self) -> RouterConfig {
        self.config
    }

    /// Classifies `text` and invokes the matching capability once.
    #[instrument(skip(self, text), fields(message_len = text.len()))]
    pub async fn classify_and_respond(&self, text: &str) -> RoutedResponse {
        let classification = self.classifier.classify(text);

        let response_text = match classification.intent {
            Intent::Emergency => {
                warn!("Crisis language detected, escalating");
                self.escalation.trigger().await
            }
            Intent::TherapistLookup => {
                let location = classification.lookup_location();
                info!(location = %location, "Looking up therapists");
                self.directory.lookup(location).await
            }
            Intent::GeneralSupport => self.support.respond(text).await,
        };

        RoutedResponse {
            classification,
            response_text,
        }
    }
}
