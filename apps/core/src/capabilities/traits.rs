use async_trait::async_trait;

/// Produces a supportive conversational reply.
///
/// Implementations may call a local or hosted language model, but must never
/// fail: any internal error is turned into a safe fallback reply.
#[async_trait]
pub trait ConversationalSupport: Send + Sync + 'static {
    async fn respond(&self, text: &str) -> String;
}

/// Lists therapists for a location, one entry per line.
#[async_trait]
pub trait TherapistDirectory: Send + Sync + 'static {
    async fn lookup(&self, location: &str) -> String;
}

/// Escalates a crisis to an emergency contact.
///
/// Configuration gaps and provider failures are reported in the returned
/// text, never as a panic or error.
#[async_trait]
pub trait EmergencyEscalation: Send + Sync + 'static {
    async fn trigger(&self) -> String;
}
