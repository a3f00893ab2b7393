//! Recording stand-ins for the capability traits.

use crate::capabilities::{ConversationalSupport, EmergencyEscalation, TherapistDirectory};
use crate::config::RouterConfig;
use crate::triage::MessageRouter;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Every capability invocation, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Support(String),
    Lookup(String),
    Escalate,
}

pub type CallLog = Arc<Mutex<Vec<Call>>>;

pub struct RecordingSupport(pub CallLog);

#[async_trait]
impl ConversationalSupport for RecordingSupport {
    async fn respond(&self, text: &str) -> String {
        self.0.lock().unwrap().push(Call::Support(text.to_string()));
        format!("support:{}", text)
    }
}

pub struct RecordingDirectory(pub CallLog);

#[async_trait]
impl TherapistDirectory for RecordingDirectory {
    async fn lookup(&self, location: &str) -> String {
        self.0.lock().unwrap().push(Call::Lookup(location.to_string()));
        format!("directory:{}", location)
    }
}

pub struct RecordingEscalation(pub CallLog);

#[async_trait]
impl EmergencyEscalation for RecordingEscalation {
    async fn trigger(&self) -> String {
        self.0.lock().unwrap().push(Call::Escalate);
        "escalated".to_string()
    }
}

pub struct PanickingSupport;

#[async_trait]
impl ConversationalSupport for PanickingSupport {
    async fn respond(&self, _text: &str) -> String {
        panic!("support backend blew up");
    }
}

/// Router wired to recording capabilities, plus the shared call log.
pub fn recording_router(demo_mode: bool) -> (MessageRouter, CallLog) {
    let log: CallLog = Arc::new(Mutex::new(Vec::new()));
    let router = MessageRouter::new(
        RouterConfig { demo_mode },
        Box::new(RecordingSupport(log.clone())),
        Box::new(RecordingDirectory(log.clone())),
        Box::new(RecordingEscalation(log.clone())),
    );
    (router, log)
}
