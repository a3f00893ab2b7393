//! Intent classification using regex patterns.
//!
//! Deterministic keyword routing for incoming chat messages. There is no
//! model involved: a message is checked against crisis phrases first, then
//! against therapist/location references, and anything else is treated as a
//! request for general support.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Location substituted when a therapist lookup names no place.
pub const DEFAULT_LOCATION: &str = "your area";

/// Detected intent type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Self-harm or suicidal ideation. Always wins.
    Emergency,
    /// Request for nearby therapists or counselors.
    TherapistLookup,
    /// Everything else.
    GeneralSupport,
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Intent {
    /// Returns a human-readable label for the intent
    pub fn label(&self) -> &'static str {
        match self {
            Intent::Emergency => "emergency",
            Intent::TherapistLookup => "therapist_lookup",
            Intent::GeneralSupport => "general_support",
        }
    }

    /// Identifier of the capability invoked for this intent, as reported to clients.
    pub fn tool_name(&self) -> &'static str {
        match self {
            Intent::Emergency => "emergency_call_tool",
            Intent::TherapistLookup => "find_nearby_therapists_by_location",
            Intent::GeneralSupport => "ask_mental_health_specialist",
        }
    }
}

/// Result of routing one message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub intent: Intent,
    /// Only set for `TherapistLookup` when a place was found in the text.
    pub extracted_location: Option<String>,
    pub tool_name: String,
}

impl ClassificationResult {
    fn new(intent: Intent, extracted_location: Option<String>) -> Self {
        Self {
            intent,
            extracted_location,
            tool_name: intent.tool_name().to_string(),
        }
    }

    /// Location handed to the therapist directory.
    pub fn lookup_location(&self) -> &str {
        self.extracted_location.as_deref().unwrap_or(DEFAULT_LOCATION)
    }
}

// Patterns are matched against lower-cased input.
static SELF_HARM_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"\bkill myself\b").expect("Invalid regex: kill myself"),
        Regex::new(r"\bsuicide\b").expect("Invalid regex: suicide"),
        Regex::new(r"\bend my life\b").expect("Invalid regex: end my life"),
        Regex::new(r"\bwant to die\b").expect("Invalid regex: want to die"),
        Regex::new(r"\bself harm\b").expect("Invalid regex: self harm"),
        Regex::new(r"\bhurt myself\b").expect("Invalid regex: hurt myself"),
        Regex::new(r"\bcut myself\b").expect("Invalid regex: cut myself"),
    ]
});

static THERAPIST_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"\btherapist\b").expect("Invalid regex: therapist"),
        Regex::new(r"\bcounsel(or|ing)\b").expect("Invalid regex: counselor"),
        Regex::new(r"\bpsychologist\b").expect("Invalid regex: psychologist"),
        Regex::new(r"\bpsychiatrist\b").expect("Invalid regex: psychiatrist"),
        Regex::new(r"\bnear me\b").expect("Invalid regex: near me"),
        Regex::new(r"\bnear\b").expect("Invalid regex: near"),
        Regex::new(r"\bin\s+[A-Za-z ]{2,}\b").expect("Invalid regex: in <place>"),
    ]
});

/// Literal guards that must also appear for a therapist lookup.
const THERAPIST_KEYWORDS: &[&str] = &["therap", "counsel", "psycholog", "psychiat", "near"];

static LOCATION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:near|in)\s+([A-Za-z ]{2,})").expect("Invalid regex: location phrase")
});

/// Intent classifier using regex patterns
#[derive(Debug, Clone, Copy, Default)]
pub struct IntentClassifier;

impl IntentClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify a message. Total over all inputs, including the empty string.
    pub fn classify(&self, text: &str) -> ClassificationResult {
        if looks_like_self_harm(text) {
            return ClassificationResult::new(Intent::Emergency, None);
        }

        if looks_like_therapist_request(text) {
            return ClassificationResult::new(Intent::TherapistLookup, extract_location(text));
        }

        ClassificationResult::new(Intent::GeneralSupport, None)
    }
}

fn looks_like_self_harm(text: &str) -> bool {
    let lowered = text.to_lowercase();
    SELF_HARM_PATTERNS.iter().any(|p| p.is_match(&lowered))
}

fn looks_like_therapist_request(text: &str) -> bool {
    let lowered = text.to_lowercase();
    // Both checks are required: a bare "in Texas" matches a pattern but no keyword.
    THERAPIST_PATTERNS.iter().any(|p| p.is_match(&lowered))
        && THERAPIST_KEYWORDS.iter().any(|k| lowered.contains(k))
}

/// Pulls the place out of phrases like "near Bangalore" or "in Hyderabad".
///
/// Searches the original text, so the returned location keeps its casing.
pub fn extract_location(text: &str) -> Option<String> {
    LOCATION_PATTERN
        .captures(text.trim())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().trim_matches('.').to_string())
        .filter(|loc| !loc.is_empty())
}
