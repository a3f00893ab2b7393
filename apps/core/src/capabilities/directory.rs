use crate::capabilities::traits::TherapistDirectory;
use async_trait::async_trait;

/// Fixed listing used until a real directory is wired in.
const DEMO_THERAPISTS: &[(&str, &str)] = &[
    ("MindCare Counseling Center", "+1 (555) 222-3333"),
    ("Dr. Ayesha Kapoor", "+1 (555) 123-4567"),
    ("Dr. James Patel", "+1 (555) 987-6543"),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct DemoTherapistDirectory;

#[async_trait]
impl TherapistDirectory for DemoTherapistDirectory {
    async fn lookup(&self, location: &str) -> String {
        let mut listing = format!("Here are some therapists near {}:", location);
        for (name, contact) in DEMO_THERAPISTS {
            listing.push_str(&format!("\n- {} - {}", name, contact));
        }
        listing
    }
}
