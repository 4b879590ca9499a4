use serde::Serialize;

/// Static About screen content.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AboutScreen {
    pub title: &'static str,
    pub welcome: &'static str,
    pub mission: &'static str,
    pub goals: &'static [&'static str],
    pub closing: &'static str,
}

pub const ABOUT: AboutScreen = AboutScreen {
    title: "About Our App",
    welcome: "Welcome to CARENEST! Our app helps orphanage communities manage daily operations, \
from keeping track of children's records to managing staff and resources.",
    mission: "Every child deserves love, care, and a well-organized environment to grow. CareNest helps orphanages:",
    goals: &[
        "Maintain children's profiles (age, health, education, and more).",
        "Track attendance and activities.",
        "Manage staff and volunteers.",
        "Keep records of donations and resources.",
    ],
    closing: "Together, we can create a better future for orphaned children by ensuring smooth operations in orphanages.",
};
