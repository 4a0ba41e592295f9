//! Static table of supported transformations.
//!
//! Each entry carries the display fields returned by
//! `GET /image/transformations` plus the instruction text forwarded to the
//! image-edit provider. The table is a process-wide constant; unknown names
//! simply miss the lookup.
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Transformation {
    pub name: &'static str,
    pub effect: &'static str,
    pub description: &'static str,
    #[serde(skip)]
    pub prompt: &'static str,
}

pub const TRANSFORMATIONS: &[Transformation] = &[
    Transformation {
        name: "Younger",
        effect: "younger",
        description: "Make the person look younger, around 25 years old",
        prompt: "Make the person look younger, around 25 years old, professional look, smooth skin, no gray hair",
    },
    Transformation {
        name: "Older",
        effect: "older",
        description: "Make the person look older, around 60 years old",
        prompt: "Make the person look older, around 60 years old, with some wrinkles and gray hair",
    },
    Transformation {
        name: "Healthier",
        effect: "healthier",
        description: "Make the person look healthier with glowing skin",
        prompt: "Make the person look healthier, with glowing skin, bright eyes, and a healthy complexion",
    },
    Transformation {
        name: "Thinner",
        effect: "thinner",
        description: "Make the person look slightly thinner while maintaining a natural appearance",
        prompt: "Make the person look slightly thinner while maintaining a natural appearance",
    },
];

/// Look up the provider prompt for a transformation effect name.
pub fn prompt_for(effect: &str) -> Option<&'static str> {
    TRANSFORMATIONS
        .iter()
        .find(|t| t.effect == effect)
        .map(|t| t.prompt)
}
