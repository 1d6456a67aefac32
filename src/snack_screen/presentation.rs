use crate::error::ClassifyError;
use crate::image_classifier::interface::Classification;
use std::fmt;

pub const HINT: &str = "choose or take a photo";

/// What the result panel says.
#[derive(Debug, Clone, PartialEq)]
pub enum Presentation {
    Hint,
    NothingFound,
    NotSure,
    Labeled { label: String, confidence: f32 },
    Error(String),
    Unknown,
}

impl Presentation {
    pub fn from_classifications(classifications: &[Classification], min_confidence: f32) -> Self {
        match classifications.first() {
            None => Presentation::NothingFound,
            Some(top) if !top.confidence.is_finite() => Presentation::Unknown,
            Some(top) if top.confidence < min_confidence => Presentation::NotSure,
            Some(top) => Presentation::Labeled {
                label: top.label.clone(),
                confidence: top.confidence,
            },
        }
    }

    pub fn from_result(
        result: &Result<Vec<Classification>, ClassifyError>,
        min_confidence: f32,
    ) -> Self {
        match result {
            Ok(classifications) => Self::from_classifications(classifications, min_confidence),
            Err(error) => Presentation::Error(error.to_string()),
        }
    }
}

impl fmt::Display for Presentation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Presentation::Hint => write!(f, "{}", HINT),
            Presentation::NothingFound => write!(f, "nothing found"),
            Presentation::NotSure => write!(f, "Not Sure..."),
            Presentation::Labeled { label, confidence } => {
                write!(f, "{} {:.1}%", label, confidence * 100.0)
            }
            Presentation::Error(message) => write!(f, "error: {}", message),
            Presentation::Unknown => write!(f, "???"),
        }
    }
}
