use crate::error::ClassifyError;
use crate::snack_image::SnackImage;

#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub label: String,
    pub confidence: f32,
}

impl Classification {
    pub fn new(label: impl Into<String>, confidence: f32) -> Self {
        Self {
            label: label.into(),
            confidence,
        }
    }
}

/// Ranked classifications, highest confidence first.
pub trait ImageClassifier: Send + Sync {
    fn classify(&self, image: &SnackImage) -> Result<Vec<Classification>, ClassifyError>;
}
