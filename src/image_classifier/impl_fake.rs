use crate::error::ClassifyError;
use crate::image_classifier::interface::{Classification, ImageClassifier};
use crate::library::logger::interface::Logger;
use crate::snack_image::SnackImage;
use rand::distr::{Distribution, Uniform};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

const SNACKS: [&str; 20] = [
    "apple",
    "banana",
    "cake",
    "candy",
    "carrot",
    "cookie",
    "doughnut",
    "grape",
    "hot dog",
    "ice cream",
    "juice",
    "muffin",
    "orange",
    "pineapple",
    "popcorn",
    "pretzel",
    "salad",
    "strawberry",
    "waffle",
    "watermelon",
];

/// Replays scripted outcomes in order; once the script runs dry it makes up
/// a random ranking over a fixed list of snacks.
pub struct ImageClassifierFake {
    logger: Arc<dyn Logger + Send + Sync>,
    script: Mutex<VecDeque<Result<Vec<Classification>, ClassifyError>>>,
    latency: Duration,
}

impl ImageClassifierFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("image_classifier").with_namespace("fake"),
            script: Mutex::new(VecDeque::new()),
            latency: Duration::ZERO,
        }
    }

    #[allow(dead_code)]
    pub fn with_script(
        self,
        script: Vec<Result<Vec<Classification>, ClassifyError>>,
    ) -> Self {
        Self {
            script: Mutex::new(script.into()),
            ..self
        }
    }

    #[allow(dead_code)]
    pub fn with_latency(self, latency: Duration) -> Self {
        Self { latency, ..self }
    }

    fn random_classifications(&self) -> Result<Vec<Classification>, ClassifyError> {
        let mut rng = rand::rng();

        let index_dist = Uniform::new(0, SNACKS.len())
            .map_err(|e| ClassifyError::Inference(e.to_string()))?;
        let confidence_dist =
            Uniform::new(0.0f32, 1.0).map_err(|e| ClassifyError::Inference(e.to_string()))?;

        let top = Classification::new(
            SNACKS[index_dist.sample(&mut rng)],
            confidence_dist.sample(&mut rng),
        );
        let runner_up = Classification::new(
            SNACKS[index_dist.sample(&mut rng)],
            top.confidence * confidence_dist.sample(&mut rng) * 0.5,
        );

        Ok(vec![top, runner_up])
    }
}

impl ImageClassifier for ImageClassifierFake {
    fn classify(&self, image: &SnackImage) -> Result<Vec<Classification>, ClassifyError> {
        let _ = self.logger.info(&format!(
            "Classifying {}x{} image",
            image.pixels().width(),
            image.pixels().height()
        ));

        if !self.latency.is_zero() {
            std::thread::sleep(self.latency);
        }

        let scripted = self
            .script
            .lock()
            .map_err(|e| ClassifyError::Inference(e.to_string()))?
            .pop_front();

        match scripted {
            Some(outcome) => outcome,
            None => self.random_classifications(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::logger::impl_fake::LoggerFake;
    use crate::snack_image::Orientation;
    use image::DynamicImage;

    fn image() -> SnackImage {
        SnackImage::new(DynamicImage::new_rgb8(4, 4), Orientation::Up)
    }

    #[test]
    fn test_script_is_replayed_in_order() {
        let classifier = ImageClassifierFake::new(Arc::new(LoggerFake::new())).with_script(vec![
            Ok(vec![Classification::new("pretzel", 0.93)]),
            Err(ClassifyError::Inference("bad tensor".to_string())),
        ]);

        assert_eq!(
            classifier.classify(&image()),
            Ok(vec![Classification::new("pretzel", 0.93)])
        );
        assert_eq!(
            classifier.classify(&image()),
            Err(ClassifyError::Inference("bad tensor".to_string()))
        );
    }

    #[test]
    fn test_random_results_are_ranked_and_bounded() {
        let classifier = ImageClassifierFake::new(Arc::new(LoggerFake::new()));

        for _ in 0..20 {
            let result = classifier.classify(&image()).unwrap();
            assert_eq!(result.len(), 2);
            assert!((0.0..1.0).contains(&result[0].confidence));
            assert!(result[0].confidence >= result[1].confidence);
        }
    }
}
