use crate::error::ClassifyError;
use crate::image_classifier::interface::{Classification, ImageClassifier};
use crate::snack_image::SnackImage;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;

pub type ClassifyResult = Result<Vec<Classification>, ClassifyError>;

/// Handle to one background classification. Resolves exactly once.
pub struct ClassifyTask {
    receiver: Receiver<ClassifyResult>,
}

impl ClassifyTask {
    /// Non-blocking. `None` while the worker is still running.
    pub fn try_result(&self) -> Option<ClassifyResult> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(ClassifyError::WorkerLost)),
        }
    }

    #[allow(dead_code)]
    pub fn wait(self) -> ClassifyResult {
        self.receiver
            .recv()
            .unwrap_or(Err(ClassifyError::WorkerLost))
    }
}

/// Runs `classifier` on its own worker thread so the caller never blocks.
pub fn dispatch(
    classifier: Arc<dyn ImageClassifier + Send + Sync>,
    image: SnackImage,
) -> ClassifyTask {
    let (sender, receiver) = mpsc::sync_channel(1);

    std::thread::spawn(move || {
        let result = classifier.classify(&image);
        let _ = sender.send(result);
    });

    ClassifyTask { receiver }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_classifier::impl_fake::ImageClassifierFake;
    use crate::library::logger::impl_fake::LoggerFake;
    use crate::snack_image::Orientation;
    use image::DynamicImage;
    use std::time::{Duration, Instant};

    struct PanickingClassifier;

    impl ImageClassifier for PanickingClassifier {
        fn classify(&self, _image: &SnackImage) -> ClassifyResult {
            panic!("model blew up");
        }
    }

    fn image() -> SnackImage {
        SnackImage::new(DynamicImage::new_rgb8(2, 2), Orientation::Up)
    }

    #[test]
    fn test_wait_returns_classifier_result() {
        let classifier = Arc::new(
            ImageClassifierFake::new(Arc::new(LoggerFake::new()))
                .with_script(vec![Ok(vec![Classification::new("pretzel", 0.93)])]),
        );

        let task = dispatch(classifier, image());

        assert_eq!(task.wait(), Ok(vec![Classification::new("pretzel", 0.93)]));
    }

    #[test]
    fn test_try_result_does_not_block() {
        let classifier = Arc::new(
            ImageClassifierFake::new(Arc::new(LoggerFake::new()))
                .with_latency(Duration::from_millis(200))
                .with_script(vec![Ok(vec![])]),
        );

        let started = Instant::now();
        let task = dispatch(classifier, image());
        assert!(task.try_result().is_none());
        assert!(started.elapsed() < Duration::from_millis(200));

        let deadline = Instant::now() + Duration::from_secs(5);
        let result = loop {
            if let Some(result) = task.try_result() {
                break result;
            }
            assert!(Instant::now() < deadline, "classification never finished");
            std::thread::sleep(Duration::from_millis(5));
        };
        assert_eq!(result, Ok(vec![]));
    }

    #[test]
    fn test_worker_panic_resolves_as_lost() {
        let task = dispatch(Arc::new(PanickingClassifier), image());
        assert_eq!(task.wait(), Err(ClassifyError::WorkerLost));
    }

    #[test]
    fn test_shared_classifier_serves_concurrent_tasks() {
        let classifier: Arc<dyn ImageClassifier + Send + Sync> = Arc::new(
            ImageClassifierFake::new(Arc::new(LoggerFake::new())).with_script(vec![
                Ok(vec![Classification::new("apple", 0.9)]),
                Ok(vec![Classification::new("apple", 0.9)]),
                Ok(vec![Classification::new("apple", 0.9)]),
            ]),
        );

        let tasks: Vec<ClassifyTask> = (0..3)
            .map(|_| dispatch(classifier.clone(), image()))
            .collect();

        for task in tasks {
            assert_eq!(task.wait(), Ok(vec![Classification::new("apple", 0.9)]));
        }
    }
}
