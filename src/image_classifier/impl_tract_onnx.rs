use crate::error::{ClassifyError, SetupError};
use crate::image_classifier::interface::{Classification, ImageClassifier};
use crate::image_classifier::tract::image::resize_image_to_tensor;
use crate::image_classifier::tract::scores::{rank, softmax};
use crate::snack_image::SnackImage;
use std::path::Path;
use tract_onnx::prelude::*;

use super::models::model_config::ModelConfig;

pub struct ImageClassifierTractOnnx {
    model: SimplePlan<TypedFact, Box<dyn TypedOp>, TypedModel>,
    labels: Vec<String>,
    config: ModelConfig,
}

impl ImageClassifierTractOnnx {
    pub fn new(config: ModelConfig) -> Result<Self, SetupError> {
        let labels = load_labels(&config.labels_path)?;

        let (height, width) = config.input_shape;
        let model = tract_onnx::onnx()
            .model_for_path(&config.onnx_model_path)
            .and_then(|model| {
                model.with_input_fact(
                    0,
                    InferenceFact::dt_shape(
                        f32::datum_type(),
                        tvec!(1, 3, height as usize, width as usize),
                    ),
                )
            })
            .and_then(|model| model.into_optimized())
            .and_then(|model| model.into_runnable())
            .map_err(|e| SetupError::ModelLoad {
                path: config.onnx_model_path.clone(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            model,
            labels,
            config,
        })
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

impl ImageClassifier for ImageClassifierTractOnnx {
    fn classify(&self, image: &SnackImage) -> Result<Vec<Classification>, ClassifyError> {
        let (height, width) = self.config.input_shape;

        let input = resize_image_to_tensor(
            &image.upright(),
            width,
            height,
            &self.config.normalization,
        )
        .map_err(|e| ClassifyError::Preprocess(e.to_string()))?;

        let outputs = self
            .model
            .run(tvec!(input.into_tvalue()))
            .map_err(|e| ClassifyError::Inference(e.to_string()))?;

        let output = outputs
            .first()
            .ok_or_else(|| ClassifyError::Inference("model produced no outputs".to_string()))?;

        let scores: Vec<f32> = output
            .to_array_view::<f32>()
            .map_err(|e| ClassifyError::Inference(e.to_string()))?
            .iter()
            .copied()
            .collect();

        let scores = if self.config.apply_softmax {
            softmax(&scores)
        } else {
            scores
        };

        rank(&scores, &self.labels, self.config.top_k)
    }
}

/// One label per line; blank lines are skipped.
pub fn load_labels(path: &Path) -> Result<Vec<String>, SetupError> {
    let contents = std::fs::read_to_string(path).map_err(|source| SetupError::LabelsLoad {
        path: path.to_path_buf(),
        source,
    })?;

    let labels = parse_labels(&contents);

    if labels.is_empty() {
        return Err(SetupError::EmptyLabels(path.to_path_buf()));
    }

    Ok(labels)
}

fn parse_labels(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_parse_labels_skips_blank_lines() {
        let labels = parse_labels("apple\n\n banana \r\ncake\n");
        assert_eq!(labels, vec!["apple", "banana", "cake"]);
    }

    #[test]
    fn test_missing_labels_file() {
        let result = load_labels(Path::new("./does/not/exist.txt"));
        assert!(matches!(result, Err(SetupError::LabelsLoad { .. })));
    }

    #[test]
    fn test_missing_model_is_setup_error() {
        let labels_path = std::env::temp_dir().join("healthy_snacks_test_labels.txt");
        std::fs::write(&labels_path, "apple\nbanana\n").unwrap();

        let config = ModelConfig {
            onnx_model_path: PathBuf::from("./does/not/exist.onnx"),
            labels_path,
            ..ModelConfig::default()
        };

        let result = ImageClassifierTractOnnx::new(config);
        assert!(matches!(result, Err(SetupError::ModelLoad { .. })));
    }
}
