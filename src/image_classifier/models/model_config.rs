use std::path::PathBuf;

/// Per-channel normalization applied after scaling pixels to `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalization {
    pub mean: [f32; 3],
    pub std: [f32; 3],
}

impl Normalization {
    #[allow(dead_code)]
    pub fn identity() -> Self {
        Self {
            mean: [0.0; 3],
            std: [1.0; 3],
        }
    }

    pub fn imagenet() -> Self {
        Self {
            mean: [0.485, 0.456, 0.406],
            std: [0.229, 0.224, 0.225],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    pub onnx_model_path: PathBuf,
    pub labels_path: PathBuf,
    /// (height, width)
    pub input_shape: (u32, u32),
    pub normalization: Normalization,
    /// Set for models whose output is raw logits.
    pub apply_softmax: bool,
    pub top_k: usize,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            onnx_model_path: PathBuf::from("./models/healthy_snacks.onnx"),
            labels_path: PathBuf::from("./models/healthy_snacks.txt"),
            input_shape: (224, 224),
            normalization: Normalization::imagenet(),
            apply_softmax: true,
            top_k: 5,
        }
    }
}
