use std::path::PathBuf;
use thiserror::Error;

/// Failure to bring the classifier up. Fatal for the application.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("failed to load model {path}: {reason}")]
    ModelLoad { path: PathBuf, reason: String },

    #[error("failed to read labels {path}: {source}")]
    LabelsLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("labels file {0} contains no labels")]
    EmptyLabels(PathBuf),
}

/// Failure of a single classification request.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClassifyError {
    #[error("could not prepare image: {0}")]
    Preprocess(String),

    #[error("inference failed: {0}")]
    Inference(String),

    #[error("model produced {outputs} scores for {labels} labels")]
    UnexpectedOutput { outputs: usize, labels: usize },

    #[error("classification worker stopped before producing a result")]
    WorkerLost,
}

/// Failure to obtain an image from the camera or the photo library.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AcquireError {
    #[error("camera unavailable")]
    CameraUnavailable,

    #[error("camera capture failed: {0}")]
    Capture(String),

    #[error("could not read {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    #[error("could not decode {path}: {reason}")]
    Decode { path: PathBuf, reason: String },

    #[error("acquisition worker stopped before producing a result")]
    WorkerLost,
}
