use crate::image_classifier::models::model_config::ModelConfig;
use chrono::Offset;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct PanelConfig {
    pub hidden_offset: f32,
    pub shown_offset: f32,
    pub show_duration: Duration,
    pub hide_duration: Duration,
    pub spring_damping: f32,
    pub spring_velocity: f32,
    pub show_delay: Duration,
    pub first_hint_delay: Duration,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            hidden_offset: 100.0,
            shown_offset: -10.0,
            show_duration: Duration::from_millis(500),
            hide_duration: Duration::from_millis(300),
            spring_damping: 0.6,
            spring_velocity: 0.6,
            show_delay: Duration::from_millis(100),
            first_hint_delay: Duration::from_millis(500),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub model: ModelConfig,
    pub min_confidence: f32,
    pub photo_library_dir: PathBuf,
    pub use_fake_classifier: bool,
    pub use_fake_camera: bool,
    pub panel: PanelConfig,
    pub logger_timezone: chrono::FixedOffset,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: ModelConfig::default(),
            min_confidence: 0.8,
            photo_library_dir: PathBuf::from("./photos"),
            use_fake_classifier: false,
            use_fake_camera: true,
            panel: PanelConfig::default(),
            logger_timezone: utc(),
        }
    }
}

impl Config {
    /// Defaults with `SNACKS_*` environment overrides applied.
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(path) = lookup("SNACKS_MODEL_PATH") {
            self.model.onnx_model_path = PathBuf::from(path);
        }
        if let Some(path) = lookup("SNACKS_LABELS_PATH") {
            self.model.labels_path = PathBuf::from(path);
        }
        if let Some(dir) = lookup("SNACKS_LIBRARY_DIR") {
            self.photo_library_dir = PathBuf::from(dir);
        }
        if let Some(flag) = lookup("SNACKS_FAKE_CLASSIFIER").and_then(|v| parse_flag(&v)) {
            self.use_fake_classifier = flag;
        }
        if let Some(flag) = lookup("SNACKS_FAKE_CAMERA").and_then(|v| parse_flag(&v)) {
            self.use_fake_camera = flag;
        }
        if let Some(min) = lookup("SNACKS_MIN_CONFIDENCE").and_then(|v| v.parse::<f32>().ok()) {
            if (0.0..=1.0).contains(&min) {
                self.min_confidence = min;
            }
        }
        self
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn utc() -> chrono::FixedOffset {
    chrono::FixedOffset::east_opt(0).unwrap_or_else(|| chrono::Utc.fix())
}
