use config::Config;
use device_camera::impl_fake::{DeviceCameraFake, DeviceCameraNone};
use device_camera::interface::DeviceCamera;
use image_classifier::impl_fake::ImageClassifierFake;
use image_classifier::impl_tract_onnx::ImageClassifierTractOnnx;
use image_classifier::interface::ImageClassifier;
use library::logger::impl_console::LoggerConsole;
use library::logger::interface::Logger;
use photo_library::impl_directory::PhotoLibraryDirectory;
use snack_screen::main::SnackScreen;
use snack_screen::render::SnackApp;
use std::sync::Arc;
use std::time::Instant;

mod config;
mod device_camera;
mod error;
mod image_classifier;
mod inference_dispatcher;
mod library;
mod photo_library;
mod snack_image;
mod snack_screen;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env();

    let logger: Arc<dyn Logger + Send + Sync> =
        Arc::new(LoggerConsole::new(config.logger_timezone));

    let image_classifier: Arc<dyn ImageClassifier + Send + Sync> = if config.use_fake_classifier {
        Arc::new(ImageClassifierFake::new(logger.clone()))
    } else {
        match ImageClassifierTractOnnx::new(config.model.clone()) {
            Ok(classifier) => {
                let _ = logger.info(&format!(
                    "Loaded {} with {} labels",
                    config.model.onnx_model_path.display(),
                    classifier.labels().len()
                ));
                Arc::new(classifier)
            }
            Err(e) => {
                let _ = logger.error(&format!("Failed to create image classifier: {}", e));
                std::process::exit(1);
            }
        }
    };

    let device_camera: Arc<dyn DeviceCamera + Send + Sync> = if config.use_fake_camera {
        Arc::new(DeviceCameraFake::new(logger.clone()))
    } else {
        Arc::new(DeviceCameraNone)
    };

    let photo_library = Arc::new(PhotoLibraryDirectory::new(&config.photo_library_dir));

    let snack_screen = SnackScreen::new(
        config,
        logger,
        device_camera,
        photo_library,
        image_classifier,
        Instant::now(),
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Healthy Snacks")
            .with_inner_size([420.0, 720.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Healthy Snacks",
        options,
        Box::new(move |_cc| Box::new(SnackApp::new(snack_screen))),
    )?;

    Ok(())
}
