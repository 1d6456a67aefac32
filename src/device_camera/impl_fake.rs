use crate::device_camera::interface::DeviceCamera;
use crate::error::AcquireError;
use crate::library::logger::interface::Logger;
use crate::snack_image::{Orientation, SnackImage};
use image::{DynamicImage, ImageBuffer, Rgb};
use rand::Rng;
use std::sync::Arc;

/// Produces a tinted gradient frame, rotated like a phone held upright.
pub struct DeviceCameraFake {
    logger: Arc<dyn Logger + Send + Sync>,
    width: u32,
    height: u32,
}

impl DeviceCameraFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("camera").with_namespace("fake"),
            width: 640,
            height: 480,
        }
    }
}

impl DeviceCamera for DeviceCameraFake {
    fn is_available(&self) -> bool {
        true
    }

    fn capture_frame(&self) -> Result<SnackImage, AcquireError> {
        let _ = self.logger.info("Capturing frame...");

        let mut rng = rand::rng();
        let tint: [u8; 3] = [rng.random(), rng.random(), rng.random()];
        let (width, height) = (self.width, self.height);

        let frame = ImageBuffer::from_fn(width, height, |x, y| {
            let shade = ((x + y) * 255 / (width + height)) as u16;
            Rgb([
                ((tint[0] as u16 + shade) / 2) as u8,
                ((tint[1] as u16 + shade) / 2) as u8,
                ((tint[2] as u16 + shade) / 2) as u8,
            ])
        });

        let _ = self.logger.info("Frame captured");

        Ok(SnackImage::new(
            DynamicImage::ImageRgb8(frame),
            Orientation::Right,
        ))
    }
}

/// Stand-in for machines without a camera. The take-picture button stays disabled.
pub struct DeviceCameraNone;

impl DeviceCamera for DeviceCameraNone {
    fn is_available(&self) -> bool {
        false
    }

    fn capture_frame(&self) -> Result<SnackImage, AcquireError> {
        Err(AcquireError::CameraUnavailable)
    }
}
