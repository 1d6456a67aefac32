use crate::error::AcquireError;
use crate::snack_image::SnackImage;

pub trait DeviceCamera: Send + Sync {
    /// Whether the take-picture source can be offered at all.
    fn is_available(&self) -> bool;
    fn capture_frame(&self) -> Result<SnackImage, AcquireError>;
}
