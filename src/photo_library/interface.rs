use crate::error::AcquireError;
use crate::snack_image::SnackImage;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoEntry {
    pub name: String,
    pub path: PathBuf,
}

pub trait PhotoLibrary: Send + Sync {
    fn entries(&self) -> Result<Vec<PhotoEntry>, AcquireError>;
    fn load(&self, entry: &PhotoEntry) -> Result<SnackImage, AcquireError>;
}
