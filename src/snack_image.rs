use image::DynamicImage;
use std::sync::Arc;

/// EXIF orientation of the stored pixels, i.e. the transform that has to be
/// applied to show the picture upright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Up,
    UpMirrored,
    Down,
    DownMirrored,
    LeftMirrored,
    Right,
    RightMirrored,
    Left,
}

impl Orientation {
    pub fn apply(&self, image: &DynamicImage) -> DynamicImage {
        match self {
            Orientation::Up => image.clone(),
            Orientation::UpMirrored => image.fliph(),
            Orientation::Down => image.rotate180(),
            Orientation::DownMirrored => image.flipv(),
            Orientation::LeftMirrored => image.rotate90().fliph(),
            Orientation::Right => image.rotate90(),
            Orientation::RightMirrored => image.rotate270().fliph(),
            Orientation::Left => image.rotate270(),
        }
    }
}

impl From<image::metadata::Orientation> for Orientation {
    fn from(orientation: image::metadata::Orientation) -> Self {
        use image::metadata::Orientation as Exif;
        match orientation {
            Exif::NoTransforms => Orientation::Up,
            Exif::FlipHorizontal => Orientation::UpMirrored,
            Exif::Rotate180 => Orientation::Down,
            Exif::FlipVertical => Orientation::DownMirrored,
            Exif::Rotate90FlipH => Orientation::LeftMirrored,
            Exif::Rotate90 => Orientation::Right,
            Exif::Rotate270FlipH => Orientation::RightMirrored,
            Exif::Rotate270 => Orientation::Left,
        }
    }
}

/// A picked or captured photo. Cloning shares the pixel buffer.
#[derive(Debug, Clone)]
pub struct SnackImage {
    pixels: Arc<DynamicImage>,
    orientation: Orientation,
}

impl SnackImage {
    pub fn new(pixels: DynamicImage, orientation: Orientation) -> Self {
        Self {
            pixels: Arc::new(pixels),
            orientation,
        }
    }

    pub fn pixels(&self) -> &DynamicImage {
        &self.pixels
    }

    #[allow(dead_code)]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn upright(&self) -> DynamicImage {
        self.orientation.apply(&self.pixels)
    }

    pub fn same_pixels(&self, other: &SnackImage) -> bool {
        Arc::ptr_eq(&self.pixels, &other.pixels)
    }
}
