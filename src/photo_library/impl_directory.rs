use crate::error::AcquireError;
use crate::photo_library::interface::{PhotoEntry, PhotoLibrary};
use crate::snack_image::{Orientation, SnackImage};
use image::{DynamicImage, ImageDecoder, ImageReader};
use std::path::{Path, PathBuf};

const EXTENSIONS: [&str; 8] = ["jpg", "jpeg", "png", "bmp", "gif", "webp", "tif", "tiff"];

/// A flat directory of pictures.
pub struct PhotoLibraryDirectory {
    root: PathBuf,
}

impl PhotoLibraryDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

fn is_picture(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

impl PhotoLibrary for PhotoLibraryDirectory {
    fn entries(&self) -> Result<Vec<PhotoEntry>, AcquireError> {
        let read_error = |e: std::io::Error| AcquireError::Read {
            path: self.root.clone(),
            reason: e.to_string(),
        };

        let mut entries = Vec::new();
        for dir_entry in std::fs::read_dir(&self.root).map_err(read_error)? {
            let path = dir_entry.map_err(read_error)?.path();
            if !path.is_file() || !is_picture(&path) {
                continue;
            }
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            entries.push(PhotoEntry { name, path });
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn load(&self, entry: &PhotoEntry) -> Result<SnackImage, AcquireError> {
        let read_error = |reason: String| AcquireError::Read {
            path: entry.path.clone(),
            reason,
        };
        let decode_error = |reason: String| AcquireError::Decode {
            path: entry.path.clone(),
            reason,
        };

        let mut decoder = ImageReader::open(&entry.path)
            .map_err(|e| read_error(e.to_string()))?
            .with_guessed_format()
            .map_err(|e| read_error(e.to_string()))?
            .into_decoder()
            .map_err(|e| decode_error(e.to_string()))?;

        // Formats without EXIF report no transform
        let orientation = decoder
            .orientation()
            .map(Orientation::from)
            .unwrap_or_default();

        let pixels =
            DynamicImage::from_decoder(decoder).map_err(|e| decode_error(e.to_string()))?;

        Ok(SnackImage::new(pixels, orientation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};

    fn library_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("healthy_snacks_{}", name));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_entries_lists_pictures_sorted() {
        let dir = library_dir("entries");
        std::fs::write(dir.join("notes.txt"), "not a picture").unwrap();
        std::fs::write(dir.join("b_pretzel.PNG"), b"").unwrap();
        std::fs::write(dir.join("a_apple.jpg"), b"").unwrap();
        std::fs::create_dir_all(dir.join("nested.png")).unwrap();

        let library = PhotoLibraryDirectory::new(&dir);
        let names: Vec<String> = library
            .entries()
            .unwrap()
            .into_iter()
            .map(|entry| entry.name)
            .collect();

        assert_eq!(names, vec!["a_apple.jpg", "b_pretzel.PNG"]);
    }

    #[test]
    fn test_entries_missing_directory() {
        let library = PhotoLibraryDirectory::new("./does/not/exist");
        assert!(matches!(library.entries(), Err(AcquireError::Read { .. })));
    }

    #[test]
    fn test_load_png() {
        let dir = library_dir("load");
        let path = dir.join("green.png");
        ImageBuffer::from_pixel(8, 4, Rgb([0u8, 200, 0]))
            .save(&path)
            .unwrap();

        let library = PhotoLibraryDirectory::new(&dir);
        let entry = PhotoEntry {
            name: "green.png".to_string(),
            path,
        };
        let image = library.load(&entry).unwrap();

        assert_eq!(image.orientation(), Orientation::Up);
        assert_eq!((image.pixels().width(), image.pixels().height()), (8, 4));
    }

    #[test]
    fn test_load_garbage_is_decode_error() {
        let dir = library_dir("garbage");
        let path = dir.join("broken.jpg");
        std::fs::write(&path, b"definitely not a jpeg").unwrap();

        let library = PhotoLibraryDirectory::new(&dir);
        let entry = PhotoEntry {
            name: "broken.jpg".to_string(),
            path,
        };

        assert!(matches!(library.load(&entry), Err(AcquireError::Decode { .. })));
    }
}
