//! Duration selector icons loaded from disk

use crate::duration::NoteDuration;
use crate::error::{Result, ScoreError};
use egui::ColorImage;
use image::imageops::FilterType;
use std::path::Path;

/// Edge length of a selector icon in pixels.
pub const ICON_SIZE: u32 = 50;

/// Decoded icons, one per duration in [`NoteDuration::ALL`] order.
pub struct DurationIcons {
    images: Vec<(NoteDuration, ColorImage)>,
}

impl DurationIcons {
    /// Load all six icons from `dir`. Any missing or unreadable file fails
    /// the whole load.
    pub fn load(dir: &Path) -> Result<Self> {
        let mut images = Vec::with_capacity(NoteDuration::ALL.len());
        for duration in NoteDuration::ALL {
            let path = dir.join(duration.icon_file());
            let img = image::open(&path).map_err(|e| ScoreError::ImageAssetLoad {
                path: path.clone(),
                reason: e.to_string(),
            })?;
            let rgba = img
                .resize_exact(ICON_SIZE, ICON_SIZE, FilterType::Triangle)
                .to_rgba8();
            let (w, h) = rgba.dimensions();
            let color_image = ColorImage::from_rgba_unmultiplied([w as usize, h as usize], rgba.as_raw());
            images.push((duration, color_image));
        }
        log::debug!("loaded {} duration icons from {}", images.len(), dir.display());
        Ok(Self { images })
    }

    pub fn get(&self, duration: NoteDuration) -> Option<&ColorImage> {
        self.images
            .iter()
            .find(|(d, _)| *d == duration)
            .map(|(_, img)| img)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(NoteDuration, ColorImage)> {
        self.images.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("scorecore-assets-{}-{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_missing_icon_is_fatal() {
        let dir = scratch_dir("missing");
        let err = DurationIcons::load(&dir).err().unwrap();
        assert!(err.is_fatal());
        match err {
            ScoreError::ImageAssetLoad { path, .. } => {
                assert_eq!(path, dir.join("whole_note.png"));
            }
            other => panic!("unexpected error {other:?}"),
        }
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_icons_are_resized() {
        let dir = scratch_dir("ok");
        for duration in NoteDuration::ALL {
            image::RgbaImage::new(8, 12)
                .save(dir.join(duration.icon_file()))
                .unwrap();
        }
        let icons = DurationIcons::load(&dir).unwrap();
        assert_eq!(icons.iter().count(), 6);
        let eighth = icons.get(NoteDuration::Eighth).unwrap();
        assert_eq!(eighth.size, [50, 50]);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
