// SPDX-License-Identifier: MPL-2.0
//! Indicator frame assets.

use crate::error::Result;
use image_rs::RgbaImage;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Asset names of the bundled loader animation, in display order.
pub const LOADER_ASSET_NAMES: [&str; 6] = [
    "ic_loader_2",
    "ic_loader_3",
    "ic_loader_4",
    "ic_loader_5",
    "ic_loader_6",
    "ic_loader_1",
];

/// File extension tried when loading named frame assets.
const FRAME_EXTENSION: &str = "png";

/// One decoded frame of an indicator animation.
///
/// Cloning is cheap: pixels are shared.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    name: String,
    image: Arc<RgbaImage>,
}

impl Frame {
    /// Wraps already decoded pixels.
    pub fn new(name: impl Into<String>, image: RgbaImage) -> Self {
        Self {
            name: name.into(),
            image: Arc::new(image),
        }
    }

    /// Decodes a frame from an image file.
    pub fn open(name: impl Into<String>, path: &Path) -> Result<Self> {
        let image = image_rs::open(path)?.to_rgba8();
        Ok(Self::new(name, image))
    }

    /// Asset name of the frame.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Decoded pixels.
    #[must_use]
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }
}

/// Ordered, finite list of frames.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FrameSet {
    frames: Vec<Frame>,
}

impl FrameSet {
    /// Creates a set from frames in display order.
    #[must_use]
    pub fn from_frames(frames: Vec<Frame>) -> Self {
        Self { frames }
    }

    /// Loads `<dir>/<name>.png` for every name, in order.
    ///
    /// A frame that cannot be read or decoded is left out of the set; the
    /// animation simply has one frame less.
    pub fn load<S: AsRef<str>>(dir: &Path, names: &[S]) -> Self {
        let frames = names
            .iter()
            .filter_map(|name| {
                let name = name.as_ref();
                match Frame::open(name, &frame_path(dir, name)) {
                    Ok(frame) => Some(frame),
                    Err(err) => {
                        tracing::warn!(frame = name, error = %err, "skipping indicator frame");
                        None
                    }
                }
            })
            .collect();
        Self { frames }
    }

    /// Loads the bundled loader animation from `dir`.
    pub fn load_loader(dir: &Path) -> Self {
        Self::load(dir, &LOADER_ASSET_NAMES)
    }

    /// Frame at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    /// Number of frames.
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Returns true if no frame could be loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Iterates frames in display order.
    pub fn iter(&self) -> impl Iterator<Item = &Frame> {
        self.frames.iter()
    }
}

/// `<dir>/<name>.png`, keeping any dots already in `name`.
fn frame_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{name}.{FRAME_EXTENSION}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image_rs::Rgba;
    use tempfile::tempdir;

    fn write_png(dir: &Path, name: &str) {
        let image = RgbaImage::from_pixel(2, 2, Rgba([255, 0, 0, 255]));
        image
            .save(frame_path(dir, name))
            .expect("failed to write test frame");
    }

    #[test]
    fn load_keeps_requested_order() {
        let dir = tempdir().expect("failed to create temp dir");
        write_png(dir.path(), "b");
        write_png(dir.path(), "a");

        let set = FrameSet::load(dir.path(), &["b", "a"]);
        let names: Vec<_> = set.iter().map(Frame::name).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn load_skips_missing_and_corrupt_frames() {
        let dir = tempdir().expect("failed to create temp dir");
        write_png(dir.path(), "ok");
        std::fs::write(dir.path().join("broken.png"), b"not a png")
            .expect("failed to write corrupt frame");

        let set = FrameSet::load(dir.path(), &["missing", "broken", "ok"]);
        assert_eq!(set.len(), 1);
        assert_eq!(set.get(0).map(Frame::name), Some("ok"));
    }

    #[test]
    fn dotted_names_keep_their_suffix() {
        let dir = tempdir().expect("failed to create temp dir");
        RgbaImage::new(1, 1)
            .save(dir.path().join("loader.png"))
            .expect("failed to write test frame");
        RgbaImage::new(3, 3)
            .save(dir.path().join("loader.v2.png"))
            .expect("failed to write test frame");

        let set = FrameSet::load(dir.path(), &["loader.v2"]);
        assert_eq!(set.len(), 1);
        assert_eq!(set.get(0).map(|frame| frame.image().width()), Some(3));
    }

    #[test]
    fn load_loader_with_no_assets_is_empty() {
        let dir = tempdir().expect("failed to create temp dir");
        assert!(FrameSet::load_loader(dir.path()).is_empty());
    }

    #[test]
    fn open_reports_decode_errors() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"garbage").expect("failed to write corrupt frame");

        assert!(Frame::open("broken", &path).is_err());
    }
}
