use std::time::Duration;

use image::{Delay, DynamicImage};

use crate::format::SourceFormat;

#[derive(Debug, Clone)]
pub struct Image {
    pub format: SourceFormat,
    pub exif: Option<Vec<u8>>,
    pub icc: Option<Vec<u8>>,
    /// The still image, or the first frame of an animation
    pub pixels: DynamicImage,
    /// Every frame of an animation that is re-encoded as one. Empty for still images.
    pub frames: Vec<AnimationFrame>,
}

impl Image {
    pub fn still(format: SourceFormat, pixels: DynamicImage) -> Self {
        Self {
            format,
            exif: None,
            icc: None,
            pixels,
            frames: Vec::new(),
        }
    }

    pub fn is_animated(&self) -> bool {
        self.frames.len() > 1
    }
}

/// A fully composited animation frame, always covering the whole canvas
#[derive(Debug, Clone)]
pub struct AnimationFrame {
    pub pixels: DynamicImage,
    pub delay: Delay,
}

/// Metadata read once from the source, consumed to choose the resize policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageHeader {
    pub width: u32,
    pub height: u32,
    /// Total playback time of animated images; `None` for still images
    pub duration: Option<Duration>,
    pub format: SourceFormat,
}
