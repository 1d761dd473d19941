use serde::Serialize;

use crate::image::ImageHeader;

/// How the image is fitted into the requested box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::IntoStaticStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ResizePolicy {
    /// Requested size equals the source size, pass the pixels through
    NoResize,
    /// Preserve the aspect ratio, fit entirely within the box
    Fit,
    /// Force the exact box, ignoring the aspect ratio
    Stretch,
}

impl ResizePolicy {
    /// A requested dimension of 0 means "keep the source dimension".
    /// Returns the resolved target box together with the policy.
    pub fn choose(width: u32, height: u32, stretch: bool, header: &ImageHeader) -> (u32, u32, Self) {
        let width = if width == 0 { header.width } else { width };
        let height = if height == 0 { header.height } else { height };

        let policy = if width == header.width && height == header.height {
            Self::NoResize
        } else if stretch {
            Self::Stretch
        } else {
            Self::Fit
        };
        (width, height, policy)
    }
}
