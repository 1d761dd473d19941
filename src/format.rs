//! Formats we can decode and re-encode, and the per-format encode options.

use image::ImageFormat;
use serde::Serialize;

/// Image format detected from the fetched bytes. The output is always encoded in the same format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::VariantArray)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    Jpeg,
    Png,
    WebP,
    Gif,
    Bmp,
    Tiff,
}

impl SourceFormat {
    pub fn from_image_format(format: ImageFormat) -> Option<Self> {
        match format {
            ImageFormat::Jpeg => Some(Self::Jpeg),
            ImageFormat::Png => Some(Self::Png),
            ImageFormat::WebP => Some(Self::WebP),
            ImageFormat::Gif => Some(Self::Gif),
            ImageFormat::Bmp => Some(Self::Bmp),
            ImageFormat::Tiff => Some(Self::Tiff),
            _ => None,
        }
    }

    pub fn image_format(&self) -> ImageFormat {
        match self {
            Self::Jpeg => ImageFormat::Jpeg,
            Self::Png => ImageFormat::Png,
            Self::WebP => ImageFormat::WebP,
            Self::Gif => ImageFormat::Gif,
            Self::Bmp => ImageFormat::Bmp,
            Self::Tiff => ImageFormat::Tiff,
        }
    }

    /// Textual descriptor of the format, e.g. `JPEG`
    pub fn description(&self) -> &'static str {
        match self {
            Self::Jpeg => "JPEG",
            Self::Png => "PNG",
            Self::WebP => "WEBP",
            Self::Gif => "GIF",
            Self::Bmp => "BMP",
            Self::Tiff => "TIFF",
        }
    }

    /// Lower-cased descriptor with a leading dot. This is the key into [encode_options].
    pub fn output_type(&self) -> String {
        format!(".{}", self.description().to_ascii_lowercase())
    }

    /// Preferred file extension, without the dot
    pub fn extension(&self) -> &'static str {
        self.image_format().extensions_str()[0]
    }

    /// Whether our encoder for this format writes every frame of an animation.
    /// APNG is re-encoded as a still PNG of the first frame.
    pub fn keeps_animation(&self) -> bool {
        matches!(self, Self::Gif | Self::WebP)
    }
}

/// Per-format tunables applied while re-encoding.
/// Fields a format has no use for are ignored by its encoder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncodeOptions {
    /// 1..=100, used by JPEG and WebP
    pub quality: Option<u8>,
    /// zlib level 0..=9, used by PNG
    pub compression: Option<u8>,
}

static ENCODE_OPTIONS: &[(&str, EncodeOptions)] = &[
    (
        ".jpeg",
        EncodeOptions {
            quality: Some(85),
            compression: None,
        },
    ),
    (
        ".png",
        EncodeOptions {
            quality: None,
            compression: Some(7),
        },
    ),
    (
        ".webp",
        EncodeOptions {
            quality: Some(85),
            compression: None,
        },
    ),
];

/// Looks up the encode options for an output type such as `.jpeg`.
/// Unknown types get the encoder defaults.
pub fn encode_options(output_type: &str) -> EncodeOptions {
    ENCODE_OPTIONS
        .iter()
        .find(|(key, _)| *key == output_type)
        .map(|(_, options)| *options)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use strum::VariantArray;

    use super::*;

    #[test]
    fn output_type_is_lowercased_descriptor() {
        assert_eq!(SourceFormat::Jpeg.output_type(), ".jpeg");
        assert_eq!(SourceFormat::WebP.output_type(), ".webp");
        assert_eq!(SourceFormat::Png.output_type(), ".png");
    }

    #[test]
    fn table_lookup() {
        assert_eq!(encode_options(".jpeg").quality, Some(85));
        assert_eq!(encode_options(".webp").quality, Some(85));
        assert_eq!(encode_options(".png").compression, Some(7));
        assert_eq!(encode_options(".gif"), EncodeOptions::default());
        assert_eq!(encode_options("jpeg"), EncodeOptions::default());
    }

    #[test]
    fn image_format_round_trips() {
        for format in SourceFormat::VARIANTS {
            assert_eq!(
                SourceFormat::from_image_format(format.image_format()),
                Some(*format)
            );
        }
        assert_eq!(SourceFormat::from_image_format(ImageFormat::Qoi), None);
    }

    #[test]
    fn extensions() {
        assert_eq!(SourceFormat::Jpeg.extension(), "jpg");
        assert_eq!(SourceFormat::Png.extension(), "png");
        assert_eq!(SourceFormat::WebP.extension(), "webp");
    }

    #[test]
    fn animated_formats() {
        assert!(SourceFormat::Gif.keeps_animation());
        assert!(SourceFormat::WebP.keeps_animation());
        assert!(!SourceFormat::Png.keeps_animation());
    }
}
