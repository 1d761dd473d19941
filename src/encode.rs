use std::io::Cursor;

use crate::encoders::common::to_rgb8_or_rgba8;
use crate::error::{ErrorKind, ResizeError};
use crate::format::{EncodeOptions, SourceFormat};
use crate::{encoders, image::Image, ro_try};

/// Encodes the image in its own format. The buffer grows to whatever the encoder produces.
pub fn encode(image: &Image, options: &EncodeOptions) -> Result<Vec<u8>, ResizeError> {
    // Cursor rather than a bare Vec because the TIFF encoder needs Seek
    let mut writer = Cursor::new(Vec::new());

    match image.format {
        #[cfg(feature = "png")]
        SourceFormat::Png => encoders::png::encode(image, &mut writer, options)?,
        #[cfg(feature = "jpeg")]
        SourceFormat::Jpeg => encoders::jpeg::encode(image, &mut writer, options)?,
        #[cfg(feature = "webp")]
        SourceFormat::WebP => encoders::webp::encode(image, &mut writer, options)?,
        #[cfg(feature = "gif")]
        SourceFormat::Gif => encoders::gif::encode(image, &mut writer, options)?,
        #[cfg(feature = "tiff")]
        SourceFormat::Tiff => encoders::tiff::encode(image, &mut writer, options)?,
        // BMP has nothing to tune, and it only takes 8-bit input
        _ => {
            let pixels = to_rgb8_or_rgba8(&image.pixels);
            ro_try!(
                ErrorKind::Transform,
                pixels.write_to(&mut writer, image.format.image_format())
            )
        }
    }

    Ok(writer.into_inner())
}

#[cfg(test)]
mod tests {
    use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

    use super::*;
    use crate::format::encode_options;

    fn image(format: SourceFormat) -> Image {
        Image {
            format,
            exif: None,
            icc: None,
            frames: Vec::new(),
            pixels: DynamicImage::ImageRgb8(RgbImage::from_fn(32, 24, |x, y| {
                Rgb([(x * 8) as u8, (y * 10) as u8, 128])
            })),
        }
    }

    #[test]
    fn output_is_in_the_source_format() {
        for format in [
            SourceFormat::Png,
            SourceFormat::Jpeg,
            SourceFormat::WebP,
            SourceFormat::Gif,
            SourceFormat::Bmp,
            SourceFormat::Tiff,
        ] {
            let options = encode_options(&format.output_type());
            let bytes = encode(&image(format), &options).unwrap();
            assert_eq!(
                image::guess_format(&bytes).unwrap(),
                format.image_format(),
                "{format:?}"
            );
            let decoded = image::load_from_memory(&bytes).unwrap();
            assert_eq!((decoded.width(), decoded.height()), (32, 24), "{format:?}");
        }
    }

    #[test]
    fn jpeg_quality_changes_output() {
        let img = image(SourceFormat::Jpeg);
        let low = EncodeOptions {
            quality: Some(10),
            compression: None,
        };
        let high = EncodeOptions {
            quality: Some(95),
            compression: None,
        };
        let low_bytes = encode(&img, &low).unwrap();
        let high_bytes = encode(&img, &high).unwrap();
        assert!(low_bytes.len() < high_bytes.len());
        assert_eq!(image::guess_format(&low_bytes).unwrap(), ImageFormat::Jpeg);
    }
}
