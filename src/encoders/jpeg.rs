use std::borrow::Cow;
use std::io::Write;

use image::codecs::jpeg::JpegEncoder;
use image::{ColorType, DynamicImage, ImageEncoder};

use crate::error::{ErrorKind, ResizeError};
use crate::{format::EncodeOptions, image::Image, ro_try};

const DEFAULT_QUALITY: u8 = 85;

pub fn encode<W: Write>(
    image: &Image,
    writer: &mut W,
    options: &EncodeOptions,
) -> Result<(), ResizeError> {
    let quality = options.quality.unwrap_or(DEFAULT_QUALITY).clamp(1, 100);
    let mut encoder = JpegEncoder::new_with_quality(writer, quality);
    if let Some(icc) = image.icc.clone() {
        let _ = encoder.set_icc_profile(icc); // ignore UnsupportedError
    };
    let pixels = to_jpeg_color(&image.pixels);
    Ok(ro_try!(ErrorKind::Transform, pixels.write_with_encoder(encoder)))
}

/// JPEG has no alpha channel and no 16-bit mode
fn to_jpeg_color(pixels: &DynamicImage) -> Cow<'_, DynamicImage> {
    match pixels.color() {
        ColorType::L8 | ColorType::Rgb8 => Cow::Borrowed(pixels),
        ColorType::La8 | ColorType::L16 | ColorType::La16 => {
            Cow::Owned(DynamicImage::ImageLuma8(pixels.to_luma8()))
        }
        _ => Cow::Owned(DynamicImage::ImageRgb8(pixels.to_rgb8())),
    }
}
