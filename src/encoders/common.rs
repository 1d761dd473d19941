//! Helpers shared between all encoders

use std::borrow::Cow;

use image::{ColorType, DynamicImage, ImageBuffer, ImageEncoder, Pixel, Primitive};

use crate::image::Image;

pub fn write_icc_and_exif(encoder: &mut impl ImageEncoder, image: &Image) {
    if let Some(icc) = image.icc.clone() {
        let _ = encoder.set_icc_profile(icc); // ignore UnsupportedError
    };
    if let Some(exif) = image.exif.clone() {
        let _ = encoder.set_exif_metadata(exif); // ignore UnsupportedError
    };
}

/// Losslessly shrinks the pixel format before encoding.
///
/// A fully opaque alpha channel is dropped, and 16-bit images whose samples
/// all map exactly onto 8-bit values are reduced to 8 bits.
pub(crate) fn shrink_pixel_format(image: &DynamicImage) -> Cow<'_, DynamicImage> {
    use DynamicImage::*;
    let eight_bit = match image {
        ImageLuma16(pixels) => fits_in_8_bits(pixels),
        ImageLumaA16(pixels) => fits_in_8_bits(pixels),
        ImageRgb16(pixels) => fits_in_8_bits(pixels),
        ImageRgba16(pixels) => fits_in_8_bits(pixels),
        _ => false,
    };
    let strip_alpha = image.color().has_alpha() && is_opaque(image);

    let mut color = image.color();
    if eight_bit {
        color = to_8bit(color);
    }
    if strip_alpha {
        color = to_opaque(color);
    }
    to_color(image, color)
}

/// Converts the image to Rgb8, or to Rgba8 if it has any transparent pixels.
/// Needed by encoders that only accept 8-bit RGB(A) input.
pub(crate) fn to_rgb8_or_rgba8(pixels: &DynamicImage) -> Cow<'_, DynamicImage> {
    match pixels {
        DynamicImage::ImageRgb8(_) | DynamicImage::ImageRgba8(_) => Cow::Borrowed(pixels),
        _ if pixels.color().has_alpha() && !is_opaque(pixels) => {
            Cow::Owned(DynamicImage::ImageRgba8(pixels.to_rgba8()))
        }
        _ => Cow::Owned(DynamicImage::ImageRgb8(pixels.to_rgb8())),
    }
}

fn is_opaque(image: &DynamicImage) -> bool {
    match image {
        DynamicImage::ImageLumaA8(pixels) => all_opaque(pixels),
        DynamicImage::ImageRgba8(pixels) => all_opaque(pixels),
        DynamicImage::ImageLumaA16(pixels) => all_opaque(pixels),
        DynamicImage::ImageRgba16(pixels) => all_opaque(pixels),
        DynamicImage::ImageRgba32F(pixels) => all_opaque(pixels),
        other => !other.color().has_alpha(),
    }
}

fn all_opaque<P: Pixel>(buffer: &ImageBuffer<P, Vec<P::Subpixel>>) -> bool {
    // alpha is the last channel in every DynamicImage variant
    buffer
        .pixels()
        .all(|pixel| pixel.channels().last().copied() == Some(P::Subpixel::DEFAULT_MAX_VALUE))
}

fn fits_in_8_bits<P: Pixel<Subpixel = u16>>(buffer: &ImageBuffer<P, Vec<u16>>) -> bool {
    // 8-bit values scaled up to 16 bits are exact multiples of 257
    buffer.as_raw().iter().all(|sample| sample % 257 == 0)
}

fn to_8bit(color: ColorType) -> ColorType {
    match color {
        ColorType::L16 => ColorType::L8,
        ColorType::La16 => ColorType::La8,
        ColorType::Rgb16 => ColorType::Rgb8,
        ColorType::Rgba16 => ColorType::Rgba8,
        other => other,
    }
}

fn to_opaque(color: ColorType) -> ColorType {
    match color {
        ColorType::La8 => ColorType::L8,
        ColorType::Rgba8 => ColorType::Rgb8,
        ColorType::La16 => ColorType::L16,
        ColorType::Rgba16 => ColorType::Rgb16,
        ColorType::Rgba32F => ColorType::Rgb32F,
        other => other,
    }
}

fn to_color(image: &DynamicImage, color: ColorType) -> Cow<'_, DynamicImage> {
    if image.color() == color {
        return Cow::Borrowed(image);
    }
    Cow::Owned(match color {
        ColorType::L8 => DynamicImage::ImageLuma8(image.to_luma8()),
        ColorType::La8 => DynamicImage::ImageLumaA8(image.to_luma_alpha8()),
        ColorType::Rgb8 => DynamicImage::ImageRgb8(image.to_rgb8()),
        ColorType::Rgba8 => DynamicImage::ImageRgba8(image.to_rgba8()),
        ColorType::L16 => DynamicImage::ImageLuma16(image.to_luma16()),
        ColorType::La16 => DynamicImage::ImageLumaA16(image.to_luma_alpha16()),
        ColorType::Rgb16 => DynamicImage::ImageRgb16(image.to_rgb16()),
        ColorType::Rgba16 => DynamicImage::ImageRgba16(image.to_rgba16()),
        ColorType::Rgb32F => DynamicImage::ImageRgb32F(image.to_rgb32f()),
        ColorType::Rgba32F => DynamicImage::ImageRgba32F(image.to_rgba32f()),
        // only reachable from the color types produced above
        _ => return Cow::Borrowed(image),
    })
}
