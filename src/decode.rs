use std::{io::Cursor, time::Duration};

use image::{AnimationDecoder, ColorType, DynamicImage, ImageDecoder, ImageReader, Limits};
use tracing::warn;

use crate::error::{ErrorKind, ResizeError};
use crate::format::SourceFormat;
use crate::image::{AnimationFrame, Image, ImageHeader};
use crate::{ro_err, ro_try};

/// Sniffs the format from the bytes, reads the header and decodes the pixels.
///
/// Animations are decoded frame by frame in a single pass. Formats whose encoder can write
/// animations keep every frame, the rest keep only the first one.
pub fn decode(bytes: &[u8]) -> Result<(ImageHeader, Image), ResizeError> {
    let image_format = ro_try!(ErrorKind::DecodeInit, image::guess_format(bytes));
    let format = SourceFormat::from_image_format(image_format).ok_or_else(|| {
        ro_err!(
            ErrorKind::DecodeInit,
            "no decode delegate for this image format `{}'",
            image_format.extensions_str()[0].to_ascii_uppercase()
        )
    })?;

    let reader = ImageReader::with_format(Cursor::new(bytes), image_format);
    let mut decoder = ro_try!(ErrorKind::DecodeInit, reader.into_decoder());

    let (width, height) = decoder.dimensions();
    // Metadata is best-effort, a broken ICC or Exif chunk shouldn't fail the whole run
    let icc = decoder.icc_profile().unwrap_or(None);
    let exif = decoder.exif_metadata().unwrap_or(None);

    let (pixels, frames, duration) = match decode_frames(bytes, format)? {
        Some(mut frames) => {
            drop(decoder);
            let duration = total_delay(&frames);
            let pixels = frames
                .first()
                .map(|frame| frame.pixels.clone())
                .ok_or_else(|| ro_err!(ErrorKind::Transform, "animation contains no frames"))?;
            if frames.len() > 1 && !format.keeps_animation() {
                warn!(
                    frames = frames.len(),
                    "{} animations are written as a still image of the first frame",
                    format.description()
                );
            }
            if frames.len() < 2 || !format.keeps_animation() {
                frames.clear();
            }
            (pixels, frames, duration)
        }
        // pixel data is decoded as part of the transform stage
        None => (
            ro_try!(ErrorKind::Transform, DynamicImage::from_decoder(decoder)),
            Vec::new(),
            None,
        ),
    };

    let header = ImageHeader {
        width,
        height,
        duration,
        format,
    };
    let image = Image {
        exif,
        icc,
        frames,
        ..Image::still(format, pixels)
    };
    Ok((header, image))
}

/// Decodes every frame of GIF, animated WebP and APNG input.
/// Returns `None` for formats and files without animation.
fn decode_frames(
    bytes: &[u8],
    format: SourceFormat,
) -> Result<Option<Vec<AnimationFrame>>, ResizeError> {
    let frames: Vec<AnimationFrame> = match format {
        #[cfg(feature = "gif")]
        SourceFormat::Gif => {
            let mut decoder = ro_try!(
                ErrorKind::HeaderRead,
                image::codecs::gif::GifDecoder::new(Cursor::new(bytes))
            );
            ro_try!(ErrorKind::HeaderRead, decoder.set_limits(Limits::default()));
            collect_frames(decoder)?
        }
        #[cfg(feature = "webp")]
        SourceFormat::WebP => {
            let mut decoder = ro_try!(
                ErrorKind::HeaderRead,
                image::codecs::webp::WebPDecoder::new(Cursor::new(bytes))
            );
            if !decoder.has_animation() {
                return Ok(None);
            }
            ro_try!(ErrorKind::HeaderRead, decoder.set_limits(Limits::default()));
            collect_frames(decoder)?
        }
        #[cfg(feature = "png")]
        SourceFormat::Png => {
            let mut decoder = ro_try!(
                ErrorKind::HeaderRead,
                image::codecs::png::PngDecoder::new(Cursor::new(bytes))
            );
            if !ro_try!(ErrorKind::HeaderRead, decoder.is_apng()) {
                return Ok(None);
            }
            ro_try!(ErrorKind::HeaderRead, decoder.set_limits(Limits::default()));
            collect_frames(ro_try!(ErrorKind::HeaderRead, decoder.apng()))?
        }
        _ => return Ok(None),
    };
    Ok(Some(frames))
}

/// All frames are held in memory at once, so their combined size counts against one allocation limit.
#[cfg(any(feature = "gif", feature = "webp", feature = "png"))]
fn collect_frames<'a>(
    decoder: impl AnimationDecoder<'a>,
) -> Result<Vec<AnimationFrame>, ResizeError> {
    let mut budget = Limits::default();
    let mut frames = Vec::new();
    for frame in decoder.into_frames() {
        let frame = ro_try!(ErrorKind::Transform, frame);
        let (width, height) = frame.buffer().dimensions();
        ro_try!(
            ErrorKind::Transform,
            budget.reserve_buffer(width, height, ColorType::Rgba8)
        );
        frames.push(AnimationFrame {
            delay: frame.delay(),
            pixels: DynamicImage::ImageRgba8(frame.into_buffer()),
        });
    }
    Ok(frames)
}

/// `None` for animations that claim to take no time at all
fn total_delay(frames: &[AnimationFrame]) -> Option<Duration> {
    let total: Duration = frames.iter().map(|frame| Duration::from(frame.delay)).sum();
    if total.is_zero() {
        None
    } else {
        Some(total)
    }
}
