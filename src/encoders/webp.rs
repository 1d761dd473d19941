use std::io::Write;
use std::time::Duration;

use image::RgbaImage;
use webp::{AnimEncoder, AnimFrame, Encoder, WebPConfig, WebPMemory};

use crate::encoders::common::to_rgb8_or_rgba8;
use crate::error::{ErrorKind, ResizeError};
use crate::{format::EncodeOptions, image::Image, ro_err, ro_try};

const DEFAULT_QUALITY: u8 = 75;

/// libwebp rejects frames that do not advance the timestamp
const MIN_FRAME_DURATION: Duration = Duration::from_millis(1);

pub fn encode<W: Write>(
    image: &Image,
    writer: &mut W,
    options: &EncodeOptions,
) -> Result<(), ResizeError> {
    let quality = options.quality.unwrap_or(DEFAULT_QUALITY).min(100);
    // quality=100 means lossless
    let lossless = quality == 100;

    let webp = if image.is_animated() {
        encode_animation(image, lossless, quality)?
    } else {
        // the `webp` encoder only accepts 8-bit RGB(A)
        let pixels = to_rgb8_or_rgba8(&image.pixels);
        let encoder: Encoder = Encoder::from_image(&pixels)
            .map_err(|e| ro_err!(ErrorKind::Transform, "WebP encoder rejected the image: {e}"))?;
        encoder
            .encode_simple(lossless, f32::from(quality))
            .map_err(|e| ro_err!(ErrorKind::Transform, "WebP encoding failed: {e:?}"))?
    };
    // TODO: `webp` crate doesn't support setting the ICC profile:
    // https://github.com/jaredforth/webp/issues/41
    Ok(ro_try!(ErrorKind::Transform, writer.write_all(&webp)))
}

fn encode_animation(image: &Image, lossless: bool, quality: u8) -> Result<WebPMemory, ResizeError> {
    let mut config = WebPConfig::new()
        .map_err(|_| ro_err!(ErrorKind::Transform, "failed to initialize WebP encoder config"))?;
    config.lossless = i32::from(lossless);
    config.quality = f32::from(quality);

    let buffers: Vec<RgbaImage> = image.frames.iter().map(|frame| frame.pixels.to_rgba8()).collect();
    let mut encoder = AnimEncoder::new(image.pixels.width(), image.pixels.height(), &config);
    let mut timestamp = Duration::ZERO;
    for (buffer, frame) in buffers.iter().zip(&image.frames) {
        let millis = ro_try!(ErrorKind::Transform, i32::try_from(timestamp.as_millis()));
        encoder.add_frame(AnimFrame::from_rgba(
            buffer.as_raw(),
            buffer.width(),
            buffer.height(),
            millis,
        ));
        timestamp += Duration::from(frame.delay).max(MIN_FRAME_DURATION);
    }
    encoder
        .try_encode()
        .map_err(|e| ro_err!(ErrorKind::Transform, "WebP animation encoding failed: {e:?}"))
}
