use std::io::Write;

use image::codecs::gif::{GifEncoder, Repeat};
use image::{ExtendedColorType, Frame};

use crate::error::{ErrorKind, ResizeError};
use crate::{format::EncodeOptions, image::Image, ro_try};

pub fn encode<W: Write>(
    image: &Image,
    writer: &mut W,
    _options: &EncodeOptions,
) -> Result<(), ResizeError> {
    let mut encoder = GifEncoder::new_with_speed(writer, 10);
    if image.is_animated() {
        ro_try!(ErrorKind::Transform, encoder.set_repeat(Repeat::Infinite));
        let frames = image
            .frames
            .iter()
            .map(|frame| Frame::from_parts(frame.pixels.to_rgba8(), 0, 0, frame.delay));
        return Ok(ro_try!(ErrorKind::Transform, encoder.encode_frames(frames)));
    }

    // GifEncoder only takes Rgb8/Rgba8 buffers, Rgba8 covers every input
    let rgba = image.pixels.to_rgba8();
    Ok(ro_try!(
        ErrorKind::Transform,
        encoder.encode(rgba.as_raw(), rgba.width(), rgba.height(), ExtendedColorType::Rgba8)
    ))
}
