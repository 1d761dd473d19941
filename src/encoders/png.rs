use std::io::Write;

use image::codecs::png::{CompressionType, FilterType, PngEncoder};

use crate::encoders::common::{shrink_pixel_format, write_icc_and_exif};
use crate::error::{ErrorKind, ResizeError};
use crate::{format::EncodeOptions, image::Image, ro_try};

const DEFAULT_COMPRESSION: u8 = 7;

pub fn encode<W: Write>(
    image: &Image,
    writer: &mut W,
    options: &EncodeOptions,
) -> Result<(), ResizeError> {
    // zlib levels stop at 9, larger values are treated as 9
    let level = options.compression.unwrap_or(DEFAULT_COMPRESSION).min(9);
    let mut encoder =
        PngEncoder::new_with_quality(writer, CompressionType::Level(level), FilterType::Adaptive);
    write_icc_and_exif(&mut encoder, image);
    let pixels_to_write = shrink_pixel_format(&image.pixels);
    Ok(ro_try!(
        ErrorKind::Transform,
        pixels_to_write.write_with_encoder(encoder)
    ))
}
