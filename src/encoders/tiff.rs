use std::io::{Seek, Write};

use image::codecs::tiff::TiffEncoder;

use crate::encoders::common::write_icc_and_exif;
use crate::error::{ErrorKind, ResizeError};
use crate::{format::EncodeOptions, image::Image, ro_try};

pub fn encode<W: Write + Seek>(
    image: &Image,
    writer: &mut W,
    _options: &EncodeOptions,
) -> Result<(), ResizeError> {
    let mut encoder = TiffEncoder::new(writer);
    write_icc_and_exif(&mut encoder, image);
    Ok(ro_try!(
        ErrorKind::Transform,
        image.pixels.write_with_encoder(encoder)
    ))
}
