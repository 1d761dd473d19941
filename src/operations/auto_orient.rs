use image::metadata::Orientation;

use crate::{error::ResizeError, image::Image};

/// Applies the Exif orientation to the pixels and resets the tag,
/// so that viewers honoring the copied Exif chunk don't rotate the image a second time.
pub fn auto_orient(image: &mut Image) -> Result<(), ResizeError> {
    if let Some(exif) = &mut image.exif {
        let orientation = Orientation::remove_from_exif_chunk(exif);
        if let Some(orientation) = orientation {
            image.pixels.apply_orientation(orientation);
            for frame in &mut image.frames {
                frame.pixels.apply_orientation(orientation);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use image::{DynamicImage, RgbImage};

    use super::*;
    use crate::format::SourceFormat;

    #[test]
    fn no_exif_is_a_no_op() {
        let mut image = Image::still(
            SourceFormat::Png,
            DynamicImage::ImageRgb8(RgbImage::new(30, 10)),
        );
        auto_orient(&mut image).unwrap();
        assert_eq!((image.pixels.width(), image.pixels.height()), (30, 10));
    }

    #[test]
    fn rotated_exif_swaps_dimensions() {
        // Minimal little-endian TIFF/Exif chunk with a single Orientation=6 (rotate 90 CW) entry
        let exif = vec![
            b'I', b'I', 0x2A, 0x00, // byte order and magic
            0x08, 0x00, 0x00, 0x00, // offset of IFD0
            0x01, 0x00, // one entry
            0x12, 0x01, // tag 0x0112 Orientation
            0x03, 0x00, // type SHORT
            0x01, 0x00, 0x00, 0x00, // count
            0x06, 0x00, 0x00, 0x00, // value
            0x00, 0x00, 0x00, 0x00, // no next IFD
        ];
        let mut image = Image::still(
            SourceFormat::Jpeg,
            DynamicImage::ImageRgb8(RgbImage::new(30, 10)),
        );
        image.exif = Some(exif);
        auto_orient(&mut image).unwrap();
        assert_eq!((image.pixels.width(), image.pixels.height()), (10, 30));

        // the tag is reset, a second pass leaves the pixels alone
        auto_orient(&mut image).unwrap();
        assert_eq!((image.pixels.width(), image.pixels.height()), (10, 30));
    }
}
