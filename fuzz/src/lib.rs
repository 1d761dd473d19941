use std::{io::Cursor, num::NonZeroU8};

use arbitrary::Unstructured;
use resize_once::{fetch::Fetch, ResizeError};
use url::Url;

/// Hands out the same bytes for every request, no network involved
pub struct InMemoryFetcher(pub Vec<u8>);

impl Fetch for InMemoryFetcher {
    fn fetch(&self, _url: &Url) -> Result<Vec<u8>, ResizeError> {
        Ok(self.0.clone())
    }
}

#[derive(Debug)]
pub struct StructuredImage {
    pub width: NonZeroU8,
    pub height: NonZeroU8,
    rgb_data: Vec<u8>,
}

impl StructuredImage {
    pub fn to_png(&self) -> Vec<u8> {
        use image::{codecs::png::PngEncoder, ImageBuffer, ImageEncoder, RgbImage};

        let (width, height) = (self.width.get() as u32, self.height.get() as u32);
        let img: RgbImage = ImageBuffer::from_fn(width, height, |x, y| {
            let idx = (y * width + x) as usize * 3;
            image::Rgb([
                self.rgb_data[idx],
                self.rgb_data[idx + 1],
                self.rgb_data[idx + 2],
            ])
        });

        let mut out = Cursor::new(Vec::new());
        PngEncoder::new_with_quality(
            &mut out,
            image::codecs::png::CompressionType::Fast,
            image::codecs::png::FilterType::NoFilter,
        )
        .write_image(&img, width, height, image::ExtendedColorType::Rgb8)
        .expect("in-memory PNG encoding failed");
        out.into_inner()
    }
}

impl<'a> arbitrary::Arbitrary<'a> for StructuredImage {
    fn arbitrary(unstructured: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        let width: NonZeroU8 = unstructured.arbitrary()?;
        let height: NonZeroU8 = unstructured.arbitrary()?;
        let rgb_data_len = width.get() as usize * height.get() as usize * 3;
        let rgb_data = unstructured.bytes(rgb_data_len)?;

        Ok(Self {
            width,
            height,
            rgb_data: rgb_data.to_vec(),
        })
    }
}
