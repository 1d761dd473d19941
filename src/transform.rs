//! Orient, resize and re-encode in one call.

use crate::encode::encode;
use crate::error::ResizeError;
use crate::format::{EncodeOptions, SourceFormat};
use crate::image::Image;
use crate::operations::Operation;
use crate::policy::ResizePolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransformOptions {
    pub format: SourceFormat,
    pub width: u32,
    pub height: u32,
    pub policy: ResizePolicy,
    pub normalize_orientation: bool,
    pub encode_options: EncodeOptions,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transformed {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl TransformOptions {
    fn operations(&self) -> Vec<Operation> {
        let mut ops = Vec::with_capacity(2);
        if self.normalize_orientation {
            ops.push(Operation::AutoOrient);
        }
        ops.push(Operation::Resize {
            width: self.width,
            height: self.height,
            policy: self.policy,
        });
        ops
    }
}

/// Consumes the decoded image and returns the encoded output.
pub fn transform(mut image: Image, options: &TransformOptions) -> Result<Transformed, ResizeError> {
    for operation in options.operations() {
        operation.execute(&mut image)?;
    }
    image.format = options.format;
    let bytes = encode(&image, &options.encode_options)?;

    Ok(Transformed {
        bytes,
        width: image.pixels.width(),
        height: image.pixels.height(),
    })
}
