mod auto_orient;
mod resize;

use crate::{error::ResizeError, image::Image, policy::ResizePolicy};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Operation {
    AutoOrient,
    Resize {
        width: u32,
        height: u32,
        policy: ResizePolicy,
    },
}

impl Operation {
    pub fn execute(&self, image: &mut Image) -> Result<(), ResizeError> {
        match self {
            Operation::AutoOrient => auto_orient::auto_orient(image),
            Operation::Resize {
                width,
                height,
                policy,
            } => resize::resize(image, *width, *height, *policy),
        }
    }
}
