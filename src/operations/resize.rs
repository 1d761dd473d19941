use image::imageops::FilterType;

use crate::{error::ResizeError, image::Image, policy::ResizePolicy};

const FILTER: FilterType = FilterType::Lanczos3;

pub fn resize(
    image: &mut Image,
    width: u32,
    height: u32,
    policy: ResizePolicy,
) -> Result<(), ResizeError> {
    let (src_width, src_height) = (image.pixels.width(), image.pixels.height());
    let (dst_width, dst_height) = match policy {
        ResizePolicy::NoResize => return Ok(()),
        ResizePolicy::Fit => fit_dimensions(src_width, src_height, width, height),
        ResizePolicy::Stretch => (width, height),
    };
    if (dst_width, dst_height) == (src_width, src_height) {
        return Ok(());
    }

    image.pixels = image.pixels.resize_exact(dst_width, dst_height, FILTER);
    // frames share the canvas size, so they all get the same target
    for frame in &mut image.frames {
        frame.pixels = frame.pixels.resize_exact(dst_width, dst_height, FILTER);
    }
    Ok(())
}

/// Largest size with the source aspect ratio that fits within the box.
/// Neither dimension is allowed to round down to 0.
pub fn fit_dimensions(src_width: u32, src_height: u32, box_width: u32, box_height: u32) -> (u32, u32) {
    let (src_w, src_h) = (u64::from(src_width), u64::from(src_height));
    let (box_w, box_h) = (u64::from(box_width), u64::from(box_height));

    // compare box_w / src_w against box_h / src_h without going through floats
    let (width, height) = if box_w * src_h <= box_h * src_w {
        (box_w, (src_h * box_w + src_w / 2) / src_w)
    } else {
        ((src_w * box_h + src_h / 2) / src_h, box_h)
    };
    (
        width.clamp(1, u64::from(u32::MAX)) as u32,
        height.clamp(1, u64::from(u32::MAX)) as u32,
    )
}
