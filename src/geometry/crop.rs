use crate::clip::node::Clip;
use crate::clip::ops;
use crate::foundation::core::{Dimensions, Rectangle};
use crate::foundation::error::{CompareError, CompareResult};

/// Modulus used when none is given; keeps margins friendly to 4:2:0 chroma.
pub const DEFAULT_MODULUS: u32 = 2;

/// Crop margins and the frame size they produce.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CropPlan {
    pub margins: Rectangle,
    pub dimensions: Dimensions,
}

/// Centered margins that bring `frame` down to (about) `target`.
///
/// Margins start at `ceil((frame - target) / 2)` per axis and only ever grow: `top` and
/// `bottom` are bumped together until `top` is a multiple of `modulus`, then `left` and
/// `right` until `right` is. The resulting frame may therefore be slightly smaller than
/// `target`.
pub fn crop_margins(frame: Dimensions, target: Dimensions, modulus: u32) -> CompareResult<CropPlan> {
    if modulus == 0 {
        return Err(CompareError::validation("crop modulus must be > 0"));
    }
    if target.width > frame.width || target.height > frame.height {
        return Err(CompareError::invalid_region(format!(
            "crop target {target} is larger than the {frame} frame"
        )));
    }

    let mut top = (frame.height - target.height).div_ceil(2);
    let mut bottom = top;
    let mut left = (frame.width - target.width).div_ceil(2);
    let mut right = left;

    while top % modulus != 0 {
        top += 1;
        bottom += 1;
    }
    // Only `right` is checked; `left` moves with it and stays equal.
    while right % modulus != 0 {
        right += 1;
        left += 1;
    }

    let margins = Rectangle::new(left, top, right, bottom);
    let dimensions = margins.interior(frame)?;
    Ok(CropPlan {
        margins,
        dimensions,
    })
}

/// Crop `clip` to `target` using [`crop_margins`].
pub fn crop_to(clip: &Clip, target: Dimensions, modulus: u32) -> CompareResult<Clip> {
    let plan = crop_margins(clip.dimensions(), target, modulus)?;
    let m = plan.margins;
    tracing::info!(
        left = m.left,
        right = m.right,
        top = m.top,
        bottom = m.bottom,
        dimensions = %plan.dimensions,
        "crop values"
    );
    ops::crop(clip, plan.margins)
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/crop.rs"]
mod tests;
