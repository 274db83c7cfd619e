//! Region-masked processing ("rekt").
//!
//! [`rekt`] runs a transform over a rectangular region of a clip only. The frame is split into
//! slices around the region, the transform sees just the interior slice, and the untouched
//! slices are stacked back around its output. Pixels outside the region are therefore copied
//! straight from the input and stay bit-identical whatever the transform does.

use crate::clip::node::Clip;
use crate::clip::ops;
use crate::foundation::core::Rectangle;
use crate::foundation::error::{CompareError, CompareResult};

/// A `Clip -> Clip` transform supplied by the caller.
///
/// Implemented for every `Fn(Clip) -> CompareResult<Clip>`, so closures can be passed directly.
/// The returned clip must keep the input's dimensions and frame count.
pub trait ClipTransform {
    /// Transform `clip`.
    fn apply(&self, clip: Clip) -> CompareResult<Clip>;
}

impl<F> ClipTransform for F
where
    F: Fn(Clip) -> CompareResult<Clip>,
{
    fn apply(&self, clip: Clip) -> CompareResult<Clip> {
        self(clip)
    }
}

/// Apply `transform` to the part of `clip` inside `region`.
///
/// - horizontal margins: the middle column band is cut out (and, with vertical margins too,
///   trimmed to its interior rows before the transform and restored afterwards), then stacked
///   between the untouched left and right slices;
/// - vertical margins only: the interior rows are transformed and the original top and bottom
///   rows stacked back around them;
/// - no margins: `transform` is applied to the whole clip.
///
/// Fails with [`CompareError::InvalidRegion`] when the margins leave no pixels, and with
/// [`CompareError::TransformGeometry`] when `transform` changes the size of what it was given.
pub fn rekt(clip: &Clip, region: Rectangle, transform: &dyn ClipTransform) -> CompareResult<Clip> {
    let full = clip.dimensions();
    region.interior(full)?;

    if region.is_zero() {
        return apply_checked(transform, clip.clone());
    }
    if !region.has_horizontal() {
        return process_rows(clip, region.top, region.bottom, transform);
    }

    let band = ops::crop(clip, Rectangle::new(region.left, 0, region.right, 0))?;
    let band = if region.has_vertical() {
        process_rows(&band, region.top, region.bottom, transform)?
    } else {
        apply_checked(transform, band)?
    };

    let mut slices = Vec::with_capacity(3);
    if region.left > 0 {
        slices.push(ops::crop(
            clip,
            Rectangle::new(0, 0, full.width - region.left, 0),
        )?);
    }
    slices.push(band);
    if region.right > 0 {
        slices.push(ops::crop(
            clip,
            Rectangle::new(full.width - region.right, 0, 0, 0),
        )?);
    }
    ops::stack_horizontal(&slices)
}

fn process_rows(
    clip: &Clip,
    top: u32,
    bottom: u32,
    transform: &dyn ClipTransform,
) -> CompareResult<Clip> {
    let height = clip.height();
    let interior = ops::crop(clip, Rectangle::new(0, top, 0, bottom))?;
    let processed = apply_checked(transform, interior)?;

    let mut slices = Vec::with_capacity(3);
    if top > 0 {
        slices.push(ops::crop(clip, Rectangle::new(0, 0, 0, height - top))?);
    }
    slices.push(processed);
    if bottom > 0 {
        slices.push(ops::crop(clip, Rectangle::new(0, height - bottom, 0, 0))?);
    }
    ops::stack_vertical(&slices)
}

fn apply_checked(transform: &dyn ClipTransform, input: Clip) -> CompareResult<Clip> {
    let expected = input.dimensions();
    let frame_count = input.frame_count();

    let out = transform.apply(input)?;
    if out.dimensions() != expected {
        return Err(CompareError::TransformGeometry {
            expected,
            found: out.dimensions(),
        });
    }
    if out.frame_count() != frame_count {
        return Err(CompareError::validation(format!(
            "masked transform changed frame count from {frame_count} to {}",
            out.frame_count()
        )));
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/mask/rekt.rs"]
mod tests;
