use crate::clip::node::Clip;
use crate::clip::ops;
use crate::foundation::core::Rectangle;
use crate::foundation::error::{CompareError, CompareResult};
use crate::mask::rekt::rekt;

/// Which kind of line a [`LineFix`] targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Line {
    Row,
    Column,
}

/// Brightness adjustment for one row or column.
///
/// `value` ranges over -100..=100: negative darkens, positive brightens.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LineFix {
    pub line: Line,
    pub index: u32,
    pub value: i32,
}

impl LineFix {
    pub fn row(index: u32, value: i32) -> Self {
        Self {
            line: Line::Row,
            index,
            value,
        }
    }

    pub fn column(index: u32, value: i32) -> Self {
        Self {
            line: Line::Column,
            index,
            value,
        }
    }
}

/// Nominal range the levels remap works within.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LevelsRange {
    pub min: u8,
    pub max: u8,
}

impl Default for LevelsRange {
    fn default() -> Self {
        Self { min: 16, max: 235 }
    }
}

/// How a [`LineFix`] remaps pixel values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelsMode {
    /// Clamped linear remap within `range`, applied to every value.
    Linear(LevelsRange),
    /// Limited-range remap that fades back to the input over the 10 values above `low` and
    /// below `high`. Values at or below `low`, or at or above `high`, pass through unchanged.
    Protected { low: u8, high: u8 },
}

impl Default for LevelsMode {
    fn default() -> Self {
        Self::Protected { low: 16, high: 235 }
    }
}

/// Fix dirty lines by brightening or darkening single rows/columns.
///
/// Each fix runs through [`rekt`] on a one-pixel-wide region, so every other pixel is left
/// untouched. Fixes are applied in order.
pub fn rekt_levels(clip: &Clip, fixes: &[LineFix], mode: LevelsMode) -> CompareResult<Clip> {
    let mut out = clip.clone();
    for fix in fixes {
        let lut = levels_lut(fix.value, mode)?;
        let region = line_region(&out, *fix)?;
        let apply = move |c: Clip| -> CompareResult<Clip> {
            Ok(ops::map_frames(&c, c.dimensions(), move |mut f, _| {
                for px in f.data.chunks_exact_mut(4) {
                    px[0] = lut[px[0] as usize];
                    px[1] = lut[px[1] as usize];
                    px[2] = lut[px[2] as usize];
                }
                Ok(f)
            }))
        };
        out = rekt(&out, region, &apply)?;
    }
    Ok(out)
}

fn line_region(clip: &Clip, fix: LineFix) -> CompareResult<Rectangle> {
    let (extent, axis) = match fix.line {
        Line::Row => (clip.height(), "row"),
        Line::Column => (clip.width(), "column"),
    };
    if fix.index >= extent {
        return Err(CompareError::invalid_region(format!(
            "{axis} {} is outside a clip of {}",
            fix.index,
            clip.dimensions()
        )));
    }
    let before = fix.index;
    let after = extent - fix.index - 1;
    Ok(match fix.line {
        Line::Row => Rectangle::new(0, before, 0, after),
        Line::Column => Rectangle::new(before, 0, after, 0),
    })
}

fn levels_lut(value: i32, mode: LevelsMode) -> CompareResult<[u8; 256]> {
    if !(-100..=100).contains(&value) {
        return Err(CompareError::validation(format!(
            "levels adjustment {value} must be between -100 and 100"
        )));
    }
    let mut lut = [0u8; 256];
    for (x, slot) in lut.iter_mut().enumerate() {
        *slot = x as u8;
    }
    if value == 0 {
        return Ok(lut);
    }
    match mode {
        LevelsMode::Linear(range) => linear_lut(&mut lut, value, range)?,
        LevelsMode::Protected { low, high } => protected_lut(&mut lut, value, low, high),
    }
    Ok(lut)
}

/// Darkening maps `[min, max]` onto `[min, max + value]`; brightening maps
/// `[min, max - value]` onto `[min, max]`.
fn linear_lut(lut: &mut [u8; 256], value: i32, range: LevelsRange) -> CompareResult<()> {
    let (min, max) = (i32::from(range.min), i32::from(range.max));
    let (max_in, max_out) = if value < 0 {
        (max, max + value)
    } else {
        (max - value, max)
    };
    if max_in <= min || max_out < min {
        return Err(CompareError::validation(format!(
            "levels adjustment {value} collapses the {min}..={max} range"
        )));
    }

    for (x, slot) in lut.iter_mut().enumerate() {
        let x = (x as i32).clamp(min, max_in);
        let scaled = (x - min) * (max_out - min);
        let span = max_in - min;
        let v = min + (scaled + span / 2) / span;
        *slot = v.clamp(0, 255) as u8;
    }
    Ok(())
}

/// One adjustment step is 2.19 code values, so +-100 spans the whole 16..=235 range.
fn protected_lut(lut: &mut [u8; 256], value: i32, low: u8, high: u8) {
    let step = f64::from(value) * 2.19;
    let (low, high) = (f64::from(low), f64::from(high));
    let fade = |t: f64| (t / 10.0).clamp(0.0, 1.0);

    for (x, slot) in lut.iter_mut().enumerate() {
        let x = x as f64;
        let adjusted = if value > 0 {
            let mut span = 219.0 - step;
            if span <= 0.0 {
                span = 0.01;
            }
            if x <= 16.0 {
                16.0 / span * 219.0
            } else {
                (x - 16.0) / span * 219.0 + 16.0
            }
        } else if x <= 16.0 {
            16.0 / 219.0 * (219.0 + step)
        } else {
            (x - 16.0) / 219.0 * (219.0 + step) + 16.0
        };

        let below_high = adjusted * fade(high - x) + x * fade(x - (high - 10.0));
        let v = below_high * fade(x - low) + x * fade(low + 10.0 - x);
        *slot = v.round().clamp(0.0, 255.0) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mask/levels.rs"]
mod tests;
