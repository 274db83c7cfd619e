use std::fmt;
use std::str::FromStr;

use crate::foundation::core::Dimensions;
use crate::foundation::error::CompareError;

/// Output/preview resolution presets.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum ResolutionPreset {
    #[serde(rename = "720p")]
    P720,
    #[default]
    #[serde(rename = "1080p")]
    P1080,
    #[serde(rename = "1440p")]
    P1440,
    #[serde(rename = "2160p")]
    P2160,
}

impl ResolutionPreset {
    pub fn lines(self) -> u32 {
        match self {
            Self::P720 => 720,
            Self::P1080 => 1080,
            Self::P1440 => 1440,
            Self::P2160 => 2160,
        }
    }

    /// 16:9 frame size of the preset.
    pub fn dimensions(self) -> Dimensions {
        let h = self.lines();
        Dimensions::new(h * 16 / 9, h)
    }

    /// Preset-sized dimensions that keep `reference`'s aspect ratio.
    ///
    /// Clips at 16:9 or narrower get the preset's height; wider clips get the preset's 16:9
    /// width. The derived side is rounded to an even number.
    pub fn fit(self, reference: Dimensions) -> Dimensions {
        let base = self.dimensions();
        if reference.width == 0 || reference.height == 0 {
            return base;
        }
        let (rw, rh) = (u64::from(reference.width), u64::from(reference.height));
        if rw * 9 > rh * 16 {
            let height = round_even(u64::from(base.width) * rh, rw);
            Dimensions::new(base.width, height.max(2))
        } else {
            let width = round_even(u64::from(base.height) * rw, rh);
            Dimensions::new(width.max(2), base.height)
        }
    }
}

/// `num / den` rounded to the nearest even integer.
fn round_even(num: u64, den: u64) -> u32 {
    let halves = (num + den) / (2 * den);
    (halves * 2) as u32
}

impl fmt::Display for ResolutionPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}p", self.lines())
    }
}

impl FromStr for ResolutionPreset {
    type Err = CompareError;

    /// Accepts any string mentioning one of the preset line counts (`1080`, `1080p`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Self::P720, Self::P1080, Self::P1440, Self::P2160]
            .into_iter()
            .find(|p| s.contains(&p.lines().to_string()))
            .ok_or_else(|| CompareError::UnknownResolutionPreset(s.to_string()))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/preset.rs"]
mod tests;
