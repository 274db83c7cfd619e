use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::clip::node::Clip;
use crate::foundation::error::{CompareError, CompareResult};

/// Frames at the very end of a clip are never sampled; decoders tend to be unreliable there.
pub const END_GUARD_FRAMES: u64 = 5;

/// Sorted, duplicate-free frame indices to take screenshots at.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct FrameSample(Vec<u64>);

impl FrameSample {
    /// Build a sample from user-given frame numbers.
    ///
    /// Frames are sorted and deduplicated; any frame at or past `frame_count` is
    /// [`CompareError::FrameOutOfBounds`].
    pub fn from_explicit(frames: &[u64], frame_count: u64) -> CompareResult<Self> {
        if let Some(&frame) = frames.iter().find(|&&f| f >= frame_count) {
            return Err(CompareError::FrameOutOfBounds { frame, frame_count });
        }
        let mut frames = frames.to_vec();
        frames.sort_unstable();
        frames.dedup();
        Ok(Self(frames))
    }

    pub fn as_slice(&self) -> &[u64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.0.iter().copied()
    }

    pub fn into_vec(self) -> Vec<u64> {
        self.0
    }
}

/// Draws bounded random frame samples.
#[derive(Debug)]
pub struct RandomFrameSampler<R = StdRng> {
    rng: R,
}

impl RandomFrameSampler<StdRng> {
    /// Sampler seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible sampler.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomFrameSampler<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: rand::Rng> RandomFrameSampler<R> {
    pub fn from_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Sample `count` frames in `[start, stop)` that exist in every clip.
    pub fn sample(
        &mut self,
        clips: &[Clip],
        start: u64,
        stop: u64,
        count: u64,
    ) -> CompareResult<FrameSample> {
        let counts = clips.iter().map(Clip::frame_count).collect::<Vec<_>>();
        self.sample_counts(&counts, start, stop, count)
    }

    /// Like [`RandomFrameSampler::sample`], given only the clips' frame counts.
    ///
    /// The upper bound is clamped to `frame_count - END_GUARD_FRAMES` of the shortest clip.
    pub fn sample_counts(
        &mut self,
        frame_counts: &[u64],
        start: u64,
        stop: u64,
        count: u64,
    ) -> CompareResult<FrameSample> {
        let frame_count = frame_counts
            .iter()
            .copied()
            .min()
            .ok_or_else(|| CompareError::validation("cannot sample frames from zero clips"))?;
        if start > frame_count {
            return Err(CompareError::StartOutOfBounds { start, frame_count });
        }

        let stop = stop.min(frame_count.saturating_sub(END_GUARD_FRAMES));
        let available = stop.saturating_sub(start);
        if count > available {
            return Err(CompareError::SampleSizeTooLarge { count, available });
        }

        let length = usize::try_from(available)
            .map_err(|_| CompareError::validation("sample range too large"))?;
        let amount = usize::try_from(count)
            .map_err(|_| CompareError::validation("sample size too large"))?;
        let mut frames = rand::seq::index::sample(&mut self.rng, length, amount)
            .into_iter()
            .map(|i| start + i as u64)
            .collect::<Vec<_>>();
        frames.sort_unstable();

        tracing::debug!(start, stop, count, "sampled random frames");
        Ok(FrameSample(frames))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/output/sample.rs"]
mod tests;
