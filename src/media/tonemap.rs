use crate::clip::node::Clip;
use crate::foundation::error::CompareResult;

/// Maps HDR (BT.2020) clips to SDR for viewing.
///
/// No implementation ships with the crate; callers plug one in when comparing HDR material.
pub trait Tonemapper {
    fn tonemap(&self, clip: &Clip) -> CompareResult<Clip>;
}

impl<F> Tonemapper for F
where
    F: Fn(&Clip) -> CompareResult<Clip>,
{
    fn tonemap(&self, clip: &Clip) -> CompareResult<Clip> {
        self(clip)
    }
}
