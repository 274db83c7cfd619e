pub mod outdir;
pub mod sample;
pub mod tags;
