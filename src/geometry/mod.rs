pub mod crop;
pub mod kernel;
pub mod preset;
pub mod resolve;
