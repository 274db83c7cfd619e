pub mod decode;
pub mod ffmpeg;
pub mod overlay;
pub mod preview;
pub mod screenshot;
pub mod tonemap;
