pub mod frame;
pub mod node;
pub mod ops;
