pub mod levels;
pub mod rekt;
