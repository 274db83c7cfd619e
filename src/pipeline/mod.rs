pub mod compare;
pub mod config;
pub mod load;
pub mod prepare;
pub mod preview;
pub mod screenshots;
pub mod titles;
