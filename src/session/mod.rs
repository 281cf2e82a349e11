pub mod input;
pub mod level;
