pub mod interpolation;
pub mod ranking;
