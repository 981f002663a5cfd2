pub mod live;
pub mod simulation;
