pub mod algorithms;
pub mod animation;
pub mod config;
pub mod grid;
pub mod heap;
pub mod simulation;
pub mod statistics;
