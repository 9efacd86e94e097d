#![no_std]
#![doc = include_str!("../README.md")]

// Modules
mod board;
pub mod mic;
mod resources;

// Flatten
pub use board::*;
pub use resources::*;
