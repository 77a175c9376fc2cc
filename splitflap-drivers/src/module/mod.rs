//! Split-flap module drivers

pub mod split_flap;

pub use split_flap::{HomeError, SplitFlapModule};
