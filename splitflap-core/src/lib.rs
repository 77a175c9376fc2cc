//! Board-agnostic core logic for split-flap display modules
//!
//! This crate contains all module logic that does not touch the bus:
//!
//! - Drum charsets and the character to step-position table
//! - Four-phase coil patterns and forward-only position tracking
//! - The bus fault latch
//! - Module configuration and the typed settings layer

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod charset;
pub mod config;
pub mod motion;
pub mod safety;
