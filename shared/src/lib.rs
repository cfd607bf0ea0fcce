#![no_std]

//! kmon shared library
//!
//! Constants used by the monitor kernel crate and its tests: port numbers,
//! memory layout and the monitor's fixed buffer limits.

pub mod constants;
