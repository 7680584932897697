//! Platform abstraction layer
//!
//! Turns host events into simulation input. Kept free of `web_sys` so the
//! same logic runs in the browser, the native runner and tests.

pub mod input;

pub use input::{InputState, Key};
