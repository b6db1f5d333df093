//! Library components of the standards registry browser.

pub mod logging;
pub mod render;
