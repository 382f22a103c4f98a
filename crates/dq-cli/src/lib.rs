//! Library components for the data-quality CLI.

pub mod logging;
