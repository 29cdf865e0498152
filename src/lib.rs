pub mod config;
pub mod diff;
pub mod error;
pub mod navigation;
pub mod page;
pub mod pipeline;
#[cfg(feature = "pdf")]
pub mod render;
pub mod source;
