pub mod cache;
pub mod config;
pub mod error;
pub mod glyph;
pub mod pipeline;
pub mod raster;
pub mod sfd;
pub mod trace;
