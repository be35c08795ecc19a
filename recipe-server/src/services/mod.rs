//! Services
//!
//! - [`build_router`] - the layered HTTP application
//! - [`MediaStorage`] - uploaded file storage

pub mod app;
pub mod media;

pub use app::{build_app, build_router};
pub use media::MediaStorage;
