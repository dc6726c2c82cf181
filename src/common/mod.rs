//! Shared primitives.
//!
//! - [`PageId`] / [`FrameId`] - Virtual page and physical frame numbers
//! - [`Error`] - Every failure the simulator reports
//! - [`config`] - Defaults and the aging counter layout

pub mod config;
pub mod error;
mod frame_id;
mod page_id;

pub use error::{Error, Result};
pub use frame_id::FrameId;
pub use page_id::PageId;
