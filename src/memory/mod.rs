//! Simulated physical memory.
//!
//! Holds a fixed set of frames, each loaded with at most one page, and the
//! policies that decide which page leaves when a new one must come in.
//!
//! # Components
//! - [`FrameTable`] - The frames plus the page directory indexing them
//! - [`Frame`] - A slot holding one resident page
//! - [`PageDirectory`] - Page → frame map for O(1) residency checks
//! - [`replacer`] - Eviction policy implementations

mod directory;
mod frame;
mod frame_table;
pub mod replacer;

pub use directory::PageDirectory;
pub use frame::Frame;
pub use frame_table::FrameTable;
