#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for I/O operations.
///
/// Defines [`IoError`](error::IoError) variants for file access and encoding/decoding failures.
pub mod error;

/// High-level image reading and writing functions.
///
/// Images are exchanged as four channel float buffers with top-down rows.
pub mod functional;

pub use error::IoError;
pub use functional::{read_image_rgba32f, write_image_rgba32f};
