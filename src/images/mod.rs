//! Image transform capability and output writing.
//!
//! The pipeline only needs "bytes in, bytes out at a given size", so the
//! transform sits behind the [`Transformer`] trait. [`ImageTransformer`] is
//! the `image`-crate backed implementation used by the service.

mod transform;
mod write;

pub use transform::{ImageTransformer, Transformer};
pub use write::write_atomic;
