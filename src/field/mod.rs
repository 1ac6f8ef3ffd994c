//! Fixed-width field packing.
//!
//! Every NITF header value occupies a fixed number of bytes. Text is
//! space filled on the right, numbers are zero filled on the left and binary
//! values are byte-swapped to the on-disk order.

mod packer;
mod reader;
pub mod widths;

pub use packer::{pad, FieldWriter};
pub use reader::FieldReader;
pub use widths::FieldDef;
