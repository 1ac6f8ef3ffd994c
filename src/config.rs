//! Writer configuration.

use crate::types::BinaryByteOrder;

/// Options controlling how a [`NitfWriter`](crate::NitfWriter) emits bytes.
#[derive(Debug, Clone)]
pub struct WriterOptions {
    /// Byte order applied to binary fields (LUTs excluded, they are opaque).
    pub binary_byte_order: BinaryByteOrder,

    /// Capacity of the `BufWriter` used by `NitfWriter::create`.
    pub buffer_capacity: usize,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            binary_byte_order: BinaryByteOrder::Legacy,
            buffer_capacity: 64 * 1024, // 64 KB
        }
    }
}

impl WriterOptions {
    /// Creates options with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the binary field byte order.
    #[must_use]
    pub const fn binary_byte_order(mut self, order: BinaryByteOrder) -> Self {
        self.binary_byte_order = order;
        self
    }

    /// Sets the output buffer capacity.
    #[must_use]
    pub const fn buffer_capacity(mut self, capacity: usize) -> Self {
        self.buffer_capacity = capacity;
        self
    }
}
