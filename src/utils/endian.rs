// src/utils/endian.rs
use byteorder::{BigEndian, ByteOrder, NativeEndian};

use crate::types::BinaryByteOrder;

/// Convert the in-memory bytes of a binary field to their on-disk order.
///
/// In legacy mode only 2- and 4-byte values are swapped; all other widths
/// pass through untouched, including 8-byte values.
pub fn to_disk_order(raw: &[u8], order: BinaryByteOrder) -> Vec<u8> {
    let mut out = raw.to_vec();
    match (order, raw.len()) {
        (_, 2) => BigEndian::write_u16(&mut out, NativeEndian::read_u16(raw)),
        (_, 4) => BigEndian::write_u32(&mut out, NativeEndian::read_u32(raw)),
        (BinaryByteOrder::Network, 8) => {
            BigEndian::write_u64(&mut out, NativeEndian::read_u64(raw))
        }
        _ => {}
    }
    out
}

/// Inverse of [`to_disk_order`], used by the reader.
pub fn from_disk_order(disk: &[u8], order: BinaryByteOrder) -> Vec<u8> {
    let mut out = disk.to_vec();
    match (order, disk.len()) {
        (_, 2) => NativeEndian::write_u16(&mut out, BigEndian::read_u16(disk)),
        (_, 4) => NativeEndian::write_u32(&mut out, BigEndian::read_u32(disk)),
        (BinaryByteOrder::Network, 8) => {
            NativeEndian::write_u64(&mut out, BigEndian::read_u64(disk))
        }
        _ => {}
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swaps_short_and_int() {
        let raw = 0x0102u16.to_ne_bytes();
        assert_eq!(to_disk_order(&raw, BinaryByteOrder::Legacy), vec![1, 2]);

        let raw = 0x0102_0304u32.to_ne_bytes();
        assert_eq!(to_disk_order(&raw, BinaryByteOrder::Legacy), vec![1, 2, 3, 4]);
    }

    #[test]
    fn legacy_copies_wide_values_verbatim() {
        let raw = 0x0102_0304_0506_0708u64.to_ne_bytes();
        assert_eq!(to_disk_order(&raw, BinaryByteOrder::Legacy), raw.to_vec());
        assert_eq!(
            to_disk_order(&raw, BinaryByteOrder::Network),
            vec![1, 2, 3, 4, 5, 6, 7, 8]
        );
    }

    #[test]
    fn odd_widths_are_untouched() {
        let rgb = [0xff, 0x10, 0x00];
        assert_eq!(to_disk_order(&rgb, BinaryByteOrder::Network), rgb.to_vec());
        assert_eq!(from_disk_order(&rgb, BinaryByteOrder::Legacy), rgb.to_vec());
    }
}
