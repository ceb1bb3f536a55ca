//! Fixed-point parameter codec.
//!
//! SigmaDSP parameters travel as signed fixed-point integers with 23
//! fractional bits; the vendor framework scales by `1 << 23` for every
//! family, including the Sigma300 "8.24" export format. Sigma100/200
//! additionally narrow the result to the 28-bit 5.23 wire width by
//! masking — out-of-range values wrap in two's complement rather than
//! saturating, and the device firmware relies on that exact wraparound.

use crate::DeviceFamily;

/// Fractional bits of the wire format. Resolution is 2^-23 ≈ 1.2e-7.
pub const FRACTIONAL_BITS: u32 = 23;

const SCALE: f64 = (1u32 << FRACTIONAL_BITS) as f64;

/// Convert a parameter value to the device fixed-point representation.
///
/// Truncates toward zero (no rounding) and, for Sigma100/200, masks to the
/// 28-bit wire width, silently discarding high-order bits. Both behaviors
/// match the device firmware's expectations and must not be "improved".
#[must_use]
// f64 -> i32 truncation toward zero is the wire format; float scaling cannot panic.
#[allow(clippy::cast_possible_truncation, clippy::arithmetic_side_effects)]
pub fn encode(value: f64, family: DeviceFamily) -> i32 {
    let raw = (value * SCALE) as i32;
    match family.fixpoint_mask() {
        Some(mask) => raw & mask,
        None => raw,
    }
}

/// Reassemble a big-endian 4-byte register value and scale it back to a
/// parameter value.
#[must_use]
#[allow(clippy::arithmetic_side_effects)]
pub fn decode(bytes: [u8; 4]) -> f64 {
    f64::from(i32::from_be_bytes(bytes)) / SCALE
}

/// Serialize a fixed-point value for the wire: big-endian, MSB first.
#[must_use]
pub fn to_bytes(value: i32) -> [u8; 4] {
    value.to_be_bytes()
}

#[cfg(test)]
#[allow(clippy::arithmetic_side_effects)]
mod tests {
    use super::*;

    #[test]
    fn half_encodes_to_0x400000() {
        assert_eq!(encode(0.5, DeviceFamily::Sigma300), 0x0040_0000);
        assert_eq!(to_bytes(0x0040_0000), [0x00, 0x40, 0x00, 0x00]);
    }

    #[test]
    fn decode_recovers_half_exactly() {
        assert_eq!(decode([0x00, 0x40, 0x00, 0x00]), 0.5);
    }

    #[test]
    fn round_trip_within_one_lsb() {
        for &v in &[0.0, 0.1, -0.25, 1.0, -1.0, 3.999, -3.999] {
            let back = decode(to_bytes(encode(v, DeviceFamily::Sigma300)));
            let resolution = 1.0 / f64::from(1u32 << FRACTIONAL_BITS);
            assert!(
                (back - v).abs() <= resolution,
                "round trip of {v} gave {back}"
            );
        }
    }

    #[test]
    fn conversion_truncates_toward_zero() {
        // 1.5 LSB above/below zero must drop the half, not round it.
        let pos = 1.5 / f64::from(1u32 << FRACTIONAL_BITS);
        assert_eq!(encode(pos, DeviceFamily::Sigma300), 1);
        assert_eq!(encode(-pos, DeviceFamily::Sigma300), -1);
    }

    #[test]
    fn sigma100_masks_negative_values_to_28_bits() {
        // -0.5 is 0xFFC0_0000 as i32; the 5.23 wire format keeps the low
        // 28 bits only.
        assert_eq!(encode(-0.5, DeviceFamily::Sigma100), 0x0FC0_0000);
        // Sigma300 carries the full 32-bit two's-complement value.
        assert_eq!(encode(-0.5, DeviceFamily::Sigma300), -0x0040_0000);
    }

    #[test]
    fn sigma100_out_of_range_wraps_rather_than_saturating() {
        // 40.0 exceeds the 5.23 range of [-16, 16); 40 * 2^23 = 0x1400_0000
        // wraps to 0x0400_0000 — the same wire value as 8.0.
        assert_eq!(
            encode(40.0, DeviceFamily::Sigma100),
            encode(8.0, DeviceFamily::Sigma100)
        );
    }

    #[test]
    fn sigma200_uses_the_same_mask_as_sigma100() {
        assert_eq!(
            encode(-1.0, DeviceFamily::Sigma200),
            encode(-1.0, DeviceFamily::Sigma100)
        );
    }
}
