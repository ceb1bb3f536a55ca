//! Program-download sequences.
//!
//! A SigmaStudio default-image export is a flat list of transactions:
//! mostly register-block writes, with a handful of delay directives
//! (PLL lock / settle time) interleaved. The tables themselves are opaque
//! vendor data; this module only gives them a shape the engine can run.

use crate::DspError;

/// One entry of a device programming sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceOp<'a> {
    /// Write `data` to the words starting at `address`.
    WriteBlock {
        /// Starting word address.
        address: u16,
        /// Register data, usually borrowed from a vendor table.
        data: &'a [u8],
    },
    /// Stall the host (not the DSP) before the next entry.
    Delay {
        /// Delay duration in milliseconds.
        ms: u32,
    },
}

/// Decode the payload of a vendor delay directive into milliseconds.
///
/// Delay entries pack the duration least-significant byte first — the
/// reverse of register data. 1 to 4 payload bytes; anything longer is
/// [`DspError::InvalidArgument`].
// At most 4 bytes, so the shift never exceeds 24 bits.
#[allow(clippy::arithmetic_side_effects)]
pub fn delay_from_bytes(data: &[u8]) -> Result<u32, DspError> {
    if data.is_empty() || data.len() > 4 {
        return Err(DspError::InvalidArgument);
    }
    let mut ms: u32 = 0;
    for &b in data.iter().rev() {
        ms = (ms << 8) | u32::from(b);
    }
    Ok(ms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_byte_delay() {
        assert_eq!(delay_from_bytes(&[35]), Ok(35));
    }

    #[test]
    fn multi_byte_delay_is_least_significant_first() {
        // 0x01F4 = 500 ms, packed as [0xF4, 0x01].
        assert_eq!(delay_from_bytes(&[0xF4, 0x01]), Ok(500));
        assert_eq!(delay_from_bytes(&[0x00, 0x00, 0x01, 0x00]), Ok(0x0001_0000));
    }

    #[test]
    fn empty_and_oversized_payloads_are_rejected() {
        assert_eq!(delay_from_bytes(&[]), Err(DspError::InvalidArgument));
        assert_eq!(delay_from_bytes(&[0; 5]), Err(DspError::InvalidArgument));
    }
}
