//! Burst chunking: splitting a byte payload into bus-sized transactions
//! without ever splitting a device word across two of them.
//!
//! The device auto-increments its word address inside a burst, so each
//! burst carries only its starting address. Between bursts the cursor
//! address advances by one per *word* transmitted, which is why chunking
//! must consult the word depth at every cursor position — a payload may
//! cross from 4-byte data memory into 2-byte control registers mid-way.

use crate::{DeviceFamily, DspError};

/// One bus transaction's worth of payload plus its starting word address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Burst<'a> {
    /// Word address of the first byte of `data`.
    pub address: u16,
    /// Payload bytes, borrowed from the caller's buffer.
    pub data: &'a [u8],
}

/// Split `payload` starting at `address` into bursts of at most
/// `max_burst_len` bytes, never splitting a word.
///
/// Returns [`DspError::InvalidArgument`] for an empty payload, or when the
/// payload needs splitting but `max_burst_len` cannot hold even one word
/// of this family's widest memory region.
///
/// Postconditions, for every accepted call: the bursts concatenate to
/// exactly `payload`, their starting addresses strictly increase, and no
/// burst exceeds `max_burst_len`.
pub fn chunk<'a>(
    family: DeviceFamily,
    address: u16,
    payload: &'a [u8],
    max_burst_len: usize,
) -> Result<Bursts<'a>, DspError> {
    if payload.is_empty() {
        return Err(DspError::InvalidArgument);
    }
    let single = payload.len() < max_burst_len;
    if !single && max_burst_len < family.max_word_depth() {
        return Err(DspError::InvalidArgument);
    }
    Ok(Bursts {
        family,
        payload,
        max_burst_len,
        single,
        cursor_addr: address,
        offset: 0,
    })
}

/// Iterator over the bursts of one chunked payload. See [`chunk`].
#[derive(Debug, Clone)]
pub struct Bursts<'a> {
    family: DeviceFamily,
    payload: &'a [u8],
    max_burst_len: usize,
    /// Fast path: the whole payload fits one transaction, depth not consulted.
    single: bool,
    cursor_addr: u16,
    offset: usize,
}

impl<'a> Iterator for Bursts<'a> {
    type Item = Burst<'a>;

    // Cursor invariant: offset <= payload.len(), and every slice below is
    // bounded by it.
    #[allow(clippy::arithmetic_side_effects, clippy::indexing_slicing)]
    fn next(&mut self) -> Option<Burst<'a>> {
        if self.offset >= self.payload.len() {
            return None;
        }
        if self.single {
            self.offset = self.payload.len();
            return Some(Burst {
                address: self.cursor_addr,
                data: self.payload,
            });
        }

        let burst_addr = self.cursor_addr;
        let start = self.offset;
        let mut used = 0usize;
        while self.offset < self.payload.len() {
            let depth = self.family.word_depth(self.cursor_addr);
            if used + depth > self.max_burst_len {
                break;
            }
            // A whole word, or whatever tail is left of the final word.
            let take = depth.min(self.payload.len() - self.offset);
            self.offset += take;
            used += take;
            self.cursor_addr = self.cursor_addr.wrapping_add(1);
        }
        Some(Burst {
            address: burst_addr,
            data: &self.payload[start..self.offset],
        })
    }
}

#[cfg(test)]
#[allow(clippy::indexing_slicing, clippy::arithmetic_side_effects)]
mod tests {
    use super::*;

    fn collect(
        family: DeviceFamily,
        address: u16,
        payload: &[u8],
        max_burst_len: usize,
    ) -> Vec<(u16, Vec<u8>)> {
        chunk(family, address, payload, max_burst_len)
            .map(|bursts| bursts.map(|b| (b.address, b.data.to_vec())).collect())
            .unwrap_or_default()
    }

    #[test]
    fn payload_below_limit_is_one_burst() {
        let payload = [0xAB; 20];
        let bursts = collect(DeviceFamily::Sigma300, 0x0100, &payload, 30);
        assert_eq!(bursts, vec![(0x0100, payload.to_vec())]);
    }

    #[test]
    fn control_register_payload_splits_on_2_byte_words() {
        // 20 bytes of 2-byte control registers at 0xF000 with 8-byte bursts:
        // 8 + 8 + 4 at 0xF000, 0xF004, 0xF008.
        let payload: Vec<u8> = (0..20).collect();
        let bursts = collect(DeviceFamily::Sigma300, 0xF000, &payload, 8);
        assert_eq!(bursts.len(), 3);
        assert_eq!(bursts[0], (0xF000, (0..8).collect()));
        assert_eq!(bursts[1], (0xF004, (8..16).collect()));
        assert_eq!(bursts[2], (0xF008, (16..20).collect()));
    }

    #[test]
    fn words_are_never_split_across_bursts() {
        // 4-byte words, 10-byte limit: only two whole words fit per burst.
        let payload: Vec<u8> = (0..16).collect();
        let bursts = collect(DeviceFamily::Sigma300, 0x2000, &payload, 10);
        assert_eq!(bursts.len(), 2);
        assert_eq!(bursts[0].1.len(), 8);
        assert_eq!(bursts[1].0, 0x2002);
        assert_eq!(bursts[1].1.len(), 8);
    }

    #[test]
    fn depth_change_mid_payload_is_honored() {
        // Two 4-byte words at 0xEFFE/0xEFFF, then 2-byte control registers.
        let payload: Vec<u8> = (0..16).collect();
        let bursts = collect(DeviceFamily::Sigma300, 0xEFFE, &payload, 12);
        assert_eq!(bursts.len(), 2);
        assert_eq!(bursts[0], (0xEFFE, (0..12).collect()));
        assert_eq!(bursts[1], (0xF002, (12..16).collect()));
    }

    #[test]
    fn tail_shorter_than_a_word_is_still_emitted() {
        // Sigma100 program RAM words are 5 bytes; 12 bytes with an 11-byte
        // limit leaves a 2-byte tail.
        let payload: Vec<u8> = (0..12).collect();
        let bursts = collect(DeviceFamily::Sigma100, 0x0400, &payload, 11);
        assert_eq!(bursts.len(), 2);
        assert_eq!(bursts[0], (0x0400, (0..10).collect()));
        assert_eq!(bursts[1], (0x0402, (10..12).collect()));
    }

    #[test]
    fn concatenation_reproduces_payload() {
        let payload: Vec<u8> = (0..97).map(|i| i as u8).collect();
        let bursts = collect(DeviceFamily::Sigma300, 0xEFF0, &payload, 14);
        let rejoined: Vec<u8> = bursts.iter().flat_map(|(_, d)| d.clone()).collect();
        assert_eq!(rejoined, payload);
        for window in bursts.windows(2) {
            assert!(window[0].0 < window[1].0, "addresses must strictly increase");
        }
        for (_, data) in &bursts {
            assert!(!data.is_empty() && data.len() <= 14);
        }
    }

    #[test]
    fn empty_payload_is_rejected() {
        assert_eq!(
            chunk(DeviceFamily::Sigma300, 0, &[], 30).err(),
            Some(DspError::InvalidArgument)
        );
    }

    #[test]
    fn limit_below_word_depth_is_rejected_when_splitting_is_needed() {
        let payload = [0u8; 8];
        assert_eq!(
            chunk(DeviceFamily::Sigma300, 0x2000, &payload, 3).err(),
            Some(DspError::InvalidArgument)
        );
        // ...but the fast path does not consult depth at all.
        assert!(chunk(DeviceFamily::Sigma300, 0x2000, &[0u8; 2], 3).is_ok());
    }
}
