//! Safeload: the device's mechanism for atomically committing a staged
//! parameter value into live operation without an audible glitch.
//!
//! A safeload is three ordinary register writes in a fixed order — stage
//! the data, stage the target address, then activate the slots. The DSP
//! copies the staged words into place on the next audio frame boundary.
//! The sequencer's only value over three manual engine calls is enforcing
//! that order and aborting at the first failed step; a second register
//! access overlapping the sequence would corrupt the staged write, so
//! callers must not interleave.

use crate::transport::Transport;
use crate::{Dsp, DspError};

/// The three fixed register addresses of a device image's safeload module.
///
/// Exported by the vendor tooling per image; shared read-only
/// configuration, not owned by any single request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SafeloadSlots {
    /// Staging data area (`MOD_SAFELOADMODULE_DATA_SAFELOAD0_ADDR`).
    pub data: u16,
    /// Staging address register (`MOD_SAFELOADMODULE_ADDRESS_SAFELOAD_ADDR`).
    pub address: u16,
    /// Slot-count / activation register (`MOD_SAFELOADMODULE_NUM_SAFELOAD_ADDR`).
    pub count: u16,
}

/// Number of safeload slots a device image provides.
pub const SAFELOAD_SLOT_COUNT: usize = 5;

/// Largest payload one safeload can stage: five 4-byte parameter words.
pub const MAX_SAFELOAD_LEN: usize = SAFELOAD_SLOT_COUNT * 4;

/// Activation vector written to the slot-count register, truncated to the
/// staged length.
const SLOT_VECTOR: [u8; SAFELOAD_SLOT_COUNT] = [1; SAFELOAD_SLOT_COUNT];

impl<T: Transport> Dsp<T> {
    /// Atomically commit `payload` to the device words at `address` via
    /// the safeload mechanism.
    ///
    /// Steps, executed unconditionally in this order:
    /// 1. write `payload` to the staging data area;
    /// 2. write `address` to the staging address register;
    /// 3. write the slot-activation vector to the slot-count register.
    ///
    /// A failure at any step aborts the sequence and returns that step's
    /// outcome; the error's address field identifies the step. There is no
    /// per-step retry — the caller re-runs the whole safeload if desired.
    pub fn safeload_write(&mut self, address: u16, payload: &[u8]) -> Result<(), DspError> {
        if payload.is_empty() || payload.len() > MAX_SAFELOAD_LEN {
            return Err(DspError::InvalidArgument);
        }
        let slots = self.config().safeload;
        self.write_block(slots.data, payload)?;
        self.write_integer(slots.address, i32::from(address))?;
        let vector_len = payload.len().min(SLOT_VECTOR.len());
        // get() cannot fail: vector_len <= SLOT_VECTOR.len().
        let vector = SLOT_VECTOR.get(..vector_len).ok_or(DspError::InvalidArgument)?;
        self.write_block(slots.count, vector)
    }
}
