//! Register access engine: the one place bursts are actually driven onto
//! the bus.
//!
//! All operations are blocking and fail-fast. A multi-burst write stops at
//! the first transport failure and reports it with the failing burst's
//! address; bursts already accepted by the device are not rolled back —
//! whether a partial write leaves the device safe is the caller's call, as
//! is any retry policy. The engine performs no internal locking: callers
//! sharing a device handle must serialize access themselves, since an
//! overlapping safeload sequence would corrupt the staged write.

use crate::chunk::chunk;
use crate::program::SequenceOp;
use crate::transport::Transport;
use crate::{fixpoint, DeviceConfig, DspError};

/// Register-programming handle for one SigmaDSP device.
pub struct Dsp<T> {
    transport: T,
    config: DeviceConfig,
}

impl<T: Transport> Dsp<T> {
    /// Pair a transport with a device configuration.
    pub fn new(transport: T, config: DeviceConfig) -> Self {
        Self { transport, config }
    }

    /// The device configuration this engine was built with.
    #[must_use]
    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    /// Consume the engine and return the transport.
    pub fn release(self) -> T {
        self.transport
    }

    /// Write `payload` to the device words starting at `address`,
    /// splitting into word-aligned bursts as needed.
    pub fn write_block(&mut self, address: u16, payload: &[u8]) -> Result<(), DspError> {
        let bursts = chunk(
            self.config.family,
            address,
            payload,
            self.config.max_burst_len,
        )?;
        #[cfg(feature = "defmt")]
        defmt::trace!("write_block addr={=u16:#x} len={=usize}", address, payload.len());
        for burst in bursts {
            self.transport
                .write_burst(burst.address, burst.data)
                .map_err(|e| e.at(burst.address))?;
        }
        Ok(())
    }

    /// Write a 32-bit integer register value (big-endian on the wire).
    pub fn write_integer(&mut self, address: u16, value: i32) -> Result<(), DspError> {
        self.write_block(address, &fixpoint::to_bytes(value))
    }

    /// Write a parameter value in the device's fixed-point format.
    pub fn write_float(&mut self, address: u16, value: f64) -> Result<(), DspError> {
        self.write_integer(address, fixpoint::encode(value, self.config.family))
    }

    /// Fill `buf` from the device words starting at `address` in a single
    /// read transaction. A short read is [`DspError::DataMismatch`].
    pub fn read_block(&mut self, address: u16, buf: &mut [u8]) -> Result<(), DspError> {
        if buf.is_empty() {
            return Err(DspError::InvalidArgument);
        }
        self.transport
            .read_burst(address, buf)
            .map_err(|e| e.at(address))
    }

    /// Read `len` bytes (1..=4) and reassemble them big-endian.
    ///
    /// The length is validated before any transport activity.
    // len <= 4, so the shift never exceeds 24 bits.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn read_integer(&mut self, address: u16, len: usize) -> Result<i32, DspError> {
        if len == 0 || len > 4 {
            return Err(DspError::InvalidArgument);
        }
        let mut bytes = [0u8; 4];
        let buf = bytes.get_mut(..len).ok_or(DspError::InvalidArgument)?;
        self.transport
            .read_burst(address, buf)
            .map_err(|e| e.at(address))?;
        let mut value: i32 = 0;
        for &b in bytes.iter().take(len) {
            value = (value << 8) | i32::from(b);
        }
        Ok(value)
    }

    /// Read a 4-byte parameter and decode it from fixed point.
    pub fn read_float(&mut self, address: u16) -> Result<f64, DspError> {
        let mut bytes = [0u8; 4];
        self.transport
            .read_burst(address, &mut bytes)
            .map_err(|e| e.at(address))?;
        Ok(fixpoint::decode(bytes))
    }

    /// Execute a program-download sequence (the shape of a SigmaStudio
    /// default-image export: register bursts interleaved with settle
    /// delays), stopping at the first failure.
    pub fn run_sequence(&mut self, ops: &[SequenceOp<'_>]) -> Result<(), DspError> {
        for op in ops {
            match *op {
                SequenceOp::WriteBlock { address, data } => self.write_block(address, data)?,
                SequenceOp::Delay { ms } => self.transport.delay_ms(ms),
            }
        }
        Ok(())
    }
}
