//! Bus transport seam: one burst = one bus transaction.
//!
//! The engine never touches a bus directly; it drives a [`Transport`],
//! selected at construction time. Two adapters are provided for the wire
//! protocols SigmaDSP devices actually speak:
//!
//! - [`I2cTransport`]: address high byte, address low byte, payload —
//!   all in a single I2C write; reads use a repeated-start write-read.
//! - [`SpiTransport`]: opcode byte (`0x00` write / `0x01` read), address
//!   high/low, payload — one chip-select assertion per burst.
//!
//! Timeouts are the transport's concern; this crate only classifies what
//! the adapter reports. No retries happen at this layer.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{self, I2c};
use embedded_hal::spi::{self, SpiDevice};

use crate::DspError;

/// Transport-level failure, before the engine attaches the failing address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError {
    /// Device rejected the transaction.
    Nack,
    /// Bus-level timeout.
    Timeout,
    /// Bus data fault or response-shape violation (e.g. short read).
    Data,
}

impl TransportError {
    pub(crate) fn at(self, address: u16) -> DspError {
        match self {
            Self::Nack => DspError::Nack { address },
            Self::Timeout => DspError::Timeout { address },
            Self::Data => DspError::DataMismatch { address },
        }
    }
}

/// One bus transaction per call; blocking until the bus reports an outcome.
pub trait Transport {
    /// Write `payload` to the device words starting at `address`.
    fn write_burst(&mut self, address: u16, payload: &[u8]) -> Result<(), TransportError>;

    /// Fill `buf` from the device words starting at `address`.
    ///
    /// A short read must be reported as [`TransportError::Data`], never as
    /// a partial success.
    fn read_burst(&mut self, address: u16, buf: &mut [u8]) -> Result<(), TransportError>;

    /// Busy-wait for a device-level delay directive (settle time after
    /// programming). Unrelated to bus I/O.
    fn delay_ms(&mut self, ms: u32);
}

fn classify_i2c(kind: i2c::ErrorKind) -> TransportError {
    match kind {
        i2c::ErrorKind::NoAcknowledge(_) => TransportError::Nack,
        i2c::ErrorKind::Bus | i2c::ErrorKind::ArbitrationLoss | i2c::ErrorKind::Overrun => {
            TransportError::Data
        }
        // HAL-enforced bus timeouts surface as Other.
        _ => TransportError::Timeout,
    }
}

fn classify_spi(kind: spi::ErrorKind) -> TransportError {
    match kind {
        spi::ErrorKind::Other => TransportError::Timeout,
        _ => TransportError::Data,
    }
}

/// I2C burst transport for a device at a fixed 7-bit bus address
/// (`0x3B` for the ADAU1452 evaluation wiring).
pub struct I2cTransport<I, D> {
    i2c: I,
    device_address: u8,
    delay: D,
}

impl<I: I2c, D: DelayNs> I2cTransport<I, D> {
    /// `i2c` must be a configured bus peripheral; `device_address` is the
    /// 7-bit target address.
    pub fn new(i2c: I, device_address: u8, delay: D) -> Self {
        Self {
            i2c,
            device_address,
            delay,
        }
    }
}

impl<I: I2c, D: DelayNs> Transport for I2cTransport<I, D> {
    fn write_burst(&mut self, address: u16, payload: &[u8]) -> Result<(), TransportError> {
        let addr_bytes = address.to_be_bytes();
        // Two adjacent writes coalesce into one bus write without a
        // repeated start, so no payload-sized scratch buffer is needed.
        let mut ops = [
            i2c::Operation::Write(&addr_bytes),
            i2c::Operation::Write(payload),
        ];
        self.i2c
            .transaction(self.device_address, &mut ops)
            .map_err(|e| classify_i2c(i2c::Error::kind(&e)))
    }

    fn read_burst(&mut self, address: u16, buf: &mut [u8]) -> Result<(), TransportError> {
        let addr_bytes = address.to_be_bytes();
        self.i2c
            .write_read(self.device_address, &addr_bytes, buf)
            .map_err(|e| classify_i2c(i2c::Error::kind(&e)))
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }
}

/// SPI burst transport. The `SpiDevice` owns chip-select framing; one
/// transaction here is one CS assertion.
pub struct SpiTransport<S, D> {
    spi: S,
    delay: D,
}

/// SPI opcode preceding the address bytes: write access.
const SPI_OP_WRITE: u8 = 0x00;
/// SPI opcode preceding the address bytes: read access.
const SPI_OP_READ: u8 = 0x01;

impl<S: SpiDevice, D: DelayNs> SpiTransport<S, D> {
    /// `spi` must be a `SpiDevice` bound to the DSP's chip-select line.
    pub fn new(spi: S, delay: D) -> Self {
        Self { spi, delay }
    }
}

impl<S: SpiDevice, D: DelayNs> Transport for SpiTransport<S, D> {
    fn write_burst(&mut self, address: u16, payload: &[u8]) -> Result<(), TransportError> {
        let [hi, lo] = address.to_be_bytes();
        let header = [SPI_OP_WRITE, hi, lo];
        let mut ops = [spi::Operation::Write(&header), spi::Operation::Write(payload)];
        self.spi
            .transaction(&mut ops)
            .map_err(|e| classify_spi(spi::Error::kind(&e)))
    }

    fn read_burst(&mut self, address: u16, buf: &mut [u8]) -> Result<(), TransportError> {
        let [hi, lo] = address.to_be_bytes();
        let header = [SPI_OP_READ, hi, lo];
        let mut ops = [spi::Operation::Write(&header), spi::Operation::Read(buf)];
        self.spi
            .transaction(&mut ops)
            .map_err(|e| classify_spi(spi::Error::kind(&e)))
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }
}
