//! Register-programming protocol engine for SigmaDSP-family audio DSPs
//! (ADAU1701 / ADAU176x / ADAU145x and relatives).
//!
//! The device's register and memory space is programmed over a narrow,
//! transaction-oriented serial bus: each transaction carries a handful of
//! payload bytes, and the addressable word width varies by address range.
//! This crate owns the protocol logic on top of that bus:
//!
//! - [`fixpoint`] — codec between parameter values and the device's
//!   signed fixed-point wire format;
//! - [`DeviceFamily::word_depth`] — byte width of the word at an address;
//! - [`chunk::chunk`] — splitting payloads into bus-sized bursts without
//!   ever splitting a device word across two transactions;
//! - [`Dsp`] — the blocking register access engine (block / integer /
//!   float reads and writes, program sequences);
//! - [`Dsp::safeload_write`] — the three-step atomic parameter commit.
//!
//! The bus itself is behind the [`Transport`] trait; [`I2cTransport`] and
//! [`SpiTransport`] adapt `embedded-hal` peripherals, and [`MockTransport`]
//! serves host tests.
//!
//! # Example
//!
//! ```no_run
//! use sigma_dsp::{DeviceConfig, Dsp, I2cTransport};
//! # fn demo<I, D>(i2c: I, delay: D) -> Result<(), sigma_dsp::DspError>
//! # where I: embedded_hal::i2c::I2c, D: embedded_hal::delay::DelayNs {
//! let transport = I2cTransport::new(i2c, 0x3B, delay);
//! let mut dsp = Dsp::new(transport, DeviceConfig::adau1452());
//! dsp.safeload_write(0x0123, &[0x00, 0x40, 0x00, 0x00])?;
//! # Ok(())
//! # }
//! ```
//!
//! # Concurrency
//!
//! Everything is blocking and single-caller by design: the bus and the
//! device's staging registers are shared mutable state with no
//! protocol-level locking, so callers owning a shared handle must
//! serialize access (external mutex or single-threaded dispatch). No
//! operation is cancellable mid-burst, and the crate never retries.
//!
//! # Features
//!
//! - `std`: `std::error::Error` impls for host applications
//! - `defmt`: `defmt::Format` derives and trace logging

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(unused_must_use)]
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::doc_markdown)] // hex addresses and register names in doc comments

#[cfg(feature = "std")]
extern crate std;

pub mod chunk;
pub mod device;
pub mod engine;
pub mod error;
pub mod fixpoint;
pub mod mock;
pub mod program;
pub mod safeload;
pub mod transport;

pub use chunk::Burst;
pub use device::{DeviceConfig, DeviceFamily};
pub use engine::Dsp;
pub use error::DspError;
pub use mock::MockTransport;
pub use program::SequenceOp;
pub use safeload::{SafeloadSlots, MAX_SAFELOAD_LEN};
pub use transport::{I2cTransport, SpiTransport, Transport, TransportError};
