//! Mock transport for host-side testing.
//!
//! Implements [`Transport`] without any hardware dependency. Records every
//! transaction for assertion in tests; reads are served from a scripted
//! byte queue, and any transaction can be made to fail to exercise the
//! fail-fast paths. Available outside `cfg(test)` so dependents can use it
//! in their own tests.

use heapless::Vec;

use crate::transport::{Transport, TransportError};

/// Bytes one recorded write can hold.
pub const MOCK_DATA_CAP: usize = 64;
/// Transactions the event log can hold.
pub const MOCK_EVENT_CAP: usize = 32;

/// One recorded transport call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockEvent {
    /// A completed `write_burst`.
    Write {
        /// Starting word address of the burst.
        address: u16,
        /// Payload bytes as transmitted.
        data: Vec<u8, MOCK_DATA_CAP>,
    },
    /// A completed `read_burst`.
    Read {
        /// Starting word address of the read.
        address: u16,
        /// Bytes requested.
        len: usize,
    },
    /// A `delay_ms` call.
    Delay {
        /// Requested delay duration.
        ms: u32,
    },
}

/// Mock transport — records all calls for test assertions.
#[derive(Debug, Default)]
pub struct MockTransport {
    /// Every successful transaction, in order.
    pub events: Vec<MockEvent, MOCK_EVENT_CAP>,
    /// Bytes served to `read_burst`, consumed front to back. A read
    /// larger than what remains is reported as a short read.
    read_queue: Vec<u8, MOCK_DATA_CAP>,
    /// Fail the nth bus transaction (0-based, reads and writes counted
    /// together) with the given error.
    fail_at: Option<(usize, TransportError)>,
    transactions_seen: usize,
}

impl MockTransport {
    /// Create a mock with an empty log and no scripted failures.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the nth transaction (0-based) to fail with `error`.
    pub fn fail_on_transaction(&mut self, n: usize, error: TransportError) {
        self.fail_at = Some((n, error));
    }

    /// Append bytes for subsequent `read_burst` calls to return.
    ///
    /// Silently truncates beyond the queue capacity; tests stay far below it.
    pub fn queue_read(&mut self, bytes: &[u8]) {
        for &b in bytes {
            if self.read_queue.push(b).is_err() {
                break;
            }
        }
    }

    fn check_scripted_failure(&mut self) -> Result<(), TransportError> {
        let index = self.transactions_seen;
        self.transactions_seen = self.transactions_seen.saturating_add(1);
        match self.fail_at {
            Some((n, error)) if n == index => Err(error),
            _ => Ok(()),
        }
    }
}

impl Transport for MockTransport {
    fn write_burst(&mut self, address: u16, payload: &[u8]) -> Result<(), TransportError> {
        self.check_scripted_failure()?;
        let mut data = Vec::new();
        data.extend_from_slice(payload)
            .map_err(|_| TransportError::Data)?;
        self.events
            .push(MockEvent::Write { address, data })
            .map_err(|_| TransportError::Data)?;
        Ok(())
    }

    fn read_burst(&mut self, address: u16, buf: &mut [u8]) -> Result<(), TransportError> {
        self.check_scripted_failure()?;
        if buf.len() > self.read_queue.len() {
            // Device returned fewer bytes than requested.
            return Err(TransportError::Data);
        }
        for slot in buf.iter_mut() {
            // Queue length checked above.
            *slot = self.read_queue.remove(0);
        }
        self.events
            .push(MockEvent::Read {
                address,
                len: buf.len(),
            })
            .map_err(|_| TransportError::Data)?;
        Ok(())
    }

    fn delay_ms(&mut self, ms: u32) {
        // Recording the call is the point; actually sleeping would only
        // slow the test suite down.
        let _ = self.events.push(MockEvent::Delay { ms });
    }
}
