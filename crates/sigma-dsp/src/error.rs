//! Error taxonomy for register-programming operations.
//!
//! Every fallible call returns its outcome directly; there is no shared
//! "last error" register and no implicit retry anywhere in the crate.
//! Transport outcomes carry the word address of the failing burst so a
//! caller can judge whether a partially-transmitted multi-burst write
//! left the device in a safe state.

/// Outcome of a failed register access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DspError {
    /// Locally detectable bad argument — no bus activity was attempted.
    InvalidArgument,
    /// Device rejected the transaction (address or data NACK).
    Nack {
        /// Starting word address of the rejected burst.
        address: u16,
    },
    /// Bus-level timeout reported by the transport.
    Timeout {
        /// Starting word address of the timed-out burst.
        address: u16,
    },
    /// Response-shape violation: short read, or a bus-level data fault.
    DataMismatch {
        /// Word address of the offending transaction.
        address: u16,
    },
}

impl core::fmt::Display for DspError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidArgument => write!(f, "invalid argument (no bus activity attempted)"),
            Self::Nack { address } => write!(f, "device NACK at address {address:#06x}"),
            Self::Timeout { address } => write!(f, "bus timeout at address {address:#06x}"),
            Self::DataMismatch { address } => {
                write!(f, "response shape violation at address {address:#06x}")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DspError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_failing_address() {
        let msg = std::format!("{}", DspError::Nack { address: 0xF000 });
        assert!(msg.contains("0xf000"), "got: {msg}");
    }

    #[test]
    fn outcomes_are_comparable() {
        assert_eq!(DspError::InvalidArgument, DspError::InvalidArgument);
        assert_ne!(
            DspError::Nack { address: 1 },
            DspError::Timeout { address: 1 }
        );
    }
}
