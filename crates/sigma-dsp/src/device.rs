//! Device-family configuration: word-depth tables, fixed-point wire width,
//! safeload register locations.
//!
//! Addresses increment by one per device *word*, not per byte, and the
//! byte width of a word depends on where in the memory map it sits:
//! program/parameter RAM and control registers use different widths.
//! The ranges below come from the respective datasheets (ADAU1452:
//! program memory and DM0/DM1 store 4 bytes, control registers store 2).

use crate::SafeloadSlots;

/// Ordered `(upper_bound, width)` ranges plus the width used beyond the
/// last bound. Out-of-range addresses are still attempted on the bus —
/// the device itself rejects invalid ones — so the resolver never fails.
struct DepthTable {
    bounds: &'static [(u16, usize)],
    default: usize,
}

/// ADAU1701/1702/1401: parameter RAM (4 bytes) below 0x0400, program RAM (5) above.
const SIGMA100_DEPTHS: DepthTable = DepthTable {
    bounds: &[(0x0400, 4)],
    default: 5,
};

/// ADAU176x/178x/144x: parameter RAM below 0x0800, program RAM above.
const SIGMA200_DEPTHS: DepthTable = DepthTable {
    bounds: &[(0x0800, 4)],
    default: 5,
};

/// ADAU145x/146x: program memory and data memory (4 bytes) below 0xF000,
/// control registers (2 bytes) above.
const SIGMA300_DEPTHS: DepthTable = DepthTable {
    bounds: &[(0xF000, 4)],
    default: 2,
};

/// SigmaDSP processor generation. Determines the word-depth map and the
/// fixed-point wire width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeviceFamily {
    /// Sigma100: ADAU1701 / ADAU1702 / ADAU1401. 5.23 parameters (28-bit wire width).
    Sigma100,
    /// Sigma200: ADAU176x / ADAU178x / ADAU144x. 5.23 parameters (28-bit wire width).
    Sigma200,
    /// Sigma300/350: ADAU145x / ADAU146x. Full 32-bit parameters.
    Sigma300,
}

impl DeviceFamily {
    fn depth_table(self) -> &'static DepthTable {
        match self {
            Self::Sigma100 => &SIGMA100_DEPTHS,
            Self::Sigma200 => &SIGMA200_DEPTHS,
            Self::Sigma300 => &SIGMA300_DEPTHS,
        }
    }

    /// Byte width of the addressable word at `address`.
    ///
    /// First table bound exceeding the address wins; addresses beyond all
    /// bounds take the table default.
    #[must_use]
    pub fn word_depth(self, address: u16) -> usize {
        let table = self.depth_table();
        for &(bound, width) in table.bounds {
            if address < bound {
                return width;
            }
        }
        table.default
    }

    /// Largest word depth anywhere in this family's memory map.
    ///
    /// Lower bound on a usable burst size: a burst must be able to hold at
    /// least one whole word.
    #[must_use]
    pub fn max_word_depth(self) -> usize {
        let table = self.depth_table();
        let mut max = table.default;
        for &(_, width) in table.bounds {
            if width > max {
                max = width;
            }
        }
        max
    }

    /// Wire-width mask applied after fixed-point conversion, if any.
    ///
    /// Sigma100/200 parameters are 28-bit (5.23); the vendor framework
    /// masks the converted value and relies on two's-complement wraparound
    /// for out-of-range values. Sigma300 parameters are full 32-bit.
    #[must_use]
    pub(crate) fn fixpoint_mask(self) -> Option<i32> {
        match self {
            Self::Sigma100 | Self::Sigma200 => Some(0x0FFF_FFFF),
            Self::Sigma300 => None,
        }
    }
}

/// Everything the engine needs to know about one programmed device.
///
/// Built once from the device image's exported constants and passed to
/// [`crate::Dsp::new`]; never mutated at runtime. The bus device address
/// (e.g. I2C `0x3B` for an ADAU1452) belongs to the transport adapter,
/// not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceConfig {
    /// Processor generation.
    pub family: DeviceFamily,
    /// Maximum payload bytes per bus transaction, excluding the two
    /// address bytes. 30 for a stock 32-byte Arduino Wire buffer.
    pub max_burst_len: usize,
    /// Safeload register locations for this device image.
    pub safeload: SafeloadSlots,
}

impl DeviceConfig {
    /// ADAU1452 with the vendor default safeload module placement.
    #[must_use]
    pub const fn adau1452() -> Self {
        Self {
            family: DeviceFamily::Sigma300,
            max_burst_len: 30,
            safeload: SafeloadSlots {
                data: 24576,
                address: 24581,
                count: 24582,
            },
        }
    }
}
