//! Pulse-width classification for the Sonoff remote timing scheme.
//!
//! The remotes encode their frames with two pulse widths plus a long
//! inter-frame gap. Everything the rest of the crate does is driven by
//! the classification of the elapsed time between two consecutive
//! edges on the RF input pin.

/// Inclusive short-pulse window, in µs.
pub const SHORT_US: (u32, u32) = (220, 550);

/// Inclusive long-pulse window, in µs.
pub const LONG_US: (u32, u32) = (800, 1200);

/// Inclusive separator-gap window, in µs.
pub const SEPARATOR_US: (u32, u32) = (7000, 13000);

/// Classification of the elapsed time between two consecutive edges.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Category {
    /// Outside every known window. Noise, or not our protocol.
    Unknown,
    /// A short pulse.
    Short,
    /// A long pulse.
    Long,
    /// The inter-frame gap that precedes every frame.
    Separator,
}

impl Category {
    /// Classify an inter-edge duration. The windows do not overlap, so
    /// every duration maps to exactly one category.
    pub const fn from_duration(us: u32) -> Self {
        if in_range(us, SHORT_US) {
            Category::Short
        } else if in_range(us, LONG_US) {
            Category::Long
        } else if in_range(us, SEPARATOR_US) {
            Category::Separator
        } else {
            Category::Unknown
        }
    }

    /// True for durations a transmission is made of. The channel
    /// monitor uses this to tell codes from background noise.
    pub const fn is_code_like(self) -> bool {
        matches!(
            self,
            Category::Short | Category::Long | Category::Separator
        )
    }
}

const fn in_range(n: u32, range: (u32, u32)) -> bool {
    n >= range.0 && n <= range.1
}
