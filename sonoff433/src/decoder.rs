//! Frame decoder state machine.
//!
//! One frame is a separator gap followed by two pulses per bit. A
//! `(Short, Long)` pair decodes to 0 and a `(Long, Short)` pair to 1,
//! first bit ending up in the most significant position. The strict
//! short/long alternation inside each pair doubles as an integrity
//! check: a noise burst may produce believable individual pulse widths
//! but rarely a consistent pairing.
//!
//! The state machine is fed one edge timestamp (or one inter-edge
//! duration) per invocation and never reports errors. Malformed timing
//! silently drops the frame; the next separator resynchronizes.

use crate::timings::Category;

/// Code width of the supported Sonoff remote family, in bits.
pub const DEFAULT_CODE_BITS: u8 = 24;

/// Public decoder status, reported once per fed edge.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DecoderState {
    /// Waiting for a separator gap.
    Idle,
    /// Inside a frame, accumulating bits.
    Receiving,
    /// A complete code was assembled.
    Done(u32),
}

#[derive(Copy, Clone)]
enum State {
    Idle,
    Receiving {
        /// Valid transitions consumed since the separator.
        count: u8,
        /// Bits decoded so far, MSB first.
        value: u32,
        /// First half of the pair in progress.
        last_cat: Category,
    },
    Done(u32),
}

/// Decoder for the pulse train of one remote.
///
/// Usable on its own for offline decoding, or inside [`Receiver`] for
/// interrupt-driven capture. Cheap enough per edge to run in an
/// interrupt handler.
///
/// [`Receiver`]: crate::receiver::Receiver
pub struct Decoder {
    state: State,
    code_bits: u8,
    last_edge: u32,
}

impl Decoder {
    /// Decoder for the default 24-bit remotes.
    pub const fn new() -> Self {
        Self::with_code_bits(DEFAULT_CODE_BITS)
    }

    /// Decoder for a compatible remote family with another code width.
    pub const fn with_code_bits(code_bits: u8) -> Self {
        Decoder {
            state: State::Idle,
            code_bits,
            last_edge: 0,
        }
    }

    /// Configured code width in bits.
    pub fn code_bits(&self) -> u8 {
        self.code_bits
    }

    /// True while a frame is being recorded.
    pub fn is_receiving(&self) -> bool {
        matches!(self.state, State::Receiving { .. })
    }

    /// Drop any frame in progress and wait for the next separator.
    pub fn reset(&mut self) {
        self.state = State::Idle;
    }

    /// Feed one edge timestamp (µs, wrapping). The elapsed time since
    /// the previous edge is classified and run through the state
    /// machine.
    pub fn sample(&mut self, ts: u32) -> DecoderState {
        let dt = ts.wrapping_sub(self.last_edge);
        self.last_edge = ts;
        self.interval(dt)
    }

    /// Feed one already-computed inter-edge duration (µs).
    pub fn interval(&mut self, dt: u32) -> DecoderState {
        self.feed(Category::from_duration(dt))
    }

    /// Transitions consumed per frame: two pulses per bit, plus the
    /// trailing edge that closes the last pair.
    fn done_count(&self) -> u8 {
        2 * self.code_bits + 1
    }

    fn feed(&mut self, cat: Category) -> DecoderState {
        // A separator always wins: it starts a new frame and aborts
        // any frame in progress, consumed or not.
        if cat == Category::Separator {
            self.state = State::Receiving {
                count: 0,
                value: 0,
                last_cat: Category::Unknown,
            };
            return DecoderState::Receiving;
        }

        let (count, value, last_cat) = match self.state {
            State::Receiving {
                count,
                value,
                last_cat,
            } => (count, value, last_cat),
            // Only a separator gets us going again.
            State::Idle => return DecoderState::Idle,
            State::Done(_) => return DecoderState::Idle,
        };

        if cat != Category::Short && cat != Category::Long {
            // Timing outside the protocol breaks the frame.
            self.state = State::Idle;
            return DecoderState::Idle;
        }

        let count = count + 1;
        if count == self.done_count() {
            self.state = State::Done(value);
            return DecoderState::Done(value);
        }

        if count % 2 == 0 {
            // Even transition: (last_cat, cat) closes one bit.
            let bit = match (last_cat, cat) {
                (Category::Short, Category::Long) => 0,
                (Category::Long, Category::Short) => 1,
                _ => {
                    self.state = State::Idle;
                    return DecoderState::Idle;
                }
            };
            self.state = State::Receiving {
                count,
                value: value << 1 | bit,
                last_cat: cat,
            };
        } else {
            self.state = State::Receiving {
                count,
                value,
                last_cat: cat,
            };
        }

        DecoderState::Receiving
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Decoder::new()
    }
}
