//! # sonoff433
//!
//! Receiver core for Sonoff-compatible OOK-modulated 433MHz remote
//! controls. Classifies the timing between edges on a single digital
//! input pin and reassembles the fixed-width code a remote button
//! press transmits, without a receiver chip that decodes in hardware.
//!
//! The crate is split along the interrupt boundary:
//!
//! - [`Decoder`] is the pure frame state machine, fed one edge
//!   timestamp per invocation. Usable on its own for offline decoding
//!   of captured edge streams.
//! - [`Receiver`] wraps the decoder and the channel monitor's timing
//!   ring in a critical section, as the single cell shared between the
//!   pin-change interrupt and the foreground.
//! - [`Sonoff`] is the blocking front end an application calls, with
//!   the hardware behind the [`Platform`] trait: microsecond clock,
//!   edge-interrupt arm/disarm, low-power idle wait and delay.
//!
//! ```ignore
//! static RECEIVER: sonoff433::Receiver = sonoff433::Receiver::new();
//!
//! // Pin-change ISR on the RF input pin:
//! fn on_rf_edge() {
//!     RECEIVER.on_edge(micros());
//! }
//!
//! let mut sonoff = sonoff433::Sonoff::new(&RECEIVER, board);
//! loop {
//!     // Blocks in low-power idle until a button press arrives, then
//!     // waits out the repeat burst before returning.
//!     let code = sonoff.get_value(true);
//!     // ... map the 24-bit code to a button
//! }
//! ```
//!
//! Malformed or noisy timing never surfaces as an error: the decoder
//! silently resynchronizes on the next separator gap, and the only
//! caller-visible failure is the [`NO_VALUE`] sentinel from
//! [`Sonoff::consume_value`].
//!
//! The optional `log` cargo feature adds debug events in the
//! foreground controller (never in the interrupt path).

#![cfg_attr(not(test), no_std)]

pub mod control;
pub mod decoder;
pub mod platform;
pub mod receiver;
pub mod ring;
pub mod timings;

pub use control::{Sonoff, CODE_LIKE_MIN_PERCENT, WAIT_FREE_TIMEOUT_US};
pub use decoder::{Decoder, DecoderState, DEFAULT_CODE_BITS};
pub use platform::Platform;
pub use receiver::{Receiver, NO_VALUE};
pub use ring::{TimingRing, DEFAULT_RING_LEN};
pub use timings::Category;
