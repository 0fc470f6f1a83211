//! Shared reception state, written from the edge interrupt and read
//! from the foreground controller.

use core::cell::RefCell;

use critical_section::Mutex;

use crate::decoder::{Decoder, DecoderState, DEFAULT_CODE_BITS};
use crate::ring::{TimingRing, DEFAULT_RING_LEN};

/// Sentinel returned by [`Receiver::consume`] when no code was
/// captured.
pub const NO_VALUE: u32 = 0xFFFF_FFFF;

/// What the edge interrupt is currently used for.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Mode {
    Off,
    /// Decoding frames.
    Receive,
    /// Filling the timing ring for the channel monitor.
    WaitFree,
}

struct Inner<const N: usize> {
    mode: Mode,
    decoder: Decoder,
    /// Last completed code, latched until consumed or disarmed.
    value: Option<u32>,
    ring: TimingRing<N>,
}

/// All state shared between the edge interrupt and the foreground
/// control flow, behind a critical section. Each operation is one
/// self-contained critical section, so an interrupt can never observe
/// a half-updated snapshot.
///
/// Designed to live in a `static`:
///
/// ```ignore
/// static RECEIVER: Receiver = Receiver::new();
///
/// // In the pin-change interrupt handler:
/// RECEIVER.on_edge(micros());
/// ```
pub struct Receiver<const N: usize = DEFAULT_RING_LEN> {
    inner: Mutex<RefCell<Inner<N>>>,
}

impl<const N: usize> Receiver<N> {
    /// Receiver for the default 24-bit remotes.
    pub const fn new() -> Self {
        Self::with_code_bits(DEFAULT_CODE_BITS)
    }

    /// Receiver for a compatible remote family with another code
    /// width.
    pub const fn with_code_bits(code_bits: u8) -> Self {
        Receiver {
            inner: Mutex::new(RefCell::new(Inner {
                mode: Mode::Off,
                decoder: Decoder::with_code_bits(code_bits),
                value: None,
                ring: TimingRing::new(),
            })),
        }
    }

    fn with<R>(&self, f: impl FnOnce(&mut Inner<N>) -> R) -> R {
        critical_section::with(|cs| f(&mut self.inner.borrow(cs).borrow_mut()))
    }

    /// Edge interrupt entry point. `ts` is the current microsecond
    /// timestamp.
    pub fn on_edge(&self, ts: u32) {
        self.with(|inner| match inner.mode {
            // Capture should be disarmed together with the mode, but
            // reject a stray edge anyway.
            Mode::Off => {}
            Mode::Receive => {
                if let DecoderState::Done(code) = inner.decoder.sample(ts) {
                    inner.value = Some(code);
                    inner.decoder.reset();
                }
            }
            Mode::WaitFree => inner.ring.record(ts),
        })
    }

    /// True while reception is armed and a frame is being recorded or
    /// a completed code waits to be consumed.
    pub fn is_busy(&self) -> bool {
        self.with(|inner| {
            inner.mode == Mode::Receive
                && (inner.decoder.is_receiving() || inner.value.is_some())
        })
    }

    /// True once a completed code waits to be consumed.
    pub fn has_value(&self) -> bool {
        self.with(|inner| inner.value.is_some())
    }

    /// Take the captured code and disarm. Returns [`NO_VALUE`] when
    /// called disarmed or with nothing captured; the disarm side
    /// effect happens regardless.
    pub fn consume(&self) -> u32 {
        self.with(|inner| {
            let code = match (inner.mode, inner.value.take()) {
                (Mode::Off, _) => NO_VALUE,
                (_, Some(code)) => code,
                (_, None) => NO_VALUE,
            };

            inner.mode = Mode::Off;
            inner.decoder.reset();
            inner.value = None;
            code
        })
    }

    /// Arm (or re-arm) frame decoding. Restarts capture state.
    pub fn enter_receive(&self) {
        self.with(|inner| {
            inner.mode = Mode::Receive;
            inner.decoder.reset();
            inner.value = None;
        })
    }

    /// Switch edge capture over to the timing ring for the channel
    /// monitor. Drops any frame in progress but keeps a latched code,
    /// so a value received before the monitor ran can still be
    /// consumed afterwards.
    pub fn enter_wait_free(&self) {
        self.with(|inner| {
            inner.mode = Mode::WaitFree;
            inner.decoder.reset();
            inner.ring.reset();
        })
    }

    /// True once the ring has wrapped since capture was switched to
    /// the channel monitor.
    pub fn ring_cycled(&self) -> bool {
        self.with(|inner| inner.ring.has_cycled())
    }

    /// Code-like share of the most recent ring of durations, percent.
    pub fn code_like_percent(&self) -> u32 {
        self.with(|inner| inner.ring.code_like_percent())
    }
}

impl<const N: usize> Default for Receiver<N> {
    fn default() -> Self {
        Receiver::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed_frame(rx: &Receiver, value: u32, start_ts: u32) -> u32 {
        let mut ts = start_ts;
        ts = ts.wrapping_add(8000);
        rx.on_edge(ts);
        for i in (0..24).rev() {
            let pair: [u32; 2] = if value >> i & 1 == 0 {
                [300, 900]
            } else {
                [900, 300]
            };
            for &dt in &pair {
                ts = ts.wrapping_add(dt);
                rx.on_edge(ts);
            }
        }
        ts = ts.wrapping_add(300);
        rx.on_edge(ts);
        ts
    }

    #[test]
    fn captures_a_frame() {
        let rx: Receiver = Receiver::new();
        rx.enter_receive();
        assert!(!rx.has_value());

        feed_frame(&rx, 0xABCDEF, 0);

        assert!(rx.has_value());
        assert!(rx.is_busy());
        assert_eq!(rx.consume(), 0xABCDEF);

        // Consuming disarmed everything.
        assert!(!rx.has_value());
        assert!(!rx.is_busy());
    }

    #[test]
    fn consume_without_value_returns_sentinel() {
        let rx: Receiver = Receiver::new();
        assert_eq!(rx.consume(), NO_VALUE);

        rx.enter_receive();
        assert_eq!(rx.consume(), NO_VALUE);
        // The failed consume still disarmed reception.
        assert!(!rx.is_busy());
    }

    #[test]
    fn busy_after_separator() {
        let rx: Receiver = Receiver::new();
        rx.enter_receive();
        assert!(!rx.is_busy());

        rx.on_edge(8000);
        assert!(rx.is_busy());
    }

    #[test]
    fn edges_ignored_while_disarmed() {
        let rx: Receiver = Receiver::new();
        feed_frame(&rx, 0xABCDEF, 0);
        assert!(!rx.has_value());
        assert_eq!(rx.consume(), NO_VALUE);
    }

    #[test]
    fn rearming_restarts_capture() {
        let rx: Receiver = Receiver::new();
        rx.enter_receive();
        let ts = feed_frame(&rx, 0x111111, 0);
        assert!(rx.has_value());

        rx.enter_receive();
        assert!(!rx.has_value());

        feed_frame(&rx, 0x222222, ts);
        assert_eq!(rx.consume(), 0x222222);
    }

    #[test]
    fn wait_free_keeps_latched_value() {
        let rx: Receiver = Receiver::new();
        rx.enter_receive();
        let ts = feed_frame(&rx, 0x00F00F, 0);
        assert!(rx.has_value());

        rx.enter_wait_free();
        assert!(!rx.ring_cycled());

        // Ring capture runs on the same edge path. The first recorded
        // duration is measured against the ring's epoch and lands
        // outside every window, so run one extra edge past the wrap to
        // overwrite it.
        let mut ts = ts;
        for _ in 0..17 {
            ts = ts.wrapping_add(300);
            rx.on_edge(ts);
        }
        assert!(rx.ring_cycled());
        assert_eq!(rx.code_like_percent(), 100);

        // The code latched before the monitor ran is still there.
        assert_eq!(rx.consume(), 0x00F00F);
    }

    #[test]
    fn second_frame_overwrites_unconsumed_value() {
        let rx: Receiver = Receiver::new();
        rx.enter_receive();
        let ts = feed_frame(&rx, 0x111111, 0);
        feed_frame(&rx, 0x222222, ts);
        assert_eq!(rx.consume(), 0x222222);
    }
}
