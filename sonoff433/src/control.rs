//! Reception controller: the blocking, foreground side of the
//! receiver.

use crate::platform::Platform;
use crate::receiver::Receiver;
use crate::ring::DEFAULT_RING_LEN;

/// How long the channel monitor waits for the timing ring to fill
/// before declaring the channel already quiet, in µs.
pub const WAIT_FREE_TIMEOUT_US: u32 = 30_000;

/// Ring share of code-like durations at or above which the channel is
/// considered to still carry a transmission, in percent.
pub const CODE_LIKE_MIN_PERCENT: u32 = 75;

/// Blocking reception front end over a shared [`Receiver`].
///
/// The receiver cell lives in a `static` so the interrupt handler can
/// reach it; the controller borrows it and owns the platform handle.
pub struct Sonoff<'a, P: Platform, const N: usize = DEFAULT_RING_LEN> {
    rx: &'a Receiver<N>,
    platform: P,
}

impl<'a, P: Platform, const N: usize> Sonoff<'a, P, N> {
    pub fn new(rx: &'a Receiver<N>, platform: P) -> Self {
        Sonoff { rx, platform }
    }

    /// True while reception is armed and a frame is being recorded or
    /// a completed code waits to be consumed.
    pub fn is_busy(&self) -> bool {
        self.rx.is_busy()
    }

    /// True once a completed code waits to be consumed.
    pub fn has_value(&self) -> bool {
        self.rx.has_value()
    }

    /// Take the captured code and disarm reception. Returns
    /// [`NO_VALUE`] when nothing was captured; the disarm side effect
    /// happens regardless.
    ///
    /// [`NO_VALUE`]: crate::receiver::NO_VALUE
    pub fn consume_value(&mut self) -> u32 {
        self.platform.disable_capture();
        self.rx.consume()
    }

    /// Arm reception and block until a code arrives, sleeping between
    /// interrupts. With `wait_free`, additionally wait for the channel
    /// to go quiet before consuming, so the repeat burst of a held
    /// button does not retrigger the caller immediately.
    pub fn get_value(&mut self, wait_free: bool) -> u32 {
        self.rx.enter_receive();
        self.platform.enable_capture();

        #[cfg(feature = "log")]
        log::debug!("reception armed, waiting for a code");

        while !self.rx.has_value() {
            self.platform.idle_wait();
        }

        if wait_free {
            self.wait_free();
        }

        self.consume_value()
    }

    /// Channel monitor. Blocks until ambient 433MHz traffic has died
    /// down.
    ///
    /// Collection phase: wait for one full ring of edge timings, up to
    /// [`WAIT_FREE_TIMEOUT_US`]. Timing out means the channel is
    /// already quiet. Evaluation phase: re-check the code-like share
    /// of the most recent ring every millisecond until it drops below
    /// [`CODE_LIKE_MIN_PERCENT`], so we never return into the tail of
    /// an ongoing burst.
    pub fn wait_free(&mut self) {
        self.rx.enter_wait_free();
        self.platform.enable_capture();

        let t0 = self.platform.now_us();
        loop {
            if self.rx.ring_cycled() {
                break;
            }
            if self.platform.now_us().wrapping_sub(t0) >= WAIT_FREE_TIMEOUT_US {
                #[cfg(feature = "log")]
                log::debug!("channel quiet, timing ring never filled");

                self.platform.disable_capture();
                return;
            }
        }

        loop {
            self.platform.delay_ms(1);
            let percent = self.rx.code_like_percent();
            if percent < CODE_LIKE_MIN_PERCENT {
                #[cfg(feature = "log")]
                log::debug!("channel free, code-like share at {}%", percent);

                break;
            }
        }

        self.platform.disable_capture();
    }
}
