//! Hardware services the reception controller depends on.

/// Platform services provided by the surrounding board layer.
///
/// While capture is enabled, the platform must route every rising and
/// falling edge of the RF input pin to [`Receiver::on_edge`] with the
/// current microsecond timestamp, typically from the pin-change
/// interrupt handler.
///
/// All methods are infallible: there is nothing the controller could
/// do about a broken clock or interrupt controller.
///
/// [`Receiver::on_edge`]: crate::receiver::Receiver::on_edge
pub trait Platform {
    /// Monotonic microsecond counter. Wraps.
    fn now_us(&mut self) -> u32;

    /// Arm the edge interrupt on the RF input pin. Arming while
    /// already armed restarts capture and is allowed.
    fn enable_capture(&mut self);

    /// Disarm the edge interrupt. Idempotent.
    fn disable_capture(&mut self);

    /// Suspend the processor in a low-power state until the next
    /// interrupt, then return.
    fn idle_wait(&mut self);

    /// Blocking delay.
    fn delay_ms(&mut self, ms: u32);
}
