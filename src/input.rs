//! Digital input abstraction for the button pin.

#[cfg(feature = "embedded-hal")]
use crate::types::ActiveLevel;

/// Trait for abstracting the button's digital input.
///
/// Implement this for your GPIO pin. Reads must be cheap and side-effect free;
/// the engine calls [`is_high`](ButtonInput::is_high) exactly once per update.
pub trait ButtonInput {
    /// One-time pin setup, invoked by [`begin`](crate::ButtonEventEngine::begin).
    ///
    /// Most HALs configure pins through the type system before they are handed
    /// over, so the default does nothing.
    fn configure(&mut self) {}

    /// Returns the current electrical level of the input.
    ///
    /// This method cannot fail. Handle hardware errors internally.
    fn is_high(&mut self) -> bool;
}

/// Adapter for any `embedded-hal` 1.0 input pin.
///
/// A failed read is reported as the released level for the configured
/// [`ActiveLevel`], so a faulty pin never produces a press.
#[cfg(feature = "embedded-hal")]
#[derive(Debug)]
pub struct HalInput<P> {
    pin: P,
    level_on_error: bool,
}

#[cfg(feature = "embedded-hal")]
impl<P: embedded_hal::digital::InputPin> HalInput<P> {
    /// Wraps an already configured input pin.
    ///
    /// `active_level` must match the engine's
    /// [`ButtonConfig::active_level`](crate::ButtonConfig::active_level).
    pub fn new(pin: P, active_level: ActiveLevel) -> Self {
        Self {
            pin,
            level_on_error: active_level.released_level(),
        }
    }

    /// Returns the wrapped pin.
    pub fn free(self) -> P {
        self.pin
    }
}

#[cfg(feature = "embedded-hal")]
impl<P: embedded_hal::digital::InputPin> ButtonInput for HalInput<P> {
    fn is_high(&mut self) -> bool {
        self.pin.is_high().unwrap_or(self.level_on_error)
    }
}
