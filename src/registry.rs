//! Fixed-capacity action registry and event dispatcher.
//!
//! Bindings are stored in registration order and dispatched in that order.
//! There is no removal: once bound, an action stays bound for the lifetime of
//! the registry.

use crate::time::TimeDuration;
use crate::types::{BindingError, ButtonEvent};
use heapless::Vec;

/// Callback invoked when a bound event fires.
///
/// The registry only borrows the callback; the borrow checker guarantees it
/// outlives every binding that refers to it.
pub type Action<'a> = &'a mut (dyn FnMut() + 'a);

/// Identifier of a binding within its registry.
///
/// Bindings are numbered in registration order, starting at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BindingId(pub usize);

impl From<BindingId> for usize {
    fn from(id: BindingId) -> Self {
        id.0
    }
}

/// Snapshot of engine state handed to the dispatcher.
#[derive(Debug, Clone, Copy)]
pub struct DispatchContext<D: TimeDuration> {
    /// 1-based ordinal of the current (or most recent) press.
    pub press_index: u32,

    /// How long the current session has been pressed.
    pub pressed_for: D,

    /// Release-to-press gap for the press being dispatched, if there was a
    /// previous release.
    pub since_release: Option<D>,

    /// Engine-wide long-press threshold.
    pub long_press_time: D,

    /// Engine-wide double-click window.
    pub double_click_interval: D,

    /// Engine-wide hold repeat interval.
    pub hold_interval: D,
}

/// A registered (event, action, timing) tuple.
pub struct ActionBinding<'a, D: TimeDuration> {
    action: Action<'a>,
    event: ButtonEvent,
    trigger_count: u32,
    timing: Option<D>,
    active: bool,
    // Per-session bookkeeping for timed bindings
    fired_this_session: bool,
    hold_mark: D,
}

impl<'a, D: TimeDuration> ActionBinding<'a, D> {
    /// Event this binding responds to.
    pub fn event(&self) -> ButtonEvent {
        self.event
    }

    /// Exact press ordinal required by `NthClick` bindings, zero otherwise.
    pub fn trigger_count(&self) -> u32 {
        self.trigger_count
    }

    /// Per-binding timing override, if any.
    pub fn timing(&self) -> Option<D> {
        self.timing
    }

    /// Returns true if the binding takes part in dispatch.
    pub fn is_active(&self) -> bool {
        self.active
    }

    fn invoke(&mut self) {
        (self.action)();
    }
}

impl<D: TimeDuration> core::fmt::Debug for ActionBinding<'_, D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ActionBinding")
            .field("event", &self.event)
            .field("trigger_count", &self.trigger_count)
            .field("timing_ms", &self.timing.map(|t| t.as_millis()))
            .field("active", &self.active)
            .finish()
    }
}

/// Ordered, fixed-capacity collection of action bindings.
///
/// # Type Parameters
/// * `'a` - Lifetime of the borrowed callbacks
/// * `D` - Duration type used for timing overrides
/// * `N` - Maximum number of bindings
pub struct ActionRegistry<'a, D: TimeDuration, const N: usize> {
    bindings: Vec<ActionBinding<'a, D>, N>,
}

impl<'a, D: TimeDuration, const N: usize> Default for ActionRegistry<'a, D, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, D: TimeDuration, const N: usize> ActionRegistry<'a, D, N> {
    /// Creates an empty registry.
    pub const fn new() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// Appends a binding and returns its id.
    ///
    /// `trigger_count` is only meaningful for `NthClick`, where it must be at
    /// least one. `timing` is only kept for `LongPress`, `DoubleClick` and
    /// `Hold`; a zero override means "use the engine default".
    pub fn register(
        &mut self,
        event: ButtonEvent,
        action: Action<'a>,
        trigger_count: u32,
        timing: Option<D>,
    ) -> Result<BindingId, BindingError> {
        if event == ButtonEvent::NthClick && trigger_count == 0 {
            return Err(BindingError::InvalidTriggerCount);
        }

        let timing = if event.accepts_timing() {
            timing.filter(|t| *t != D::ZERO)
        } else {
            None
        };

        let binding = ActionBinding {
            action,
            event,
            trigger_count: if event == ButtonEvent::NthClick {
                trigger_count
            } else {
                0
            },
            timing,
            active: true,
            fired_this_session: false,
            hold_mark: D::ZERO,
        };

        let id = BindingId(self.bindings.len());
        self.bindings
            .push(binding)
            .map_err(|_| BindingError::CapacityExceeded)?;
        Ok(id)
    }

    /// Enables or disables a binding. Inactive bindings are skipped by dispatch.
    ///
    /// Returns false if `id` does not exist.
    pub fn set_active(&mut self, id: BindingId, active: bool) -> bool {
        match self.bindings.get_mut(id.0) {
            Some(binding) => {
                binding.active = active;
                true
            }
            None => false,
        }
    }

    /// Returns the binding with the given id.
    pub fn get(&self, id: BindingId) -> Option<&ActionBinding<'a, D>> {
        self.bindings.get(id.0)
    }

    /// Clears per-session bookkeeping. Called on every accepted press edge.
    pub fn begin_session(&mut self) {
        for binding in self.bindings.iter_mut() {
            binding.fired_this_session = false;
            binding.hold_mark = D::ZERO;
        }
    }

    /// Invokes every active binding for `event` whose match rule holds.
    ///
    /// Bindings run in registration order and no binding is skipped because of
    /// another. A panicking action unwinds out of the dispatcher and the
    /// remaining bindings for this event are not run.
    ///
    /// Returns the number of actions invoked.
    pub fn dispatch(&mut self, event: ButtonEvent, ctx: &DispatchContext<D>) -> usize {
        let mut invoked = 0;

        for binding in self.bindings.iter_mut() {
            if !binding.active || binding.event != event {
                continue;
            }

            let matched = match event {
                ButtonEvent::NthClick => binding.trigger_count == ctx.press_index,
                ButtonEvent::LongPress => {
                    let threshold = binding.timing.unwrap_or(ctx.long_press_time);
                    if !binding.fired_this_session && ctx.pressed_for >= threshold {
                        binding.fired_this_session = true;
                        true
                    } else {
                        false
                    }
                }
                ButtonEvent::Hold => {
                    let interval = binding.timing.unwrap_or(ctx.hold_interval);
                    if ctx.pressed_for.saturating_sub(binding.hold_mark) >= interval {
                        binding.hold_mark = ctx.pressed_for;
                        true
                    } else {
                        false
                    }
                }
                ButtonEvent::DoubleClick => {
                    let window = binding.timing.unwrap_or(ctx.double_click_interval);
                    ctx.press_index >= 2 && ctx.since_release.is_some_and(|gap| gap <= window)
                }
                ButtonEvent::Press | ButtonEvent::Release | ButtonEvent::Toggle => true,
            };

            if matched {
                binding.invoke();
                invoked += 1;
            }
        }

        invoked
    }

    /// Number of registered bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Maximum number of bindings.
    pub fn capacity(&self) -> usize {
        N
    }

    /// Iterates over the bindings in dispatch order.
    pub fn iter(&self) -> impl Iterator<Item = &ActionBinding<'a, D>> {
        self.bindings.iter()
    }
}
