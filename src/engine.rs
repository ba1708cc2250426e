//! Button event engine with debouncing, classification and dispatch.
//!
//! Provides [`ButtonEventEngine`], which polls a single [`ButtonInput`], filters
//! contact bounce and turns accepted edges and press durations into
//! [`ButtonEvent`]s delivered to registered actions.

use crate::command::EngineAction;
use crate::config::ButtonConfig;
use crate::debounce::{Debouncer, Edge};
use crate::input::ButtonInput;
use crate::registry::{Action, ActionRegistry, BindingId, DispatchContext};
use crate::time::{TimeDuration, TimeInstant, TimeSource};
use crate::types::{ActiveLevel, BindingError, ButtonEvent};

/// State of the button while it is logically held down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PressSession<I> {
    /// When the press edge was accepted.
    pub started_at: I,
    /// Whether a long-press has fired during this session.
    pub long_press_fired: bool,
}

/// Debounces a single pushbutton and dispatches actions for its events.
///
/// Call [`update`](Self::update) on every iteration of the host loop. All
/// side effects happen through the registered actions, from inside `update`.
///
/// The engine does no locking. If `update` and the query or reset methods can
/// be reached from an interrupt, the caller must keep them from overlapping.
///
/// # Type Parameters
/// * `'a` - Lifetime of the time source and of every registered action
/// * `I` - Time instant type
/// * `B` - Button input implementation type
/// * `T` - Time source implementation type
/// * `N` - Maximum number of action bindings
pub struct ButtonEventEngine<'a, I: TimeInstant, B: ButtonInput, T: TimeSource<I>, const N: usize>
{
    input: B,
    time_source: &'a T,
    config: ButtonConfig<I::Duration>,
    debouncer: Debouncer<I>,
    session: Option<PressSession<I>>,
    press_index: u32,
    toggle: bool,
    last_press: Option<I>,
    last_release: Option<I>,
    registry: ActionRegistry<'a, I::Duration, N>,
}

impl<'a, I: TimeInstant, B: ButtonInput, T: TimeSource<I>, const N: usize>
    ButtonEventEngine<'a, I, B, T, N>
{
    /// Creates an engine with the default timings.
    pub fn new(input: B, time_source: &'a T) -> Self {
        Self::with_config(input, time_source, ButtonConfig::default())
    }

    /// Creates an engine with the given timings.
    pub fn with_config(input: B, time_source: &'a T, config: ButtonConfig<I::Duration>) -> Self {
        Self {
            input,
            time_source,
            config,
            debouncer: Debouncer::new(),
            session: None,
            press_index: 0,
            toggle: false,
            last_press: None,
            last_release: None,
            registry: ActionRegistry::new(),
        }
    }

    /// One-time hardware setup. Delegates to [`ButtonInput::configure`].
    pub fn begin(&mut self) {
        self.input.configure();
    }

    /// Polls the input once and runs the state machine to completion.
    ///
    /// Order of work within one call:
    /// 1. sample the input and debounce it
    /// 2. on an accepted press: `Press`, `NthClick`, `Toggle`, then the
    ///    double-click check
    /// 3. on an accepted release: `Release`, unless a long-press fired
    /// 4. while pressed: long-press check, then hold check
    ///
    /// `LongPress` and `Hold` may both fire in the same call.
    pub fn update(&mut self) {
        let now = self.time_source.now();
        let pressed = self.config.active_level.is_pressed(self.input.is_high());

        match self
            .debouncer
            .sample(pressed, now, self.config.debounce_delay)
        {
            Some(Edge::Press) => self.accept_press(now),
            Some(Edge::Release) => self.accept_release(now),
            None => {}
        }

        if let Some(session) = self.session {
            self.service_session(session, now);
        }
    }

    fn accept_press(&mut self, now: I) {
        let since_release = self.last_release.map(|released| now.duration_since(released));

        self.session = Some(PressSession {
            started_at: now,
            long_press_fired: false,
        });
        self.press_index = self.press_index.saturating_add(1);
        self.registry.begin_session();

        debug!("press accepted: index={}", self.press_index);

        let ctx = self.context(I::Duration::ZERO, since_release);
        self.registry.dispatch(ButtonEvent::Press, &ctx);
        self.registry.dispatch(ButtonEvent::NthClick, &ctx);

        self.toggle = !self.toggle;
        self.registry.dispatch(ButtonEvent::Toggle, &ctx);

        // Needs press_index already incremented
        self.registry.dispatch(ButtonEvent::DoubleClick, &ctx);

        self.last_press = Some(now);
    }

    fn accept_release(&mut self, now: I) {
        let session = self.session.take();
        self.last_release = Some(now);

        match session {
            Some(session) if session.long_press_fired => {
                debug!("release suppressed after long press");
            }
            _ => {
                let pressed_for = session
                    .map(|s| now.duration_since(s.started_at))
                    .unwrap_or(I::Duration::ZERO);
                trace!("release accepted after {} ms", pressed_for.as_millis());

                let ctx = self.context(pressed_for, None);
                self.registry.dispatch(ButtonEvent::Release, &ctx);
            }
        }
    }

    fn service_session(&mut self, session: PressSession<I>, now: I) {
        let pressed_for = now.duration_since(session.started_at);
        let ctx = self.context(pressed_for, None);

        let fired = self.registry.dispatch(ButtonEvent::LongPress, &ctx);
        if !session.long_press_fired && (fired > 0 || pressed_for >= self.config.long_press_time)
        {
            if let Some(open) = self.session.as_mut() {
                open.long_press_fired = true;
            }
            debug!("long press after {} ms", pressed_for.as_millis());
        }

        self.registry.dispatch(ButtonEvent::Hold, &ctx);
    }

    fn context(
        &self,
        pressed_for: I::Duration,
        since_release: Option<I::Duration>,
    ) -> DispatchContext<I::Duration> {
        DispatchContext {
            press_index: self.press_index,
            pressed_for,
            since_release,
            long_press_time: self.config.long_press_time,
            double_click_interval: self.config.double_click_interval,
            hold_interval: self.config.hold_interval,
        }
    }

    /// Binds an action to `event`.
    ///
    /// `trigger_count` is the exact press ordinal for `NthClick` and ignored
    /// otherwise. `timing` overrides the engine default for `LongPress`,
    /// `DoubleClick` and `Hold` and is ignored otherwise.
    ///
    /// # Returns
    /// * `Ok(id)` - Binding appended; `id` can enable or disable it later
    /// * `Err` - Registry full or invalid trigger count; nothing was stored
    pub fn register(
        &mut self,
        event: ButtonEvent,
        action: Action<'a>,
        trigger_count: u32,
        timing: Option<I::Duration>,
    ) -> Result<BindingId, BindingError> {
        let result = self.registry.register(event, action, trigger_count, timing);
        if let Err(err) = result {
            debug!("binding for {} dropped: {}", event, err);
        }
        result
    }

    /// Binds an action to every accepted press.
    pub fn on_press(&mut self, action: Action<'a>) -> Result<BindingId, BindingError> {
        self.register(ButtonEvent::Press, action, 0, None)
    }

    /// Binds an action to every accepted release that did not follow a long-press.
    pub fn on_release(&mut self, action: Action<'a>) -> Result<BindingId, BindingError> {
        self.register(ButtonEvent::Release, action, 0, None)
    }

    /// Binds an action to a long-press.
    ///
    /// With `hold_time` set, the action fires once the press has lasted that
    /// long instead of the engine-wide threshold. Several bindings with
    /// different hold times give tiered long-presses.
    pub fn on_long_press(
        &mut self,
        action: Action<'a>,
        hold_time: Option<I::Duration>,
    ) -> Result<BindingId, BindingError> {
        self.register(ButtonEvent::LongPress, action, 0, hold_time)
    }

    /// Binds an action to a double-click, optionally with its own window.
    pub fn on_double_click(
        &mut self,
        action: Action<'a>,
        max_interval: Option<I::Duration>,
    ) -> Result<BindingId, BindingError> {
        self.register(ButtonEvent::DoubleClick, action, 0, max_interval)
    }

    /// Binds an action that repeats while the button is held, optionally with
    /// its own interval.
    pub fn on_hold(
        &mut self,
        action: Action<'a>,
        interval: Option<I::Duration>,
    ) -> Result<BindingId, BindingError> {
        self.register(ButtonEvent::Hold, action, 0, interval)
    }

    /// Binds an action to every toggle flip.
    pub fn on_toggle(&mut self, action: Action<'a>) -> Result<BindingId, BindingError> {
        self.register(ButtonEvent::Toggle, action, 0, None)
    }

    /// Binds an action to the `count`-th press since the last counter reset.
    pub fn on_nth_click(
        &mut self,
        count: u32,
        action: Action<'a>,
    ) -> Result<BindingId, BindingError> {
        self.register(ButtonEvent::NthClick, action, count, None)
    }

    /// Enables or disables a binding without removing it.
    ///
    /// Returns false if `id` was not issued by this engine.
    pub fn set_binding_active(&mut self, id: BindingId, active: bool) -> bool {
        self.registry.set_active(id, active)
    }

    /// Applies a configuration or reset action.
    pub fn handle_action(&mut self, action: EngineAction<I::Duration>) {
        match action {
            EngineAction::SetDebounceDelay(delay) => self.set_debounce_delay(delay),
            EngineAction::SetLongPressTime(time) => self.set_long_press_time(time),
            EngineAction::SetDoubleClickInterval(interval) => {
                self.set_double_click_interval(interval)
            }
            EngineAction::SetHoldInterval(interval) => self.set_hold_interval(interval),
            EngineAction::ResetCounter => self.reset_counter(),
            EngineAction::ResetToggle => self.reset_toggle(),
        }
    }

    /// Sets the debounce delay. Takes effect on the next update.
    pub fn set_debounce_delay(&mut self, delay: I::Duration) {
        self.config.debounce_delay = delay;
    }

    /// Sets the engine-wide long-press threshold.
    pub fn set_long_press_time(&mut self, time: I::Duration) {
        self.config.long_press_time = time;
    }

    /// Sets the engine-wide double-click window.
    pub fn set_double_click_interval(&mut self, interval: I::Duration) {
        self.config.double_click_interval = interval;
    }

    /// Sets the engine-wide hold repeat interval.
    pub fn set_hold_interval(&mut self, interval: I::Duration) {
        self.config.hold_interval = interval;
    }

    /// Sets which electrical level counts as pressed.
    pub fn set_active_level(&mut self, level: ActiveLevel) {
        self.config.active_level = level;
    }

    /// Zeroes the press counter. The next press becomes press 1.
    pub fn reset_counter(&mut self) {
        self.press_index = 0;
    }

    /// Clears the toggle state to `false`.
    pub fn reset_toggle(&mut self) {
        self.toggle = false;
    }

    /// Returns the number of presses since construction or the last counter reset.
    pub fn press_count(&self) -> u32 {
        self.press_index
    }

    /// Returns true while a press session is open.
    pub fn is_pressed(&self) -> bool {
        self.session.is_some()
    }

    /// Returns true if a long-press has fired in the current session.
    pub fn is_long_pressed(&self) -> bool {
        self.session.is_some_and(|s| s.long_press_fired)
    }

    /// Returns how long the button has been held, or zero if released.
    pub fn pressed_duration(&self) -> I::Duration {
        match self.session {
            Some(session) => self.time_source.now().duration_since(session.started_at),
            None => I::Duration::ZERO,
        }
    }

    /// Returns the current toggle state.
    pub fn toggle_state(&self) -> bool {
        self.toggle
    }

    /// Returns the current press session, if any.
    pub fn session(&self) -> Option<&PressSession<I>> {
        self.session.as_ref()
    }

    /// Returns when the most recent press was accepted.
    pub fn last_press_time(&self) -> Option<I> {
        self.last_press
    }

    /// Returns when the most recent release was accepted.
    pub fn last_release_time(&self) -> Option<I> {
        self.last_release
    }

    /// Returns the active timing configuration.
    pub fn config(&self) -> &ButtonConfig<I::Duration> {
        &self.config
    }

    /// Returns the number of registered bindings.
    pub fn binding_count(&self) -> usize {
        self.registry.len()
    }

    /// Returns the maximum number of bindings.
    pub fn capacity(&self) -> usize {
        self.registry.capacity()
    }

    /// Consumes the engine and returns the input.
    pub fn free(self) -> B {
        self.input
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::{Millis, MillisDuration};
    use core::cell::Cell;

    // Input whose level is set from the test
    struct MockInput<'l> {
        level: &'l Cell<bool>,
        configured: bool,
    }

    impl ButtonInput for MockInput<'_> {
        fn configure(&mut self) {
            self.configured = true;
        }

        fn is_high(&mut self) -> bool {
            self.level.get()
        }
    }

    struct MockTimeSource {
        now: Cell<Millis>,
    }

    impl MockTimeSource {
        fn new() -> Self {
            Self {
                now: Cell::new(Millis(0)),
            }
        }

        fn advance(&self, millis: u64) {
            self.now.set(Millis(self.now.get().0 + millis));
        }
    }

    impl TimeSource<Millis> for MockTimeSource {
        fn now(&self) -> Millis {
            self.now.get()
        }
    }

    fn run_for(
        engine: &mut ButtonEventEngine<'_, Millis, MockInput<'_>, MockTimeSource, 8>,
        timer: &MockTimeSource,
        millis: u64,
    ) {
        for _ in 0..millis {
            timer.advance(1);
            engine.update();
        }
    }

    #[test]
    fn begin_configures_input() {
        let level = Cell::new(false);
        let timer = MockTimeSource::new();
        let input = MockInput {
            level: &level,
            configured: false,
        };
        let mut engine = ButtonEventEngine::<Millis, _, _, 4>::new(input, &timer);

        engine.begin();
        assert!(engine.free().configured);
    }

    #[test]
    fn query_methods_track_session() {
        let level = Cell::new(false);
        let timer = MockTimeSource::new();
        let input = MockInput {
            level: &level,
            configured: false,
        };
        let mut engine = ButtonEventEngine::<Millis, _, _, 8>::new(input, &timer);

        assert!(!engine.is_pressed());
        assert_eq!(engine.pressed_duration(), MillisDuration::ZERO);

        level.set(true);
        run_for(&mut engine, &timer, 60);
        assert!(engine.is_pressed());
        assert_eq!(engine.press_count(), 1);
        assert!(engine.toggle_state());
        assert_eq!(engine.pressed_duration(), MillisDuration(9));

        run_for(&mut engine, &timer, 1000);
        assert!(engine.is_long_pressed());

        level.set(false);
        run_for(&mut engine, &timer, 60);
        assert!(!engine.is_pressed());
        assert!(!engine.is_long_pressed());
        assert_eq!(engine.pressed_duration(), MillisDuration::ZERO);
        assert!(engine.last_release_time().is_some());
    }

    #[test]
    fn long_press_flag_is_set_without_bindings() {
        let level = Cell::new(true);
        let timer = MockTimeSource::new();
        let input = MockInput {
            level: &level,
            configured: false,
        };
        let mut engine = ButtonEventEngine::<Millis, _, _, 8>::with_config(
            input,
            &timer,
            ButtonConfig::new().with_long_press_time(MillisDuration(200)),
        );

        // Press accepted at t=51, threshold reached at t=251
        run_for(&mut engine, &timer, 250);
        assert!(!engine.is_long_pressed());
        run_for(&mut engine, &timer, 1);
        assert!(engine.is_long_pressed());
    }

    #[test]
    fn handle_action_applies_settings_and_resets() {
        let level = Cell::new(false);
        let timer = MockTimeSource::new();
        let input = MockInput {
            level: &level,
            configured: false,
        };
        let mut engine = ButtonEventEngine::<Millis, _, _, 8>::new(input, &timer);

        engine.handle_action(EngineAction::SetDebounceDelay(MillisDuration(5)));
        engine.handle_action(EngineAction::SetLongPressTime(MillisDuration(400)));
        engine.handle_action(EngineAction::SetDoubleClickInterval(MillisDuration(200)));
        engine.handle_action(EngineAction::SetHoldInterval(MillisDuration(20)));
        assert_eq!(engine.config().debounce_delay, MillisDuration(5));
        assert_eq!(engine.config().long_press_time, MillisDuration(400));
        assert_eq!(engine.config().double_click_interval, MillisDuration(200));
        assert_eq!(engine.config().hold_interval, MillisDuration(20));

        level.set(true);
        run_for(&mut engine, &timer, 10);
        assert_eq!(engine.press_count(), 1);
        assert!(engine.toggle_state());

        engine.handle_action(EngineAction::ResetCounter);
        engine.handle_action(EngineAction::ResetToggle);
        assert_eq!(engine.press_count(), 0);
        assert!(!engine.toggle_state());
    }

    #[test]
    fn active_low_input_presses_on_low_level() {
        let level = Cell::new(true);
        let timer = MockTimeSource::new();
        let input = MockInput {
            level: &level,
            configured: false,
        };
        let mut engine = ButtonEventEngine::<Millis, _, _, 8>::with_config(
            input,
            &timer,
            ButtonConfig::new().with_active_level(ActiveLevel::Low),
        );

        run_for(&mut engine, &timer, 100);
        assert!(!engine.is_pressed());

        level.set(false);
        run_for(&mut engine, &timer, 100);
        assert!(engine.is_pressed());
    }
}
