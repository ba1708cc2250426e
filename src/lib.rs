#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`ButtonEventEngine`**: Debounces one button and dispatches actions for its events
//! - **`ButtonEvent`**: What can be bound (`Press`, `Release`, `LongPress`, `DoubleClick`, `Hold`, `Toggle`, `NthClick`)
//! - **`ButtonConfig`**: Engine-wide timings (debounce, long-press, double-click, hold) and active level
//! - **`ActionRegistry`**: Fixed-capacity, ordered list of bindings
//! - **`ButtonInput`**: Trait to implement for your input pin
//! - **`TimeSource`**: Trait to implement for your timing system
//! - **`EngineAction`**: Commands that can be sent to reconfigure or reset an engine
//!
//! The engine is poll-driven: call `update()` from your main loop. Actions are
//! plain closures borrowed by the engine, so they can capture context without
//! globals.

mod fmt;

pub mod command;
pub mod config;
pub mod debounce;
pub mod engine;
pub mod input;
pub mod registry;
pub mod time;
pub mod types;

pub use command::EngineAction;
pub use config::ButtonConfig;
pub use debounce::{Debouncer, Edge};
pub use engine::{ButtonEventEngine, PressSession};
#[cfg(feature = "embedded-hal")]
pub use input::HalInput;
pub use input::ButtonInput;
pub use registry::{Action, ActionBinding, ActionRegistry, BindingId};
#[cfg(feature = "std")]
pub use time::StdClock;
pub use time::{Millis, MillisDuration, TimeDuration, TimeInstant, TimeSource};
pub use types::{ActiveLevel, BindingError, ButtonEvent};
