//! Core types shared by the engine, the registry and the configuration.

/// Semantic button events that actions can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEvent {
    /// Accepted released-to-pressed edge.
    Press,

    /// Accepted pressed-to-released edge, unless a long-press fired in that session.
    Release,

    /// Button held past the long-press threshold. Once per session per binding.
    LongPress,

    /// Press that follows the previous release within the double-click window.
    DoubleClick,

    /// Repeats at a fixed interval for as long as the button is held.
    Hold,

    /// Every accepted press flips the toggle state.
    Toggle,

    /// Press whose ordinal equals the binding's trigger count.
    NthClick,
}

impl ButtonEvent {
    /// Returns true if bindings of this type honour a timing override.
    pub fn accepts_timing(self) -> bool {
        matches!(
            self,
            ButtonEvent::LongPress | ButtonEvent::DoubleClick | ButtonEvent::Hold
        )
    }
}

/// Electrical level that counts as "pressed".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActiveLevel {
    /// Pressed reads high (pull-down wiring).
    #[default]
    High,

    /// Pressed reads low (pull-up wiring).
    Low,
}

impl ActiveLevel {
    /// Maps a raw electrical level onto the logical pressed state.
    #[inline]
    pub fn is_pressed(self, level_high: bool) -> bool {
        match self {
            ActiveLevel::High => level_high,
            ActiveLevel::Low => !level_high,
        }
    }

    /// Electrical level read while the button is released.
    #[inline]
    pub fn released_level(self) -> bool {
        self == ActiveLevel::Low
    }
}

/// Reasons a binding was not added to the registry.
///
/// The engine state is left untouched in every case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BindingError {
    /// Registry capacity exceeded.
    CapacityExceeded,

    /// `NthClick` bindings need a trigger count of at least one.
    InvalidTriggerCount,
}

impl core::fmt::Display for BindingError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BindingError::CapacityExceeded => {
                write!(f, "action registry capacity exceeded")
            }
            BindingError::InvalidTriggerCount => {
                write!(f, "nth-click trigger count must be at least 1")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BindingError {}
