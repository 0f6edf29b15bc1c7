//! Screens the component cycles through, and their fixed slot numbers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the six screens. The discriminant is the slot number passed to
/// `register_screen`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreenSlot {
    Year = 0,
    Month = 1,
    Day = 2,
    Hour = 3,
    Habits = 4,
    GameOfLife = 5,
}

impl ScreenSlot {
    /// All slots in slot order.
    pub const ALL: [Self; 6] = [
        Self::Year,
        Self::Month,
        Self::Day,
        Self::Hour,
        Self::Habits,
        Self::GameOfLife,
    ];

    /// Slot number as understood by the component.
    #[must_use]
    pub const fn slot(self) -> i64 {
        self as i64
    }

    /// Key of this screen inside the `screens` mapping.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Year => "year",
            Self::Month => "month",
            Self::Day => "day",
            Self::Hour => "hour",
            Self::Habits => "habits",
            Self::GameOfLife => "game_of_life",
        }
    }
}

impl fmt::Display for ScreenSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Per-screen settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScreenSettings {
    pub enabled: bool,
}

impl Default for ScreenSettings {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// The `screens` block: explicit settings for the screens the user listed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Screens {
    pub year: Option<ScreenSettings>,
    pub month: Option<ScreenSettings>,
    pub day: Option<ScreenSettings>,
    pub hour: Option<ScreenSettings>,
    pub habits: Option<ScreenSettings>,
    pub game_of_life: Option<ScreenSettings>,
}

impl Screens {
    /// Explicit settings for `slot`, if the user listed it.
    #[must_use]
    pub fn get(&self, slot: ScreenSlot) -> Option<ScreenSettings> {
        match slot {
            ScreenSlot::Year => self.year,
            ScreenSlot::Month => self.month,
            ScreenSlot::Day => self.day,
            ScreenSlot::Hour => self.hour,
            ScreenSlot::Habits => self.habits,
            ScreenSlot::GameOfLife => self.game_of_life,
        }
    }

    pub fn set(&mut self, slot: ScreenSlot, settings: ScreenSettings) {
        let entry = match slot {
            ScreenSlot::Year => &mut self.year,
            ScreenSlot::Month => &mut self.month,
            ScreenSlot::Day => &mut self.day,
            ScreenSlot::Hour => &mut self.hour,
            ScreenSlot::Habits => &mut self.habits,
            ScreenSlot::GameOfLife => &mut self.game_of_life,
        };
        *entry = Some(settings);
    }

    /// Whether `slot` is enabled, falling back to the per-screen default.
    #[must_use]
    pub fn is_enabled(&self, slot: ScreenSlot) -> bool {
        self.get(slot).unwrap_or_default().enabled
    }
}
