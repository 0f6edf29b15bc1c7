//! Visual style options understood by the LifeMatrix component.
//!
//! Every option set has a fixed list of labels. The labels are what users
//! write in the configuration and, except for [`DisplayStyle`] (emitted as an
//! integer), what is passed to the component's string setters.

use std::fmt;

use serde::Serialize;

macro_rules! define_options {
    ($(#[doc = $doc:expr])* $name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Accepted labels, in declaration order.
            pub const OPTIONS: &'static [&'static str] = &[$($label),+];

            /// The label written in configuration and passed to the component.
            #[must_use]
            pub fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }

            /// Look up an option by its exact label.
            #[must_use]
            pub fn from_label(label: &str) -> Option<Self> {
                match label {
                    $($label => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

define_options!(
    /// How fill-bar views are coloured.
    DisplayStyle {
        SingleColor => "Single Color",
        Gradient => "Gradient",
        TimeSegments => "Time Segments",
        Rainbow => "Rainbow",
    }
);

impl DisplayStyle {
    /// Integer value of the component-side `DisplayStyle` enum.
    #[must_use]
    pub const fn code(self) -> i64 {
        match self {
            Self::SingleColor => 0,
            Self::Gradient => 1,
            Self::TimeSegments => 2,
            Self::Rainbow => 3,
        }
    }

    #[must_use]
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::SingleColor),
            1 => Some(Self::Gradient),
            2 => Some(Self::TimeSegments),
            3 => Some(Self::Rainbow),
            _ => None,
        }
    }

    /// Label → integer table used by the schema.
    pub const CODES: &'static [(&'static str, i64)] = &[
        ("Single Color", 0),
        ("Gradient", 1),
        ("Time Segments", 2),
        ("Rainbow", 3),
    ];
}

define_options!(
    /// Where the text area sits relative to the visualisation.
    TextAreaPosition {
        Top => "Top",
        Bottom => "Bottom",
        None => "None",
    }
);

define_options!(
    /// Direction in which progress bars fill.
    FillDirection {
        BottomToTop => "Bottom to Top",
        TopToBottom => "Top to Bottom",
    }
);

define_options!(
    /// Shape drawn at the current-time marker.
    MarkerStyle {
        None => "None",
        SingleDot => "Single Dot",
        GradientPeak => "Gradient Peak",
    }
);

define_options!(
    /// Colour of the current-time marker.
    MarkerColor {
        Blue => "Blue",
        White => "White",
        Yellow => "Yellow",
        Red => "Red",
        Green => "Green",
        Cyan => "Cyan",
        Magenta => "Magenta",
    }
);

define_options!(
    /// How days are filled in the year and month views.
    DayFill {
        Fixed => "Fixed",
        Flat => "Flat",
        Shaded => "Shaded",
    }
);

impl DayFill {
    /// Current labels plus the older spellings the component still accepts.
    pub const ACCEPTED: &'static [&'static str] = &[
        "Fixed",
        "Flat",
        "Shaded",
        "Activity",
        "Scheme",
        "Activity + Scheme",
    ];

    /// Resolve a current or legacy label to its option.
    #[must_use]
    pub fn from_any_label(label: &str) -> Option<Self> {
        match label {
            "Activity" => Some(Self::Fixed),
            "Scheme" => Some(Self::Flat),
            "Activity + Scheme" => Some(Self::Shaded),
            other => Self::from_label(other),
        }
    }
}

define_options!(
    /// How year events are highlighted in the year view.
    YearEventStyle {
        None => "None",
        Markers => "Markers",
        Pulse => "Pulse",
    }
);

/// Gradient names the component maps to a palette. Any other string is
/// accepted but leaves the component on its current gradient.
pub const KNOWN_GRADIENT_TYPES: &[&str] = &[
    "Red-Blue",
    "Green-Yellow",
    "Cyan-Magenta",
    "Purple-Orange",
    "Blue-Yellow",
];
