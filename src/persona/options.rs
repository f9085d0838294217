//! Enumerated persona fields and their declared option lists
//!
//! Every single-select field of the persona form is a closed enum. The
//! display string of each variant is exactly what the form offers, what
//! persona files contain, and what the renderer prints.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FormError;

/// A closed set of options for one form field
pub trait Choice: Copy + Eq + Ord + 'static {
    /// Human-readable field label
    const LABEL: &'static str;

    /// Every option, in declaration order
    const ALL: &'static [Self];

    /// Display string for this option
    fn as_str(self) -> &'static str;

    /// Iterate over the display strings of every option
    fn option_strs() -> impl Iterator<Item = &'static str> {
        Self::ALL.iter().map(|c| c.as_str())
    }
}

macro_rules! choice_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident ($label:literal, default = $default:ident) {
            $($variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        choice_enum! {
            $(#[$meta])*
            pub enum $name ($label) {
                $($variant => $text),+
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }
    };
    (
        $(#[$meta:meta])*
        pub enum $name:ident ($label:literal) {
            $($variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl Choice for $name {
            const LABEL: &'static str = $label;
            const ALL: &'static [Self] = &[$($name::$variant),+];

            fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = FormError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                parse_choice(s)
            }
        }
    };
}

/// Look up an option by display string, ignoring ASCII case and surrounding
/// whitespace
pub fn parse_choice<C: Choice>(value: &str) -> Result<C, FormError> {
    let wanted = value.trim();
    C::ALL
        .iter()
        .copied()
        .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
        .ok_or_else(|| FormError::invalid_option(C::LABEL, value, C::option_strs()))
}

choice_enum! {
    pub enum Gender ("gender", default = Unspecified) {
        Female => "Female",
        Male => "Male",
        NonBinary => "Non-binary",
        Unspecified => "Prefer not to say",
    }
}

choice_enum! {
    pub enum AgeBracket ("age bracket", default = From25To34) {
        From18To24 => "18-24",
        From25To34 => "25-34",
        From35To44 => "35-44",
        From45To54 => "45-54",
        From55To64 => "55-64",
        Over65 => "65+",
    }
}

choice_enum! {
    pub enum Origin ("origin", default = Unspecified) {
        SouthernAfrica => "Southern Africa",
        EastAfrica => "East Africa",
        WestAfrica => "West Africa",
        NorthAfrica => "North Africa",
        Europe => "Europe",
        NorthAmerica => "North America",
        LatinAmerica => "Latin America",
        MiddleEast => "Middle East",
        SouthAsia => "South Asia",
        EastAsia => "East Asia",
        SoutheastAsia => "Southeast Asia",
        Oceania => "Oceania",
        Unspecified => "Prefer not to say",
    }
}

choice_enum! {
    pub enum FocusType ("focus type", default = Interaction) {
        Interaction => "Interaction-focused",
        Story => "Story-focused",
        Content => "Content-focused",
        Detail => "Detail-oriented",
    }
}

choice_enum! {
    pub enum SessionLength ("session length", default = Short) {
        Short => "Short sessions",
        Medium => "Medium sessions",
        Long => "Long sessions",
    }
}

choice_enum! {
    pub enum PlatformPreference ("platform preference", default = Mobile) {
        Mobile => "Mobile user",
        NoPreference => "No platform preference",
        Console => "Prefers console",
        Pc => "Prefers PC",
    }
}

choice_enum! {
    pub enum SpatialInteraction ("spatial interaction model", default = HandTracking) {
        HandTracking => "Hand tracking",
        Controller => "Controller-based",
        GazeDwell => "Gaze and dwell",
        Voice => "Voice commands",
    }
}

choice_enum! {
    pub enum NavigationParadigm ("navigation paradigm", default = Teleportation) {
        Teleportation => "Teleportation",
        SmoothLocomotion => "Smooth locomotion",
        RoomScale => "Room-scale walking",
        Stationary => "Seated / stationary",
    }
}

choice_enum! {
    pub enum InformationLayering ("information layering", default = Contextual) {
        Minimal => "Minimal overlays",
        Contextual => "Contextual overlays",
        Dense => "Dense information layers",
    }
}

choice_enum! {
    pub enum AudioPreference ("audio preference", default = Spatial) {
        Spatial => "Spatial audio",
        Stereo => "Stereo audio",
        Captions => "Captions over audio",
    }
}

choice_enum! {
    pub enum VisualEffectsLevel ("visual effects level", default = Medium) {
        Low => "Low",
        Medium => "Medium",
        High => "High",
    }
}

choice_enum! {
    /// Multi-select tag: accessibility needs
    pub enum AccessibilityNeed ("accessibility need") {
        SeatedPlay => "Seated play",
        OneHanded => "One-handed use",
        Captions => "Subtitles and captions",
        ColorblindPalette => "Colorblind-friendly palette",
        ReducedMotion => "Reduced motion",
        HighContrast => "High contrast text",
    }
}

choice_enum! {
    /// Multi-select tag: interaction preferences
    pub enum InteractionPreference ("interaction preference") {
        SocialMultiplayer => "Social multiplayer",
        SoloExploration => "Solo exploration",
        Guided => "Guided experiences",
        Sandbox => "Creative sandbox",
        Competitive => "Competitive challenges",
    }
}

/// One enumerated field with its declared options, for listings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldOptions {
    /// Field name as accepted by `field=value` assignments
    pub field: &'static str,
    /// Human-readable label
    pub label: &'static str,
    /// Declared options in order
    pub options: Vec<&'static str>,
}

impl FieldOptions {
    fn of<C: Choice>(field: &'static str) -> Self {
        Self {
            field,
            label: C::LABEL,
            options: C::option_strs().collect(),
        }
    }
}

/// Every enumerated field of the persona form with its options
pub fn option_catalogue() -> Vec<FieldOptions> {
    vec![
        FieldOptions::of::<Gender>("gender"),
        FieldOptions::of::<AgeBracket>("age_bracket"),
        FieldOptions::of::<Origin>("origin"),
        FieldOptions::of::<FocusType>("focus_type"),
        FieldOptions::of::<SessionLength>("session_length"),
        FieldOptions::of::<PlatformPreference>("platform_pref"),
        FieldOptions::of::<SpatialInteraction>("spatial_interaction"),
        FieldOptions::of::<NavigationParadigm>("navigation"),
        FieldOptions::of::<InformationLayering>("information_layering"),
        FieldOptions::of::<AudioPreference>("audio_preference"),
        FieldOptions::of::<VisualEffectsLevel>("visual_effects"),
        FieldOptions::of::<AccessibilityNeed>("accessibility"),
        FieldOptions::of::<InteractionPreference>("interaction"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        let parsed: FocusType = "story-FOCUSED".parse().unwrap();
        assert_eq!(parsed, FocusType::Story);
        let parsed: NavigationParadigm = "  Seated / stationary ".parse().unwrap();
        assert_eq!(parsed, NavigationParadigm::Stationary);
    }

    #[test]
    fn test_parse_unknown_option_lists_valid_ones() {
        let err = "Forever".parse::<SessionLength>().unwrap_err();
        assert_eq!(
            err,
            FormError::InvalidOption {
                field: "session length".to_string(),
                value: "Forever".to_string(),
                valid: "Short sessions, Medium sessions, Long sessions".to_string(),
            }
        );
    }

    #[test]
    fn test_display_round_trips_every_option() {
        fn check<C: Choice + FromStr<Err = FormError> + fmt::Debug>() {
            for option in C::ALL {
                assert_eq!(option.as_str().parse::<C>().unwrap(), *option);
            }
        }
        check::<Gender>();
        check::<AgeBracket>();
        check::<Origin>();
        check::<AccessibilityNeed>();
        check::<InteractionPreference>();
    }

    #[test]
    fn test_defaults() {
        assert_eq!(Gender::default().as_str(), "Prefer not to say");
        assert_eq!(AgeBracket::default().as_str(), "25-34");
        assert_eq!(FocusType::default().as_str(), "Interaction-focused");
        assert_eq!(VisualEffectsLevel::default().as_str(), "Medium");
    }

    #[test]
    fn test_platform_options_snapshot() {
        let options: Vec<_> = PlatformPreference::option_strs().collect();
        insta::assert_debug_snapshot!(options, @r#"
        [
            "Mobile user",
            "No platform preference",
            "Prefers console",
            "Prefers PC",
        ]
        "#);
    }

    #[test]
    fn test_catalogue_covers_every_field() {
        let catalogue = option_catalogue();
        assert_eq!(catalogue.len(), 13);
        let session = catalogue
            .iter()
            .find(|f| f.field == "session_length")
            .unwrap();
        assert_eq!(session.options.len(), 3);
    }
}
