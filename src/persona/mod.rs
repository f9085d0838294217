//! Persona form state
//!
//! A [`PersonaForm`] is a plain value. Edits are [`FormUpdate`]s applied
//! with [`PersonaForm::apply`], which consumes the old form and returns the
//! new one; nothing here can fail except parsing text into an update.

mod color;
mod form;
pub mod options;
mod presets;

pub use color::Color;
pub use form::{FormUpdate, Motives, PersonaForm, FIELD_NAMES, MOTIVE_SLOTS};
pub use options::{
    option_catalogue, AccessibilityNeed, AgeBracket, AudioPreference, Choice, FieldOptions,
    FocusType, Gender, InformationLayering, InteractionPreference, NavigationParadigm, Origin,
    PlatformPreference, SessionLength, SpatialInteraction, VisualEffectsLevel,
};
pub use presets::random_persona;
