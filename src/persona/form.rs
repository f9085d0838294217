//! The persona form value and its updates

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{FormError, PersonaFileError};

use super::color::Color;
use super::options::{
    parse_choice, AccessibilityNeed, AgeBracket, AudioPreference, FocusType, Gender,
    InformationLayering, InteractionPreference, NavigationParadigm, Origin, PlatformPreference,
    SessionLength, SpatialInteraction, VisualEffectsLevel,
};

/// Number of motive slots on every persona
pub const MOTIVE_SLOTS: usize = 3;

/// Exactly three free-text motives, any of which may be empty
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Motives([String; MOTIVE_SLOTS]);

impl Motives {
    /// Create motives from three strings
    pub fn new(
        first: impl Into<String>,
        second: impl Into<String>,
        third: impl Into<String>,
    ) -> Self {
        Self([first.into(), second.into(), third.into()])
    }

    /// Motive at `index`, if the slot exists
    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    /// Replace the motive at `index`; out-of-range indices are ignored
    pub fn set(&mut self, index: usize, value: impl Into<String>) {
        if let Some(slot) = self.0.get_mut(index) {
            *slot = value.into();
        }
    }

    /// Iterate over all three slots in order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// Extra entries are dropped and missing ones become empty strings.
impl From<Vec<String>> for Motives {
    fn from(values: Vec<String>) -> Self {
        let mut motives = Self::default();
        for (index, value) in values.into_iter().take(MOTIVE_SLOTS).enumerate() {
            motives.0[index] = value;
        }
        motives
    }
}

impl From<Motives> for Vec<String> {
    fn from(motives: Motives) -> Self {
        motives.0.into()
    }
}

/// All persona attributes collected by the form
///
/// Missing keys in a persona file take the field's default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonaForm {
    pub name: String,
    pub title: String,
    pub cultural_context: String,
    pub primary_color: Color,
    pub gender: Gender,
    pub age_bracket: AgeBracket,
    pub origin: Origin,
    pub focus_type: FocusType,
    pub session_length: SessionLength,
    pub platform_pref: PlatformPreference,
    pub spatial_interaction: SpatialInteraction,
    pub navigation: NavigationParadigm,
    pub information_layering: InformationLayering,
    pub audio_preference: AudioPreference,
    pub visual_effects: VisualEffectsLevel,
    pub motives: Motives,
    pub accessibility_needs: BTreeSet<AccessibilityNeed>,
    pub interaction_preferences: BTreeSet<InteractionPreference>,
}

/// A single edit to a persona form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormUpdate {
    Name(String),
    Title(String),
    CulturalContext(String),
    PrimaryColor(Color),
    Gender(Gender),
    AgeBracket(AgeBracket),
    Origin(Origin),
    FocusType(FocusType),
    SessionLength(SessionLength),
    PlatformPreference(PlatformPreference),
    SpatialInteraction(SpatialInteraction),
    Navigation(NavigationParadigm),
    InformationLayering(InformationLayering),
    AudioPreference(AudioPreference),
    VisualEffects(VisualEffectsLevel),
    Motive { index: usize, value: String },
    ToggleAccessibility(AccessibilityNeed),
    ToggleInteraction(InteractionPreference),
}

/// Field names accepted by [`FormUpdate::parse`]
pub const FIELD_NAMES: &[&str] = &[
    "name",
    "title",
    "cultural_context",
    "primary_color",
    "gender",
    "age_bracket",
    "origin",
    "focus_type",
    "session_length",
    "platform_pref",
    "spatial_interaction",
    "navigation",
    "information_layering",
    "audio_preference",
    "visual_effects",
    "motive1",
    "motive2",
    "motive3",
    "accessibility",
    "interaction",
];

impl FormUpdate {
    /// Build an update from a textual field name and value
    ///
    /// Enumerated values must match a declared option (case-insensitive).
    /// `accessibility` and `interaction` produce toggles.
    pub fn parse(field: &str, value: &str) -> Result<Self, FormError> {
        let update = match field.trim() {
            "name" => Self::Name(value.to_string()),
            "title" => Self::Title(value.to_string()),
            "cultural_context" => Self::CulturalContext(value.to_string()),
            "primary_color" => Self::PrimaryColor(value.parse()?),
            "gender" => Self::Gender(parse_choice(value)?),
            "age_bracket" => Self::AgeBracket(parse_choice(value)?),
            "origin" => Self::Origin(parse_choice(value)?),
            "focus_type" => Self::FocusType(parse_choice(value)?),
            "session_length" => Self::SessionLength(parse_choice(value)?),
            "platform_pref" => Self::PlatformPreference(parse_choice(value)?),
            "spatial_interaction" => Self::SpatialInteraction(parse_choice(value)?),
            "navigation" => Self::Navigation(parse_choice(value)?),
            "information_layering" => Self::InformationLayering(parse_choice(value)?),
            "audio_preference" => Self::AudioPreference(parse_choice(value)?),
            "visual_effects" => Self::VisualEffects(parse_choice(value)?),
            "motive1" => Self::motive(0, value),
            "motive2" => Self::motive(1, value),
            "motive3" => Self::motive(2, value),
            "accessibility" => Self::ToggleAccessibility(parse_choice(value)?),
            "interaction" => Self::ToggleInteraction(parse_choice(value)?),
            other => return Err(FormError::unknown_field(other, FIELD_NAMES.iter().copied())),
        };
        Ok(update)
    }

    fn motive(index: usize, value: &str) -> Self {
        Self::Motive {
            index,
            value: value.to_string(),
        }
    }

    /// Parse a `field=value` assignment
    pub fn parse_assignment(assignment: &str) -> Result<Self, FormError> {
        let (field, value) = assignment
            .split_once('=')
            .ok_or_else(|| FormError::MalformedAssignment(assignment.to_string()))?;
        Self::parse(field, value)
    }
}

impl PersonaForm {
    /// Create a form with every field at its default
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one update, producing the next form value
    pub fn apply(mut self, update: FormUpdate) -> Self {
        match update {
            FormUpdate::Name(v) => self.name = v,
            FormUpdate::Title(v) => self.title = v,
            FormUpdate::CulturalContext(v) => self.cultural_context = v,
            FormUpdate::PrimaryColor(v) => self.primary_color = v,
            FormUpdate::Gender(v) => self.gender = v,
            FormUpdate::AgeBracket(v) => self.age_bracket = v,
            FormUpdate::Origin(v) => self.origin = v,
            FormUpdate::FocusType(v) => self.focus_type = v,
            FormUpdate::SessionLength(v) => self.session_length = v,
            FormUpdate::PlatformPreference(v) => self.platform_pref = v,
            FormUpdate::SpatialInteraction(v) => self.spatial_interaction = v,
            FormUpdate::Navigation(v) => self.navigation = v,
            FormUpdate::InformationLayering(v) => self.information_layering = v,
            FormUpdate::AudioPreference(v) => self.audio_preference = v,
            FormUpdate::VisualEffects(v) => self.visual_effects = v,
            FormUpdate::Motive { index, value } => self.motives.set(index, value),
            FormUpdate::ToggleAccessibility(need) => return self.toggle_accessibility(need),
            FormUpdate::ToggleInteraction(pref) => return self.toggle_interaction(pref),
        }
        self
    }

    /// Apply updates in order
    pub fn apply_all(self, updates: impl IntoIterator<Item = FormUpdate>) -> Self {
        updates.into_iter().fold(self, Self::apply)
    }

    /// Add the need if absent, remove it if present
    pub fn toggle_accessibility(mut self, need: AccessibilityNeed) -> Self {
        if !self.accessibility_needs.remove(&need) {
            self.accessibility_needs.insert(need);
        }
        self
    }

    /// Add the preference if absent, remove it if present
    pub fn toggle_interaction(mut self, pref: InteractionPreference) -> Self {
        if !self.interaction_preferences.remove(&pref) {
            self.interaction_preferences.insert(pref);
        }
        self
    }

    /// Load a persona from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, PersonaFileError> {
        let content = std::fs::read_to_string(path).map_err(|source| PersonaFileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Load a persona from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self, PersonaFileError> {
        Ok(toml::from_str(content)?)
    }

    /// Serialize the persona as TOML
    pub fn to_toml_string(&self) -> Result<String, PersonaFileError> {
        Ok(toml::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let form = PersonaForm::new();
        assert_eq!(form.name, "");
        assert_eq!(form.primary_color.to_hex(), "#3b82f6");
        assert_eq!(form.motives.iter().count(), MOTIVE_SLOTS);
        assert!(form.motives.iter().all(str::is_empty));
        assert!(form.accessibility_needs.is_empty());
    }

    #[test]
    fn test_apply_scalar_updates() {
        let form = PersonaForm::new().apply_all([
            FormUpdate::Name("Themba".to_string()),
            FormUpdate::FocusType(FocusType::Story),
            FormUpdate::Navigation(NavigationParadigm::RoomScale),
        ]);
        assert_eq!(form.name, "Themba");
        assert_eq!(form.focus_type, FocusType::Story);
        assert_eq!(form.navigation, NavigationParadigm::RoomScale);
    }

    #[test]
    fn test_motive_update_and_out_of_range() {
        let form = PersonaForm::new().apply(FormUpdate::Motive {
            index: 1,
            value: "Meet friends".to_string(),
        });
        assert_eq!(form.motives.get(1), Some("Meet friends"));

        let unchanged = form.clone().apply(FormUpdate::Motive {
            index: 7,
            value: "ignored".to_string(),
        });
        assert_eq!(unchanged, form);
    }

    #[test]
    fn test_toggle_is_its_own_inverse() {
        let start = PersonaForm::new().toggle_accessibility(AccessibilityNeed::ReducedMotion);
        let toggled = start
            .clone()
            .toggle_accessibility(AccessibilityNeed::OneHanded)
            .toggle_accessibility(AccessibilityNeed::OneHanded);
        assert_eq!(toggled.accessibility_needs, start.accessibility_needs);

        let prefs = start
            .clone()
            .toggle_interaction(InteractionPreference::Guided)
            .toggle_interaction(InteractionPreference::Guided);
        assert_eq!(prefs, start);
    }

    #[test]
    fn test_tag_sets_iterate_in_declaration_order() {
        let form = PersonaForm::new()
            .toggle_accessibility(AccessibilityNeed::HighContrast)
            .toggle_accessibility(AccessibilityNeed::SeatedPlay);
        let order: Vec<_> = form.accessibility_needs.iter().copied().collect();
        assert_eq!(
            order,
            vec![AccessibilityNeed::SeatedPlay, AccessibilityNeed::HighContrast]
        );
    }

    #[test]
    fn test_parse_assignment() {
        assert_eq!(
            FormUpdate::parse_assignment("session_length=long sessions").unwrap(),
            FormUpdate::SessionLength(SessionLength::Long)
        );
        assert_eq!(
            FormUpdate::parse_assignment("motive3=Build things").unwrap(),
            FormUpdate::Motive {
                index: 2,
                value: "Build things".to_string()
            }
        );
        assert_eq!(
            FormUpdate::parse_assignment("title=a=b").unwrap(),
            FormUpdate::Title("a=b".to_string())
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            FormUpdate::parse_assignment("nickname=x"),
            Err(FormError::UnknownField { .. })
        ));
        assert!(matches!(
            FormUpdate::parse_assignment("gender=robot"),
            Err(FormError::InvalidOption { .. })
        ));
        assert!(matches!(
            FormUpdate::parse_assignment("primary_color=blue"),
            Err(FormError::InvalidColor(_))
        ));
        assert!(matches!(
            FormUpdate::parse_assignment("name"),
            Err(FormError::MalformedAssignment(_))
        ));
    }

    #[test]
    fn test_toml_with_missing_keys_uses_defaults() {
        let form = PersonaForm::from_toml_str(
            r##"
name = "Themba"
primary_color = "#22c55e"
origin = "Southern Africa"
motives = ["Explore heritage sites"]
accessibility_needs = ["Reduced motion", "Seated play"]
"##,
        )
        .unwrap();
        assert_eq!(form.name, "Themba");
        assert_eq!(form.origin, Origin::SouthernAfrica);
        assert_eq!(form.focus_type, FocusType::Interaction);
        assert_eq!(form.motives.get(0), Some("Explore heritage sites"));
        assert_eq!(form.motives.get(2), Some(""));
        assert_eq!(form.accessibility_needs.len(), 2);
    }

    #[test]
    fn test_toml_rejects_undeclared_option() {
        let result = PersonaForm::from_toml_str(r#"session_length = "Forever""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let form = PersonaForm::new()
            .apply(FormUpdate::Name("Ana".to_string()))
            .toggle_interaction(InteractionPreference::Sandbox);
        let text = form.to_toml_string().unwrap();
        assert_eq!(PersonaForm::from_toml_str(&text).unwrap(), form);
    }
}
