//! Random example personas

use std::collections::BTreeSet;

use rand::seq::IndexedRandom;
use rand::Rng;

use super::color::Color;
use super::form::{Motives, PersonaForm};
use super::options::Choice;

const EXAMPLE_NAME: &str = "Example Persona";
const EXAMPLE_TITLE: &str = "The User Archetype";
const EXAMPLE_MOTIVES: [&str; 3] = [
    "Discover new content",
    "Engage with others",
    "Create something unique",
];
const CULTURAL_CONTEXTS: &[&str] = &[
    "",
    "Grew up in a multilingual household",
    "Values community storytelling traditions",
    "Commutes daily and plays on the move",
    "Shares devices with family members",
];

/// Largest number of tags picked for each multi-select field
const MAX_SAMPLE_TAGS: usize = 2;

fn pick<C: Choice, R: Rng + ?Sized>(rng: &mut R) -> C {
    C::ALL[rng.random_range(0..C::ALL.len())]
}

fn pick_tags<C: Choice, R: Rng + ?Sized>(rng: &mut R) -> BTreeSet<C> {
    let count = rng.random_range(0..=MAX_SAMPLE_TAGS.min(C::ALL.len()));
    C::ALL.choose_multiple(rng, count).copied().collect()
}

/// Build a random example persona
///
/// Every enumerated field is drawn uniformly from its declared options.
/// Name, title and motives are fixed sample strings.
pub fn random_persona<R: Rng + ?Sized>(rng: &mut R) -> PersonaForm {
    let [first, second, third] = EXAMPLE_MOTIVES;
    let cultural_context = CULTURAL_CONTEXTS
        .choose(rng)
        .copied()
        .unwrap_or_default()
        .to_string();

    PersonaForm {
        name: EXAMPLE_NAME.to_string(),
        title: EXAMPLE_TITLE.to_string(),
        cultural_context,
        primary_color: Color::from_rgb(rng.random_range(0..=0xff_ffff)),
        gender: pick(rng),
        age_bracket: pick(rng),
        origin: pick(rng),
        focus_type: pick(rng),
        session_length: pick(rng),
        platform_pref: pick(rng),
        spatial_interaction: pick(rng),
        navigation: pick(rng),
        information_layering: pick(rng),
        audio_preference: pick(rng),
        visual_effects: pick(rng),
        motives: Motives::new(first, second, third),
        accessibility_needs: pick_tags(rng),
        interaction_preferences: pick_tags(rng),
    }
}
