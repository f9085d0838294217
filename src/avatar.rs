//! Avatar selection table
//!
//! The avatar drawn on a persona card depends on three buckets derived from
//! the form: gender, age and a skin-tone group derived from origin. The
//! table below is the whole mapping; every cell is a fixed set of
//! pre-authored vector fragments.
//!
//! | gender  | age   | hair                 | glasses | beard | wrinkles | earrings |
//! |---------|-------|----------------------|---------|-------|----------|----------|
//! | Female  | Young | long, dark           |         |       |          | yes      |
//! | Female  | Older | bob, grey            | yes     |       | yes      | yes      |
//! | Male    | Young | cropped, dark        |         |       |          |          |
//! | Male    | Older | receding, grey       | yes     | yes   | yes      |          |
//! | Neutral | Young | undercut, dark       |         |       |          |          |
//! | Neutral | Older | medium, grey         | yes     |       | yes      |          |
//!
//! Each row is drawn with one of three skin fills (light, medium, deep).

use crate::persona::{AgeBracket, Gender, Origin, PersonaForm};
use crate::stylesheet::Stylesheet;

/// Gender bucket used for the avatar shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenderBucket {
    Female,
    Male,
    /// `Non-binary` and `Prefer not to say`
    Neutral,
}

impl From<Gender> for GenderBucket {
    fn from(gender: Gender) -> Self {
        match gender {
            Gender::Female => Self::Female,
            Gender::Male => Self::Male,
            Gender::NonBinary | Gender::Unspecified => Self::Neutral,
        }
    }
}

/// Age bucket: brackets up to 44 are young, 45 and over are older
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgeBucket {
    Young,
    Older,
}

impl From<AgeBracket> for AgeBucket {
    fn from(age: AgeBracket) -> Self {
        match age {
            AgeBracket::From18To24 | AgeBracket::From25To34 | AgeBracket::From35To44 => {
                Self::Young
            }
            AgeBracket::From45To54 | AgeBracket::From55To64 | AgeBracket::Over65 => Self::Older,
        }
    }
}

/// Skin fill group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkinTone {
    Light,
    Medium,
    Deep,
}

impl SkinTone {
    fn token(self) -> &'static str {
        match self {
            Self::Light => "skin-light",
            Self::Medium => "skin-medium",
            Self::Deep => "skin-deep",
        }
    }
}

impl From<Origin> for SkinTone {
    /// Unspecified origin uses the medium tone.
    fn from(origin: Origin) -> Self {
        match origin {
            Origin::SouthernAfrica | Origin::EastAfrica | Origin::WestAfrica => Self::Deep,
            Origin::Europe | Origin::NorthAmerica | Origin::EastAsia => Self::Light,
            Origin::NorthAfrica
            | Origin::LatinAmerica
            | Origin::MiddleEast
            | Origin::SouthAsia
            | Origin::SoutheastAsia
            | Origin::Oceania
            | Origin::Unspecified => Self::Medium,
        }
    }
}

/// Hair fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HairStyle {
    Long,
    Bob,
    Cropped,
    Receding,
    Undercut,
    Medium,
}

impl HairStyle {
    fn path(self) -> &'static str {
        match self {
            Self::Long => {
                "M108,92 Q108,44 150,44 Q192,44 192,92 L196,150 Q186,128 182,96 Q170,66 150,66 Q130,66 118,96 Q114,128 104,150 Z"
            }
            Self::Bob => {
                "M108,95 Q106,46 150,46 Q194,46 192,95 L194,122 L178,122 L178,82 Q160,64 122,82 L122,122 L106,122 Z"
            }
            Self::Cropped => "M112,80 Q114,48 150,48 Q186,48 188,80 Q170,62 150,62 Q130,62 112,80 Z",
            Self::Receding => {
                "M112,88 Q110,62 124,56 L128,74 Q118,78 112,88 Z M188,88 Q190,62 176,56 L172,74 Q182,78 188,88 Z"
            }
            Self::Undercut => "M114,78 Q118,44 158,46 Q190,50 186,72 Q166,58 134,66 Q120,70 114,78 Z",
            Self::Medium => "M108,100 Q104,46 150,46 Q196,46 192,100 Q186,70 150,64 Q114,70 108,100 Z",
        }
    }
}

/// Which fragments one avatar cell draws
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvatarFeatures {
    pub hair: HairStyle,
    pub glasses: bool,
    pub beard: bool,
    pub wrinkles: bool,
    pub earrings: bool,
}

/// One cell of the avatar table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AvatarKind {
    pub gender: GenderBucket,
    pub age: AgeBucket,
    pub skin: SkinTone,
}

impl AvatarKind {
    /// Select the avatar cell for a form
    pub fn for_form(form: &PersonaForm) -> Self {
        Self {
            gender: form.gender.into(),
            age: form.age_bracket.into(),
            skin: form.origin.into(),
        }
    }

    /// Features drawn for this cell (skin does not change the shape)
    pub fn features(&self) -> AvatarFeatures {
        use AgeBucket::*;
        use GenderBucket::*;

        let older = self.age == Older;
        let (hair, beard, earrings) = match (self.gender, self.age) {
            (Female, Young) => (HairStyle::Long, false, true),
            (Female, Older) => (HairStyle::Bob, false, true),
            (Male, Young) => (HairStyle::Cropped, false, false),
            (Male, Older) => (HairStyle::Receding, true, false),
            (Neutral, Young) => (HairStyle::Undercut, false, false),
            (Neutral, Older) => (HairStyle::Medium, false, false),
        };
        AvatarFeatures {
            hair,
            glasses: older,
            beard,
            wrinkles: older,
            earrings,
        }
    }

    /// Stable identifier, e.g. `female-young-deep`
    pub fn slug(&self) -> String {
        let gender = match self.gender {
            GenderBucket::Female => "female",
            GenderBucket::Male => "male",
            GenderBucket::Neutral => "neutral",
        };
        let age = match self.age {
            AgeBucket::Young => "young",
            AgeBucket::Older => "older",
        };
        let skin = match self.skin {
            SkinTone::Light => "light",
            SkinTone::Medium => "medium",
            SkinTone::Deep => "deep",
        };
        format!("{gender}-{age}-{skin}")
    }

    /// SVG elements for the face, positioned for a 300-wide card.
    ///
    /// The body shape and the avatar ring are drawn by the renderer; these
    /// fragments sit on top of them.
    pub fn fragments(&self, stylesheet: &Stylesheet) -> Vec<String> {
        let features = self.features();
        let skin = stylesheet.resolve_or_default(self.skin.token());
        let hair = stylesheet.resolve_or_default(match self.age {
            AgeBucket::Young => "hair-dark",
            AgeBucket::Older => "hair-grey",
        });
        let line = stylesheet.resolve_or_default("feature-line");
        let accessory = stylesheet.resolve_or_default("accessory");

        let mut parts = vec![format!(r#"<circle cx="150" cy="90" r="40" fill="{skin}"/>"#)];

        if features.earrings {
            parts.push(format!(r#"<circle cx="110" cy="102" r="3.5" fill="{accessory}"/>"#));
            parts.push(format!(r#"<circle cx="190" cy="102" r="3.5" fill="{accessory}"/>"#));
        }

        parts.push(format!(r#"<path d="{}" fill="{hair}"/>"#, features.hair.path()));

        parts.push(format!(r#"<circle cx="138" cy="85" r="3" fill="{line}"/>"#));
        parts.push(format!(r#"<circle cx="162" cy="85" r="3" fill="{line}"/>"#));

        if features.glasses {
            parts.push(format!(
                r#"<circle cx="138" cy="85" r="9" fill="none" stroke="{line}" stroke-width="1.5"/>"#
            ));
            parts.push(format!(
                r#"<circle cx="162" cy="85" r="9" fill="none" stroke="{line}" stroke-width="1.5"/>"#
            ));
            parts.push(format!(
                r#"<line x1="147" y1="85" x2="153" y2="85" stroke="{line}" stroke-width="1.5"/>"#
            ));
        }

        if features.wrinkles {
            parts.push(format!(
                r#"<path d="M124,96 Q128,100 124,104 M176,96 Q172,100 176,104" fill="none" stroke="{line}" stroke-width="1" opacity="0.5"/>"#
            ));
        }

        if features.beard {
            parts.push(format!(
                r#"<path d="M118,104 Q150,146 182,104 Q172,128 150,130 Q128,128 118,104 Z" fill="{hair}"/>"#
            ));
        }

        parts.push(format!(
            r#"<path d="M130,100 Q150,120 170,100" stroke="{line}" stroke-width="2" fill="none"/>"#
        ));

        parts
    }
}
