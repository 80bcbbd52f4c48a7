//! Semantic features probed by the diagnostic tests.

use crate::{Aktionsart, Language, classify};
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, schemars::JsonSchema,
)]
pub enum Feature {
    Causative,
    Stative,
    Punctual,
    Telic,
    Dynamic,
}

impl Feature {
    pub const ALL: [Feature; 5] = [
        Feature::Causative,
        Feature::Stative,
        Feature::Punctual,
        Feature::Telic,
        Feature::Dynamic,
    ];

    pub fn name(&self, language: Language) -> &'static str {
        match (language, self) {
            (Language::Spanish, Feature::Causative) => "causativo",
            (Language::Spanish, Feature::Stative) => "estativo",
            (Language::Spanish, Feature::Punctual) => "puntual",
            (Language::Spanish, Feature::Telic) => "télico",
            (Language::Spanish, Feature::Dynamic) => "dinámico",
            (Language::English, Feature::Causative) => "causative",
            (Language::English, Feature::Stative) => "stative",
            (Language::English, Feature::Punctual) => "punctual",
            (Language::English, Feature::Telic) => "telic",
            (Language::English, Feature::Dynamic) => "dynamic",
        }
    }

    /// `[+télico]`, `[-dynamic]`, ...
    pub fn bracketed(&self, value: bool, language: Language) -> String {
        let sign = if value { '+' } else { '-' };
        format!("[{sign}{}]", self.name(language))
    }

    /// The line printed right after a test settles a feature.
    pub fn notice(&self, value: bool, language: Language) -> String {
        let bracketed = self.bracketed(value, language);
        match language {
            Language::Spanish => format!("El predicado es {bracketed}"),
            Language::English => format!("Predicate is {bracketed}"),
        }
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, schemars::JsonSchema,
)]
pub struct FeatureVector {
    pub causative: bool,
    pub stative: bool,
    pub punctual: bool,
    pub telic: bool,
    pub dynamic: bool,
}

impl FeatureVector {
    pub fn get(&self, feature: Feature) -> bool {
        match feature {
            Feature::Causative => self.causative,
            Feature::Stative => self.stative,
            Feature::Punctual => self.punctual,
            Feature::Telic => self.telic,
            Feature::Dynamic => self.dynamic,
        }
    }

    /// Every combination of the five features, in binary counting order.
    pub fn all() -> impl Iterator<Item = FeatureVector> {
        (0u8..32).map(|bits| FeatureVector {
            causative: bits & 0b10000 != 0,
            stative: bits & 0b01000 != 0,
            punctual: bits & 0b00100 != 0,
            telic: bits & 0b00010 != 0,
            dynamic: bits & 0b00001 != 0,
        })
    }

    /// The feature summary shown next to a result.
    ///
    /// States never report punctuality, telicity or dynamicity, whatever the
    /// stored booleans say.
    pub fn summary(&self, aktionsart: Aktionsart, language: Language) -> String {
        let is_state = aktionsart.is_state();
        Feature::ALL
            .iter()
            .map(|feature| {
                let value = match feature {
                    Feature::Causative | Feature::Stative => self.get(*feature),
                    _ => !is_state && self.get(*feature),
                };
                feature.bracketed(value, language)
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Features gathered so far by a questionnaire that has not finished yet.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema,
)]
pub struct PartialFeatures {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub causative: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stative: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub punctual: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telic: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dynamic: Option<bool>,
}

impl PartialFeatures {
    pub fn set(&mut self, feature: Feature, value: bool) {
        let slot = match feature {
            Feature::Causative => &mut self.causative,
            Feature::Stative => &mut self.stative,
            Feature::Punctual => &mut self.punctual,
            Feature::Telic => &mut self.telic,
            Feature::Dynamic => &mut self.dynamic,
        };
        *slot = Some(value);
    }

    pub fn clear(&mut self, feature: Feature) {
        match feature {
            Feature::Causative => self.causative = None,
            Feature::Stative => self.stative = None,
            Feature::Punctual => self.punctual = None,
            Feature::Telic => self.telic = None,
            Feature::Dynamic => self.dynamic = None,
        }
    }

    /// A full vector, if the decision tree has everything it needs.
    ///
    /// Stative predicates skip the last three tests, which then read as `false`.
    pub fn complete(&self) -> Option<FeatureVector> {
        let causative = self.causative?;
        let stative = self.stative?;
        if stative {
            return Some(FeatureVector {
                causative,
                stative,
                ..FeatureVector::default()
            });
        }
        Some(FeatureVector {
            causative,
            stative,
            punctual: self.punctual?,
            telic: self.telic?,
            dynamic: self.dynamic?,
        })
    }

    /// `None` means the answers do not determine a category.
    pub fn classify(&self) -> Option<Aktionsart> {
        self.complete().map(|features| classify(&features))
    }
}

impl From<FeatureVector> for PartialFeatures {
    fn from(features: FeatureVector) -> Self {
        Self {
            causative: Some(features.causative),
            stative: Some(features.stative),
            punctual: Some(features.punctual),
            telic: Some(features.telic),
            dynamic: Some(features.dynamic),
        }
    }
}
