//! Aktionsart classes and the decision table that assigns them.

use crate::{Error, FeatureVector, Language};
use serde::{Deserialize, Serialize};

/// The seven non-causative classes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, schemars::JsonSchema,
)]
pub enum BaseClass {
    State,
    Achievement,
    Semelfactive,
    ActiveAccomplishment,
    Accomplishment,
    Activity,
    Process,
}

impl BaseClass {
    /// Aspectual operator that heads the logical structure, if any.
    pub fn aspectual_operator(&self) -> Option<&'static str> {
        match self {
            BaseClass::Achievement => Some("INGR"),
            BaseClass::Accomplishment | BaseClass::ActiveAccomplishment => Some("BECOME"),
            BaseClass::Process => Some("PROC"),
            BaseClass::Semelfactive => Some("SEML"),
            BaseClass::State | BaseClass::Activity => None,
        }
    }

    fn spanish_label(&self) -> &'static str {
        match self {
            BaseClass::State => "estado",
            BaseClass::Achievement => "logro",
            BaseClass::Semelfactive => "semelfactivo",
            BaseClass::ActiveAccomplishment => "realización activa",
            BaseClass::Accomplishment => "realización",
            BaseClass::Activity => "actividad",
            BaseClass::Process => "proceso",
        }
    }

    /// Spanish adjectives agree with the gender of the head noun.
    fn spanish_is_feminine(&self) -> bool {
        matches!(
            self,
            BaseClass::ActiveAccomplishment | BaseClass::Accomplishment | BaseClass::Activity
        )
    }

    fn english_label(&self) -> &'static str {
        match self {
            BaseClass::State => "state",
            BaseClass::Achievement => "achievement",
            BaseClass::Semelfactive => "semelfactive",
            BaseClass::ActiveAccomplishment => "active accomplishment",
            BaseClass::Accomplishment => "accomplishment",
            BaseClass::Activity => "activity",
            BaseClass::Process => "process",
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, schemars::JsonSchema,
)]
pub enum Aktionsart {
    State,
    CausativeState,
    Achievement,
    CausativeAchievement,
    Semelfactive,
    CausativeSemelfactive,
    ActiveAccomplishment,
    CausativeActiveAccomplishment,
    Accomplishment,
    CausativeAccomplishment,
    Activity,
    CausativeActivity,
    Process,
    CausativeProcess,
}

impl Aktionsart {
    pub const ALL: [Aktionsart; 14] = [
        Aktionsart::State,
        Aktionsart::CausativeState,
        Aktionsart::Achievement,
        Aktionsart::CausativeAchievement,
        Aktionsart::Semelfactive,
        Aktionsart::CausativeSemelfactive,
        Aktionsart::ActiveAccomplishment,
        Aktionsart::CausativeActiveAccomplishment,
        Aktionsart::Accomplishment,
        Aktionsart::CausativeAccomplishment,
        Aktionsart::Activity,
        Aktionsart::CausativeActivity,
        Aktionsart::Process,
        Aktionsart::CausativeProcess,
    ];

    pub fn new(base: BaseClass, causative: bool) -> Self {
        match (base, causative) {
            (BaseClass::State, false) => Aktionsart::State,
            (BaseClass::State, true) => Aktionsart::CausativeState,
            (BaseClass::Achievement, false) => Aktionsart::Achievement,
            (BaseClass::Achievement, true) => Aktionsart::CausativeAchievement,
            (BaseClass::Semelfactive, false) => Aktionsart::Semelfactive,
            (BaseClass::Semelfactive, true) => Aktionsart::CausativeSemelfactive,
            (BaseClass::ActiveAccomplishment, false) => Aktionsart::ActiveAccomplishment,
            (BaseClass::ActiveAccomplishment, true) => Aktionsart::CausativeActiveAccomplishment,
            (BaseClass::Accomplishment, false) => Aktionsart::Accomplishment,
            (BaseClass::Accomplishment, true) => Aktionsart::CausativeAccomplishment,
            (BaseClass::Activity, false) => Aktionsart::Activity,
            (BaseClass::Activity, true) => Aktionsart::CausativeActivity,
            (BaseClass::Process, false) => Aktionsart::Process,
            (BaseClass::Process, true) => Aktionsart::CausativeProcess,
        }
    }

    pub fn base(&self) -> BaseClass {
        match self {
            Aktionsart::State | Aktionsart::CausativeState => BaseClass::State,
            Aktionsart::Achievement | Aktionsart::CausativeAchievement => BaseClass::Achievement,
            Aktionsart::Semelfactive | Aktionsart::CausativeSemelfactive => {
                BaseClass::Semelfactive
            }
            Aktionsart::ActiveAccomplishment | Aktionsart::CausativeActiveAccomplishment => {
                BaseClass::ActiveAccomplishment
            }
            Aktionsart::Accomplishment | Aktionsart::CausativeAccomplishment => {
                BaseClass::Accomplishment
            }
            Aktionsart::Activity | Aktionsart::CausativeActivity => BaseClass::Activity,
            Aktionsart::Process | Aktionsart::CausativeProcess => BaseClass::Process,
        }
    }

    pub fn is_causative(&self) -> bool {
        matches!(
            self,
            Aktionsart::CausativeState
                | Aktionsart::CausativeAchievement
                | Aktionsart::CausativeSemelfactive
                | Aktionsart::CausativeActiveAccomplishment
                | Aktionsart::CausativeAccomplishment
                | Aktionsart::CausativeActivity
                | Aktionsart::CausativeProcess
        )
    }

    pub fn is_state(&self) -> bool {
        self.base() == BaseClass::State
    }

    /// Lowercase label, e.g. `realización activa causativa` or `causative process`.
    pub fn label(&self, language: Language) -> String {
        let base = self.base();
        match (language, self.is_causative()) {
            (Language::Spanish, false) => base.spanish_label().to_string(),
            (Language::Spanish, true) => {
                let suffix = if base.spanish_is_feminine() {
                    "causativa"
                } else {
                    "causativo"
                };
                format!("{} {suffix}", base.spanish_label())
            }
            (Language::English, false) => base.english_label().to_string(),
            (Language::English, true) => format!("causative {}", base.english_label()),
        }
    }

    /// Parses a label in either language. Case and surrounding spaces are ignored.
    pub fn from_label(label: &str) -> Result<Self, Error> {
        let wanted = label.trim().to_lowercase();
        Aktionsart::ALL
            .into_iter()
            .find(|aktionsart| {
                aktionsart.label(Language::Spanish) == wanted
                    || aktionsart.label(Language::English) == wanted
            })
            .ok_or_else(|| Error::UnknownAktionsart(label.to_string()))
    }
}

impl std::fmt::Display for Aktionsart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label(Language::Spanish))
    }
}

impl std::str::FromStr for Aktionsart {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Aktionsart::from_label(s)
    }
}

/// Assigns the aktionsart for a complete feature vector.
///
/// Once stativity is ruled out, punctuality, telicity and dynamicity cover all
/// eight combinations, so every vector has a class.
pub fn classify(features: &FeatureVector) -> Aktionsart {
    let base = if features.stative {
        BaseClass::State
    } else {
        match (features.punctual, features.telic, features.dynamic) {
            (true, true, _) => BaseClass::Achievement,
            (true, false, _) => BaseClass::Semelfactive,
            (false, true, true) => BaseClass::ActiveAccomplishment,
            (false, false, true) => BaseClass::Activity,
            (false, true, false) => BaseClass::Accomplishment,
            (false, false, false) => BaseClass::Process,
        }
    };
    Aktionsart::new(base, features.causative)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stative_ignores_other_features() {
        for features in FeatureVector::all().filter(|f| f.stative) {
            let expected = if features.causative {
                Aktionsart::CausativeState
            } else {
                Aktionsart::State
            };
            assert_eq!(classify(&features), expected, "{features:?}");
        }
    }

    #[test]
    fn test_punctual_telic_is_achievement() {
        for features in FeatureVector::all().filter(|f| !f.stative && f.punctual && f.telic) {
            assert_eq!(classify(&features).base(), BaseClass::Achievement);
            assert_eq!(classify(&features).is_causative(), features.causative);
        }
    }

    #[test]
    fn test_all_false_is_process() {
        assert_eq!(classify(&FeatureVector::default()), Aktionsart::Process);
    }

    #[test]
    fn test_decision_table() {
        let cases = [
            ((true, false, false), BaseClass::Semelfactive),
            ((true, false, true), BaseClass::Semelfactive),
            ((false, true, true), BaseClass::ActiveAccomplishment),
            ((false, false, true), BaseClass::Activity),
            ((false, true, false), BaseClass::Accomplishment),
            ((false, false, false), BaseClass::Process),
        ];
        for ((punctual, telic, dynamic), base) in cases {
            let features = FeatureVector {
                causative: false,
                stative: false,
                punctual,
                telic,
                dynamic,
            };
            assert_eq!(classify(&features), Aktionsart::new(base, false));
        }
    }

    #[test]
    fn test_every_class_is_reachable() {
        let reached: std::collections::HashSet<_> =
            FeatureVector::all().map(|f| classify(&f)).collect();
        assert_eq!(reached.len(), Aktionsart::ALL.len());
    }

    #[test]
    fn test_spanish_labels_agree_in_gender() {
        assert_eq!(
            Aktionsart::CausativeActiveAccomplishment.label(Language::Spanish),
            "realización activa causativa"
        );
        assert_eq!(
            Aktionsart::CausativeActivity.label(Language::Spanish),
            "actividad causativa"
        );
        assert_eq!(
            Aktionsart::CausativeAchievement.label(Language::Spanish),
            "logro causativo"
        );
        assert_eq!(
            Aktionsart::CausativeProcess.label(Language::English),
            "causative process"
        );
    }

    #[test]
    fn test_labels_parse_back() {
        for aktionsart in Aktionsart::ALL {
            for language in [Language::Spanish, Language::English] {
                assert_eq!(
                    aktionsart.label(language).parse::<Aktionsart>(),
                    Ok(aktionsart)
                );
            }
        }
        assert_eq!(
            " Logro Causativo ".parse::<Aktionsart>(),
            Ok(Aktionsart::CausativeAchievement)
        );
        assert!("evento".parse::<Aktionsart>().is_err());
    }
}
