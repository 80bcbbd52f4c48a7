pub mod aktionsart;
pub mod diagnostics;
pub mod features;
pub mod logical_structure;
pub mod periphrasis;
pub mod session;

pub use aktionsart::{Aktionsart, BaseClass, classify};
pub use features::{Feature, FeatureVector, PartialFeatures};
pub use logical_structure::{ArgumentSlots, ClauseOperator, LogicalStructure};
pub use periphrasis::{ClauseData, PersonNumber};

/// Marker for an argument position that is not filled.
pub const EMPTY_ARGUMENT: &str = "Ø";

#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    serde::Serialize,
    serde::Deserialize,
    Hash,
    PartialEq,
    Eq,
    Ord,
    PartialOrd,
    schemars::JsonSchema,
)]
pub enum Language {
    #[default]
    Spanish,
    English,
}

impl Language {
    pub fn iso_639_1(&self) -> &'static str {
        match self {
            Language::Spanish => "es",
            Language::English => "en",
        }
    }

    pub fn from_iso_639_1(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "es" | "spa" | "spanish" | "español" => Some(Language::Spanish),
            "en" | "eng" | "english" => Some(Language::English),
            _ => None,
        }
    }

    /// Accepted spellings of "yes" and "no", lowercase.
    fn yes_no_vocabulary(&self) -> (&'static [&'static str], &'static [&'static str]) {
        match self {
            Language::Spanish => (&["sí", "si", "s"], &["no", "n"]),
            Language::English => (&["yes", "y"], &["no", "n"]),
        }
    }

    pub fn parse_yes_no(&self, answer: &str) -> Result<bool, Error> {
        let answer = answer.trim().to_lowercase();
        let (yes, no) = self.yes_no_vocabulary();
        if yes.contains(&answer.as_str()) {
            Ok(true)
        } else if no.contains(&answer.as_str()) {
            Ok(false)
        } else {
            Err(Error::InvalidYesNo {
                answer,
                language: *self,
            })
        }
    }

    /// The `(s/n)` style hint appended to yes/no questions.
    pub fn yes_no_hint(&self) -> &'static str {
        match self {
            Language::Spanish => "(s/n)",
            Language::English => "(y/n)",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Language::Spanish => write!(f, "Spanish"),
            Language::English => write!(f, "English"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("expected a yes/no answer in {language}, got {answer:?}")]
    InvalidYesNo { answer: String, language: Language },

    #[error("unknown person/number {0:?} (expected 1s/2s/3s/1p/2p/3p)")]
    InvalidPersonNumber(String),

    #[error("an answer is required")]
    EmptyAnswer,

    #[error("unknown aktionsart {0:?}")]
    UnknownAktionsart(String),

    #[error("unknown dynamicity flag {0:?} (expected dinamico or no_dinamico)")]
    UnknownDynamicity(String),

    #[error("missing argument {0}")]
    MissingArgument(&'static str),
}

/// Uppercases the first character, leaving the rest untouched.
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Normalizes the user's spelling of an empty argument (`0`, `ø`, blank) to `Ø`.
pub fn normalize_argument(argument: &str) -> String {
    let argument = argument.trim();
    match argument {
        "" | "0" | "ø" | "Ø" => EMPTY_ARGUMENT.to_string(),
        other => other.to_string(),
    }
}

/// Dynamicity as passed between processes: `dinamico` / `no_dinamico`.
pub fn parse_dynamicity(flag: &str) -> Result<bool, Error> {
    match flag.trim() {
        "dinamico" | "dinámico" | "dynamic" => Ok(true),
        "no_dinamico" | "no_dinámico" | "non_dynamic" => Ok(false),
        other => Err(Error::UnknownDynamicity(other.to_string())),
    }
}

pub fn dynamicity_flag(dynamic: bool) -> &'static str {
    if dynamic { "dinamico" } else { "no_dinamico" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yes_no_spanish() {
        let es = Language::Spanish;
        assert_eq!(es.parse_yes_no("Sí"), Ok(true));
        assert_eq!(es.parse_yes_no(" s "), Ok(true));
        assert_eq!(es.parse_yes_no("si"), Ok(true));
        assert_eq!(es.parse_yes_no("N"), Ok(false));
        assert!(es.parse_yes_no("yes").is_err());
    }

    #[test]
    fn test_yes_no_english() {
        let en = Language::English;
        assert_eq!(en.parse_yes_no("YES"), Ok(true));
        assert_eq!(en.parse_yes_no("n"), Ok(false));
        assert!(en.parse_yes_no("sí").is_err());
    }

    #[test]
    fn test_capitalize_first_handles_accents() {
        assert_eq!(capitalize_first("él corrió"), "Él corrió");
        assert_eq!(capitalize_first(""), "");
    }

    #[test]
    fn test_normalize_argument() {
        assert_eq!(normalize_argument("0"), "Ø");
        assert_eq!(normalize_argument("  "), "Ø");
        assert_eq!(normalize_argument("ø"), "Ø");
        assert_eq!(normalize_argument(" el gato "), "el gato");
    }

    #[test]
    fn test_dynamicity_flags_round_trip() {
        assert_eq!(parse_dynamicity(dynamicity_flag(true)), Ok(true));
        assert_eq!(parse_dynamicity(dynamicity_flag(false)), Ok(false));
        assert!(parse_dynamicity("rapido").is_err());
    }
}
