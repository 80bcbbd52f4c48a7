//! Periphrastic constructions used to phrase the diagnostic questions.
//!
//! Every builder is a pure function of the clause data: the subject, an
//! auxiliary agreeing with the person/number, a non-finite verb form and the
//! complements, joined with single spaces and skipping empty parts.

use crate::Language;
use enumap::EnuMap;
use serde::{Deserialize, Serialize};

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    EnuMap,
    parse_display::Display,
    parse_display::FromStr,
    Serialize,
    Deserialize,
    schemars::JsonSchema,
)]
pub enum PersonNumber {
    #[display("1s")]
    #[serde(rename = "1s")]
    FirstSingular,
    #[display("2s")]
    #[serde(rename = "2s")]
    SecondSingular,
    #[default]
    #[display("3s")]
    #[serde(rename = "3s")]
    ThirdSingular,
    #[display("1p")]
    #[serde(rename = "1p")]
    FirstPlural,
    #[display("2p")]
    #[serde(rename = "2p")]
    SecondPlural,
    #[display("3p")]
    #[serde(rename = "3p")]
    ThirdPlural,
}

impl PersonNumber {
    /// Parses `1s`..`3p`, ignoring case and surrounding spaces.
    pub fn parse_answer(answer: &str) -> Result<Self, crate::Error> {
        answer
            .trim()
            .to_lowercase()
            .parse()
            .map_err(|_| crate::Error::InvalidPersonNumber(answer.trim().to_string()))
    }

    /// `1s/2s/3s/1p/2p/3p`
    pub fn choices() -> String {
        PersonNumber::ALL
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("/")
    }
}

const ESTAR: PersonNumberMap<&str> = PersonNumberMap {
    first_singular: "estoy",
    second_singular: "estás",
    third_singular: "está",
    first_plural: "estamos",
    second_plural: "están/estáis",
    third_plural: "están",
};

const ESTAR_PRETERITO: PersonNumberMap<&str> = PersonNumberMap {
    first_singular: "estuve",
    second_singular: "estuviste",
    third_singular: "estuvo",
    first_plural: "estuvimos",
    second_plural: "estuvieron/estuvisteis",
    third_plural: "estuvieron",
};

const ESTAR_SUBJUNTIVO: PersonNumberMap<&str> = PersonNumberMap {
    first_singular: "estuviera",
    second_singular: "estuvieras",
    third_singular: "estuviera",
    first_plural: "estuviéramos",
    second_plural: "estuvieran/estuvierais",
    third_plural: "estuvieran",
};

const HABER: PersonNumberMap<&str> = PersonNumberMap {
    first_singular: "he",
    second_singular: "has",
    third_singular: "ha",
    first_plural: "hemos",
    second_plural: "han/habéis",
    third_plural: "han",
};

const DEJAR: PersonNumberMap<&str> = PersonNumberMap {
    first_singular: "dejara",
    second_singular: "dejaras",
    third_singular: "dejara",
    first_plural: "dejáramos",
    second_plural: "dejaran/dejarais",
    third_plural: "dejaran",
};

const BE_PRESENT: PersonNumberMap<&str> = PersonNumberMap {
    first_singular: "am",
    second_singular: "are",
    third_singular: "is",
    first_plural: "are",
    second_plural: "are",
    third_plural: "are",
};

const BE_PAST: PersonNumberMap<&str> = PersonNumberMap {
    first_singular: "was",
    second_singular: "were",
    third_singular: "was",
    first_plural: "were",
    second_plural: "were",
    third_plural: "were",
};

const HAVE_PRESENT: PersonNumberMap<&str> = PersonNumberMap {
    first_singular: "have",
    second_singular: "have",
    third_singular: "has",
    first_plural: "have",
    second_plural: "have",
    third_plural: "have",
};

/// Verb forms and surrounding material of the clause under test.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ClauseData {
    /// Includes clitics, e.g. `derretirse`. Unused for English.
    #[serde(default)]
    pub infinitive: String,
    #[serde(default)]
    pub gerund: String,
    #[serde(default)]
    pub participle: String,
    /// Everything before the verb.
    #[serde(default)]
    pub subject: String,
    /// Everything after the verb.
    #[serde(default)]
    pub complements: String,
    #[serde(default)]
    pub person_number: PersonNumber,
}

impl ClauseData {
    /// `0` stands for "nothing here".
    pub fn optional_part(answer: &str) -> String {
        let answer = answer.trim();
        if answer == "0" {
            String::new()
        } else {
            answer.to_string()
        }
    }
}

fn join_parts(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn with_auxiliary(data: &ClauseData, auxiliary: &str, form: &str) -> String {
    join_parts(&[
        &data.subject,
        &format!("{auxiliary} {form}"),
        &data.complements,
    ])
}

/// `Juan está rompiendo el jarrón` / `John is breaking the vase`
pub fn progressive_present(data: &ClauseData, language: Language) -> String {
    let table = match language {
        Language::Spanish => &ESTAR,
        Language::English => &BE_PRESENT,
    };
    with_auxiliary(data, table.get(&data.person_number), &data.gerund)
}

/// `Juan estuvo rompiendo el jarrón` / `John was breaking the vase`
pub fn progressive_past(data: &ClauseData, language: Language) -> String {
    let table = match language {
        Language::Spanish => &ESTAR_PRETERITO,
        Language::English => &BE_PAST,
    };
    with_auxiliary(data, table.get(&data.person_number), &data.gerund)
}

/// `Juan estuviera rompiendo el jarrón`
///
/// English has no subjunctive progressive and falls back to the present one.
pub fn progressive_subjunctive(data: &ClauseData, language: Language) -> String {
    match language {
        Language::Spanish => with_auxiliary(
            data,
            ESTAR_SUBJUNTIVO.get(&data.person_number),
            &data.gerund,
        ),
        Language::English => progressive_present(data, language),
    }
}

/// `Juan ha roto el jarrón` / `John has broken the vase`
pub fn perfect(data: &ClauseData, language: Language) -> String {
    let table = match language {
        Language::Spanish => &HABER,
        Language::English => &HAVE_PRESENT,
    };
    with_auxiliary(data, table.get(&data.person_number), &data.participle)
}

/// `dejara de romper el jarrón` / `John stopped breaking the vase`
pub fn cessation(data: &ClauseData, language: Language) -> String {
    match language {
        Language::Spanish => join_parts(&[
            &format!("{} de {}", DEJAR.get(&data.person_number), data.infinitive),
            &data.complements,
        ]),
        Language::English => {
            let subject = if data.subject.trim().is_empty() {
                "(subject)"
            } else {
                data.subject.as_str()
            };
            join_parts(&[
                subject,
                &format!("stopped {}", data.gerund),
                &data.complements,
            ])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn juan() -> ClauseData {
        ClauseData {
            infinitive: "romper".to_string(),
            gerund: "rompiendo".to_string(),
            participle: "roto".to_string(),
            subject: "Juan".to_string(),
            complements: "el jarrón".to_string(),
            person_number: PersonNumber::ThirdSingular,
        }
    }

    #[test]
    fn test_person_number_parses_codes() {
        assert_eq!(
            PersonNumber::parse_answer(" 1P "),
            Ok(PersonNumber::FirstPlural)
        );
        assert_eq!(PersonNumber::FirstPlural.to_string(), "1p");
        assert!(PersonNumber::parse_answer("4s").is_err());
        assert_eq!(PersonNumber::choices(), "1s/2s/3s/1p/2p/3p");
    }

    #[test]
    fn test_spanish_periphrases() {
        let data = juan();
        assert_eq!(
            progressive_present(&data, Language::Spanish),
            "Juan está rompiendo el jarrón"
        );
        assert_eq!(
            progressive_past(&data, Language::Spanish),
            "Juan estuvo rompiendo el jarrón"
        );
        assert_eq!(
            progressive_subjunctive(&data, Language::Spanish),
            "Juan estuviera rompiendo el jarrón"
        );
        assert_eq!(perfect(&data, Language::Spanish), "Juan ha roto el jarrón");
        assert_eq!(
            cessation(&data, Language::Spanish),
            "dejara de romper el jarrón"
        );
    }

    #[test]
    fn test_empty_parts_are_skipped() {
        let data = ClauseData {
            infinitive: "derretirse".to_string(),
            gerund: "derritiendo".to_string(),
            participle: "derretido".to_string(),
            subject: "se".to_string(),
            complements: String::new(),
            person_number: PersonNumber::ThirdPlural,
        };
        assert_eq!(
            progressive_past(&data, Language::Spanish),
            "se estuvieron derritiendo"
        );
        assert_eq!(cessation(&data, Language::Spanish), "dejaran de derretirse");
    }

    #[test]
    fn test_english_periphrases() {
        let data = ClauseData {
            gerund: "running".to_string(),
            participle: "run".to_string(),
            subject: "Peter".to_string(),
            complements: "home".to_string(),
            ..ClauseData::default()
        };
        assert_eq!(
            progressive_present(&data, Language::English),
            "Peter is running home"
        );
        assert_eq!(
            progressive_past(&data, Language::English),
            "Peter was running home"
        );
        assert_eq!(perfect(&data, Language::English), "Peter has run home");
        assert_eq!(
            cessation(&data, Language::English),
            "Peter stopped running home"
        );
    }

    #[test]
    fn test_english_cessation_without_subject() {
        let data = ClauseData {
            gerund: "melting".to_string(),
            person_number: PersonNumber::FirstSingular,
            ..ClauseData::default()
        };
        assert_eq!(
            cessation(&data, Language::English),
            "(subject) stopped melting"
        );
        assert_eq!(progressive_present(&data, Language::English), "am melting");
    }

    #[test]
    fn test_optional_part() {
        assert_eq!(ClauseData::optional_part("0"), "");
        assert_eq!(ClauseData::optional_part(" hasta su casa "), "hasta su casa");
    }
}
