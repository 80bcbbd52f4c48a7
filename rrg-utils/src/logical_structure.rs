//! RRG logical structures built from fixed templates.

use crate::{Aktionsart, BaseClass, EMPTY_ARGUMENT, Error, Language, normalize_argument};
use serde::{Deserialize, Serialize};

/// Argument positions of the predicate. Empty positions hold `Ø`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ArgumentSlots {
    pub x: String,
    pub y: String,
    #[serde(default = "empty_argument")]
    pub z: String,
}

fn empty_argument() -> String {
    EMPTY_ARGUMENT.to_string()
}

impl Default for ArgumentSlots {
    fn default() -> Self {
        Self {
            x: empty_argument(),
            y: empty_argument(),
            z: empty_argument(),
        }
    }
}

impl ArgumentSlots {
    /// Builds the slots from raw user input; `0`, `ø` and blanks become `Ø`.
    ///
    /// `x` and `y` must be given explicitly, even if only as `Ø`.
    pub fn new(x: &str, y: &str, z: &str) -> Result<Self, Error> {
        if x.trim().is_empty() {
            return Err(Error::MissingArgument("x"));
        }
        if y.trim().is_empty() {
            return Err(Error::MissingArgument("y"));
        }
        Ok(Self {
            x: normalize_argument(x),
            y: normalize_argument(y),
            z: normalize_argument(z),
        })
    }

    pub fn has_x(&self) -> bool {
        self.x != EMPTY_ARGUMENT
    }

    pub fn has_y(&self) -> bool {
        self.y != EMPTY_ARGUMENT
    }
}

/// Writes `pred' (a)` or `pred' (a, b)` depending on whether `b` is filled.
fn predication(pred: &str, first: &str, second: &str) -> String {
    if second == EMPTY_ARGUMENT {
        format!("{pred}' ({first})")
    } else {
        format!("{pred}' ({first}, {second})")
    }
}

fn with_operator(operator: Option<&str>, body: String) -> String {
    match operator {
        Some(operator) => format!("{operator} {body}"),
        None => body,
    }
}

/// The logical structure of the predicate core, without DO or clause operators.
pub fn generate(aktionsart: Aktionsart, args: &ArgumentSlots, pred: &str) -> String {
    let pred = pred.trim();
    let base = aktionsart.base();
    let operator = base.aspectual_operator();
    let (x, y) = (args.x.as_str(), args.y.as_str());

    if aktionsart.is_causative() {
        let caused = match base {
            BaseClass::State => format!("{pred}' ({y})"),
            BaseClass::Achievement | BaseClass::Accomplishment | BaseClass::Process => {
                with_operator(operator, format!("{pred}' ({y})"))
            }
            BaseClass::Semelfactive => {
                with_operator(operator, format!("do' ({y}, [{pred}' ({y})])"))
            }
            BaseClass::Activity => format!("do' ({y}, [{pred}' ({y})])"),
            BaseClass::ActiveAccomplishment => format!(
                "do' ({y}, [{pred}' ({y})]) & {}",
                with_operator(operator, format!("{pred}' ({y})"))
            ),
        };
        return format!("[do' ({x}, {EMPTY_ARGUMENT})] CAUSE [{caused}]");
    }

    match base {
        BaseClass::State => predication(pred, x, y),
        BaseClass::Achievement | BaseClass::Accomplishment | BaseClass::Process => {
            with_operator(operator, predication(pred, x, y))
        }
        BaseClass::Semelfactive => with_operator(operator, format!("do' ({x}, [{pred}' ({x})])")),
        BaseClass::Activity => format!("do' ({x}, [{}])", predication(pred, x, y)),
        BaseClass::ActiveAccomplishment => {
            if args.has_y() {
                format!(
                    "do' ({x}, [{pred}' ({x}, ({y}))]) & {}",
                    with_operator(operator, format!("{pred}' ({y})"))
                )
            } else {
                format!(
                    "do' ({x}, [{pred}' ({x})]) & {}",
                    with_operator(operator, format!("{pred}' ({x})"))
                )
            }
        }
    }
}

/// Whether the intentionality (DO) question applies at all.
pub fn admits_intentional(aktionsart: Aktionsart, args: &ArgumentSlots) -> bool {
    args.has_x() && !aktionsart.is_state()
}

/// Wraps the core in the agentive DO operator.
pub fn apply_intentional(core: &str) -> String {
    format!("DO ({core})")
}

/// Clause-layer operators, in the order they are offered and printed.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
    schemars::JsonSchema,
)]
pub enum ClauseOperator {
    #[serde(rename = "IF")]
    IllocutionaryForce,
    #[serde(rename = "TNS")]
    Tense,
    #[serde(rename = "ASP")]
    Aspect,
    #[serde(rename = "MOD")]
    Modality,
    #[serde(rename = "NEG")]
    Negation,
    #[serde(rename = "EVID")]
    Evidentiality,
}

impl ClauseOperator {
    pub const ALL: [ClauseOperator; 6] = [
        ClauseOperator::IllocutionaryForce,
        ClauseOperator::Tense,
        ClauseOperator::Aspect,
        ClauseOperator::Modality,
        ClauseOperator::Negation,
        ClauseOperator::Evidentiality,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            ClauseOperator::IllocutionaryForce => "IF",
            ClauseOperator::Tense => "TNS",
            ClauseOperator::Aspect => "ASP",
            ClauseOperator::Modality => "MOD",
            ClauseOperator::Negation => "NEG",
            ClauseOperator::Evidentiality => "EVID",
        }
    }

    pub fn description(&self, language: Language) -> &'static str {
        match (language, self) {
            (Language::Spanish, ClauseOperator::IllocutionaryForce) => "Fuerza ilocutiva",
            (Language::Spanish, ClauseOperator::Tense) => "Tiempo",
            (Language::Spanish, ClauseOperator::Aspect) => "Aspecto",
            (Language::Spanish, ClauseOperator::Modality) => "Modalidad",
            (Language::Spanish, ClauseOperator::Negation) => "Negación",
            (Language::Spanish, ClauseOperator::Evidentiality) => "Evidencialidad",
            (Language::English, ClauseOperator::IllocutionaryForce) => "Illocutionary force",
            (Language::English, ClauseOperator::Tense) => "Tense",
            (Language::English, ClauseOperator::Aspect) => "Aspect",
            (Language::English, ClauseOperator::Modality) => "Modality",
            (Language::English, ClauseOperator::Negation) => "Negation",
            (Language::English, ClauseOperator::Evidentiality) => "Evidentiality",
        }
    }

    pub fn examples(&self) -> &'static [&'static str] {
        match self {
            ClauseOperator::IllocutionaryForce => &["DECL", "INT", "IMP"],
            ClauseOperator::Tense => &["PAST", "PRES", "FUT"],
            ClauseOperator::Aspect => &["PFV", "IMPFV", "PROG"],
            ClauseOperator::Modality => &["OBLIG", "PERMIS", "ABIL"],
            ClauseOperator::Negation => &["NEG"],
            ClauseOperator::Evidentiality => &["VIS", "INF", "HEARSAY"],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct LogicalStructure {
    pub core: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub operators: Vec<(ClauseOperator, String)>,
}

impl LogicalStructure {
    pub fn new(core: impl Into<String>) -> Self {
        Self {
            core: core.into(),
            operators: Vec::new(),
        }
    }

    /// Builds the full structure: template, then DO if intentional.
    pub fn build(
        aktionsart: Aktionsart,
        args: &ArgumentSlots,
        pred: &str,
        intentional: bool,
    ) -> Self {
        let core = generate(aktionsart, args, pred);
        if intentional && admits_intentional(aktionsart, args) {
            Self::new(apply_intentional(&core))
        } else {
            Self::new(core)
        }
    }

    /// Sets clause operators. Blank values are dropped and the rest are kept
    /// in the canonical IF, TNS, ASP, MOD, NEG, EVID order; a repeated
    /// operator keeps its last value.
    pub fn with_operators(
        mut self,
        operators: impl IntoIterator<Item = (ClauseOperator, String)>,
    ) -> Self {
        let mut chosen: std::collections::BTreeMap<ClauseOperator, String> =
            std::collections::BTreeMap::new();
        for (operator, value) in operators {
            let value = value.trim();
            if !value.is_empty() {
                chosen.insert(operator, value.to_string());
            }
        }
        self.operators = chosen.into_iter().collect();
        self
    }
}

impl std::fmt::Display for LogicalStructure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.operators.is_empty() {
            return write!(f, "{}", self.core);
        }
        let operators = self
            .operators
            .iter()
            .map(|(operator, value)| format!("{}: {value}", operator.code()))
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "({operators}) ({})", self.core)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(x: &str, y: &str) -> ArgumentSlots {
        ArgumentSlots::new(x, y, "").unwrap()
    }

    #[test]
    fn test_activity_intransitive() {
        assert_eq!(
            generate(Aktionsart::Activity, &args("Juan", "Ø"), "correr"),
            "do' (Juan, [correr' (Juan)])"
        );
    }

    #[test]
    fn test_activity_transitive() {
        assert_eq!(
            generate(Aktionsart::Activity, &args("Juan", "la guitarra"), "tocar"),
            "do' (Juan, [tocar' (Juan, la guitarra)])"
        );
    }

    #[test]
    fn test_causative_state() {
        assert_eq!(
            generate(
                Aktionsart::CausativeState,
                &args("el gato", "el jarrón"),
                "romper"
            ),
            "[do' (el gato, Ø)] CAUSE [romper' (el jarrón)]"
        );
    }

    #[test]
    fn test_states_and_operator_classes() {
        let cases = [
            (Aktionsart::State, "Ø", "saber' (María)"),
            (Aktionsart::State, "inglés", "saber' (María, inglés)"),
            (Aktionsart::Achievement, "Ø", "INGR saber' (María)"),
            (Aktionsart::Accomplishment, "inglés", "BECOME saber' (María, inglés)"),
            (Aktionsart::Process, "Ø", "PROC saber' (María)"),
            (Aktionsart::Semelfactive, "inglés", "SEML do' (María, [saber' (María)])"),
        ];
        for (aktionsart, y, expected) in cases {
            assert_eq!(generate(aktionsart, &args("María", y), "saber"), expected);
        }
    }

    #[test]
    fn test_active_accomplishment() {
        assert_eq!(
            generate(Aktionsart::ActiveAccomplishment, &args("Pedro", "Ø"), "correr"),
            "do' (Pedro, [correr' (Pedro)]) & BECOME correr' (Pedro)"
        );
        assert_eq!(
            generate(
                Aktionsart::ActiveAccomplishment,
                &args("Pedro", "la manzana"),
                "comer"
            ),
            "do' (Pedro, [comer' (Pedro, (la manzana))]) & BECOME comer' (la manzana)"
        );
    }

    #[test]
    fn test_causative_templates() {
        let a = args("Ana", "Pepe");
        assert_eq!(
            generate(Aktionsart::CausativeAchievement, &a, "despertar"),
            "[do' (Ana, Ø)] CAUSE [INGR despertar' (Pepe)]"
        );
        assert_eq!(
            generate(Aktionsart::CausativeSemelfactive, &a, "toser"),
            "[do' (Ana, Ø)] CAUSE [SEML do' (Pepe, [toser' (Pepe)])]"
        );
        assert_eq!(
            generate(Aktionsart::CausativeActivity, &a, "correr"),
            "[do' (Ana, Ø)] CAUSE [do' (Pepe, [correr' (Pepe)])]"
        );
        assert_eq!(
            generate(Aktionsart::CausativeActiveAccomplishment, &a, "correr"),
            "[do' (Ana, Ø)] CAUSE [do' (Pepe, [correr' (Pepe)]) & BECOME correr' (Pepe)]"
        );
        assert_eq!(
            generate(Aktionsart::CausativeProcess, &a, "secar"),
            "[do' (Ana, Ø)] CAUSE [PROC secar' (Pepe)]"
        );
    }

    #[test]
    fn test_intentional_wrapping() {
        let structure = LogicalStructure::build(
            Aktionsart::Activity,
            &args("Juan", "Ø"),
            "correr",
            true,
        );
        assert_eq!(structure.to_string(), "DO (do' (Juan, [correr' (Juan)]))");

        let state = LogicalStructure::build(Aktionsart::State, &args("Juan", "Ø"), "saber", true);
        assert_eq!(state.to_string(), "saber' (Juan)");

        let no_actor = LogicalStructure::build(Aktionsart::Process, &args("Ø", "Ø"), "llover", true);
        assert_eq!(no_actor.to_string(), "PROC llover' (Ø)");
    }

    #[test]
    fn test_operators_are_ordered_and_blank_values_dropped() {
        let structure = LogicalStructure::new("saber' (María, inglés)").with_operators([
            (ClauseOperator::Tense, "PRES".to_string()),
            (ClauseOperator::Negation, "  ".to_string()),
            (ClauseOperator::IllocutionaryForce, "DECL".to_string()),
        ]);
        assert_eq!(
            structure.to_string(),
            "(IF: DECL, TNS: PRES) (saber' (María, inglés))"
        );
    }

    #[test]
    fn test_missing_arguments_are_rejected() {
        assert_eq!(ArgumentSlots::new("", "Ø", ""), Err(Error::MissingArgument("x")));
        assert_eq!(ArgumentSlots::new("Juan", " ", ""), Err(Error::MissingArgument("y")));
        assert_eq!(ArgumentSlots::new("Juan", "0", "").map(|a| a.z), Ok("Ø".to_string()));
    }
}
