use super::{Handoff, Input, SessionError, Transition, required};
use crate::diagnostics::{AnswerKind, Prompt};
use crate::logical_structure::{self, ArgumentSlots, ClauseOperator, LogicalStructure};
use crate::{Aktionsart, Error, Language, capitalize_first, normalize_argument};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub enum LogicalStructureStep {
    Category,
    Clause,
    /// Recorded for the hand-off only; no template depends on it.
    Dynamic,
    ArgX,
    ArgY,
    ArgZ,
    Predicate,
    Intentional,
    OperatorsWanted,
    OperatorToggle(ClauseOperator),
    OperatorValue(ClauseOperator),
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct LogicalStructureSession {
    pub language: Language,
    pub step: LogicalStructureStep,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aktionsart: Option<Aktionsart>,
    #[serde(default)]
    pub clause: String,
    /// Kept alongside the category; it does not change the generated structure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dynamic: Option<bool>,
    #[serde(default)]
    pub arguments: ArgumentSlots,
    #[serde(default)]
    pub predicate: String,
    #[serde(default)]
    pub intentional: bool,
    #[serde(default)]
    pub operators: Vec<(ClauseOperator, String)>,
    #[serde(default)]
    history: Vec<LogicalStructureStep>,
}

impl LogicalStructureSession {
    /// Starts from scratch, asking for the category first.
    pub fn new(language: Language) -> Self {
        Self {
            language,
            step: LogicalStructureStep::Category,
            aktionsart: None,
            clause: String::new(),
            dynamic: None,
            arguments: ArgumentSlots::default(),
            predicate: String::new(),
            intentional: false,
            operators: Vec::new(),
            history: Vec::new(),
        }
    }

    /// Starts with whatever is already known; only the missing pieces are asked.
    pub fn with_known(
        language: Language,
        aktionsart: Option<Aktionsart>,
        clause: Option<String>,
        dynamic: Option<bool>,
    ) -> Self {
        let mut session = Self::new(language);
        session.aktionsart = aktionsart;
        session.clause = clause
            .map(|clause| clause.trim().to_string())
            .unwrap_or_default();
        session.dynamic = match aktionsart {
            Some(aktionsart) if aktionsart.is_state() => Some(false),
            _ => dynamic,
        };
        session.step = session.first_missing();
        session
    }

    pub fn from_handoff(language: Language, handoff: Handoff) -> Self {
        Self::with_known(
            language,
            Some(handoff.aktionsart),
            Some(handoff.clause),
            Some(handoff.dynamic),
        )
    }

    fn first_missing(&self) -> LogicalStructureStep {
        if self.aktionsart.is_none() {
            LogicalStructureStep::Category
        } else if self.clause.is_empty() {
            LogicalStructureStep::Clause
        } else if self.dynamic.is_none() {
            LogicalStructureStep::Dynamic
        } else {
            LogicalStructureStep::ArgX
        }
    }

    pub fn is_finished(&self) -> bool {
        self.step == LogicalStructureStep::Finished
    }

    /// The structure built from the answers so far, once the predicate is known.
    pub fn structure(&self) -> Option<LogicalStructure> {
        let aktionsart = self.aktionsart?;
        if self.predicate.is_empty() {
            return None;
        }
        Some(
            LogicalStructure::build(aktionsart, &self.arguments, &self.predicate, self.intentional)
                .with_operators(self.operators.iter().cloned()),
        )
    }

    pub fn prompt(&self) -> Option<Prompt> {
        let language = self.language;
        let prompt = match self.step {
            LogicalStructureStep::Category => {
                let labels: Vec<String> = Aktionsart::ALL
                    .iter()
                    .map(|aktionsart| aktionsart.label(language))
                    .collect();
                let question = match language {
                    Language::Spanish => "Selecciona el aktionsart del predicado (número o nombre):",
                    Language::English => "Select the aktionsart of the predicate (number or name):",
                };
                let heading = match language {
                    Language::Spanish => "ESTRUCTURA LÓGICA",
                    Language::English => "LOGICAL STRUCTURE",
                };
                let mut prompt = Prompt::new(question, AnswerKind::Choice(labels.clone()))
                    .heading(heading);
                for (index, label) in labels.iter().enumerate() {
                    prompt = prompt.line(format!("{}. {}", index + 1, capitalize_first(label)));
                }
                prompt
            }
            LogicalStructureStep::Clause => match language {
                Language::Spanish => {
                    Prompt::new("Escribe la cláusula completa:", AnswerKind::FreeText)
                }
                Language::English => Prompt::new("Type the full clause:", AnswerKind::FreeText),
            },
            LogicalStructureStep::Dynamic => match language {
                Language::Spanish => Prompt::yes_no(
                    "¿El predicado es dinámico? (requiere energía/esfuerzo del agente)",
                    language,
                ),
                Language::English => Prompt::yes_no(
                    "Is the predicate dynamic? (it requires energy/effort from the actor)",
                    language,
                ),
            },
            LogicalStructureStep::ArgX => match language {
                Language::Spanish => Prompt::new(
                    "x (típicamente el sujeto/agente; Ø si no hay):",
                    AnswerKind::FreeText,
                )
                .heading("ARGUMENTOS DE LA CLÁUSULA")
                .line(format!("Estamos analizando: «{}»", self.clause))
                .line("Usa Ø (o 0) para argumentos vacíos o no expresados."),
                Language::English => Prompt::new(
                    "x (typically the subject/actor; Ø if none):",
                    AnswerKind::FreeText,
                )
                .heading("CLAUSE ARGUMENTS")
                .line(format!("Analyzing: '{}'", self.clause))
                .line("Use Ø (or 0) for empty or unexpressed arguments."),
            },
            LogicalStructureStep::ArgY => match language {
                Language::Spanish => Prompt::new(
                    "y (típicamente el paciente/tema; Ø si no hay):",
                    AnswerKind::FreeText,
                ),
                Language::English => Prompt::new(
                    "y (typically the undergoer/theme; Ø if none):",
                    AnswerKind::FreeText,
                ),
            },
            LogicalStructureStep::ArgZ => match language {
                Language::Spanish => Prompt::new(
                    "z (tercer argumento, si existe; deja en blanco si no):",
                    AnswerKind::OptionalText,
                ),
                Language::English => Prompt::new(
                    "z (third argument, if any; leave blank otherwise):",
                    AnswerKind::OptionalText,
                ),
            },
            LogicalStructureStep::Predicate => match language {
                Language::Spanish => Prompt::new(
                    "Predicado (verbo en infinitivo, ej: romper, correr):",
                    AnswerKind::FreeText,
                ),
                Language::English => Prompt::new(
                    "Predicate (verb in the infinitive, e.g. break, run):",
                    AnswerKind::FreeText,
                ),
            },
            LogicalStructureStep::Intentional => {
                let x = capitalize_first(&self.arguments.x);
                match language {
                    Language::Spanish => Prompt::yes_no(
                        format!(
                            "¿«{x}» actuó de manera intencional en «{}»?",
                            self.clause
                        ),
                        language,
                    )
                    .heading("INTENCIONALIDAD"),
                    Language::English => Prompt::yes_no(
                        format!("Did '{x}' act intentionally in '{}'?", self.clause),
                        language,
                    )
                    .heading("INTENTIONALITY"),
                }
            }
            LogicalStructureStep::OperatorsWanted => match language {
                Language::Spanish => Prompt::yes_no(
                    "¿Quieres añadir operadores de la capa de cláusula (tiempo, aspecto, modalidad, etc.)?",
                    language,
                ),
                Language::English => Prompt::yes_no(
                    "Do you want to add clause-layer operators (tense, aspect, modality, etc.)?",
                    language,
                ),
            },
            LogicalStructureStep::OperatorToggle(operator) => {
                let code = operator.code();
                let description = operator.description(language);
                match language {
                    Language::Spanish => Prompt::yes_no(
                        format!("¿Añadir {code} ({description})?"),
                        language,
                    ),
                    Language::English => {
                        Prompt::yes_no(format!("Add {code} ({description})?"), language)
                    }
                }
            }
            LogicalStructureStep::OperatorValue(operator) => {
                let code = operator.code();
                let examples = operator.examples().join(", ");
                let question = match language {
                    Language::Spanish => format!("Valor de {code} (ej: {examples}):"),
                    Language::English => format!("Value for {code} (e.g. {examples}):"),
                };
                Prompt::new(question, AnswerKind::OptionalText)
            }
            LogicalStructureStep::Finished => return None,
        };
        Some(prompt)
    }

    pub fn step(&self, input: &Input) -> Result<Transition<Self>, SessionError> {
        let answer = match input {
            Input::Back => return Ok(Transition::quiet(self.back())),
            Input::Answer(answer) => answer,
        };

        let language = self.language;
        let mut next = self.clone();
        let mut notice = None;

        let step = match self.step {
            LogicalStructureStep::Category => {
                next.aktionsart = Some(parse_category(answer)?);
                if next.aktionsart.is_some_and(|aktionsart| aktionsart.is_state()) {
                    next.dynamic = Some(false);
                }
                next.first_missing()
            }
            LogicalStructureStep::Clause => {
                next.clause = required(answer)?;
                next.first_missing()
            }
            LogicalStructureStep::Dynamic => {
                next.dynamic = Some(language.parse_yes_no(answer)?);
                LogicalStructureStep::ArgX
            }
            LogicalStructureStep::ArgX => {
                next.arguments.x = normalize_argument(&required(answer)?);
                LogicalStructureStep::ArgY
            }
            LogicalStructureStep::ArgY => {
                next.arguments.y = normalize_argument(&required(answer)?);
                LogicalStructureStep::ArgZ
            }
            LogicalStructureStep::ArgZ => {
                next.arguments.z = normalize_argument(answer);
                LogicalStructureStep::Predicate
            }
            LogicalStructureStep::Predicate => {
                next.predicate = required(answer)?;
                next.intentional = false;
                let aktionsart = next.aktionsart.ok_or(Error::MissingArgument("aktionsart"))?;
                if logical_structure::admits_intentional(aktionsart, &next.arguments) {
                    LogicalStructureStep::Intentional
                } else {
                    notice = next.core_notice();
                    LogicalStructureStep::OperatorsWanted
                }
            }
            LogicalStructureStep::Intentional => {
                next.intentional = language.parse_yes_no(answer)?;
                notice = next.core_notice();
                LogicalStructureStep::OperatorsWanted
            }
            LogicalStructureStep::OperatorsWanted => {
                next.operators.clear();
                if language.parse_yes_no(answer)? {
                    LogicalStructureStep::OperatorToggle(ClauseOperator::ALL[0])
                } else {
                    LogicalStructureStep::Finished
                }
            }
            LogicalStructureStep::OperatorToggle(operator) => {
                if language.parse_yes_no(answer)? {
                    LogicalStructureStep::OperatorValue(operator)
                } else {
                    after_operator(operator)
                }
            }
            LogicalStructureStep::OperatorValue(operator) => {
                let value = answer.trim();
                if !value.is_empty() {
                    next.operators.retain(|(existing, _)| *existing != operator);
                    next.operators.push((operator, value.to_string()));
                }
                after_operator(operator)
            }
            LogicalStructureStep::Finished => return Err(SessionError::Finished),
        };

        next.history.push(self.step);
        next.step = step;
        Ok(match notice {
            Some(notice) => Transition::with_notice(next, notice),
            None => Transition::quiet(next),
        })
    }

    fn core_notice(&self) -> Option<String> {
        let structure = self.structure()?;
        Some(match self.language {
            Language::Spanish => format!("Estructura lógica del núcleo: {}", structure.core),
            Language::English => format!("Core logical structure: {}", structure.core),
        })
    }

    fn back(&self) -> Self {
        let mut previous = self.clone();
        let Some(step) = previous.history.pop() else {
            return previous;
        };
        match step {
            LogicalStructureStep::OperatorValue(operator) => {
                previous.operators.retain(|(existing, _)| *existing != operator);
            }
            LogicalStructureStep::Intentional => previous.intentional = false,
            _ => {}
        }
        previous.step = step;
        previous
    }
}

/// The toggle for the next operator, or the end of the questionnaire.
fn after_operator(operator: ClauseOperator) -> LogicalStructureStep {
    ClauseOperator::ALL
        .iter()
        .skip_while(|candidate| **candidate != operator)
        .nth(1)
        .map(|next| LogicalStructureStep::OperatorToggle(*next))
        .unwrap_or(LogicalStructureStep::Finished)
}

/// Accepts a 1-based index into [`Aktionsart::ALL`] or a label in any language.
fn parse_category(answer: &str) -> Result<Aktionsart, Error> {
    let answer = answer.trim();
    if let Ok(index) = answer.parse::<usize>() {
        return index
            .checked_sub(1)
            .and_then(|index| Aktionsart::ALL.get(index).copied())
            .ok_or_else(|| Error::UnknownAktionsart(answer.to_string()));
    }
    Aktionsart::from_label(answer)
}
