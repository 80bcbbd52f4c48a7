use super::{Input, SessionError, Transition, required};
use crate::diagnostics::{self, AnswerKind, Prompt};
use crate::{
    Aktionsart, ClauseData, Feature, FeatureVector, Language, PartialFeatures, PersonNumber,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub enum AktionsartStep {
    Clause,
    Paraphrase,
    ParaphraseCriteria,
    BasicEvent,
    Stativity,
    Infinitive,
    Gerund,
    Participle,
    Subject,
    Complements,
    PersonNumber,
    Punctuality,
    Telicity,
    Dynamicity,
    Result(Aktionsart),
    Finished {
        aktionsart: Aktionsart,
        logical_structure_requested: bool,
    },
}

/// What the logical-structure questionnaire needs from a finished classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct Handoff {
    pub aktionsart: Aktionsart,
    pub clause: String,
    pub dynamic: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct AktionsartSession {
    pub language: Language,
    pub step: AktionsartStep,
    /// The clause as the user first typed it.
    #[serde(default)]
    pub original_clause: String,
    /// The clause the remaining tests are phrased on. For causatives this is
    /// the basic event without the cause.
    #[serde(default)]
    pub clause: String,
    #[serde(default)]
    pub paraphrase: String,
    #[serde(default)]
    pub features: PartialFeatures,
    #[serde(default)]
    pub clause_data: ClauseData,
    #[serde(default)]
    history: Vec<AktionsartStep>,
}

impl AktionsartSession {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            step: AktionsartStep::Clause,
            original_clause: String::new(),
            clause: String::new(),
            paraphrase: String::new(),
            features: PartialFeatures::default(),
            clause_data: ClauseData::default(),
            history: Vec::new(),
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.step, AktionsartStep::Finished { .. })
    }

    pub fn aktionsart(&self) -> Option<Aktionsart> {
        match self.step {
            AktionsartStep::Result(aktionsart) | AktionsartStep::Finished { aktionsart, .. } => {
                Some(aktionsart)
            }
            _ => None,
        }
    }

    /// The settled feature vector, once a class has been assigned.
    pub fn feature_vector(&self) -> Option<FeatureVector> {
        self.aktionsart().and(self.features.complete())
    }

    /// Present when the user asked to go on to the logical structure.
    pub fn handoff(&self) -> Option<Handoff> {
        match self.step {
            AktionsartStep::Finished {
                aktionsart,
                logical_structure_requested: true,
            } => Some(Handoff {
                aktionsart,
                clause: self.original_clause.clone(),
                dynamic: !aktionsart.is_state() && self.features.dynamic.unwrap_or(false),
            }),
            _ => None,
        }
    }

    /// The question to ask next, or `None` once finished.
    pub fn prompt(&self) -> Option<Prompt> {
        let language = self.language;
        let clause = self.clause.as_str();
        let prompt = match self.step {
            AktionsartStep::Clause => diagnostics::clause_request(language),
            AktionsartStep::Paraphrase => diagnostics::causativity_paraphrase(clause, language),
            AktionsartStep::ParaphraseCriteria => {
                diagnostics::causativity_criteria(clause, &self.paraphrase, language)
            }
            AktionsartStep::BasicEvent => diagnostics::basic_event(language),
            AktionsartStep::Stativity => diagnostics::stativity(clause, language),
            AktionsartStep::Infinitive => diagnostics::infinitive(clause),
            AktionsartStep::Gerund => diagnostics::gerund(clause, language),
            AktionsartStep::Participle => diagnostics::participle(clause, language),
            AktionsartStep::Subject => diagnostics::subject(clause, language),
            AktionsartStep::Complements => diagnostics::complements(clause, language),
            AktionsartStep::PersonNumber => diagnostics::person_number(language),
            AktionsartStep::Punctuality => diagnostics::punctuality(&self.clause_data, language),
            AktionsartStep::Telicity => diagnostics::telicity(&self.clause_data, language),
            AktionsartStep::Dynamicity => diagnostics::dynamicity(&self.clause_data, language),
            AktionsartStep::Result(aktionsart) => self.result_prompt(aktionsart),
            AktionsartStep::Finished { .. } => return None,
        };
        Some(prompt)
    }

    fn result_prompt(&self, aktionsart: Aktionsart) -> Prompt {
        let language = self.language;
        let label = aktionsart.label(language).to_uppercase();
        let summary = self
            .features
            .complete()
            .map(|features| features.summary(aktionsart, language))
            .unwrap_or_default();
        let original = &self.original_clause;
        match language {
            Language::Spanish => Prompt::yes_no(
                "¿Quieres obtener la estructura lógica de esta cláusula?",
                language,
            )
            .heading("RESULTADO")
            .line(format!(
                "El aktionsart del predicado de «{original}» es {label}."
            ))
            .line("Este predicado se clasifica así porque tiene los siguientes rasgos:")
            .line(summary),
            Language::English => Prompt::yes_no(
                "Would you like to obtain the logical structure of this clause?",
                language,
            )
            .heading("RESULT")
            .line(format!(
                "The aktionsart of the predicate in '{original}' is {label}."
            ))
            .line(
                "This predicate is classified as such because it shows the following features:",
            )
            .line(summary),
        }
    }

    /// Advances the questionnaire by one answer.
    pub fn step(&self, input: &Input) -> Result<Transition<Self>, SessionError> {
        let answer = match input {
            Input::Back => return Ok(Transition::quiet(self.back())),
            Input::Answer(answer) => answer,
        };

        let language = self.language;
        let mut next = self.clone();
        let mut notice = None;

        let step = match self.step {
            AktionsartStep::Clause => {
                let clause = required(answer)?;
                next.original_clause = clause.clone();
                next.clause = clause;
                AktionsartStep::Paraphrase
            }
            AktionsartStep::Paraphrase => {
                next.clause = next.original_clause.clone();
                let paraphrase = answer.trim();
                if paraphrase.is_empty() || paraphrase == "0" {
                    notice = Some(next.settle(Feature::Causative, false));
                    AktionsartStep::Stativity
                } else {
                    next.paraphrase = paraphrase.to_string();
                    AktionsartStep::ParaphraseCriteria
                }
            }
            AktionsartStep::ParaphraseCriteria => {
                if language.parse_yes_no(answer)? {
                    AktionsartStep::BasicEvent
                } else {
                    notice = Some(next.settle(Feature::Causative, false));
                    AktionsartStep::Stativity
                }
            }
            AktionsartStep::BasicEvent => {
                let event = required(answer)?;
                if event == "0" {
                    notice = Some(next.settle(Feature::Causative, false));
                } else {
                    log::debug!("re-anchoring tests on basic event {event:?}");
                    next.clause = event;
                    notice = Some(next.settle(Feature::Causative, true));
                }
                AktionsartStep::Stativity
            }
            AktionsartStep::Stativity => {
                let stative = !language.parse_yes_no(answer)?;
                notice = Some(next.settle(Feature::Stative, stative));
                if stative {
                    next.result_step()?
                } else {
                    next.clause_data = ClauseData::default();
                    match language {
                        Language::Spanish => AktionsartStep::Infinitive,
                        Language::English => AktionsartStep::Gerund,
                    }
                }
            }
            AktionsartStep::Infinitive => {
                next.clause_data.infinitive = required(answer)?;
                AktionsartStep::Gerund
            }
            AktionsartStep::Gerund => {
                next.clause_data.gerund = required(answer)?;
                AktionsartStep::Participle
            }
            AktionsartStep::Participle => {
                next.clause_data.participle = required(answer)?;
                AktionsartStep::Subject
            }
            AktionsartStep::Subject => {
                next.clause_data.subject = ClauseData::optional_part(answer);
                AktionsartStep::Complements
            }
            AktionsartStep::Complements => {
                next.clause_data.complements = ClauseData::optional_part(answer);
                AktionsartStep::PersonNumber
            }
            AktionsartStep::PersonNumber => {
                next.clause_data.person_number = PersonNumber::parse_answer(answer)?;
                AktionsartStep::Punctuality
            }
            AktionsartStep::Punctuality => {
                let punctual = !language.parse_yes_no(answer)?;
                notice = Some(next.settle(Feature::Punctual, punctual));
                AktionsartStep::Telicity
            }
            AktionsartStep::Telicity => {
                let telic = !language.parse_yes_no(answer)?;
                notice = Some(next.settle(Feature::Telic, telic));
                AktionsartStep::Dynamicity
            }
            AktionsartStep::Dynamicity => {
                let dynamic = language.parse_yes_no(answer)?;
                notice = Some(next.settle(Feature::Dynamic, dynamic));
                next.result_step()?
            }
            AktionsartStep::Result(aktionsart) => AktionsartStep::Finished {
                aktionsart,
                logical_structure_requested: language.parse_yes_no(answer)?,
            },
            AktionsartStep::Finished { .. } => return Err(SessionError::Finished),
        };

        next.history.push(self.step);
        next.step = step;
        Ok(match notice {
            Some(notice) => Transition::with_notice(next, notice),
            None => Transition::quiet(next),
        })
    }

    fn settle(&mut self, feature: Feature, value: bool) -> String {
        self.features.set(feature, value);
        feature.notice(value, self.language)
    }

    fn result_step(&self) -> Result<AktionsartStep, SessionError> {
        let aktionsart = self
            .features
            .classify()
            .ok_or(SessionError::Unclassifiable)?;
        log::info!(
            "classified {:?} as {}",
            self.original_clause,
            aktionsart.label(Language::Spanish)
        );
        Ok(AktionsartStep::Result(aktionsart))
    }

    /// Returns to the previous question and forgets the feature it had settled.
    fn back(&self) -> Self {
        let mut previous = self.clone();
        let Some(step) = previous.history.pop() else {
            return previous;
        };
        match step {
            AktionsartStep::Paraphrase
            | AktionsartStep::ParaphraseCriteria
            | AktionsartStep::BasicEvent => {
                previous.features.clear(Feature::Causative);
                previous.clause = previous.original_clause.clone();
            }
            AktionsartStep::Stativity => previous.features.clear(Feature::Stative),
            AktionsartStep::Punctuality => previous.features.clear(Feature::Punctual),
            AktionsartStep::Telicity => previous.features.clear(Feature::Telic),
            AktionsartStep::Dynamicity => previous.features.clear(Feature::Dynamic),
            _ => {}
        }
        previous.step = step;
        previous
    }

    /// The kind of answer the current step expects.
    pub fn answer_kind(&self) -> Option<AnswerKind> {
        self.prompt().map(|prompt| prompt.kind)
    }
}
