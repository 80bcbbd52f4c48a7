//! Wording of the diagnostic tests and the questions around them.

use crate::periphrasis::{self, ClauseData, PersonNumber};
use crate::{Language, capitalize_first};
use serde::{Deserialize, Serialize};

/// What kind of answer a prompt expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub enum AnswerKind {
    FreeText,
    /// Free text where `0` means "none".
    TextOrZero,
    /// Free text that may be left blank.
    OptionalText,
    YesNo,
    PersonNumber,
    /// One of the listed values (case-insensitive) or its 1-based index.
    Choice(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct Prompt {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lines: Vec<String>,
    pub question: String,
    pub kind: AnswerKind,
}

impl Prompt {
    pub fn new(question: impl Into<String>, kind: AnswerKind) -> Self {
        Self {
            heading: None,
            lines: Vec::new(),
            question: question.into(),
            kind,
        }
    }

    pub fn heading(mut self, heading: impl Into<String>) -> Self {
        self.heading = Some(heading.into());
        self
    }

    pub fn line(mut self, line: impl Into<String>) -> Self {
        self.lines.push(line.into());
        self
    }

    /// Appends the `(s/n)` hint for yes/no questions.
    pub fn yes_no(question: impl Into<String>, language: Language) -> Self {
        Self::new(
            format!("{} {}", question.into(), language.yes_no_hint()),
            AnswerKind::YesNo,
        )
    }
}

pub fn clause_request(language: Language) -> Prompt {
    match language {
        Language::Spanish => Prompt::new("Cláusula:", AnswerKind::FreeText)
            .line("Por favor, escribe una cláusula con el verbo que quieres probar")
            .line("conjugado en pretérito (ej: «Pedro corrió hasta su casa»).")
            .line("Si suena muy extraña, escríbela en presente (ej: «María sabe inglés»)."),
        Language::English => Prompt::new("Clause:", AnswerKind::FreeText)
            .line("Please type a clause with the verb you want to test")
            .line("conjugated in the SIMPLE PAST (e.g., 'Peter ran home').")
            .line("If it sounds very odd, type it in PRESENT (e.g., 'Mary knows English')."),
    }
}

pub fn causativity_paraphrase(clause: &str, language: Language) -> Prompt {
    match language {
        Language::Spanish => Prompt::new(
            "Escribe tu reformulación (o «0» si no es posible):",
            AnswerKind::TextOrZero,
        )
        .heading("PRUEBA DE CAUSATIVIDAD")
        .line(format!(
            "Intenta reformular «{clause}» siguiendo estos modelos:"
        ))
        .line("• El gato rompió el jarrón → El gato HIZO QUE el jarrón se rompiera")
        .line("• Ana le dio un libro a Pepe → Ana HIZO QUE Pepe tuviera un libro"),
        Language::English => Prompt::new(
            "Type your paraphrase (or '0' if not possible):",
            AnswerKind::TextOrZero,
        )
        .heading("CAUSATIVITY TEST")
        .line(format!(
            "Try to paraphrase '{clause}' following these models:"
        ))
        .line("• The cat broke the vase → The cat CAUSED the vase to break")
        .line("• Ana gave Pepe a book → Ana CAUSED Pepe to have a book"),
    }
}

pub fn causativity_criteria(clause: &str, paraphrase: &str, language: Language) -> Prompt {
    let paraphrase = capitalize_first(paraphrase);
    match language {
        Language::Spanish => Prompt::yes_no(
            format!("¿«{paraphrase}» cumple con estos criterios?"),
            language,
        )
        .line("Considera lo siguiente:")
        .line(format!(
            "• «{paraphrase}» debe mantener el significado de «{clause}»."
        ))
        .line(format!(
            "• «{paraphrase}» no debe añadir nuevos argumentos ni repetir otros ya existentes en «{clause}»."
        ))
        .line(format!(
            "• El argumento expresado en el complemento directo de «{clause}» debe sufrir un cambio de estado en «{paraphrase}»."
        ))
        .line("• No debe tratarse de expresiones de consumo («comer una manzana») o creación («escribir un cuento»)."),
        Language::English => Prompt::yes_no(
            format!("Does '{paraphrase}' meet these criteria?"),
            language,
        )
        .line("Consider the following:")
        .line(format!(
            "• '{paraphrase}' should preserve the meaning of '{clause}'."
        ))
        .line(format!(
            "• '{paraphrase}' must not add new arguments nor duplicate existing ones in '{clause}'."
        ))
        .line("• Exclude consumption ('eat an apple') and creation ('write a story') readings."),
    }
}

pub fn basic_event(language: Language) -> Prompt {
    match language {
        Language::Spanish => Prompt::new(
            "Si no puedes pensar en ninguno, escribe «0»:",
            AnswerKind::TextOrZero,
        )
        .line("Escribe el evento o estado resultante sin la causa (ejs: «el jarrón se rompió», «Pepe tiene un libro»)."),
        Language::English => Prompt::new(
            "If none comes to mind, type '0':",
            AnswerKind::TextOrZero,
        )
        .line("Type the resulting event/state without the cause (e.g., 'the vase broke', 'Pepe has a book')."),
    }
}

/// A "yes" here means the clause is an event, so stative = !answer.
pub fn stativity(clause: &str, language: Language) -> Prompt {
    let answer = capitalize_first(clause);
    match language {
        Language::Spanish => Prompt::yes_no(
            format!(
                "¿Te parece que «{clause}» es una buena respuesta a la pregunta? (con cualquiera de las opciones)"
            ),
            language,
        )
        .heading("PRUEBA DE ESTATIVIDAD")
        .line("Observa el siguiente diálogo:")
        .line("—¿Qué pasó hace un rato / ayer / el mes pasado?")
        .line(format!("—{answer}.")),
        Language::English => Prompt::yes_no(
            format!(
                "Do you think '{clause}' is a good answer to that question (for at least one time option)?"
            ),
            language,
        )
        .heading("STATIVITY TEST")
        .line("Consider the following dialogue:")
        .line("—What happened a moment ago / yesterday / last month?")
        .line(format!("—{answer}.")),
    }
}

pub fn infinitive(clause: &str) -> Prompt {
    Prompt::new(
        format!(
            "Escribe el INFINITIVO del verbo en «{clause}», incluyendo los clíticos que haya (ejs: «derretirse», «decirle»):"
        ),
        AnswerKind::FreeText,
    )
}

pub fn gerund(clause: &str, language: Language) -> Prompt {
    let question = match language {
        Language::Spanish => format!(
            "Escribe el GERUNDIO del verbo en «{clause}», sin clíticos (ej: «derritiendo»):"
        ),
        Language::English => format!(
            "Type the GERUND of the verb in '{clause}' (e.g., 'melting', 'telling'):"
        ),
    };
    Prompt::new(question, AnswerKind::FreeText)
}

pub fn participle(clause: &str, language: Language) -> Prompt {
    let question = match language {
        Language::Spanish => format!(
            "Escribe el PARTICIPIO (masculino singular) del verbo en «{clause}» (ej: «derretido»):"
        ),
        Language::English => "Type the PAST PARTICIPLE (e.g., 'melted', 'told'):".to_string(),
    };
    Prompt::new(question, AnswerKind::FreeText)
}

pub fn subject(clause: &str, language: Language) -> Prompt {
    let question = match language {
        Language::Spanish => format!(
            "Escribe todo lo que hay ANTES del verbo en «{clause}», incluyendo los clíticos (0 si no hay nada):"
        ),
        Language::English => format!(
            "Type everything that comes BEFORE the verb in '{clause}' (0 if nothing):"
        ),
    };
    Prompt::new(question, AnswerKind::TextOrZero)
}

pub fn complements(clause: &str, language: Language) -> Prompt {
    let question = match language {
        Language::Spanish => {
            format!("Escribe todo lo que hay DESPUÉS del verbo en «{clause}» (0 si no hay nada):")
        }
        Language::English => {
            format!("Type everything that comes AFTER the verb in '{clause}' (0 if nothing):")
        }
    };
    Prompt::new(question, AnswerKind::TextOrZero)
}

pub fn person_number(language: Language) -> Prompt {
    let question = match language {
        Language::Spanish => "Escribe la persona y número del verbo",
        Language::English => "Type the person and number of the verb",
    };
    Prompt::new(
        format!("{question} ({}):", PersonNumber::choices()),
        AnswerKind::PersonNumber,
    )
}

/// A "yes" means the event is durative, so punctual = !answer.
pub fn punctuality(data: &ClauseData, language: Language) -> Prompt {
    let expression = capitalize_first(&periphrasis::progressive_past(data, language));
    match language {
        Language::Spanish => Prompt::yes_no(
            "¿Es esta una expresión posible? (sin que el evento tome una interpretación iterativa o de inminencia)",
            language,
        )
        .heading("PRUEBA DE PUNTUALIDAD")
        .line(format!(
            "Observa esta expresión: «{expression} durante una hora / un mes»."
        )),
        Language::English => Prompt::yes_no(
            "Is this expression acceptable (with at least one option) WITHOUT forcing an iterative or imminent reading?",
            language,
        )
        .heading("PUNCTUALITY TEST")
        .line(format!(
            "Consider: '{expression} for an hour / for a month'."
        )),
    }
}

/// A "yes" means the interrupted event still counts as done, so telic = !answer.
pub fn telicity(data: &ClauseData, language: Language) -> Prompt {
    let ongoing = periphrasis::progressive_subjunctive(data, language);
    let stopped = periphrasis::cessation(data, language);
    let perfect = periphrasis::perfect(data, language);
    match language {
        Language::Spanish => Prompt::yes_no(format!("¿Se podría decir que «{perfect}»?"), language)
            .heading("PRUEBA DE TELICIDAD")
            .line(format!("Imagina que {ongoing} y de pronto {stopped}.")),
        Language::English => Prompt::yes_no(
            format!("Would it then be true to say: '{perfect}'?"),
            language,
        )
        .heading("TELICITY TEST")
        .line(format!("Imagine that {ongoing} and suddenly {stopped}.")),
    }
}

/// A "yes" means dynamic.
pub fn dynamicity(data: &ClauseData, language: Language) -> Prompt {
    let expression = capitalize_first(&periphrasis::progressive_present(data, language));
    match language {
        Language::Spanish => Prompt::yes_no(
            "¿Esta expresión es compatible con alguna de las opciones?",
            language,
        )
        .heading("PRUEBA DE DINAMICIDAD")
        .line(format!(
            "Observa esta expresión: «{expression} enérgicamente / con fuerza / con ganas»."
        )),
        Language::English => Prompt::yes_no(
            "Is this acceptable with at least one of the options?",
            language,
        )
        .heading("DYNAMICITY TEST")
        .line(format!(
            "Consider: '{expression} vigorously / forcefully / with effort'."
        )),
    }
}

/// Printed when the answers do not add up to a class.
pub fn unclassifiable(language: Language) -> [&'static str; 2] {
    match language {
        Language::Spanish => [
            "No es posible identificar el aktionsart de la cláusula con estos parámetros.",
            "Por favor, revisa con cuidado tus respuestas a las preguntas.",
        ],
        Language::English => [
            "It is not possible to identify the aktionsart of the clause with these parameters.",
            "Please review your answers carefully.",
        ],
    }
}

/// Asked after each classification in the terminal loop.
pub fn another_predicate(language: Language) -> Prompt {
    match language {
        Language::Spanish => Prompt::yes_no(
            "¿Quieres identificar el aktionsart de otro predicado?",
            language,
        ),
        Language::English => Prompt::yes_no(
            "Would you like to identify the aktionsart of another predicate?",
            language,
        ),
    }
}

pub fn invalid_menu_option(language: Language) -> &'static str {
    match language {
        Language::Spanish => "Opción no válida. Por favor, intenta de nuevo.",
        Language::English => "Invalid option. Please try again.",
    }
}

/// Printed when a yes/no or multiple-choice answer is not recognized.
pub fn invalid_answer(kind: &AnswerKind, language: Language) -> &'static str {
    match (kind, language) {
        (AnswerKind::YesNo, Language::Spanish) => {
            "Por favor, entrega una respuesta válida: «sí (s)» o «no (n)»."
        }
        (AnswerKind::YesNo, Language::English) => "Please answer 'yes (y)' or 'no (n)'.",
        (_, Language::Spanish) => "Por favor, escribe una respuesta válida.",
        (_, Language::English) => "Please type a valid option.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vase() -> ClauseData {
        ClauseData {
            infinitive: "romperse".to_string(),
            gerund: "rompiendo".to_string(),
            participle: "roto".to_string(),
            subject: "el jarrón se".to_string(),
            complements: String::new(),
            person_number: PersonNumber::ThirdSingular,
        }
    }

    #[test]
    fn test_stativity_dialogue() {
        let prompt = stativity("María sabe inglés", Language::Spanish);
        assert_eq!(prompt.heading.as_deref(), Some("PRUEBA DE ESTATIVIDAD"));
        assert_eq!(prompt.lines.last().map(String::as_str), Some("—María sabe inglés."));
        assert!(prompt.question.ends_with("(s/n)"));
        assert_eq!(prompt.kind, AnswerKind::YesNo);
    }

    #[test]
    fn test_punctuality_uses_past_progressive() {
        let prompt = punctuality(&vase(), Language::Spanish);
        assert_eq!(
            prompt.lines,
            vec!["Observa esta expresión: «El jarrón se estuvo rompiendo durante una hora / un mes»."]
        );
    }

    #[test]
    fn test_telicity_frame() {
        let prompt = telicity(&vase(), Language::Spanish);
        assert_eq!(
            prompt.lines,
            vec!["Imagina que el jarrón se estuviera rompiendo y de pronto dejara de romperse."]
        );
        assert_eq!(prompt.question, "¿Se podría decir que «el jarrón se ha roto»? (s/n)");
    }

    #[test]
    fn test_english_dynamicity() {
        let data = ClauseData {
            gerund: "pushing".to_string(),
            subject: "Ana".to_string(),
            complements: "the cart".to_string(),
            ..ClauseData::default()
        };
        let prompt = dynamicity(&data, Language::English);
        assert_eq!(
            prompt.lines,
            vec!["Consider: 'Ana is pushing the cart vigorously / forcefully / with effort'."]
        );
        assert!(prompt.question.ends_with("(y/n)"));
    }

    #[test]
    fn test_person_number_prompt_lists_choices() {
        let prompt = person_number(Language::Spanish);
        assert!(prompt.question.contains("(1s/2s/3s/1p/2p/3p)"));
        assert_eq!(prompt.kind, AnswerKind::PersonNumber);
    }
}
