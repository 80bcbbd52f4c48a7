//! Drives the questionnaires from `rrg_utils::session` over a [`Console`].

use std::io::{BufRead, Write};

use rrg_utils::diagnostics::{self, Prompt};
use rrg_utils::session::{
    AktionsartSession, Input, LogicalStructureSession, SessionError, Transition,
};
use rrg_utils::{Language, LogicalStructure};

use crate::console::Console;

/// The part of a session the terminal loop needs.
pub trait Questionnaire: Sized {
    fn language(&self) -> Language;
    fn prompt(&self) -> Option<Prompt>;
    fn step(&self, input: &Input) -> Result<Transition<Self>, SessionError>;
    /// A fresh session, used when the answers lead nowhere.
    fn restart(&self) -> Self;
}

impl Questionnaire for AktionsartSession {
    fn language(&self) -> Language {
        self.language
    }

    fn prompt(&self) -> Option<Prompt> {
        AktionsartSession::prompt(self)
    }

    fn step(&self, input: &Input) -> Result<Transition<Self>, SessionError> {
        AktionsartSession::step(self, input)
    }

    fn restart(&self) -> Self {
        AktionsartSession::new(self.language)
    }
}

impl Questionnaire for LogicalStructureSession {
    fn language(&self) -> Language {
        self.language
    }

    fn prompt(&self) -> Option<Prompt> {
        LogicalStructureSession::prompt(self)
    }

    fn step(&self, input: &Input) -> Result<Transition<Self>, SessionError> {
        LogicalStructureSession::step(self, input)
    }

    fn restart(&self) -> Self {
        LogicalStructureSession::new(self.language)
    }
}

/// Asks questions until the session finishes. Returns `None` if the input
/// runs out first.
pub fn run<Q, R, W>(console: &mut Console<R, W>, mut session: Q) -> anyhow::Result<Option<Q>>
where
    Q: Questionnaire,
    R: BufRead,
    W: Write,
{
    let language = session.language();
    loop {
        let Some(prompt) = session.prompt() else {
            return Ok(Some(session));
        };
        console.show(&prompt)?;
        let Some(answer) = console.read_line()? else {
            console.say("")?;
            return Ok(None);
        };

        match session.step(&Input::Answer(answer)) {
            Ok(transition) => {
                if let Some(notice) = transition.notice {
                    console.say(notice)?;
                    console.pause();
                }
                session = transition.session;
            }
            Err(SessionError::InvalidAnswer(error)) => {
                log::debug!("rejected answer: {error}");
                console.say(diagnostics::invalid_answer(&prompt.kind, language))?;
            }
            Err(SessionError::Unclassifiable) => {
                for line in diagnostics::unclassifiable(language) {
                    console.say(line)?;
                }
                console.pause();
                console.clear()?;
                session = session.restart();
            }
            Err(SessionError::Finished) => return Ok(Some(session)),
        }
    }
}

/// Asks a yes/no question outside any session until the answer parses.
pub fn ask_yes_no<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    prompt: &Prompt,
    language: Language,
) -> anyhow::Result<Option<bool>> {
    loop {
        console.show(prompt)?;
        let Some(answer) = console.read_line()? else {
            console.say("")?;
            return Ok(None);
        };
        match language.parse_yes_no(&answer) {
            Ok(yes) => return Ok(Some(yes)),
            Err(error) => {
                log::debug!("rejected answer: {error}");
                console.say(diagnostics::invalid_answer(&prompt.kind, language))?;
            }
        }
    }
}

pub fn announce_structure<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    structure: &LogicalStructure,
    language: Language,
) -> anyhow::Result<()> {
    let heading = match language {
        Language::Spanish => "ESTRUCTURA LÓGICA FINAL",
        Language::English => "FINAL LOGICAL STRUCTURE",
    };
    console.say("")?;
    console.say(format!("=== {heading} ==="))?;
    console.say(structure.to_string())
}
