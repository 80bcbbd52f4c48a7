//! Questionnaires as explicit state machines.
//!
//! A session is a plain serializable value. Front ends render
//! [`AktionsartSession::prompt`] (or the logical-structure equivalent), collect
//! an [`Input`], and call `step` to get the next value. Nothing is kept
//! anywhere else, so the web backend can hand the whole state to the client and
//! take it back on the next request.

pub mod aktionsart;
pub mod logical_structure;

pub use aktionsart::{AktionsartSession, AktionsartStep, Handoff};
pub use logical_structure::{LogicalStructureSession, LogicalStructureStep};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(tag = "type", content = "value")]
pub enum Input {
    Answer(String),
    /// Return to the previous question.
    Back,
}

impl Input {
    pub fn answer(text: impl Into<String>) -> Self {
        Input::Answer(text.into())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct Transition<S> {
    pub session: S,
    /// Feedback to show before the next prompt, e.g. `El predicado es [+télico]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

impl<S> Transition<S> {
    fn quiet(session: S) -> Self {
        Self {
            session,
            notice: None,
        }
    }

    fn with_notice(session: S, notice: String) -> Self {
        Self {
            session,
            notice: Some(notice),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    InvalidAnswer(#[from] crate::Error),

    #[error("the answers given do not determine an aktionsart")]
    Unclassifiable,

    #[error("the session is already finished")]
    Finished,
}

/// Checks that a free-text answer is not blank and returns it trimmed.
fn required(answer: &str) -> Result<String, crate::Error> {
    let answer = answer.trim();
    if answer.is_empty() {
        Err(crate::Error::EmptyAnswer)
    } else {
        Ok(answer.to_string())
    }
}
