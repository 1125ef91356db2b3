//! Defensive parsing of model replies into typed analysis payloads.
//!
//! Models are asked for bare JSON but frequently wrap it in markdown fences
//! anyway. Parsing strips those fences, then attempts a strict decode.
//! Decode failure is a normal outcome, not an error: the caller receives the
//! payload's neutral fallback shape together with the decode reason.

use debrief_core::models::AnalysisPayload;

/// Outcome of parsing one model reply.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome<T> {
    /// The reply decoded into the typed payload.
    Parsed(T),
    /// The reply could not be decoded; `value` is the neutral fallback shape.
    Fallback { value: T, reason: String },
}

impl<T> ParseOutcome<T> {
    /// The payload, whichever way it was produced.
    pub fn into_value(self) -> T {
        match self {
            ParseOutcome::Parsed(value) => value,
            ParseOutcome::Fallback { value, .. } => value,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, ParseOutcome::Fallback { .. })
    }

    /// Decode error text, when the reply fell back.
    pub fn fallback_reason(&self) -> Option<&str> {
        match self {
            ParseOutcome::Parsed(_) => None,
            ParseOutcome::Fallback { reason, .. } => Some(reason),
        }
    }
}

/// Strip a leading ```` ```json ```` (or bare ```` ``` ````) fence and a
/// trailing ```` ``` ```` fence from a trimmed reply.
///
/// Only the outermost markers are removed; fences inside the payload are
/// left alone.
pub fn strip_code_fences(raw: &str) -> &str {
    let mut text = raw.trim();
    if let Some(rest) = text.strip_prefix("```json") {
        text = rest;
    } else if let Some(rest) = text.strip_prefix("```") {
        text = rest;
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }
    text.trim()
}

/// Decode a model reply into a typed analysis payload.
///
/// Never fails: an undecodable reply yields [`ParseOutcome::Fallback`] with
/// the payload's neutral shape. Derived fields are normalized after every
/// successful decode.
pub fn parse_analysis<T: AnalysisPayload>(raw: &str) -> ParseOutcome<T> {
    let cleaned = strip_code_fences(raw);
    match serde_json::from_str::<T>(cleaned) {
        Ok(mut value) => {
            value.normalize();
            ParseOutcome::Parsed(value)
        }
        Err(e) => ParseOutcome::Fallback {
            value: T::fallback(),
            reason: e.to_string(),
        },
    }
}
