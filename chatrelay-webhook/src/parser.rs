//! Webhook reply normalization
//!
//! The workflow's reply shape is not fixed, so the normalizer runs a list of
//! failure probes and then an ordered list of reply extractors over the
//! decoded JSON. The first extractor that yields a string wins.

use crate::config::WireFormat;
use crate::constants::{WORKFLOW_ERROR_REPLY, WORKFLOW_FAILED};
use crate::traits::ResponseParser;
use chatrelay_core::{Auxiliary, ChatResult, Error};
use serde_json::Value;

/// Pulls candidate reply text out of a payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyExtractor {
    /// A string-typed field of an object payload
    Field(String),
    /// The payload itself, when it is a bare JSON string
    Bare,
}

impl ReplyExtractor {
    /// Extractor for a named string field
    pub fn field(name: impl Into<String>) -> Self {
        Self::Field(name.into())
    }

    /// Candidate text, if this extractor applies
    pub fn extract<'a>(&self, payload: &'a Value) -> Option<&'a str> {
        match self {
            Self::Field(name) => payload.get(name.as_str())?.as_str(),
            Self::Bare => payload.as_str(),
        }
    }
}

/// Detects a payload that explicitly reports failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureProbe {
    /// `{ "ok": false, "error"?: ... }`
    OkFalse,
    /// `{ "message": <exact text> }`
    MessageEquals(String),
}

impl FailureProbe {
    /// Failure message, if the payload signals failure
    pub fn check(&self, payload: &Value) -> Option<String> {
        match self {
            Self::OkFalse => {
                if payload.get("ok") != Some(&Value::Bool(false)) {
                    return None;
                }
                Some(error_text(payload.get("error")))
            }
            Self::MessageEquals(text) => {
                let message = payload.get("message")?.as_str()?;
                (message == text).then(|| message.to_string())
            }
        }
    }
}

fn error_text(error: Option<&Value>) -> String {
    match error {
        Some(Value::String(text)) if !text.trim().is_empty() => text.clone(),
        Some(Value::Object(object)) => match object.get("message") {
            Some(Value::String(text)) => text.clone(),
            _ => Value::Object(object.clone()).to_string(),
        },
        Some(Value::Null) | Some(Value::String(_)) | None => WORKFLOW_FAILED.to_string(),
        Some(other) => other.to_string(),
    }
}

fn auxiliary(payload: &Value) -> Option<Auxiliary> {
    let object = payload.as_object()?;
    let string = |key: &str| object.get(key).and_then(Value::as_str).map(String::from);
    let present = |key: &str| object.get(key).filter(|v| !v.is_null()).cloned();

    let aux = Auxiliary {
        session_id: string("sessionId").or_else(|| string("clientId")),
        model: string("model"),
        timestamp: present("timestamp"),
        usage: present("usage"),
    };

    (!aux.is_empty()).then_some(aux)
}

/// Maps a decoded reply into a [`ChatResult`] or a classified failure
#[derive(Debug, Clone)]
pub struct ReplyNormalizer {
    probes: Vec<FailureProbe>,
    extractors: Vec<ReplyExtractor>,
}

impl Default for ReplyNormalizer {
    fn default() -> Self {
        Self {
            probes: vec![FailureProbe::OkFalse],
            extractors: vec![
                ReplyExtractor::field("output"),
                ReplyExtractor::field("reply"),
                ReplyExtractor::field("content"),
                ReplyExtractor::field("text"),
                ReplyExtractor::Bare,
            ],
        }
    }
}

impl ReplyNormalizer {
    /// Normalizer with the default probes and extractors
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalizer matching the failure conventions of a wire format
    pub fn for_format(format: WireFormat) -> Self {
        match format {
            WireFormat::FullContext => Self::default(),
            WireFormat::LatestMessage => Self::default()
                .with_probe(FailureProbe::MessageEquals(WORKFLOW_ERROR_REPLY.to_string())),
        }
    }

    /// Append an extractor, tried after the existing ones
    pub fn with_extractor(mut self, extractor: ReplyExtractor) -> Self {
        self.extractors.push(extractor);
        self
    }

    /// Append a failure probe
    pub fn with_probe(mut self, probe: FailureProbe) -> Self {
        self.probes.push(probe);
        self
    }

    /// Extractors in evaluation order
    pub fn extractors(&self) -> &[ReplyExtractor] {
        &self.extractors
    }

    /// Normalize a decoded payload
    pub fn normalize(&self, payload: &Value) -> Result<ChatResult, Error> {
        if let Some(message) = self.probes.iter().find_map(|p| p.check(payload)) {
            return Err(Error::Workflow(message));
        }

        let output = self
            .extractors
            .iter()
            .find_map(|e| e.extract(payload))
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .ok_or(Error::EmptyReply)?;

        Ok(ChatResult {
            output: output.to_string(),
            auxiliary: auxiliary(payload),
        })
    }
}

impl ResponseParser for ReplyNormalizer {
    fn parse_response(&self, value: &Value) -> Result<ChatResult, Error> {
        self.normalize(value)
    }
}
