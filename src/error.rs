//! Error types shared by the gateway, catalog and quiz engine.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Failure talking to the upstream API.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum ApiError {
    #[error("request for {resource} failed: {reason}")]
    Fetch { resource: String, reason: String },
    #[error("{resource} not found")]
    NotFound { resource: String },
    #[error("malformed payload from {resource}: {reason}")]
    MalformedPayload { resource: String, reason: String },
}

impl ApiError {
    pub fn fetch(resource: impl Into<String>, reason: impl fmt::Display) -> Self {
        Self::Fetch {
            resource: resource.into(),
            reason: reason.to_string(),
        }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    pub fn malformed(resource: impl Into<String>, reason: impl fmt::Display) -> Self {
        Self::MalformedPayload {
            resource: resource.into(),
            reason: reason.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn resource(&self) -> &str {
        match self {
            Self::Fetch { resource, .. }
            | Self::NotFound { resource }
            | Self::MalformedPayload { resource, .. } => resource,
        }
    }
}

/// Which part of a quiz round was being drawn when retries ran out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawStage {
    Target,
    Distractor,
}

impl fmt::Display for DrawStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawStage::Target => write!(f, "target"),
            DrawStage::Distractor => write!(f, "distractor"),
        }
    }
}

#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum QuizError {
    #[error("gave up drawing a {stage} after {attempts} attempts{}", last_error_suffix(.last_error))]
    DrawExhausted {
        stage: DrawStage,
        attempts: u32,
        last_error: Option<ApiError>,
    },
}

fn last_error_suffix(error: &Option<ApiError>) -> String {
    match error {
        Some(error) => format!(": {error}"),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_detected() {
        let error = ApiError::not_found("https://pokeapi.co/api/v2/pokemon/missingno");
        assert!(error.is_not_found());
        assert_eq!(error.resource(), "https://pokeapi.co/api/v2/pokemon/missingno");
        assert!(!ApiError::fetch("x", "HTTP 500").is_not_found());
    }

    #[test]
    fn exhausted_message_includes_last_error() {
        let error = QuizError::DrawExhausted {
            stage: DrawStage::Target,
            attempts: 3,
            last_error: Some(ApiError::fetch("pokemon/7", "HTTP 503")),
        };
        assert_eq!(
            error.to_string(),
            "gave up drawing a target after 3 attempts: request for pokemon/7 failed: HTTP 503"
        );

        let bare = QuizError::DrawExhausted {
            stage: DrawStage::Distractor,
            attempts: 9,
            last_error: None,
        };
        assert_eq!(bare.to_string(), "gave up drawing a distractor after 9 attempts");
    }
}
