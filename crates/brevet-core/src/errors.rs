// ABOUTME: Unified error types for the Brevet engine
// ABOUTME: Defines ErrorCode, AppError, and the AppResult alias used at the boundaries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Brevet Fitness

//! # Unified Error Handling
//!
//! The analysis engine itself is fail-soft: a missing sensor or a short series
//! produces an omitted report section, never an error. `AppError` exists for
//! the two places where failure is real: parsing upstream payloads into
//! boundary types, and serializing the finished report.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Standard error codes used throughout the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    /// Input payload could not be interpreted
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput,
    /// A result could not be serialized for the caller
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError,
    /// Unexpected internal failure
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError,
}

impl ErrorCode {
    /// Get a user-friendly description of this error code
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::SerializationError => "Data serialization failed",
            Self::InternalError => "An internal error occurred",
        }
    }
}

/// Application error type carrying a code and a human-readable message
#[derive(Debug, Error)]
pub enum AppError {
    /// Input validation failure at an engine boundary
    #[error("invalid input: {message}")]
    InvalidInput {
        /// What was wrong with the input
        message: String,
    },
    /// Report serialization failure
    #[error("serialization failed: {message}")]
    Serialization {
        /// Underlying serializer message
        message: String,
    },
    /// Unexpected internal failure
    #[error("internal error: {message}")]
    Internal {
        /// What went wrong
        message: String,
    },
}

impl AppError {
    /// Create an invalid-input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// The standard code for this error
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidInput { .. } => ErrorCode::InvalidInput,
            Self::Serialization { .. } => ErrorCode::SerializationError,
            Self::Internal { .. } => ErrorCode::InternalError,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            message: err.to_string(),
        }
    }
}

/// Result alias used across the engine
pub type AppResult<T> = Result<T, AppError>;
