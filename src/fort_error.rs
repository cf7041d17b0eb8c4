//! Errors in Fortran edit descriptors
use std::fmt::Display;
use pest::RuleType;

/// Type alias for a `Result` with [`FError`] as the error type.
pub type FResult<T> = Result<T, FError>;


/// An error related to a Fortran edit descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FError {
    /// Indicates that the string given was not a valid edit descriptor. This covers
    /// an unknown type letter as well as a known letter with missing or extra components.
    /// `input` is the text exactly as it was passed in.
    InvalidDescriptor{ input: String, reason: String },
}

impl Display for FError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FError::InvalidDescriptor { input, reason } => {
                write!(f, "'{input}' is not a valid Fortran edit descriptor: {reason}")
            },
        }
    }
}

impl std::error::Error for FError {}

impl FError {
    pub(crate) fn invalid<S: Into<String>>(input: &str, reason: S) -> Self {
        Self::InvalidDescriptor { input: input.to_owned(), reason: reason.into() }
    }

    /// Build an [`FError::InvalidDescriptor`] for `input` from a pest parsing error.
    pub fn from_pest<R: RuleType>(e: pest::error::Error<R>, input: &str) -> Self {
        // Message only, the full pest rendering spans several lines
        let reason = e.variant.message().into_owned();
        Self::invalid(input, reason)
    }

    /// The descriptor text that failed to parse.
    pub fn input(&self) -> &str {
        match self {
            FError::InvalidDescriptor { input, reason: _ } => input,
        }
    }
}
