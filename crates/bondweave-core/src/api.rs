//! Wire-level error envelope shared with clients
//!
//! Every response is a `Result<T, ApiError>`. Bond check failures travel as
//! `LogicError { code: ForceValidate(BondError) }` so that client-side and
//! server-side validation classify failures the same way.

use crate::article::BoardId;
use crate::error::Error;
use crate::store::StoreError;
use serde::{Deserialize, Serialize};

/// Kind of the thing a `NotFound` code refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataKind {
    Category,
    Family,
    Field,
    IntField,
    StringField,
    BondField,
    Board,
    Article,
    User,
}

/// Why a bond was refused
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BondError {
    Custom(Box<ApiError>),
    TargetNotFound,
    TargetNotSameBoard(BoardId),
    TargetViolateCategory,
    TargetViolateEnergy,
}

impl std::fmt::Display for BondError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Custom(err) => write!(f, "{}", err),
            Self::TargetNotFound => write!(f, "bond target does not exist"),
            Self::TargetNotSameBoard(_) => write!(f, "bond target must be on the same board"),
            Self::TargetViolateCategory => write!(f, "cannot point to that category"),
            Self::TargetViolateEnergy => write!(f, "bond energy must not be negative"),
        }
    }
}

/// Classification of a logic error
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ErrorCode {
    NeedLogin,
    PermissionDenied,
    NotFound(DataKind, String),
    DuplicateRegister,
    ParsingJson,
    ForceValidate(BondError),
    UnImplemented,
    Other(String),
}

/// Error envelope returned to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ApiError {
    /// The caller used the API wrongly
    OperationError { msg: Vec<String> },
    /// A well-formed request the domain refuses
    LogicError { msg: Vec<String>, code: ErrorCode },
    /// Unexpected backend fault
    InternalError { msg: Vec<String>, source: String },
}

impl ApiError {
    pub fn operation(msg: impl Into<String>) -> Self {
        Self::OperationError {
            msg: vec![msg.into()],
        }
    }

    pub fn logic(msg: impl Into<String>, code: ErrorCode) -> Self {
        Self::LogicError {
            msg: vec![msg.into()],
            code,
        }
    }

    pub fn internal(msg: impl Into<String>, source: impl std::fmt::Display) -> Self {
        Self::InternalError {
            msg: vec![msg.into()],
            source: source.to_string(),
        }
    }

    /// Wrap a bond rejection
    pub fn bond(field: &str, err: BondError) -> Self {
        Self::logic(
            format!("field {}: {}", field, err),
            ErrorCode::ForceValidate(err),
        )
    }

    pub fn code(&self) -> Option<&ErrorCode> {
        match self {
            Self::LogicError { code, .. } => Some(code),
            _ => None,
        }
    }

    fn messages(&self) -> &[String] {
        match self {
            Self::OperationError { msg }
            | Self::LogicError { msg, .. }
            | Self::InternalError { msg, .. } => msg,
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = self.messages().join(": ");
        match self {
            Self::OperationError { .. } => write!(f, "operation error: {}", msg),
            Self::LogicError { code, .. } => write!(f, "logic error: {} ({:?})", msg, code),
            Self::InternalError { source, .. } => {
                write!(f, "internal error: {} (source: {})", msg, source)
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let msg = err.to_string();
        match err {
            Error::CategoryNotFound(name) => {
                Self::logic(msg, ErrorCode::NotFound(DataKind::Category, name))
            }
            Error::FamilyNotFound(name) | Error::Store(StoreError::FamilyNotFound(name)) => {
                Self::logic(msg, ErrorCode::NotFound(DataKind::Family, name))
            }
            Error::FieldNotFound { category, field } => Self::logic(
                msg,
                ErrorCode::NotFound(DataKind::Field, format!("{}.{}", category, field)),
            ),
            Error::DuplicateCategory(_) | Error::DuplicateField { .. } => {
                Self::logic(msg.clone(), ErrorCode::Other(msg))
            }
            Error::ArticleNotFound(id) | Error::Store(StoreError::NotFound(id)) => {
                Self::logic(msg, ErrorCode::NotFound(DataKind::Article, id.to_string()))
            }
            Error::IllTyped(_) | Error::Limit(_) | Error::Store(StoreError::InvalidFilter(_)) => {
                Self::operation(msg)
            }
            Error::Store(StoreError::Transport(source)) => {
                Self::internal("unexpected network error", source)
            }
        }
    }
}
