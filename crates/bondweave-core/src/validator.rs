//! Field, value and category validation
//!
//! Validation answers with a [`Rejection`] when the input is wrong for its
//! schema. Faults are kept apart: an unreachable store surfaces as
//! `Err(Error::Store(StoreError::Transport(_)))` and an unknown family as
//! `Err(Error::FamilyNotFound(_))`, never as a rejection and never as valid.

use crate::api::{ApiError, BondError};
use crate::article::{ArticleId, BoardId};
use crate::config::EngineConfig;
use crate::content::{parse_integer, Content, NumberError, RawContent, RawValue};
use crate::error::{Error, Result};
use crate::limits::{self, DEFAULT_ARRAY_ITEMS};
use crate::schema::{BasicDataType, Bondee, Category, DataType, Schema};
use crate::store::{ArticleStore, StoreError};
use futures::future::join_all;

/// Why a value was refused
#[derive(Debug, Clone, PartialEq)]
pub enum Rejection {
    EmptyNotAllowed,
    NumberEmpty,
    NumberNotParsed,
    NumberNotInteger,
    BondEmpty,
    BondNotParsed,
    BondNotInteger,
    NotAList,
    NotAScalar,
    TooManyItems { count: usize, max: usize },
    Bond(BondError),
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyNotAllowed => write!(f, "empty not allowed"),
            Self::NumberEmpty => write!(f, "cannot be empty"),
            Self::NumberNotParsed => write!(f, "cannot parse as number"),
            Self::NumberNotInteger => write!(f, "must be an integer"),
            Self::BondEmpty => write!(f, "bond target id cannot be empty"),
            Self::BondNotParsed => write!(f, "bond target id cannot parse as number"),
            Self::BondNotInteger => write!(f, "bond target id must be an integer"),
            Self::NotAList => write!(f, "value must be a list"),
            Self::NotAScalar => write!(f, "value must not be a list"),
            Self::TooManyItems { count, max } => {
                write!(f, "too many items: {} (max {})", count, max)
            }
            Self::Bond(err) => write!(f, "{}", err),
        }
    }
}

/// A rejection attributed to the field it occurred in
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRejection {
    pub field: String,
    pub reason: Rejection,
}

impl std::fmt::Display for FieldRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

/// Message to show for a validation outcome, `None` when valid
///
/// Transport failures read "unexpected network error" so a form can tell
/// the user to retry rather than fix the value.
pub fn outcome_message<R: std::fmt::Display>(outcome: &Result<Option<R>>) -> Option<String> {
    match outcome {
        Ok(None) => None,
        Ok(Some(rejection)) => Some(rejection.to_string()),
        Err(err) if err.is_transport() => Some("unexpected network error".to_string()),
        Err(err) => Some(err.to_string()),
    }
}

/// Validates values submitted on one board
///
/// Holds borrowed, read-only views of the board's schema and an article
/// store; create one per request.
pub struct Validator<'a, S: ?Sized> {
    schema: &'a Schema,
    store: &'a S,
    board_id: BoardId,
    max_array_items: usize,
}

impl<'a, S: ArticleStore + ?Sized> Validator<'a, S> {
    pub fn new(schema: &'a Schema, store: &'a S, board_id: impl Into<BoardId>) -> Self {
        Self {
            schema,
            store,
            board_id: board_id.into(),
            max_array_items: DEFAULT_ARRAY_ITEMS,
        }
    }

    /// Apply engine limits, refusing values outside their ceilings
    pub fn with_config(mut self, config: &EngineConfig) -> Result<Self> {
        limits::validate_array_items(config.max_array_items)?;
        self.max_array_items = config.max_array_items;
        Ok(self)
    }

    pub fn board_id(&self) -> BoardId {
        self.board_id
    }

    /// Validate one scalar input against a basic datatype
    pub async fn validate_basic(
        &self,
        basic: &BasicDataType,
        raw: &str,
    ) -> Result<Option<Rejection>> {
        match basic {
            BasicDataType::Text => Ok(raw.is_empty().then_some(Rejection::EmptyNotAllowed)),
            BasicDataType::Number => Ok(parse_integer(raw).err().map(|e| match e {
                NumberError::Empty => Rejection::NumberEmpty,
                NumberError::NotANumber => Rejection::NumberNotParsed,
                NumberError::NotAnInteger => Rejection::NumberNotInteger,
            })),
            BasicDataType::Bond { bondee } => {
                let target = match parse_integer(raw) {
                    Ok(id) => ArticleId(id),
                    Err(NumberError::Empty) => return Ok(Some(Rejection::BondEmpty)),
                    Err(NumberError::NotANumber) => return Ok(Some(Rejection::BondNotParsed)),
                    Err(NumberError::NotAnInteger) => return Ok(Some(Rejection::BondNotInteger)),
                };
                Ok(self.check_bond(bondee, target).await?.map(Rejection::Bond))
            }
        }
    }

    /// Validate a field value against its datatype
    ///
    /// `None` stands for a field absent from the submitted content.
    pub async fn validate_datatype(
        &self,
        datatype: &DataType,
        raw: Option<&RawValue>,
    ) -> Result<Option<Rejection>> {
        match datatype {
            DataType::Single(basic) => match raw {
                None => Ok(Some(Rejection::EmptyNotAllowed)),
                Some(value) if value.is_empty_scalar() => Ok(Some(Rejection::EmptyNotAllowed)),
                Some(RawValue::Scalar(s)) => self.validate_basic(basic, s).await,
                Some(RawValue::List(_)) => Ok(Some(Rejection::NotAScalar)),
            },
            DataType::Optional(basic) => match raw {
                None => Ok(None),
                Some(value) if value.is_empty_scalar() => Ok(None),
                Some(RawValue::Scalar(s)) => self.validate_basic(basic, s).await,
                Some(RawValue::List(_)) => Ok(Some(Rejection::NotAScalar)),
            },
            DataType::Array(basic) => match raw {
                Some(RawValue::List(items)) => {
                    if items.len() > self.max_array_items {
                        return Ok(Some(Rejection::TooManyItems {
                            count: items.len(),
                            max: self.max_array_items,
                        }));
                    }
                    let outcomes =
                        join_all(items.iter().map(|item| self.validate_basic(basic, item))).await;
                    // Earliest item decides, whether it was rejected or faulted
                    for outcome in outcomes {
                        if let Some(rejection) = outcome? {
                            return Ok(Some(rejection));
                        }
                    }
                    Ok(None)
                }
                Some(RawValue::Scalar(_)) | None => Ok(Some(Rejection::NotAList)),
            },
        }
    }

    /// Validate a whole content record
    ///
    /// Fields are checked in declaration order and the first rejection is
    /// returned.
    pub async fn validate_category(
        &self,
        category: &Category,
        content: &RawContent,
    ) -> Result<Option<FieldRejection>> {
        for field in &category.fields {
            let outcome = self
                .validate_datatype(&field.datatype, content.get(&field.name))
                .await?;
            if let Some(reason) = outcome {
                tracing::debug!(
                    "Rejected {}.{} on board {}: {}",
                    category.name,
                    field.name,
                    self.board_id,
                    reason
                );
                return Ok(Some(FieldRejection {
                    field: field.name.clone(),
                    reason,
                }));
            }
        }
        Ok(None)
    }

    /// Check that `target` is a legal destination for a bond
    pub async fn check_bond(&self, bondee: &Bondee, target: ArticleId) -> Result<Option<BondError>> {
        let meta = match self.store.get_article_meta(target).await {
            Ok(meta) => meta,
            Err(StoreError::NotFound(_)) => return Ok(Some(BondError::TargetNotFound)),
            Err(err) => {
                tracing::warn!("Bond target {} lookup failed: {}", target, err);
                return Err(err.into());
            }
        };

        if meta.board_id != self.board_id {
            return Ok(Some(BondError::TargetNotSameBoard(meta.board_id)));
        }

        let admitted = match bondee {
            Bondee::All => true,
            Bondee::Category { categories } => categories.contains(&meta.category_name),
            Bondee::Family { families } => self
                .schema
                .families()
                .any_contains(families, &meta.category_name)?,
        };

        Ok((!admitted).then_some(BondError::TargetViolateCategory))
    }

    /// Re-check every bond of typed content before it is persisted
    ///
    /// Reports failures in the wire envelope: bond violations as
    /// `ForceValidate`, store outages as internal errors.
    pub async fn check_content(&self, content: &Content) -> std::result::Result<(), ApiError> {
        let category = self.schema.category(content.category())?;

        for (field_name, bond) in content.bonds() {
            let field = category.field(field_name)?;
            let BasicDataType::Bond { bondee } = field.datatype.basic() else {
                return Err(Error::IllTyped(format!("field {} holds a bond", field_name)).into());
            };

            if bond.energy < 0 {
                return Err(ApiError::bond(field_name, BondError::TargetViolateEnergy));
            }
            if let Some(err) = self.check_bond(bondee, bond.target_article).await? {
                return Err(ApiError::bond(field_name, err));
            }
        }
        Ok(())
    }
}
