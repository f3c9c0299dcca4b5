//! Article content records
//!
//! Form input arrives as [`RawContent`]: strings keyed by field name, with
//! lists for array fields. Once validated it is turned into a [`Content`],
//! whose values are typed against the category. A `Content` can only be
//! obtained through [`ContentBuilder`], so an ill-typed record never exists.

use crate::bond::Bond;
use crate::error::{Error, Result};
use crate::schema::{BasicDataType, Category, DataType};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;

/// A form value before validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    List(Vec<String>),
    Scalar(String),
}

impl RawValue {
    pub fn is_empty_scalar(&self) -> bool {
        matches!(self, Self::Scalar(s) if s.is_empty())
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        Self::Scalar(s.to_string())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        Self::Scalar(s)
    }
}

impl From<Vec<&str>> for RawValue {
    fn from(items: Vec<&str>) -> Self {
        Self::List(items.into_iter().map(String::from).collect())
    }
}

/// Form values keyed by field name
pub type RawContent = BTreeMap<String, RawValue>;

/// Why a string is not an integer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberError {
    Empty,
    NotANumber,
    NotAnInteger,
}

/// Parse form input as an integer
///
/// Accepts anything that reads as a number with no fractional part, so
/// `"1e3"` is `1000` and `"0x10"` is `16`. Surrounding whitespace is
/// ignored. Infinite values (`"Infinity"`, `"1e400"`) are numbers but not
/// integers; so is anything outside the `i64` range.
pub fn parse_integer(raw: &str) -> std::result::Result<i64, NumberError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(NumberError::Empty);
    }
    if let Ok(n) = trimmed.parse::<i64>() {
        return Ok(n);
    }
    if let Some(radix) = parse_radix_literal(trimmed) {
        return radix;
    }
    match trimmed.parse::<f64>() {
        Ok(x) if x.is_finite() => {
            // i64::MAX as f64 rounds up to 2^63, hence the strict bound
            if x.fract() != 0.0 || x < i64::MIN as f64 || x >= i64::MAX as f64 {
                Err(NumberError::NotAnInteger)
            } else {
                Ok(x as i64)
            }
        }
        Ok(x) if x.is_infinite() && is_infinity_literal(trimmed) => {
            Err(NumberError::NotAnInteger)
        }
        _ => Err(NumberError::NotANumber),
    }
}

/// `0x`, `0o` and `0b` literals; unsigned only
fn parse_radix_literal(s: &str) -> Option<std::result::Result<i64, NumberError>> {
    let prefix = s.get(..2)?.to_ascii_lowercase();
    let radix = match prefix.as_str() {
        "0x" => 16,
        "0o" => 8,
        "0b" => 2,
        _ => return None,
    };
    let digits = &s[2..];
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Some(Err(NumberError::NotANumber));
    }
    Some(i64::from_str_radix(digits, radix).map_err(|_| NumberError::NotAnInteger))
}

/// Overflowing exponents and the spelled-out `Infinity`; `inf` is not a number
fn is_infinity_literal(s: &str) -> bool {
    let unsigned = s.strip_prefix(['+', '-']).unwrap_or(s);
    unsigned == "Infinity" || unsigned.starts_with(|c: char| c.is_ascii_digit() || c == '.')
}

/// A typed field value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(i64),
    Bond(Bond),
    Array(Vec<FieldValue>),
}

impl FieldValue {
    fn is_scalar_of(&self, basic: &BasicDataType) -> bool {
        match (self, basic) {
            (Self::Text(s), BasicDataType::Text) => !s.is_empty(),
            (Self::Number(_), BasicDataType::Number) => true,
            (Self::Bond(_), BasicDataType::Bond { .. }) => true,
            _ => false,
        }
    }

    fn matches(&self, datatype: &DataType) -> bool {
        match datatype {
            DataType::Single(basic) | DataType::Optional(basic) => self.is_scalar_of(basic),
            DataType::Array(basic) => match self {
                Self::Array(items) => items.iter().all(|item| item.is_scalar_of(basic)),
                _ => false,
            },
        }
    }
}

/// Schema-checked content of one article
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Content {
    category: String,
    /// Present fields in declaration order
    values: Vec<(String, FieldValue)>,
}

impl Content {
    pub fn builder(category: &Category) -> ContentBuilder<'_> {
        ContentBuilder::new(category)
    }

    /// Convert validated form input into typed content
    ///
    /// Bond fields get zero energy and no tag. Fails with
    /// [`Error::IllTyped`] when the input was not validated first.
    pub fn from_raw(category: &Category, raw: &RawContent) -> Result<Self> {
        let mut builder = ContentBuilder::new(category);
        for field in &category.fields {
            let value = match (&field.datatype, raw.get(&field.name)) {
                (DataType::Optional(_), None) => continue,
                (DataType::Optional(_), Some(v)) if v.is_empty_scalar() => continue,
                (DataType::Single(basic) | DataType::Optional(basic), Some(RawValue::Scalar(s))) => {
                    scalar_from_raw(&field.name, basic, s)?
                }
                (DataType::Array(basic), Some(RawValue::List(items))) => FieldValue::Array(
                    items
                        .iter()
                        .map(|s| scalar_from_raw(&field.name, basic, s))
                        .collect::<Result<_>>()?,
                ),
                (_, None) => continue,
                (datatype, Some(_)) => {
                    return Err(Error::IllTyped(format!(
                        "field {} expects {}",
                        field.name, datatype
                    )))
                }
            };
            builder = builder.set(&field.name, value)?;
        }
        builder.build()
    }

    /// Decode stored JSON content (`{field: value}`) against a category
    pub fn from_json(category: &Category, json: &serde_json::Value) -> Result<Self> {
        let object = json
            .as_object()
            .ok_or_else(|| Error::IllTyped("content must be a JSON object".to_string()))?;

        let mut builder = ContentBuilder::new(category);
        for (name, value) in object {
            let field = category.field(name)?;
            let value = match (&field.datatype, value) {
                (DataType::Optional(_), serde_json::Value::Null) => continue,
                (DataType::Single(basic) | DataType::Optional(basic), v) => {
                    scalar_from_json(name, basic, v)?
                }
                (DataType::Array(basic), serde_json::Value::Array(items)) => FieldValue::Array(
                    items
                        .iter()
                        .map(|v| scalar_from_json(name, basic, v))
                        .collect::<Result<_>>()?,
                ),
                (datatype, _) => {
                    return Err(Error::IllTyped(format!(
                        "field {} expects {}",
                        name, datatype
                    )))
                }
            };
            builder = builder.set(name, value)?;
        }
        builder.build()
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.values
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Every bond in the record with the field it was declared in, in field
    /// order then element order
    pub fn bonds(&self) -> Vec<(&str, &Bond)> {
        let mut bonds = Vec::new();
        for (name, value) in &self.values {
            match value {
                FieldValue::Bond(bond) => bonds.push((name.as_str(), bond)),
                FieldValue::Array(items) => {
                    for item in items {
                        if let FieldValue::Bond(bond) = item {
                            bonds.push((name.as_str(), bond));
                        }
                    }
                }
                FieldValue::Text(_) | FieldValue::Number(_) => {}
            }
        }
        bonds
    }
}

impl Serialize for Content {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in &self.values {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

fn scalar_from_raw(field: &str, basic: &BasicDataType, raw: &str) -> Result<FieldValue> {
    match basic {
        BasicDataType::Text => Ok(FieldValue::Text(raw.to_string())),
        BasicDataType::Number => parse_integer(raw)
            .map(FieldValue::Number)
            .map_err(|e| Error::IllTyped(format!("field {}: {:?}", field, e))),
        BasicDataType::Bond { .. } => parse_integer(raw)
            .map(|id| FieldValue::Bond(Bond::new(id)))
            .map_err(|e| Error::IllTyped(format!("field {}: {:?}", field, e))),
    }
}

fn scalar_from_json(
    field: &str,
    basic: &BasicDataType,
    value: &serde_json::Value,
) -> Result<FieldValue> {
    let mismatch = || Error::IllTyped(format!("field {} expects {}", field, basic));
    match basic {
        BasicDataType::Text => value
            .as_str()
            .map(|s| FieldValue::Text(s.to_string()))
            .ok_or_else(mismatch),
        BasicDataType::Number => value.as_i64().map(FieldValue::Number).ok_or_else(mismatch),
        BasicDataType::Bond { .. } => {
            let bond: Bond = serde_json::from_value(value.clone()).map_err(|_| mismatch())?;
            Ok(FieldValue::Bond(bond))
        }
    }
}

/// Builder that only yields content matching its category
pub struct ContentBuilder<'a> {
    category: &'a Category,
    values: BTreeMap<String, FieldValue>,
}

impl<'a> ContentBuilder<'a> {
    pub fn new(category: &'a Category) -> Self {
        Self {
            category,
            values: BTreeMap::new(),
        }
    }

    /// Set a field, checking the value shape against its datatype
    pub fn set(mut self, field: &str, value: FieldValue) -> Result<Self> {
        let declared = self.category.field(field)?;
        if !value.matches(&declared.datatype) {
            return Err(Error::IllTyped(format!(
                "field {} expects {}",
                field, declared.datatype
            )));
        }
        self.values.insert(field.to_string(), value);
        Ok(self)
    }

    /// Finish, requiring every single field to be present
    pub fn build(mut self) -> Result<Content> {
        let mut values = Vec::with_capacity(self.values.len());
        for field in &self.category.fields {
            match (self.values.remove(&field.name), &field.datatype) {
                (Some(value), _) => values.push((field.name.clone(), value)),
                (None, DataType::Single(_)) => {
                    return Err(Error::IllTyped(format!("field {} is required", field.name)))
                }
                (None, DataType::Array(_)) => {
                    values.push((field.name.clone(), FieldValue::Array(Vec::new())))
                }
                (None, DataType::Optional(_)) => {}
            }
        }
        Ok(Content {
            category: self.category.name.clone(),
            values,
        })
    }
}
