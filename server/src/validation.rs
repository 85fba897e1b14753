//! Per-field decoding of create/update payloads.
//!
//! Each JSON entry is decoded into a [`Field`] on its own; the first entry
//! that does not decode rejects the whole request, before the store is
//! touched.

use serde_json::{Map, Value};

use crate::error::BearError;
use crate::store::{BearType, NewBear};

pub const ID_KEY: &str = "bear_id";
pub const TYPE_KEY: &str = "bear_type";
pub const NAME_KEY: &str = "bear_name";
pub const AGE_KEY: &str = "bear_age";

pub const NAME_MAX_LEN: usize = 10;
pub const AGE_MAX: f64 = 100.0;

/// One decoded payload entry.
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    Type(BearType),
    /// Already upper-cased.
    Name(String),
    Age(f64),
}

/// A validated partial update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BearPatch {
    pub bear_type: Option<BearType>,
    pub name: Option<String>,
    pub age: Option<f64>,
}

pub fn decode_field(key: &str, value: &Value) -> Result<Field, BearError> {
    match key {
        ID_KEY => Err(BearError::IdNotAllowed),
        TYPE_KEY => decode_type(value).map(Field::Type),
        NAME_KEY => decode_name(value).map(Field::Name),
        AGE_KEY => decode_age(value).map(Field::Age),
        other => Err(BearError::UnknownField(other.to_string())),
    }
}

/// Decode every entry of `body` into a patch.
pub fn decode_patch(body: &Value) -> Result<BearPatch, BearError> {
    let object = as_object(body)?;
    // bear_id wins over any other problem in the same request.
    if object.contains_key(ID_KEY) {
        return Err(BearError::IdNotAllowed);
    }
    let mut patch = BearPatch::default();
    for (key, value) in object {
        match decode_field(key, value)? {
            Field::Type(t) => patch.bear_type = Some(t),
            Field::Name(n) => patch.name = Some(n),
            Field::Age(a) => patch.age = Some(a),
        }
    }
    Ok(patch)
}

/// Decode a create payload; all three fields are required.
pub fn decode_new(body: &Value) -> Result<NewBear, BearError> {
    let patch = decode_patch(body)?;
    Ok(NewBear {
        bear_type: patch.bear_type.ok_or(BearError::MissingField(TYPE_KEY))?,
        name: patch.name.ok_or(BearError::MissingField(NAME_KEY))?,
        age: patch.age.ok_or(BearError::MissingField(AGE_KEY))?,
    })
}

fn as_object(body: &Value) -> Result<&Map<String, Value>, BearError> {
    body.as_object().ok_or(BearError::NotAnObject)
}

fn decode_type(value: &Value) -> Result<BearType, BearError> {
    let invalid = BearError::InvalidField {
        field: TYPE_KEY,
        reason: "expected one of POLAR, BROWN, BLACK, GUMMY",
    };
    value.as_str().and_then(BearType::parse).ok_or(invalid)
}

fn decode_name(value: &Value) -> Result<String, BearError> {
    let invalid = |reason| BearError::InvalidField {
        field: NAME_KEY,
        reason,
    };
    let name = value.as_str().ok_or(invalid("expected a string"))?;
    let len = name.chars().count();
    if len == 0 || len > NAME_MAX_LEN {
        return Err(invalid("expected 1 to 10 characters"));
    }
    if !name.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(invalid("expected letters only"));
    }
    Ok(name.to_ascii_uppercase())
}

fn decode_age(value: &Value) -> Result<f64, BearError> {
    let invalid = |reason| BearError::InvalidField {
        field: AGE_KEY,
        reason,
    };
    let age = value.as_f64().ok_or(invalid("expected a number"))?;
    if !(age > 0.0 && age <= AGE_MAX) {
        return Err(invalid("expected a value in (0, 100]"));
    }
    Ok(age)
}
