//! Bear record DTOs and the normalization rule used to build expectations.
//!
//! # Design
//! These types mirror the service's wire schema (`bear_*` keys) but are
//! defined independently from the server crate; the end-to-end tests catch
//! schema drift. `BearFields` is deliberately loose: every field is an
//! optional `serde_json::Value`, so negative tests can send wrong types
//! through the same client call as positive ones.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The four bear types the service accepts. Matching is case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BearType {
    Polar,
    Brown,
    Black,
    Gummy,
}

impl BearType {
    pub const ALL: [BearType; 4] = [BearType::Polar, BearType::Brown, BearType::Black, BearType::Gummy];

    pub fn as_str(self) -> &'static str {
        match self {
            BearType::Polar => "POLAR",
            BearType::Brown => "BROWN",
            BearType::Black => "BLACK",
            BearType::Gummy => "GUMMY",
        }
    }
}

/// A stored bear as returned by `GET /bear/{id}` and `GET /bear`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bear {
    #[serde(rename = "bear_id")]
    pub id: u64,
    #[serde(rename = "bear_type")]
    pub kind: BearType,
    #[serde(rename = "bear_name")]
    pub name: String,
    #[serde(rename = "bear_age")]
    pub age: f64,
}

impl Bear {
    /// The record the service should hold after accepting these inputs:
    /// name upper-cased, age widened to float.
    pub fn expected(id: u64, kind: BearType, name: &str, age: f64) -> Self {
        Self {
            id,
            kind,
            name: name.to_uppercase(),
            age,
        }
    }
}

/// Request payload for `POST /bear` and `PUT /bear/{id}`.
///
/// Only the fields present are serialized, so the same type covers full
/// creates, partial updates and deliberately malformed requests.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BearFields {
    #[serde(rename = "bear_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(rename = "bear_type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<Value>,
    #[serde(rename = "bear_name", skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,
    #[serde(rename = "bear_age", skip_serializing_if = "Option::is_none")]
    pub age: Option<Value>,
}

impl BearFields {
    /// A well-formed create payload.
    pub fn new(kind: BearType, name: &str, age: f64) -> Self {
        Self::default()
            .with_type(kind.as_str())
            .with_name(name)
            .with_age(age)
    }

    pub fn with_id(mut self, id: impl Into<Value>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_type(mut self, kind: impl Into<Value>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<Value>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_age(mut self, age: impl Into<Value>) -> Self {
        self.age = Some(age.into());
        self
    }

    /// The record these fields should produce under `id`, or `None` when the
    /// fields are not a valid, complete create payload.
    pub fn expected(&self, id: u64) -> Option<Bear> {
        let kind = serde_json::from_value(self.kind.clone()?).ok()?;
        let name = self.name.as_ref()?.as_str()?;
        let age = self.age.as_ref()?.as_f64()?;
        Some(Bear::expected(id, kind, name, age))
    }

    /// Apply these fields to `bear` the way a successful partial update does.
    pub fn apply_to(&self, bear: &Bear) -> Option<Bear> {
        let mut updated = bear.clone();
        if let Some(value) = &self.kind {
            updated.kind = serde_json::from_value(value.clone()).ok()?;
        }
        if let Some(value) = &self.name {
            updated.name = value.as_str()?.to_uppercase();
        }
        if let Some(value) = &self.age {
            updated.age = value.as_f64()?;
        }
        Some(updated)
    }
}
