//! In-memory bear collection.
//!
//! # Design
//! `BearStore` is the only owner of record state. Mutations take `&mut self`,
//! so the caller's lock serializes them and id assignment is atomic. Ids come
//! from a counter that survives deletes and clears and is never reused.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::BearError;
use crate::validation::BearPatch;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BearType {
    Polar,
    Brown,
    Black,
    Gummy,
}

impl BearType {
    /// Exact, case-sensitive match on the wire name.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "POLAR" => Some(BearType::Polar),
            "BROWN" => Some(BearType::Brown),
            "BLACK" => Some(BearType::Black),
            "GUMMY" => Some(BearType::Gummy),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bear {
    pub bear_id: u64,
    pub bear_type: BearType,
    pub bear_name: String,
    pub bear_age: f64,
}

/// A validated create payload.
#[derive(Clone, Debug, PartialEq)]
pub struct NewBear {
    pub bear_type: BearType,
    pub name: String,
    pub age: f64,
}

#[derive(Debug)]
pub struct BearStore {
    bears: BTreeMap<u64, Bear>,
    next_id: u64,
}

impl Default for BearStore {
    fn default() -> Self {
        Self {
            bears: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl BearStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new record and return its id.
    pub fn create(&mut self, new: NewBear) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.bears.insert(
            id,
            Bear {
                bear_id: id,
                bear_type: new.bear_type,
                bear_name: new.name,
                bear_age: new.age,
            },
        );
        id
    }

    pub fn get(&self, id: u64) -> Option<&Bear> {
        self.bears.get(&id)
    }

    /// All records in id order.
    pub fn list(&self) -> Vec<Bear> {
        self.bears.values().cloned().collect()
    }

    pub fn update(&mut self, id: u64, patch: BearPatch) -> Result<&Bear, BearError> {
        let bear = self.bears.get_mut(&id).ok_or(BearError::NotFound(id))?;
        if let Some(bear_type) = patch.bear_type {
            bear.bear_type = bear_type;
        }
        if let Some(name) = patch.name {
            bear.bear_name = name;
        }
        if let Some(age) = patch.age {
            bear.bear_age = age;
        }
        Ok(bear)
    }

    pub fn remove(&mut self, id: u64) -> Result<Bear, BearError> {
        self.bears.remove(&id).ok_or(BearError::NotFound(id))
    }

    pub fn clear(&mut self) {
        self.bears.clear();
    }

    pub fn len(&self) -> usize {
        self.bears.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bears.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bob() -> NewBear {
        NewBear {
            bear_type: BearType::Black,
            name: "BOB".to_string(),
            age: 10.0,
        }
    }

    #[test]
    fn ids_increase_by_one() {
        let mut store = BearStore::new();
        let first = store.create(bob());
        let second = store.create(bob());
        assert_eq!(first, 1);
        assert_eq!(second, first + 1);
    }

    #[test]
    fn ids_are_not_reused_after_delete_or_clear() {
        let mut store = BearStore::new();
        let first = store.create(bob());
        store.remove(first).unwrap();
        let second = store.create(bob());
        store.clear();
        let third = store.create(bob());
        assert!(first < second && second < third);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn update_keeps_unspecified_fields() {
        let mut store = BearStore::new();
        let id = store.create(bob());
        let patch = BearPatch {
            age: Some(42.0),
            ..BearPatch::default()
        };
        let bear = store.update(id, patch).unwrap().clone();
        assert_eq!(bear.bear_id, id);
        assert_eq!(bear.bear_name, "BOB");
        assert_eq!(bear.bear_type, BearType::Black);
        assert_eq!(bear.bear_age, 42.0);
    }

    #[test]
    fn missing_ids_are_not_found() {
        let mut store = BearStore::new();
        assert_eq!(store.remove(7).unwrap_err(), BearError::NotFound(7));
        assert!(store.update(7, BearPatch::default()).is_err());
        assert!(store.get(7).is_none());
    }

    #[test]
    fn list_is_in_id_order() {
        let mut store = BearStore::new();
        for _ in 0..3 {
            store.create(bob());
        }
        let ids: Vec<u64> = store.list().iter().map(|b| b.bear_id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        store.clear();
        assert!(store.is_empty());
    }
}
