// SPDX-FileCopyrightText: Copyright (C) 2018 Navith
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Decoding of nested subgenre expressions.
//!
//! A track's subgenres are stored as a JSON value of arbitrarily nested
//! lists of strings. Every string is either an operator symbol that
//! combines its neighbours or the name of a subgenre, e.g.
//! `["Dubstep", "|", ["Drum & Bass", ">", "Neurofunk"]]`.

use serde_json::Value;
use strum::{EnumIter, IntoEnumIterator as _, IntoStaticStr};
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Operator {
    /// Either of the neighbouring subgenres
    Or,

    /// Transition from the left into the right subgenre
    Into,

    /// Blend of the neighbouring subgenres
    With,

    /// Both of the neighbouring subgenres
    And,
}

impl Operator {
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Or => "|",
            Self::Into => ">",
            Self::With => "~",
            Self::And => "+",
        }
    }

    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::iter().find(|op| op.symbol() == symbol)
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        self.into()
    }
}

/// Leaf of a subgenre expression.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SubgenreToken {
    Operator(Operator),
    Subgenre(String),
}

impl SubgenreToken {
    fn from_leaf(leaf: &str) -> Result<Self, SubgenreDecodeError> {
        if let Some(op) = Operator::from_symbol(leaf) {
            return Ok(Self::Operator(op));
        }
        if leaf.trim().is_empty() {
            return Err(SubgenreDecodeError::EmptyName);
        }
        Ok(Self::Subgenre(leaf.to_owned()))
    }

    fn from_value(value: &Value) -> Result<Self, SubgenreDecodeError> {
        match value {
            Value::String(leaf) => Self::from_leaf(leaf),
            unexpected => Err(SubgenreDecodeError::UnexpectedValue(unexpected.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubgenreGroupItem {
    Token(SubgenreToken),
    Group(SubgenreGroup),
}

/// Decoded, tree-shaped subgenre expression.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SubgenreGroup {
    items: Vec<SubgenreGroupItem>,
}

impl SubgenreGroup {
    #[must_use]
    pub const fn new(items: Vec<SubgenreGroupItem>) -> Self {
        Self { items }
    }

    #[must_use]
    pub fn items(&self) -> &[SubgenreGroupItem] {
        &self.items
    }

    #[must_use]
    pub fn into_items(self) -> Vec<SubgenreGroupItem> {
        self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// All tokens of the tree in depth-first order.
    #[must_use]
    pub fn leaves(&self) -> Vec<&SubgenreToken> {
        let mut leaves = Vec::new();
        self.collect_leaves(&mut leaves);
        leaves
    }

    fn collect_leaves<'a>(&'a self, leaves: &mut Vec<&'a SubgenreToken>) {
        for item in &self.items {
            match item {
                SubgenreGroupItem::Token(token) => leaves.push(token),
                SubgenreGroupItem::Group(group) => group.collect_leaves(leaves),
            }
        }
    }

    fn from_list(values: &[Value]) -> Result<Self, SubgenreDecodeError> {
        values
            .iter()
            .map(SubgenreGroupItem::from_value)
            .collect::<Result<_, _>>()
            .map(Self::new)
    }
}

impl SubgenreGroupItem {
    fn from_value(value: &Value) -> Result<Self, SubgenreDecodeError> {
        match value {
            Value::Array(values) => SubgenreGroup::from_list(values).map(Self::Group),
            leaf => SubgenreToken::from_value(leaf).map(Self::Token),
        }
    }
}

#[derive(Debug, Error)]
pub enum SubgenreDecodeError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("unexpected value {0}")]
    UnexpectedValue(String),

    #[error("empty subgenre name")]
    EmptyName,
}

/// Decode the serialized expression, preserving its tree shape.
///
/// A top-level list becomes the root group. A single top-level string
/// is wrapped into a group with one item.
pub fn decode_nested(json: &str) -> Result<SubgenreGroup, SubgenreDecodeError> {
    let value: Value = serde_json::from_str(json)?;
    match SubgenreGroupItem::from_value(&value)? {
        SubgenreGroupItem::Group(group) => Ok(group),
        token @ SubgenreGroupItem::Token(_) => Ok(SubgenreGroup::new(vec![token])),
    }
}

/// Decode the serialized expression into a flat list of tokens.
///
/// Nesting is discarded at any depth, which makes grouping ambiguous.
pub fn decode_flat(json: &str) -> Result<Vec<SubgenreToken>, SubgenreDecodeError> {
    let value: Value = serde_json::from_str(json)?;
    let mut leaves = Vec::new();
    flatten_into(&value, &mut leaves);
    leaves.into_iter().map(SubgenreToken::from_value).collect()
}

fn flatten_into<'a>(value: &'a Value, leaves: &mut Vec<&'a Value>) {
    match value {
        Value::Array(values) => {
            for value in values {
                flatten_into(value, leaves);
            }
        }
        leaf => leaves.push(leaf),
    }
}
