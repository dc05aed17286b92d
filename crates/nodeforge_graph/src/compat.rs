// SPDX-License-Identifier: MIT OR Apache-2.0
//! Socket kind compatibility ranking.

use crate::socket::SocketKind;
use serde::{Deserialize, Serialize};

/// Implicit conversions available from one source kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionRule {
    /// Kind of the source (output) socket
    pub from: SocketKind,
    /// Destination kinds it converts into, best first
    pub to: Vec<SocketKind>,
}

/// Table of implicit conversions between socket kinds.
///
/// Ranks are distances: `0` for identical kinds, `n` for the n-th listed
/// conversion of the source kind. Lower ranks are better matches.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CompatibilityTable {
    rules: Vec<ConversionRule>,
}

impl CompatibilityTable {
    /// Create an empty table (identical kinds only)
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the conversions for one source kind, replacing earlier ones
    pub fn with_rule(mut self, from: SocketKind, to: impl IntoIterator<Item = SocketKind>) -> Self {
        self.rules.retain(|rule| rule.from != from);
        self.rules.push(ConversionRule {
            from,
            to: to.into_iter().collect(),
        });
        self
    }

    /// Get the rules in the table
    pub fn rules(&self) -> &[ConversionRule] {
        &self.rules
    }

    /// Rank a link from `from` to `to`, `None` if they are incompatible
    pub fn rank(&self, from: &SocketKind, to: &SocketKind) -> Option<usize> {
        if from == to {
            return Some(0);
        }

        let rule = self.rules.iter().find(|rule| rule.from == *from)?;
        rule.to
            .iter()
            .filter(|kind| *kind != from)
            .position(|kind| kind == to)
            .map(|index| index + 1)
    }

    /// Check if a link from `from` to `to` is possible
    pub fn can_connect(&self, from: &SocketKind, to: &SocketKind) -> bool {
        self.rank(from, to).is_some()
    }

    /// The conversion table of the geometry node editor
    pub fn geometry_nodes() -> Self {
        use SocketKind::*;

        Self::new()
            .with_rule(Float, [Vector, Int, Bool, Color, Rotation])
            .with_rule(Int, [Float, Bool, Vector, Color])
            .with_rule(Bool, [Int, Float, Vector, Color])
            .with_rule(Vector, [Color, Rotation, Float, Int, Bool])
            .with_rule(Color, [Vector, Float, Int, Bool])
            .with_rule(Rotation, [Matrix, Vector])
            .with_rule(Matrix, [Rotation])
    }
}
