// SPDX-License-Identifier: MIT OR Apache-2.0
//! Compatibility-ranked socket pair selection.

use crate::compat::CompatibilityTable;
use crate::link::Endpoint;
use crate::socket::SocketKind;

/// One endpoint a chain may use
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Candidate {
    pub endpoint: Endpoint,
    pub kind: SocketKind,
}

impl Candidate {
    pub fn new(endpoint: Endpoint, kind: SocketKind) -> Self {
        Self { endpoint, kind }
    }
}

/// Candidate endpoints on one side of a chain
#[derive(Debug, Clone)]
pub(crate) struct Side {
    /// Label used in diagnostics
    pub label: String,
    pub candidates: Vec<Candidate>,
    /// The operand named one endpoint precisely
    pub exact: bool,
}

impl Side {
    pub fn exact(label: String, candidate: Candidate) -> Self {
        Self {
            label,
            candidates: vec![candidate],
            exact: true,
        }
    }

    pub fn open(label: String, candidates: Vec<Candidate>) -> Self {
        Self {
            label,
            candidates,
            exact: false,
        }
    }

    pub fn kinds(&self) -> Vec<SocketKind> {
        self.candidates.iter().map(|c| c.kind.clone()).collect()
    }
}

/// Pick the best (source, destination) index pair.
///
/// Lowest rank wins; ties keep the earliest source, then the earliest
/// destination. An identical-kind pair ends the search.
pub(crate) fn best_pair(
    table: &CompatibilityTable,
    sources: &Side,
    destinations: &Side,
) -> Option<(usize, usize)> {
    if sources.exact && destinations.exact {
        let (source, destination) = (sources.candidates.first()?, destinations.candidates.first()?);
        warn_unranked(table, sources, source, &destinations.label, destination);
        return Some((0, 0));
    }

    let mut best: Option<(usize, usize, usize)> = None;
    for (si, source) in sources.candidates.iter().enumerate() {
        for (di, destination) in destinations.candidates.iter().enumerate() {
            let Some(rank) = table.rank(&source.kind, &destination.kind) else {
                continue;
            };
            if rank == 0 {
                return Some((si, di));
            }
            if best.map_or(true, |(_, _, r)| rank < r) {
                best = Some((si, di, rank));
            }
        }
    }
    best.map(|(si, di, _)| (si, di))
}

/// Pick the source feeding every placeholder input.
///
/// The source is ranked against the first placeholder and must be
/// compatible with all of them.
pub(crate) fn best_placeholder_source(
    table: &CompatibilityTable,
    sources: &Side,
    placeholders: &[Candidate],
) -> Option<usize> {
    let first = placeholders.first()?;
    if sources.exact {
        let source = sources.candidates.first()?;
        for placeholder in placeholders {
            warn_unranked(table, sources, source, "placeholder", placeholder);
        }
        return Some(0);
    }

    let mut best: Option<(usize, usize)> = None;
    for (si, source) in sources.candidates.iter().enumerate() {
        let Some(rank) = table.rank(&source.kind, &first.kind) else {
            continue;
        };
        if !placeholders
            .iter()
            .all(|p| table.can_connect(&source.kind, &p.kind))
        {
            continue;
        }
        if best.map_or(true, |(_, r)| rank < r) {
            best = Some((si, rank));
        }
    }
    best.map(|(si, _)| si)
}

/// Explicit endpoints link as written; flag pairs the table cannot convert
fn warn_unranked(
    table: &CompatibilityTable,
    sources: &Side,
    source: &Candidate,
    destination_label: &str,
    destination: &Candidate,
) {
    if !table.can_connect(&source.kind, &destination.kind) {
        tracing::warn!(
            source = %sources.label,
            source_kind = %source.kind,
            destination = %destination_label,
            destination_kind = %destination.kind,
            "Linking explicit sockets with no implicit conversion"
        );
    }
}
