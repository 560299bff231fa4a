// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Support for selecting node properties and traversed relationships

use crate::cypher::schema::{PropertyId, RelationshipId};

use super::select::AbstractSelect;

/// A selection element along with its output alias
#[derive(Debug)]
pub struct AliasedSelectionElement {
    pub alias: String,
    pub element: SelectionElement,
}

impl AliasedSelectionElement {
    pub fn new(alias: String, element: SelectionElement) -> Self {
        Self { alias, element }
    }
}

/// How a relation element shapes: a single object (or null) or an ordered
/// collection (possibly empty, never null)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionCardinality {
    One,
    Many,
}

/// The ordered elements to project for one node, in the order the caller
/// requested them
#[derive(Debug)]
pub struct Selection {
    pub elements: Vec<AliasedSelectionElement>,
}

/// An element that could be projected for a node
#[derive(Debug)]
pub enum SelectionElement {
    /// A scalar property of the node
    Property(PropertyId),
    /// The nodes reachable over one relationship, projected recursively
    RelatedNodes {
        relationship_id: RelationshipId,
        cardinality: SelectionCardinality,
        select: Box<AbstractSelect>,
    },
}
