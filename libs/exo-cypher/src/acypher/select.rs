// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use crate::cypher::schema::NodeTypeId;

use super::selection::Selection;

/// Represents an abstract read-back projection, without specific details
/// about how to execute it (in particular, no traversal paths are spelled
/// out).
#[derive(Debug)]
pub struct AbstractSelect {
    /// The node type to select from
    pub node_type_id: NodeTypeId,
    /// The predicate to locate the root node. This is not an `Option` to
    /// ensure that the caller makes a conscious decision about the root
    /// (nested selects are reached by traversal and use `True`).
    pub predicate: NodePredicate,
    /// The elements to project
    pub selection: Selection,
}

#[derive(Debug)]
pub enum NodePredicate {
    True,
    IdEq(String),
}
