// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Description of how the rows produced by a transaction script map back to
//! the caller's selection. The transcription records one node per selection
//! level, so the shaper can reassemble the nested object graph without
//! consulting the schema again.

use crate::cypher::transaction::TransactionStepId;

use super::selection::SelectionCardinality;

/// Column carrying a projected node's scalar map
pub const NODE_COLUMN: &str = "node";
/// Column carrying a projected node's identifier (even when `id` was not selected)
pub const ID_COLUMN: &str = "__id";
/// Column carrying the identifier of the node a related row hangs off of
pub const PARENT_ID_COLUMN: &str = "__parent_id";

#[derive(Debug)]
pub struct ReadProjection {
    pub root: ProjectionNode,
}

/// One selection level: the step whose rows carry this level's nodes, and the
/// requested fields in caller order (scalars and relations interleaved).
#[derive(Debug)]
pub struct ProjectionNode {
    pub step_id: TransactionStepId,
    pub fields: Vec<ProjectionField>,
}

#[derive(Debug)]
pub enum ProjectionField {
    /// A scalar already present in this level's `node` column, under its alias
    Scalar(String),
    /// A nested level fed by its own step
    Relation(RelationProjection),
}

#[derive(Debug)]
pub struct RelationProjection {
    pub alias: String,
    pub cardinality: SelectionCardinality,
    pub node: ProjectionNode,
}
