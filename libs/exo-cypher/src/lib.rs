// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! The core idea in this library is that of [AbstractOperation], which along with
//! its variants, allows declaring an intention of a graph-database mutation at a
//! higher level. It also offers [GraphExecutor], which is responsible for
//! transforming an [AbstractOperation] into one or more Cypher statements and
//! executing them in a single transaction. This separation of intention vs
//! execution allows the user of the library to express what a mutation should do
//! and leave out the details of statement generation and traversal.
//!
//! For example, [AbstractInsert] expresses the intention to create a node of a
//! given type with given property values and read back a (potentially nested)
//! selection; it doesn't specify the `CREATE`/`MATCH` statements needed to do so.
//! Similarly, [AbstractSelect] carries a [Selection] whose relation elements
//! describe edge traversals without spelling out the `MATCH` paths.
//!
//! This crate also contains, but doesn't expose, lower level primitives for
//! Cypher statement generation.

mod cypher;
mod acypher;
mod transform;

#[cfg(feature = "test-support")]
pub mod testing;

pub mod graph_error;

/// Public types at the root level of this crate
pub use acypher::{
    abstract_operation::AbstractOperation,
    graph_executor::{GraphExecutor, RawResult},
    insert::{AbstractInsert, PropertyValuePair},
    projection::{
        ProjectionField, ProjectionNode, ReadProjection, RelationProjection, ID_COLUMN,
        NODE_COLUMN, PARENT_ID_COLUMN,
    },
    select::{AbstractSelect, NodePredicate},
    selection::{AliasedSelectionElement, Selection, SelectionCardinality, SelectionElement},
    update::AbstractUpdate,
};

pub use cypher::{
    connect::graph_client::{GraphConnection, GraphTransaction},
    connect::graph_client_manager::GraphClientManager,
    connect::graph_config::GraphConfig,
    schema::{
        GraphProperty, GraphRelationship, GraphSchema, NodeType, NodeTypeId, PropertyId,
        PropertyType, RelationshipCardinality, RelationshipDirection, RelationshipId,
    },
    statement::CypherStatement,
    transaction::{Row, TransactionStepId, TransactionStepResult},
};
