// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Transform an abstract update into a transaction script.
//!
//! This allows us to execute GraphQL mutations like this:
//!
//! ```graphql
//! mutation {
//!   updatePerson(input: {id: "...", lastName: "Gruber"}) {
//!     id
//!     lastName
//!     skills {
//!       id
//!       name
//!     }
//!   }
//! }
//! ```
//!
//! Created transaction script looks like (for the example above):
//! ```cypher
//! MATCH (node:`Person` {`id`: $p0}) SET node += $p1 RETURN node.`id` AS `id`
//! MATCH (node:`Person` {`id`: $p0}) RETURN node.`id` AS `__id`, node {...} AS `node`
//! MATCH (node:`Person` {`id`: $p0})-[r0:`HAS_SKILL`]->(n0:`Skill`) RETURN ... ORDER BY id(r0)
//! ```
//!
//! The write step returning zero rows means the target node does not exist;
//! the executor's caller surfaces that as a not-found error.

use tracing::instrument;

use crate::{
    acypher::{projection::ReadProjection, update::AbstractUpdate},
    cypher::{
        operation::{CypherOperation, UpdateNode},
        schema::GraphSchema,
        transaction::{ConcreteTransactionStep, TransactionScript},
    },
    transform::transformer::TranscribedOperation,
};

use super::select_transformer;

#[instrument(name = "update_transformer::to_transaction_script", skip_all)]
pub(super) fn to_transaction_script(
    update: &AbstractUpdate,
    schema: &GraphSchema,
) -> TranscribedOperation {
    let node_type = update.node_type_id.get_node_type(schema);

    let properties: serde_json::Map<String, serde_json::Value> = update
        .properties
        .iter()
        .map(|pair| {
            (
                pair.property_id.get_property(schema).name.clone(),
                pair.value.clone(),
            )
        })
        .collect();

    let mut script = TransactionScript::default();

    let write_step_id = script.add_step(ConcreteTransactionStep::new(
        CypherOperation::UpdateNode(UpdateNode {
            label: node_type.label.clone(),
            id: serde_json::Value::String(update.id.clone()),
            properties,
        }),
    ));

    let root = select_transformer::add_select_steps(&update.selection, schema, &mut script);

    TranscribedOperation {
        script,
        write_step_id,
        projection: ReadProjection { root },
    }
}
