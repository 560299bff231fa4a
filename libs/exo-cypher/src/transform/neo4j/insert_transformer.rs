// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Transform an abstract insert into a transaction script.
//!
//! This allows us to execute GraphQL mutations like this:
//!
//! ```graphql
//! mutation {
//!   createPerson(input: {firstName: "Bob", lastName: "Belcher", age: 43}) {
//!     id
//!     firstName
//!     age
//!   }
//! }
//! ```
//!
//! Created transaction script looks like (for the example above):
//! ```cypher
//! CREATE (node:`Person`) SET node = $p0 RETURN node.`id` AS `id`
//! MATCH (node:`Person` {`id`: $p0}) RETURN node.`id` AS `__id`, node {...} AS `node`
//! ```

use tracing::instrument;

use crate::{
    acypher::{insert::AbstractInsert, projection::ReadProjection},
    cypher::{
        operation::{CreateNode, CypherOperation},
        schema::GraphSchema,
        transaction::{ConcreteTransactionStep, TransactionScript},
    },
    transform::transformer::TranscribedOperation,
};

use super::select_transformer;

#[instrument(name = "insert_transformer::to_transaction_script", skip_all)]
pub(super) fn to_transaction_script(
    insert: &AbstractInsert,
    schema: &GraphSchema,
) -> TranscribedOperation {
    let node_type = insert.node_type_id.get_node_type(schema);

    let properties: serde_json::Map<String, serde_json::Value> = insert
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
        CypherOperation::CreateNode(CreateNode {
            label: node_type.label.clone(),
            properties,
        }),
    ));

    let root = select_transformer::add_select_steps(&insert.selection, schema, &mut script);

    TranscribedOperation {
        script,
        write_step_id,
        projection: ReadProjection { root },
    }
}
