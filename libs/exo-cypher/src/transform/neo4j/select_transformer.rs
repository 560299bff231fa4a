// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Transform an abstract read-back projection into transaction steps: one
//! statement for the root node's scalars, plus one statement per traversed
//! relationship, depth-first in selection order. Each step carries the parent
//! identifier alongside the projected node so the shaper can reassemble the
//! nesting.

use crate::{
    acypher::{
        projection::{ProjectionField, ProjectionNode, RelationProjection},
        select::{AbstractSelect, NodePredicate},
        selection::SelectionElement,
    },
    cypher::{
        operation::{CypherOperation, NodeProjection, SelectNode, SelectRelated, TraversalSegment},
        schema::GraphSchema,
        transaction::{ConcreteTransactionStep, TransactionScript},
    },
};

pub(super) fn add_select_steps(
    select: &AbstractSelect,
    schema: &GraphSchema,
    script: &mut TransactionScript,
) -> ProjectionNode {
    let root_id = match &select.predicate {
        NodePredicate::IdEq(id) => serde_json::Value::String(id.clone()),
        // Nested selects are reached by traversal; the root must be located by id
        NodePredicate::True => panic!("Root selection must locate the node by id"),
    };
    let root_label = select.node_type_id.get_node_type(schema).label.clone();

    add_level(select, schema, script, &root_label, &root_id, &[])
}

fn add_level(
    select: &AbstractSelect,
    schema: &GraphSchema,
    script: &mut TransactionScript,
    root_label: &str,
    root_id: &serde_json::Value,
    path: &[TraversalSegment],
) -> ProjectionNode {
    let projection = scalar_projection(select, schema);

    let operation = if path.is_empty() {
        CypherOperation::SelectNode(SelectNode {
            label: root_label.to_string(),
            id: root_id.clone(),
            projection,
        })
    } else {
        CypherOperation::SelectRelated(SelectRelated {
            root_label: root_label.to_string(),
            root_id: root_id.clone(),
            path: path.to_vec(),
            projection,
        })
    };

    let step_id = script.add_step(ConcreteTransactionStep::new(operation));

    let mut fields = Vec::new();
    for element in &select.selection.elements {
        match &element.element {
            SelectionElement::Property(_) => {
                fields.push(ProjectionField::Scalar(element.alias.clone()));
            }
            SelectionElement::RelatedNodes {
                relationship_id,
                cardinality,
                select: nested,
            } => {
                let relationship = relationship_id.get_relationship(schema);
                let segment = TraversalSegment {
                    relationship: relationship.name.clone(),
                    direction: relationship.direction,
                    target_label: nested.node_type_id.get_node_type(schema).label.clone(),
                };

                let mut nested_path = path.to_vec();
                nested_path.push(segment);

                let node = add_level(nested, schema, script, root_label, root_id, &nested_path);

                fields.push(ProjectionField::Relation(RelationProjection {
                    alias: element.alias.clone(),
                    cardinality: *cardinality,
                    node,
                }));
            }
        }
    }

    ProjectionNode { step_id, fields }
}

fn scalar_projection(select: &AbstractSelect, schema: &GraphSchema) -> NodeProjection {
    let aliased = select
        .selection
        .elements
        .iter()
        .filter_map(|element| match &element.element {
            SelectionElement::Property(property_id) => Some((
                element.alias.clone(),
                property_id.get_property(schema).name.clone(),
            )),
            SelectionElement::RelatedNodes { .. } => None,
        })
        .collect();

    NodeProjection { aliased }
}
