// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Turn a bound mutation plus the caller's selection set into an
//! [AbstractOperation]: the write intention and the read-back projection,
//! with a fresh identifier generated for creates.

use thiserror::Error;

use exo_cypher::{
    AbstractInsert, AbstractOperation, AbstractSelect, AbstractUpdate, AliasedSelectionElement,
    NodePredicate, PropertyValuePair, Selection, SelectionCardinality, SelectionElement,
    RelationshipCardinality,
};
use neo4j_graphql_model::{
    system::ModelSystem,
    types::{EntityType, FieldKind},
};

use crate::{id_generator::IdGenerator, input_binder::BoundMutation, validation::field::ValidatedField};

#[derive(Error, Debug)]
pub enum PlanError {
    #[error("Unknown field `{field}` in the selection on `{typ}`")]
    UnknownField { typ: String, field: String },

    #[error("Field `{field}` on `{typ}` is a scalar and does not take a nested selection")]
    ScalarSubselection { typ: String, field: String },
}

pub fn plan(
    system: &ModelSystem,
    bound: BoundMutation,
    selection_set: &[ValidatedField],
    id_generator: &dyn IdGenerator,
) -> Result<AbstractOperation, PlanError> {
    match bound {
        BoundMutation::Create {
            entity_type,
            mut properties,
        } => {
            let entity_type = system.entity_type(entity_type);

            // The identifier is generated before the write is issued, so it
            // can locate the read-back as well
            let id = id_generator.next();
            properties.insert(
                0,
                PropertyValuePair::new(
                    entity_type.id_property(),
                    serde_json::Value::String(id.clone()),
                ),
            );

            Ok(AbstractOperation::Insert(AbstractInsert {
                node_type_id: entity_type.node_type_id,
                properties,
                selection: read_back(system, entity_type, id, selection_set)?,
            }))
        }
        BoundMutation::Update {
            entity_type,
            id,
            properties,
        } => {
            let entity_type = system.entity_type(entity_type);

            Ok(AbstractOperation::Update(AbstractUpdate {
                node_type_id: entity_type.node_type_id,
                id: id.clone(),
                properties,
                selection: read_back(system, entity_type, id, selection_set)?,
            }))
        }
    }
}

fn read_back(
    system: &ModelSystem,
    entity_type: &EntityType,
    id: String,
    selection_set: &[ValidatedField],
) -> Result<AbstractSelect, PlanError> {
    Ok(AbstractSelect {
        node_type_id: entity_type.node_type_id,
        predicate: NodePredicate::IdEq(id),
        selection: build_selection(system, entity_type, selection_set)?,
    })
}

fn build_selection(
    system: &ModelSystem,
    entity_type: &EntityType,
    selection_set: &[ValidatedField],
) -> Result<Selection, PlanError> {
    let elements = selection_set
        .iter()
        .map(|field| {
            let entity_field =
                entity_type
                    .field(&field.name)
                    .ok_or_else(|| PlanError::UnknownField {
                        typ: entity_type.name.clone(),
                        field: field.name.clone(),
                    })?;

            let element = match &entity_field.kind {
                FieldKind::Scalar { property_id, .. } => {
                    if !field.subfields.is_empty() {
                        return Err(PlanError::ScalarSubselection {
                            typ: entity_type.name.clone(),
                            field: field.name.clone(),
                        });
                    }
                    SelectionElement::Property(*property_id)
                }
                FieldKind::Relation {
                    relationship_id,
                    target,
                    cardinality,
                } => {
                    let target_type = system.entity_type(*target);

                    SelectionElement::RelatedNodes {
                        relationship_id: *relationship_id,
                        cardinality: match cardinality {
                            RelationshipCardinality::One => SelectionCardinality::One,
                            RelationshipCardinality::Many => SelectionCardinality::Many,
                        },
                        select: Box::new(AbstractSelect {
                            node_type_id: target_type.node_type_id,
                            // Nested nodes are reached by traversal from the root
                            predicate: NodePredicate::True,
                            selection: build_selection(system, target_type, &field.subfields)?,
                        }),
                    }
                }
            };

            Ok(AliasedSelectionElement::new(field.output_name(), element))
        })
        .collect::<Result<_, _>>()?;

    Ok(Selection { elements })
}
