// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Validate and normalize a mutation's arguments against the model. Pure
//! validation: a [BindError] is reported before any store transaction is
//! issued.

use indexmap::IndexMap;
use thiserror::Error;

use exo_cypher::PropertyValuePair;
use neo4j_graphql_model::{
    builder::ID_FIELD,
    mutation::{GraphMutation, GraphMutationKind},
    system::ModelSystem,
    types::{EntityType, EntityTypeId, FieldKind},
};

use crate::{
    cast::{cast_value, CastError},
    value::Val,
};

#[derive(Error, Debug)]
pub enum BindError {
    #[error("Missing required field `{field}` on `{typ}`")]
    MissingRequiredField { typ: String, field: String },

    #[error("Unknown field `{field}` on `{typ}`")]
    UnknownField { typ: String, field: String },

    #[error("Invalid value for field `{field}`: {source}")]
    TypeMismatch {
        field: String,
        #[source]
        source: CastError,
    },

    #[error("Missing identifier for update of `{0}`")]
    MissingIdentifier(String),

    #[error("Field `{field}` on `{typ}` cannot be supplied by a mutation")]
    ImmutableField { typ: String, field: String },

    #[error("Field `{field}` on `{typ}` is a relation and cannot be set by a mutation")]
    RelationField { typ: String, field: String },
}

/// A mutation input with every value validated and cast to its store
/// representation. Properties retain the caller's argument order.
#[derive(Debug)]
pub enum BoundMutation {
    Create {
        entity_type: EntityTypeId,
        properties: Vec<PropertyValuePair>,
    },
    Update {
        entity_type: EntityTypeId,
        id: String,
        properties: Vec<PropertyValuePair>,
    },
}

pub fn bind(
    system: &ModelSystem,
    mutation: &GraphMutation,
    arguments: &IndexMap<String, Val>,
) -> Result<BoundMutation, BindError> {
    let entity_type = system.entity_type(mutation.entity_type);

    match mutation.kind {
        GraphMutationKind::Create => {
            if arguments.contains_key(ID_FIELD) {
                return Err(BindError::ImmutableField {
                    typ: entity_type.name.clone(),
                    field: ID_FIELD.to_string(),
                });
            }

            let properties = bind_scalars(entity_type, arguments)?;

            // All required scalars must be supplied on create
            for field in &entity_type.fields {
                if let FieldKind::Scalar { required: true, .. } = field.kind {
                    if !arguments.contains_key(&field.name) {
                        return Err(BindError::MissingRequiredField {
                            typ: entity_type.name.clone(),
                            field: field.name.clone(),
                        });
                    }
                }
            }

            Ok(BoundMutation::Create {
                entity_type: mutation.entity_type,
                properties,
            })
        }
        GraphMutationKind::Update => {
            let id = match arguments.get(ID_FIELD) {
                Some(Val::String(id)) => id.clone(),
                Some(other) => {
                    return Err(BindError::TypeMismatch {
                        field: ID_FIELD.to_string(),
                        source: CastError::Type {
                            expected: "String",
                            value: other.to_string(),
                        },
                    });
                }
                None => return Err(BindError::MissingIdentifier(entity_type.name.clone())),
            };

            let mutable_arguments: IndexMap<String, Val> = arguments
                .iter()
                .filter(|(name, _)| name.as_str() != ID_FIELD)
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect();

            let properties = bind_scalars(entity_type, &mutable_arguments)?;

            Ok(BoundMutation::Update {
                entity_type: mutation.entity_type,
                id,
                properties,
            })
        }
    }
}

fn bind_scalars(
    entity_type: &EntityType,
    arguments: &IndexMap<String, Val>,
) -> Result<Vec<PropertyValuePair>, BindError> {
    arguments
        .iter()
        .map(|(name, value)| {
            let field = entity_type
                .field(name)
                .ok_or_else(|| BindError::UnknownField {
                    typ: entity_type.name.clone(),
                    field: name.clone(),
                })?;

            match &field.kind {
                FieldKind::Scalar {
                    property_id,
                    typ,
                    required,
                    immutable,
                } => {
                    if *immutable {
                        return Err(BindError::ImmutableField {
                            typ: entity_type.name.clone(),
                            field: name.clone(),
                        });
                    }

                    let cast = match value {
                        // An explicit null clears an optional field; for a
                        // required one it is the same as leaving it out
                        Val::Null if !*required => serde_json::Value::Null,
                        Val::Null => {
                            return Err(BindError::MissingRequiredField {
                                typ: entity_type.name.clone(),
                                field: name.clone(),
                            });
                        }
                        value => {
                            cast_value(value, *typ).map_err(|source| BindError::TypeMismatch {
                                field: name.clone(),
                                source,
                            })?
                        }
                    };

                    Ok(PropertyValuePair::new(*property_id, cast))
                }
                FieldKind::Relation { .. } => Err(BindError::RelationField {
                    typ: entity_type.name.clone(),
                    field: name.clone(),
                }),
            }
        })
        .collect()
}
