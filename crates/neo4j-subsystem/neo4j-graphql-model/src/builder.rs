// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Build a [ModelSystem] from type declarations.
//!
//! Each declared type becomes an entity type backed by a node type whose label
//! is the type name. An `id` field (String, required on nothing, immutable) is
//! generated as the first field of every type. From each type a `create<Type>`
//! and an `update<Type>` mutation is derived.

use thiserror::Error;

use exo_cypher::{
    GraphProperty, GraphRelationship, GraphSchema, NodeType, PropertyType,
    RelationshipCardinality, RelationshipDirection,
};

use crate::{
    mutation::{GraphMutation, GraphMutationKind},
    system::ModelSystem,
    types::{EntityField, EntityType, EntityTypeId, FieldKind},
};

/// The generated identifier field present on every entity type
pub const ID_FIELD: &str = "id";

#[derive(Debug)]
pub struct TypeDeclaration {
    pub name: String,
    pub fields: Vec<FieldDeclaration>,
}

#[derive(Debug)]
pub enum FieldDeclaration {
    Scalar {
        name: String,
        typ: PropertyType,
        required: bool,
    },
    Relation {
        name: String,
        /// Name of the declared target type
        target: String,
        /// The relationship type name such as `HAS_SKILL`
        relationship: String,
        direction: RelationshipDirection,
        cardinality: RelationshipCardinality,
        /// Name of the relation field on the target type that traverses the
        /// same relationship the other way. `None` declares the relation as
        /// one-directional.
        inverse: Option<String>,
    },
}

impl FieldDeclaration {
    fn name(&self) -> &str {
        match self {
            FieldDeclaration::Scalar { name, .. } => name,
            FieldDeclaration::Relation { name, .. } => name,
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ModelBuildError {
    #[error("Duplicate type `{0}`")]
    DuplicateType(String),

    #[error("Duplicate field `{field}` on type `{typ}`")]
    DuplicateField { typ: String, field: String },

    #[error("Field `{field}` on type `{typ}` targets undeclared type `{target}`")]
    UnknownTargetType {
        typ: String,
        field: String,
        target: String,
    },

    #[error(
        "Field `{field}` on type `{typ}` declares inverse `{inverse}`, which is not a relation field on `{target}` targeting `{typ}`"
    )]
    MissingInverse {
        typ: String,
        field: String,
        target: String,
        inverse: String,
    },

    #[error("Type `{0}` declares the reserved field `id`")]
    ReservedField(String),
}

pub struct SystemBuilder;

impl SystemBuilder {
    pub fn build(declarations: Vec<TypeDeclaration>) -> Result<ModelSystem, ModelBuildError> {
        let mut schema = GraphSchema::default();

        // First pass: register node types with their scalar properties, so
        // relation fields can target types declared later
        let mut node_type_ids = Vec::with_capacity(declarations.len());
        for (index, declaration) in declarations.iter().enumerate() {
            if declarations[..index]
                .iter()
                .any(|earlier| earlier.name == declaration.name)
            {
                return Err(ModelBuildError::DuplicateType(declaration.name.clone()));
            }

            for (field_index, field) in declaration.fields.iter().enumerate() {
                if field.name() == ID_FIELD {
                    return Err(ModelBuildError::ReservedField(declaration.name.clone()));
                }
                if declaration.fields[..field_index]
                    .iter()
                    .any(|earlier| earlier.name() == field.name())
                {
                    return Err(ModelBuildError::DuplicateField {
                        typ: declaration.name.clone(),
                        field: field.name().to_string(),
                    });
                }
            }

            let mut properties = vec![GraphProperty {
                name: ID_FIELD.to_string(),
                typ: PropertyType::String,
            }];
            properties.extend(declaration.fields.iter().filter_map(|field| match field {
                FieldDeclaration::Scalar { name, typ, .. } => Some(GraphProperty {
                    name: name.clone(),
                    typ: *typ,
                }),
                FieldDeclaration::Relation { .. } => None,
            }));

            node_type_ids.push(schema.insert_node_type(NodeType {
                label: declaration.name.clone(),
                properties,
            }));
        }

        let entity_type_id_of = |target: &str| {
            declarations
                .iter()
                .position(|declaration| declaration.name == target)
                .map(EntityTypeId)
        };

        // Second pass: resolve fields, registering a relationship per relation
        // field
        let mut entity_types = Vec::with_capacity(declarations.len());
        for (index, declaration) in declarations.iter().enumerate() {
            let node_type_id = node_type_ids[index];

            let mut fields = vec![EntityField {
                name: ID_FIELD.to_string(),
                kind: FieldKind::Scalar {
                    property_id: schema
                        .get_property_id(node_type_id, ID_FIELD)
                        .unwrap_or_else(|| unreachable!("The id property is always registered")),
                    typ: PropertyType::String,
                    required: false,
                    immutable: true,
                },
            }];

            for field in &declaration.fields {
                let kind = match field {
                    FieldDeclaration::Scalar {
                        name,
                        typ,
                        required,
                    } => FieldKind::Scalar {
                        property_id: schema.get_property_id(node_type_id, name).unwrap_or_else(
                            || unreachable!("Scalar properties were registered in the first pass"),
                        ),
                        typ: *typ,
                        required: *required,
                        immutable: false,
                    },
                    FieldDeclaration::Relation {
                        name,
                        target,
                        relationship,
                        direction,
                        cardinality,
                        inverse,
                    } => {
                        let target_entity = entity_type_id_of(target).ok_or_else(|| {
                            ModelBuildError::UnknownTargetType {
                                typ: declaration.name.clone(),
                                field: name.clone(),
                                target: target.clone(),
                            }
                        })?;

                        if let Some(inverse) = inverse {
                            let inverse_declared = declarations[target_entity.0]
                                .fields
                                .iter()
                                .any(|candidate| match candidate {
                                    FieldDeclaration::Relation {
                                        name: candidate_name,
                                        target: candidate_target,
                                        ..
                                    } => {
                                        candidate_name == inverse
                                            && candidate_target == &declaration.name
                                    }
                                    FieldDeclaration::Scalar { .. } => false,
                                });
                            if !inverse_declared {
                                return Err(ModelBuildError::MissingInverse {
                                    typ: declaration.name.clone(),
                                    field: name.clone(),
                                    target: target.clone(),
                                    inverse: inverse.clone(),
                                });
                            }
                        }

                        let relationship_id = schema.insert_relationship(GraphRelationship {
                            name: relationship.clone(),
                            source: node_type_id,
                            target: node_type_ids[target_entity.0],
                            direction: *direction,
                            cardinality: *cardinality,
                        });

                        FieldKind::Relation {
                            relationship_id,
                            target: target_entity,
                            cardinality: *cardinality,
                        }
                    }
                };

                fields.push(EntityField {
                    name: field.name().to_string(),
                    kind,
                });
            }

            entity_types.push(EntityType {
                name: declaration.name.clone(),
                node_type_id,
                fields,
            });
        }

        let mutations = entity_types
            .iter()
            .enumerate()
            .flat_map(|(index, entity_type)| {
                [
                    (GraphMutationKind::Create, "create"),
                    (GraphMutationKind::Update, "update"),
                ]
                .map(|(kind, prefix)| {
                    let name = format!("{}{}", prefix, entity_type.name);
                    (
                        name.clone(),
                        GraphMutation {
                            name,
                            kind,
                            entity_type: EntityTypeId(index),
                        },
                    )
                })
            })
            .collect();

        Ok(ModelSystem {
            entity_types,
            graph_schema: schema,
            mutations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person_skill_declarations() -> Vec<TypeDeclaration> {
        vec![
            TypeDeclaration {
                name: "Person".to_string(),
                fields: vec![
                    FieldDeclaration::Scalar {
                        name: "firstName".to_string(),
                        typ: PropertyType::String,
                        required: true,
                    },
                    FieldDeclaration::Scalar {
                        name: "lastName".to_string(),
                        typ: PropertyType::String,
                        required: true,
                    },
                    FieldDeclaration::Scalar {
                        name: "age".to_string(),
                        typ: PropertyType::Int,
                        required: true,
                    },
                    FieldDeclaration::Relation {
                        name: "skills".to_string(),
                        target: "Skill".to_string(),
                        relationship: "HAS_SKILL".to_string(),
                        direction: RelationshipDirection::Outgoing,
                        cardinality: RelationshipCardinality::Many,
                        inverse: None,
                    },
                ],
            },
            TypeDeclaration {
                name: "Skill".to_string(),
                fields: vec![FieldDeclaration::Scalar {
                    name: "name".to_string(),
                    typ: PropertyType::String,
                    required: true,
                }],
            },
        ]
    }

    #[test]
    fn derives_mutations_per_type() {
        let system = SystemBuilder::build(person_skill_declarations()).unwrap();

        let names: Vec<_> = system.mutations.keys().cloned().collect();
        assert_eq!(
            names,
            vec!["createPerson", "updatePerson", "createSkill", "updateSkill"]
        );

        let create_person = system.mutation("createPerson").unwrap();
        assert_eq!(create_person.kind, GraphMutationKind::Create);
        assert_eq!(
            system.entity_type(create_person.entity_type).name,
            "Person"
        );
    }

    #[test]
    fn generates_immutable_id_field_first() {
        let system = SystemBuilder::build(person_skill_declarations()).unwrap();

        let person = &system.entity_types[0];
        assert_eq!(person.fields[0].name, ID_FIELD);
        assert!(matches!(
            person.fields[0].kind,
            FieldKind::Scalar {
                immutable: true,
                required: false,
                ..
            }
        ));
    }

    #[test]
    fn resolves_relation_fields() {
        let system = SystemBuilder::build(person_skill_declarations()).unwrap();

        let person = &system.entity_types[0];
        let skills = person.field("skills").unwrap();
        match &skills.kind {
            FieldKind::Relation {
                relationship_id,
                target,
                cardinality,
            } => {
                assert_eq!(system.entity_type(*target).name, "Skill");
                assert_eq!(*cardinality, RelationshipCardinality::Many);

                let relationship = relationship_id.get_relationship(&system.graph_schema);
                assert_eq!(relationship.name, "HAS_SKILL");
                assert_eq!(relationship.direction, RelationshipDirection::Outgoing);
            }
            FieldKind::Scalar { .. } => panic!("Expected a relation field"),
        }
    }

    #[test]
    fn rejects_duplicate_fields() {
        let declarations = vec![TypeDeclaration {
            name: "Person".to_string(),
            fields: vec![
                FieldDeclaration::Scalar {
                    name: "age".to_string(),
                    typ: PropertyType::Int,
                    required: true,
                },
                FieldDeclaration::Scalar {
                    name: "age".to_string(),
                    typ: PropertyType::String,
                    required: false,
                },
            ],
        }];

        assert_eq!(
            SystemBuilder::build(declarations).unwrap_err(),
            ModelBuildError::DuplicateField {
                typ: "Person".to_string(),
                field: "age".to_string(),
            }
        );
    }

    #[test]
    fn rejects_undeclared_relation_target() {
        let declarations = vec![TypeDeclaration {
            name: "Person".to_string(),
            fields: vec![FieldDeclaration::Relation {
                name: "skills".to_string(),
                target: "Skill".to_string(),
                relationship: "HAS_SKILL".to_string(),
                direction: RelationshipDirection::Outgoing,
                cardinality: RelationshipCardinality::Many,
                inverse: None,
            }],
        }];

        assert_eq!(
            SystemBuilder::build(declarations).unwrap_err(),
            ModelBuildError::UnknownTargetType {
                typ: "Person".to_string(),
                field: "skills".to_string(),
                target: "Skill".to_string(),
            }
        );
    }

    #[test]
    fn accepts_bidirectional_relation_with_declared_inverse() {
        let declarations = vec![
            TypeDeclaration {
                name: "Person".to_string(),
                fields: vec![FieldDeclaration::Relation {
                    name: "skills".to_string(),
                    target: "Skill".to_string(),
                    relationship: "HAS_SKILL".to_string(),
                    direction: RelationshipDirection::Outgoing,
                    cardinality: RelationshipCardinality::Many,
                    inverse: Some("owner".to_string()),
                }],
            },
            TypeDeclaration {
                name: "Skill".to_string(),
                fields: vec![FieldDeclaration::Relation {
                    name: "owner".to_string(),
                    target: "Person".to_string(),
                    relationship: "HAS_SKILL".to_string(),
                    direction: RelationshipDirection::Incoming,
                    cardinality: RelationshipCardinality::One,
                    inverse: Some("skills".to_string()),
                }],
            },
        ];

        let system = SystemBuilder::build(declarations).unwrap();
        assert!(system.entity_types[0].field("skills").is_some());
        assert!(system.entity_types[1].field("owner").is_some());
    }

    #[test]
    fn rejects_inverse_missing_on_target() {
        let declarations = vec![
            TypeDeclaration {
                name: "Person".to_string(),
                fields: vec![FieldDeclaration::Relation {
                    name: "skills".to_string(),
                    target: "Skill".to_string(),
                    relationship: "HAS_SKILL".to_string(),
                    direction: RelationshipDirection::Outgoing,
                    cardinality: RelationshipCardinality::Many,
                    inverse: Some("owner".to_string()),
                }],
            },
            TypeDeclaration {
                name: "Skill".to_string(),
                fields: vec![FieldDeclaration::Scalar {
                    name: "name".to_string(),
                    typ: PropertyType::String,
                    required: true,
                }],
            },
        ];

        assert_eq!(
            SystemBuilder::build(declarations).unwrap_err(),
            ModelBuildError::MissingInverse {
                typ: "Person".to_string(),
                field: "skills".to_string(),
                target: "Skill".to_string(),
                inverse: "owner".to_string(),
            }
        );
    }

    #[test]
    fn rejects_declared_id_field() {
        let declarations = vec![TypeDeclaration {
            name: "Person".to_string(),
            fields: vec![FieldDeclaration::Scalar {
                name: "id".to_string(),
                typ: PropertyType::String,
                required: true,
            }],
        }];

        assert_eq!(
            SystemBuilder::build(declarations).unwrap_err(),
            ModelBuildError::ReservedField("Person".to_string())
        );
    }
}
