// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde::{Deserialize, Serialize};

use exo_cypher::{NodeTypeId, PropertyId, PropertyType, RelationshipCardinality, RelationshipId};

/// Index of an [EntityType] in [crate::system::ModelSystem::entity_types]
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityTypeId(pub usize);

/// An object type declared by the schema, such as `Person` or `Skill`.
///
/// Carries the id of the backing node type in the graph schema, so model-level
/// fields can be resolved to store-level properties and relationships.
#[derive(Serialize, Deserialize, Debug)]
pub struct EntityType {
    pub name: String,
    pub node_type_id: NodeTypeId,
    /// Fields in declaration order, with the generated `id` field first
    pub fields: Vec<EntityField>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct EntityField {
    pub name: String,
    pub kind: FieldKind,
}

#[derive(Serialize, Deserialize, Debug)]
pub enum FieldKind {
    Scalar {
        property_id: PropertyId,
        typ: PropertyType,
        /// Must be supplied on create
        required: bool,
        /// May not be supplied on update (the `id` field)
        immutable: bool,
    },
    Relation {
        relationship_id: RelationshipId,
        target: EntityTypeId,
        cardinality: RelationshipCardinality,
    },
}

impl EntityType {
    pub fn field(&self, name: &str) -> Option<&EntityField> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// The property backing the `id` field
    pub fn id_property(&self) -> PropertyId {
        match self.fields[0].kind {
            FieldKind::Scalar { property_id, .. } => property_id,
            FieldKind::Relation { .. } => unreachable!("The first field is always the id scalar"),
        }
    }
}
