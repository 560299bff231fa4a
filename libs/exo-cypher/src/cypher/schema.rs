// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::fmt::{Debug, Formatter};

use serde::{Deserialize, Serialize};

/// The physical shape of the graph: node types (labels with their properties)
/// and the relationships connecting them. Built once at startup and shared
/// read-only afterwards.
#[derive(Serialize, Deserialize, Default)]
pub struct GraphSchema {
    node_types: Vec<NodeType>,
    relationships: Vec<GraphRelationship>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeTypeId(usize);

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyId {
    pub node_type_id: NodeTypeId,
    property_index: usize,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationshipId(usize);

#[derive(Serialize, Deserialize, Debug)]
pub struct NodeType {
    pub label: String,
    pub properties: Vec<GraphProperty>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct GraphProperty {
    pub name: String,
    pub typ: PropertyType,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyType {
    String,
    Int,
    Float,
    Boolean,
}

impl PropertyType {
    pub fn type_string(&self) -> &'static str {
        match self {
            PropertyType::String => "String",
            PropertyType::Int => "Int",
            PropertyType::Float => "Float",
            PropertyType::Boolean => "Boolean",
        }
    }
}

/// Which way the relationship pattern points relative to the source node type.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationshipDirection {
    Outgoing,
    Incoming,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationshipCardinality {
    One,
    Many,
}

/// An edge type between two node types, as traversed from `source`.
#[derive(Serialize, Deserialize, Debug)]
pub struct GraphRelationship {
    /// The relationship type name such as `HAS_SKILL`
    pub name: String,
    pub source: NodeTypeId,
    pub target: NodeTypeId,
    pub direction: RelationshipDirection,
    pub cardinality: RelationshipCardinality,
}

impl GraphSchema {
    pub fn insert_node_type(&mut self, node_type: NodeType) -> NodeTypeId {
        let id = NodeTypeId(self.node_types.len());
        self.node_types.push(node_type);
        id
    }

    pub fn insert_relationship(&mut self, relationship: GraphRelationship) -> RelationshipId {
        let id = RelationshipId(self.relationships.len());
        self.relationships.push(relationship);
        id
    }

    pub fn get_node_type(&self, id: NodeTypeId) -> &NodeType {
        &self.node_types[id.0]
    }

    pub fn get_relationship(&self, id: RelationshipId) -> &GraphRelationship {
        &self.relationships[id.0]
    }

    pub fn get_property_id(&self, node_type_id: NodeTypeId, name: &str) -> Option<PropertyId> {
        self.node_types[node_type_id.0]
            .properties
            .iter()
            .position(|property| property.name == name)
            .map(|property_index| PropertyId {
                node_type_id,
                property_index,
            })
    }
}

impl PropertyId {
    pub fn get_property<'a>(&self, schema: &'a GraphSchema) -> &'a GraphProperty {
        &schema.get_node_type(self.node_type_id).properties[self.property_index]
    }
}

impl NodeTypeId {
    pub fn get_node_type<'a>(&self, schema: &'a GraphSchema) -> &'a NodeType {
        schema.get_node_type(*self)
    }
}

impl RelationshipId {
    pub fn get_relationship<'a>(&self, schema: &'a GraphSchema) -> &'a GraphRelationship {
        schema.get_relationship(*self)
    }
}

impl Debug for GraphSchema {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (id, node_type) in self.node_types.iter().enumerate() {
            writeln!(f, "{}: {}", id, node_type.label)?;
            writeln!(f, "  properties: ")?;
            for (property_id, property) in node_type.properties.iter().enumerate() {
                writeln!(f, "    {}: {:?}", property_id, property)?;
            }
        }
        for (id, relationship) in self.relationships.iter().enumerate() {
            writeln!(f, "r{}: {:?}", id, relationship)?;
        }

        Ok(())
    }
}
