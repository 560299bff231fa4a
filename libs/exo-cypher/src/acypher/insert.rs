// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use crate::cypher::schema::{NodeTypeId, PropertyId};

use super::select::AbstractSelect;

/// Create one node of the given type with the given property values (the
/// freshly generated identifier is among them), then read back `selection`.
/// Relation elements of the selection necessarily project to empty
/// collections on a brand-new node.
#[derive(Debug)]
pub struct AbstractInsert {
    pub node_type_id: NodeTypeId,
    pub properties: Vec<PropertyValuePair>,
    pub selection: AbstractSelect,
}

/// A property along with its value
#[derive(Debug)]
pub struct PropertyValuePair {
    pub property_id: PropertyId,
    pub value: serde_json::Value,
}

impl PropertyValuePair {
    pub fn new(property_id: PropertyId, value: serde_json::Value) -> Self {
        Self { property_id, value }
    }
}
