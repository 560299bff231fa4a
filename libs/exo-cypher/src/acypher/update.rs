// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use crate::cypher::schema::NodeTypeId;

use super::{insert::PropertyValuePair, select::AbstractSelect};

/// Locate one node by identifier and overwrite the supplied scalar
/// properties, then read back `selection` within the same transaction.
/// An empty property list is a no-op write that still verifies the target
/// exists and returns its current state. Relationships are never touched.
#[derive(Debug)]
pub struct AbstractUpdate {
    pub node_type_id: NodeTypeId,
    /// Identifier of the target node (string form, as stored)
    pub id: String,
    pub properties: Vec<PropertyValuePair>,
    pub selection: AbstractSelect,
}
