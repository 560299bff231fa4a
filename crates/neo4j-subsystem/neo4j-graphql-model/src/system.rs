// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use exo_cypher::GraphSchema;

use crate::{
    mutation::GraphMutation,
    types::{EntityType, EntityTypeId},
};

/// The compiled model: entity types, the graph schema backing them, and the
/// mutations derived from them. Immutable after [crate::builder::SystemBuilder]
/// produces it.
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct ModelSystem {
    pub entity_types: Vec<EntityType>,
    pub graph_schema: GraphSchema,
    /// Keyed by mutation name, in derivation order
    pub mutations: IndexMap<String, GraphMutation>,
}

impl ModelSystem {
    pub fn entity_type(&self, id: EntityTypeId) -> &EntityType {
        &self.entity_types[id.0]
    }

    pub fn mutation(&self, name: &str) -> Option<&GraphMutation> {
        self.mutations.get(name)
    }
}
