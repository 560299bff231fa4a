// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde::{Deserialize, Serialize};

use crate::types::EntityTypeId;

/// A mutation derived from an entity type, such as `createPerson` or
/// `updatePerson`
#[derive(Serialize, Deserialize, Debug)]
pub struct GraphMutation {
    pub name: String,
    pub kind: GraphMutationKind,
    pub entity_type: EntityTypeId,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphMutationKind {
    Create,
    Update,
}
