// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use super::{insert::AbstractInsert, update::AbstractUpdate};

/// A graph mutation expressed as an intention, before any Cypher is
/// generated. Deletion would follow the same plan/execute/shape path, but no
/// mutation currently requires it.
#[derive(Debug)]
pub enum AbstractOperation {
    Insert(AbstractInsert),
    Update(AbstractUpdate),
}
