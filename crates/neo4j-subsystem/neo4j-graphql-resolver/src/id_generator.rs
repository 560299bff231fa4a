// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use uuid::Uuid;

/// Produces the identifier for each newly created entity. Called exactly once
/// per create, before the write is issued, so the identifier can be embedded
/// in both the write and the read-back projection.
pub trait IdGenerator: Send + Sync {
    fn next(&self) -> String;
}

/// Version-4 random UUIDs: unique without coordination, lock-free by
/// construction
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next(&self) -> String {
        Uuid::new_v4().to_string()
    }
}
