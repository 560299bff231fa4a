// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Compiled model for the Neo4j GraphQL subsystem: entity types, their
//! fields, and the mutations derived from them. Built once at startup from
//! type declarations and shared read-only across requests.

pub mod builder;
pub mod mutation;
pub mod system;
pub mod types;
