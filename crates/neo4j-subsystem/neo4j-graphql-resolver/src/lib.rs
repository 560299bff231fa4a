// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Resolver for GraphQL mutations against a Neo4j-backed model.
//!
//! A mutation request (name, arguments, selection set) flows through:
//! - [input_binder]: validate and normalize arguments against the model
//! - [mutation_planner]: produce an [exo_cypher::AbstractOperation] carrying
//!   the write and the read-back projection (creates get a fresh identifier
//!   from [id_generator])
//! - [exo_cypher::GraphExecutor]: run it as one transaction
//! - [result_shaper]: map the raw rows into the caller's nested object graph

pub mod cast;
pub mod execution_error;
pub mod id_generator;
pub mod input_binder;
pub mod mutation_planner;
pub mod resolver;
pub mod result_shaper;
pub mod validation;
pub mod value;

pub use execution_error::ExecutionError;
pub use resolver::MutationResolver;
pub use validation::field::ValidatedField;
pub use value::Val;
