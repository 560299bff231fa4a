// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to execute transaction {0}")]
    Transaction(String),

    #[error("Transaction deadline of {0:?} exceeded")]
    Timeout(Duration),

    #[error("Graph database unavailable: {0}")]
    Unavailable(String),

    #[error("{0}")]
    Delegate(#[from] neo4rs::Error),

    #[error("{0}")]
    Deserialization(String),

    #[error("{0} {1}")]
    WithContext(String, #[source] Box<GraphError>),
}

impl GraphError {
    pub fn with_context(self, context: String) -> GraphError {
        GraphError::WithContext(context, Box::new(self))
    }

    /// Whether the caller's connection layer may usefully retry the failed
    /// transaction. Anything else (statement-level failures, constraint
    /// violations, configuration problems) is not retriable.
    pub fn is_retriable(&self) -> bool {
        match self {
            GraphError::Timeout(_) | GraphError::Unavailable(_) => true,
            GraphError::WithContext(_, inner) => inner.is_retriable(),
            _ => false,
        }
    }
}

pub trait WithContext {
    fn with_context(self, context: String) -> Self;
}

impl<T> WithContext for Result<T, GraphError> {
    fn with_context(self, context: String) -> Result<T, GraphError> {
        self.map_err(|e| e.with_context(context))
    }
}
