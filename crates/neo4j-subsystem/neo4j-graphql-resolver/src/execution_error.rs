// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use thiserror::Error;
use tracing::error;

use exo_cypher::graph_error::GraphError;

use crate::{
    input_binder::BindError, mutation_planner::PlanError, result_shaper::ShapeError,
};

#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("Unknown mutation '{0}'")]
    UnknownMutation(String),

    #[error("Missing argument '{0}'")]
    MissingArgument(String),

    #[error("{0}")]
    Bind(#[from] BindError),

    #[error("{0}")]
    Plan(#[from] PlanError),

    #[error("No `{typ}` found with id '{id}'")]
    EntityNotFound { typ: String, id: String },

    #[error("{0}")]
    Graph(#[from] GraphError),

    #[error("{0}")]
    Shape(#[from] ShapeError),

    #[error("{0} {1}")]
    WithContext(String, #[source] Box<ExecutionError>),
}

impl ExecutionError {
    pub fn with_context(self, context: String) -> ExecutionError {
        ExecutionError::WithContext(context, Box::new(self))
    }

    pub fn user_error_message(&self) -> String {
        match self {
            ExecutionError::UnknownMutation(_)
            | ExecutionError::MissingArgument(_)
            | ExecutionError::Bind(_)
            | ExecutionError::Plan(_)
            | ExecutionError::EntityNotFound { .. } => self.to_string(),
            ExecutionError::WithContext(context, e) => {
                format!("{}: {}", e.user_error_message(), context)
            }
            // Do not reveal the underlying store error as it may expose sensitive details (such as
            // property names or data involved in a constraint violation).
            ExecutionError::Graph(_) | ExecutionError::Shape(_) => {
                error!("Graph operation failed: {:?}", self);
                "Operation failed".to_string()
            }
        }
    }
}

pub trait WithContext {
    fn with_context(self, context: String) -> Self;
}

impl<T> WithContext for Result<T, ExecutionError> {
    fn with_context(self, context: String) -> Result<T, ExecutionError> {
        self.map_err(|e| e.with_context(context))
    }
}
