// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;
use std::time::Duration;

use indexmap::IndexMap;
use tracing::instrument;

use exo_cypher::{GraphConnection, GraphExecutor};
use neo4j_graphql_model::system::ModelSystem;

use crate::{
    execution_error::ExecutionError,
    id_generator::{IdGenerator, UuidGenerator},
    input_binder, mutation_planner, result_shaper,
    validation::field::ValidatedField,
    value::Val,
};

/// Every mutation carries its payload in a single `input` argument
const INPUT_ARG: &str = "input";

/// Resolves one mutation field per call: bind, plan, execute as a single
/// transaction, shape. Stateless across requests; safe to share.
pub struct MutationResolver {
    system: Arc<ModelSystem>,
    executor: GraphExecutor,
    id_generator: Box<dyn IdGenerator>,
}

impl MutationResolver {
    pub fn new(
        system: Arc<ModelSystem>,
        connection: Arc<dyn GraphConnection>,
        transaction_deadline: Duration,
    ) -> Self {
        Self {
            system,
            executor: GraphExecutor::new(connection, transaction_deadline),
            id_generator: Box::new(UuidGenerator),
        }
    }

    /// Replace the identifier source (deterministic generators in tests)
    pub fn with_id_generator(mut self, id_generator: Box<dyn IdGenerator>) -> Self {
        self.id_generator = id_generator;
        self
    }

    #[instrument(name = "MutationResolver::resolve", skip_all, fields(mutation = %field.name))]
    pub async fn resolve(&self, field: &ValidatedField) -> Result<serde_json::Value, ExecutionError> {
        let mutation = self
            .system
            .mutation(&field.name)
            .ok_or_else(|| ExecutionError::UnknownMutation(field.name.clone()))?;

        // The GraphQL layer validates arguments against the schema's input
        // type, so a present-but-malformed `input` never reaches this point
        let input: IndexMap<String, Val> = match field.arguments.get(INPUT_ARG) {
            Some(Val::Object(input)) => input
                .iter()
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect(),
            _ => return Err(ExecutionError::MissingArgument(INPUT_ARG.to_string())),
        };

        let bound = input_binder::bind(&self.system, mutation, &input)?;

        let update_target = match &bound {
            input_binder::BoundMutation::Update { id, .. } => Some(id.clone()),
            input_binder::BoundMutation::Create { .. } => None,
        };

        let operation = mutation_planner::plan(
            &self.system,
            bound,
            &field.subfields,
            self.id_generator.as_ref(),
        )?;

        let raw = self
            .executor
            .execute(&operation, &self.system.graph_schema)
            .await?;

        // An update whose write step matched nothing: the target does not
        // exist (committing the empty transaction mutated nothing)
        if let Some(id) = update_target {
            if raw.write_rows().is_empty() {
                return Err(ExecutionError::EntityNotFound {
                    typ: self.system.entity_type(mutation.entity_type).name.clone(),
                    id,
                });
            }
        }

        Ok(result_shaper::shape(&raw)?)
    }
}
