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

use tracing::instrument;

use crate::{
    cypher::{
        connect::graph_client::GraphConnection,
        schema::GraphSchema,
        transaction::{TransactionStepId, TransactionStepResult},
    },
    graph_error::GraphError,
    transform::{neo4j::Neo4j, transformer::OperationTransformer},
};

use super::{abstract_operation::AbstractOperation, projection::ReadProjection};

/// The outcome of a mutation's transaction: the rows of every step, plus the
/// bookkeeping the shaper needs to turn them into the caller's object graph.
#[derive(Debug)]
pub struct RawResult {
    pub step_results: Vec<TransactionStepResult>,
    pub write_step_id: TransactionStepId,
    pub projection: ReadProjection,
}

impl RawResult {
    pub fn rows(&self, step_id: TransactionStepId) -> &TransactionStepResult {
        &self.step_results[step_id.0]
    }

    /// Rows returned by the write step itself. Empty for an update means the
    /// target node does not exist.
    pub fn write_rows(&self) -> &TransactionStepResult {
        &self.step_results[self.write_step_id.0]
    }
}

/// Executes one abstract operation per call, as a single transaction: either
/// the node mutation and the returned snapshot are consistent with each
/// other, or nothing is committed.
pub struct GraphExecutor {
    connection: Arc<dyn GraphConnection>,
    transaction_deadline: Duration,
}

impl GraphExecutor {
    pub fn new(connection: Arc<dyn GraphConnection>, transaction_deadline: Duration) -> Self {
        Self {
            connection,
            transaction_deadline,
        }
    }

    /// Execute an operation on the graph store.
    ///
    /// Currently makes a hard assumption on the Neo4j transcription, but this
    /// could be made more generic.
    #[instrument(name = "GraphExecutor::execute", skip_all)]
    pub async fn execute(
        &self,
        operation: &AbstractOperation,
        schema: &GraphSchema,
    ) -> Result<RawResult, GraphError> {
        let database_kind = Neo4j {};
        let transcribed = database_kind.to_transaction_script(operation, schema);

        let mut tx = self.connection.transaction().await?;

        let executed = tokio::time::timeout(
            self.transaction_deadline,
            transcribed.script.execute(tx.as_mut()),
        )
        .await;

        match executed {
            Ok(Ok(step_results)) => {
                tx.commit().await?;
                Ok(RawResult {
                    step_results,
                    write_step_id: transcribed.write_step_id,
                    projection: transcribed.projection,
                })
            }
            Ok(Err(e)) => {
                let _ = tx.rollback().await;
                Err(e)
            }
            Err(_) => {
                let _ = tx.rollback().await;
                Err(GraphError::Timeout(self.transaction_deadline))
            }
        }
    }
}
