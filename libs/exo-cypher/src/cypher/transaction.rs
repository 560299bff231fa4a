// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use tracing::{debug, error, instrument};

use crate::graph_error::GraphError;

use super::connect::graph_client::GraphTransaction;
use super::operation::CypherOperation;
use super::{CypherBuilder, ExpressionBuilder};

/// A row returned by a Cypher statement: column name to value.
pub type Row = serde_json::Map<String, serde_json::Value>;

/// Rows obtained from a single Cypher statement
pub type TransactionStepResult = Vec<Row>;

/// Sequence of Cypher operations that are executed in a transaction
#[derive(Default, Debug)]
pub struct TransactionScript {
    steps: Vec<ConcreteTransactionStep>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionStepId(pub usize);

impl TransactionScript {
    /// Returns the result of every step, indexed by step id. Unlike a
    /// SQL-style script whose final select carries the whole answer, a graph
    /// projection spans several statements (one per traversal), so every
    /// step's rows are kept.
    #[instrument(name = "TransactionScript::execute", skip_all)]
    pub async fn execute(
        self,
        tx: &mut dyn GraphTransaction,
    ) -> Result<Vec<TransactionStepResult>, GraphError> {
        let mut results = Vec::with_capacity(self.steps.len());

        for step in self.steps.into_iter() {
            let result = step.execute(tx).await?;
            results.push(result)
        }

        Ok(results)
    }

    /// Adds a step to the transaction script and return the step id (which is just the index of the step in the script)
    pub fn add_step(&mut self, step: ConcreteTransactionStep) -> TransactionStepId {
        let id = self.steps.len();
        self.steps.push(step);
        TransactionStepId(id)
    }
}

#[derive(Debug)]
pub struct ConcreteTransactionStep {
    pub operation: CypherOperation,
}

impl ConcreteTransactionStep {
    pub fn new(operation: CypherOperation) -> Self {
        Self { operation }
    }

    #[instrument(
        name = "ConcreteTransactionStep::execute",
        level = "trace",
        skip_all,
        fields(operation = ?self.operation)
    )]
    pub async fn execute(
        self,
        tx: &mut dyn GraphTransaction,
    ) -> Result<TransactionStepResult, GraphError> {
        let mut builder = CypherBuilder::new();
        self.operation.build(&mut builder);
        let statement = builder.into_statement();

        debug!("Executing Cypher operation: {}", statement);

        tx.query(&statement).await.map_err(|e| {
            error!("Failed to execute statement: {e:?}");
            e.with_context("Graph operation failed".into())
        })
    }
}
