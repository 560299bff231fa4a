// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use async_trait::async_trait;

use crate::graph_error::GraphError;

use super::super::statement::CypherStatement;
use super::super::transaction::{Row, TransactionStepResult};
use super::bolt::to_bolt;

/// Hands out transactions against the graph store. The production
/// implementation wraps the Bolt driver; the `test-support` feature provides a
/// scripted implementation so the engine can be exercised without a server.
#[async_trait]
pub trait GraphConnection: Send + Sync {
    async fn transaction(&self) -> Result<Box<dyn GraphTransaction>, GraphError>;
}

/// A single transaction. Statements run against uncommitted state, so a
/// projection following a write observes that write. Dropping the transaction
/// without committing rolls it back.
#[async_trait]
pub trait GraphTransaction: Send {
    async fn query(
        &mut self,
        statement: &CypherStatement,
    ) -> Result<TransactionStepResult, GraphError>;

    async fn commit(self: Box<Self>) -> Result<(), GraphError>;

    async fn rollback(self: Box<Self>) -> Result<(), GraphError>;
}

pub(crate) struct Neo4jTransaction {
    txn: neo4rs::Txn,
}

impl Neo4jTransaction {
    pub(crate) fn new(txn: neo4rs::Txn) -> Self {
        Self { txn }
    }
}

#[async_trait]
impl GraphTransaction for Neo4jTransaction {
    async fn query(
        &mut self,
        statement: &CypherStatement,
    ) -> Result<TransactionStepResult, GraphError> {
        let mut query = neo4rs::query(&statement.text);
        for (name, value) in &statement.params {
            query = query.param(name, to_bolt(value));
        }

        let mut stream = self.txn.execute(query).await?;

        let mut rows = Vec::new();
        while let Some(row) = stream.next(self.txn.handle()).await? {
            let row = row
                .to::<Row>()
                .map_err(|e| GraphError::Deserialization(e.to_string()))?;
            rows.push(row);
        }

        Ok(rows)
    }

    async fn commit(self: Box<Self>) -> Result<(), GraphError> {
        self.txn.commit().await.map_err(GraphError::Delegate)
    }

    async fn rollback(self: Box<Self>) -> Result<(), GraphError> {
        self.txn.rollback().await.map_err(GraphError::Delegate)
    }
}
