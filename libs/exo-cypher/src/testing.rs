// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Scripted stand-ins for the driver connection, so the engine can be
//! exercised without a running graph database. Each `query` pops the next
//! scripted step result and records the statement it was asked to run;
//! assertions then inspect the statement log and the commit/rollback flags.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::cypher::connect::graph_client::{GraphConnection, GraphTransaction};
use crate::cypher::statement::CypherStatement;
use crate::cypher::transaction::TransactionStepResult;
use crate::graph_error::GraphError;

#[derive(Default)]
pub struct ScriptedConnection {
    responses: Arc<Mutex<VecDeque<TransactionStepResult>>>,
    statements: Arc<Mutex<Vec<CypherStatement>>>,
    committed: Arc<AtomicBool>,
    rolled_back: Arc<AtomicBool>,
}

impl ScriptedConnection {
    pub fn new(responses: Vec<TransactionStepResult>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses.into())),
            ..Default::default()
        }
    }

    /// The statements executed so far, in order
    pub fn statement_log(&self) -> Vec<CypherStatement> {
        self.statements.lock().unwrap().clone()
    }

    pub fn committed(&self) -> bool {
        self.committed.load(Ordering::SeqCst)
    }

    pub fn rolled_back(&self) -> bool {
        self.rolled_back.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GraphConnection for ScriptedConnection {
    async fn transaction(&self) -> Result<Box<dyn GraphTransaction>, GraphError> {
        Ok(Box::new(ScriptedTransaction {
            responses: self.responses.clone(),
            statements: self.statements.clone(),
            committed: self.committed.clone(),
            rolled_back: self.rolled_back.clone(),
        }))
    }
}

struct ScriptedTransaction {
    responses: Arc<Mutex<VecDeque<TransactionStepResult>>>,
    statements: Arc<Mutex<Vec<CypherStatement>>>,
    committed: Arc<AtomicBool>,
    rolled_back: Arc<AtomicBool>,
}

#[async_trait]
impl GraphTransaction for ScriptedTransaction {
    async fn query(
        &mut self,
        statement: &CypherStatement,
    ) -> Result<TransactionStepResult, GraphError> {
        self.statements.lock().unwrap().push(statement.clone());

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| GraphError::Transaction("Scripted responses exhausted".into()))
    }

    async fn commit(self: Box<Self>) -> Result<(), GraphError> {
        self.committed.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), GraphError> {
        self.rolled_back.store(true, Ordering::SeqCst);
        Ok(())
    }
}
