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

use super::graph_client::{GraphConnection, GraphTransaction, Neo4jTransaction};
use super::graph_config::GraphConfig;

/// Owns the driver's connection pool and starts one transaction per mutation.
pub struct GraphClientManager {
    graph: neo4rs::Graph,
}

impl GraphClientManager {
    pub async fn connect(config: &GraphConfig) -> Result<Self, GraphError> {
        let mut builder = neo4rs::ConfigBuilder::default()
            .uri(&config.uri)
            .user(&config.user)
            .password(&config.password);
        if let Some(database) = &config.database {
            builder = builder.db(database.as_str());
        }
        let driver_config = builder
            .build()
            .map_err(|e| GraphError::Config(e.to_string()))?;

        let graph = neo4rs::Graph::connect(driver_config)
            .await
            .map_err(|e| GraphError::Unavailable(e.to_string()))?;

        Ok(Self { graph })
    }
}

#[async_trait]
impl GraphConnection for GraphClientManager {
    async fn transaction(&self) -> Result<Box<dyn GraphTransaction>, GraphError> {
        let txn = self
            .graph
            .start_txn()
            .await
            .map_err(|e| GraphError::Unavailable(e.to_string()))?;

        Ok(Box::new(Neo4jTransaction::new(txn)))
    }
}
