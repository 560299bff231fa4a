// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::time::Duration;

use crate::graph_error::GraphError;

const DEFAULT_TRANSACTION_DEADLINE: Duration = Duration::from_secs(10);

/// Connection settings for the graph database.
#[derive(Debug, Clone)]
pub struct GraphConfig {
    pub uri: String,
    pub user: String,
    pub password: String,
    /// The database to use; the server's default when `None`
    pub database: Option<String>,
    /// Upper bound for the write-and-read-back transaction of a single
    /// mutation. Exceeding it surfaces as a retriable timeout.
    pub transaction_deadline: Duration,
}

impl GraphConfig {
    pub fn from_env() -> Result<Self, GraphError> {
        let uri = required_env("EXO_NEO4J_URI")?;
        let user = required_env("EXO_NEO4J_USER")?;
        let password = required_env("EXO_NEO4J_PASSWORD")?;
        let database = std::env::var("EXO_NEO4J_DATABASE").ok();

        let transaction_deadline = match std::env::var("EXO_NEO4J_TRANSACTION_TIMEOUT_MS") {
            Ok(value) => {
                let millis: u64 = value.parse().map_err(|_| {
                    GraphError::Config(format!(
                        "Invalid EXO_NEO4J_TRANSACTION_TIMEOUT_MS value '{value}'"
                    ))
                })?;
                Duration::from_millis(millis)
            }
            Err(_) => DEFAULT_TRANSACTION_DEADLINE,
        };

        Ok(Self {
            uri,
            user,
            password,
            database,
            transaction_deadline,
        })
    }
}

fn required_env(name: &str) -> Result<String, GraphError> {
    std::env::var(name)
        .map_err(|_| GraphError::Config(format!("Environment variable {name} must be set")))
}
