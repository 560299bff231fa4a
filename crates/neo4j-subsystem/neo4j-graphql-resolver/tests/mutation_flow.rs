// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! End-to-end resolver flow over a scripted connection: bind, plan, execute,
//! shape, without a running graph database.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use indexmap::IndexMap;
use serde_json::json;

use exo_cypher::graph_error::GraphError;
use exo_cypher::testing::ScriptedConnection;
use exo_cypher::{
    CypherStatement, GraphConnection, GraphTransaction, PropertyType, RelationshipCardinality,
    RelationshipDirection, Row, TransactionStepResult,
};
use neo4j_graphql_model::{
    builder::{FieldDeclaration, SystemBuilder, TypeDeclaration},
    system::ModelSystem,
};
use neo4j_graphql_resolver::{
    id_generator::IdGenerator, ExecutionError, MutationResolver, Val, ValidatedField,
};

struct FixedIdGenerator(&'static str);

impl IdGenerator for FixedIdGenerator {
    fn next(&self) -> String {
        self.0.to_string()
    }
}

fn person_skill_system() -> Arc<ModelSystem> {
    Arc::new(
        SystemBuilder::build(vec![
            TypeDeclaration {
                name: "Person".to_string(),
                fields: vec![
                    FieldDeclaration::Scalar {
                        name: "firstName".to_string(),
                        typ: PropertyType::String,
                        required: true,
                    },
                    FieldDeclaration::Scalar {
                        name: "lastName".to_string(),
                        typ: PropertyType::String,
                        required: true,
                    },
                    FieldDeclaration::Scalar {
                        name: "age".to_string(),
                        typ: PropertyType::Int,
                        required: true,
                    },
                    FieldDeclaration::Relation {
                        name: "skills".to_string(),
                        target: "Skill".to_string(),
                        relationship: "HAS_SKILL".to_string(),
                        direction: RelationshipDirection::Outgoing,
                        cardinality: RelationshipCardinality::Many,
                        inverse: None,
                    },
                ],
            },
            TypeDeclaration {
                name: "Skill".to_string(),
                fields: vec![FieldDeclaration::Scalar {
                    name: "name".to_string(),
                    typ: PropertyType::String,
                    required: true,
                }],
            },
        ])
        .unwrap(),
    )
}

fn row(value: serde_json::Value) -> Row {
    match value {
        serde_json::Value::Object(map) => map,
        _ => panic!("Expected an object"),
    }
}

fn leaf(name: &str) -> ValidatedField {
    ValidatedField {
        alias: None,
        name: name.to_string(),
        arguments: IndexMap::new(),
        subfields: vec![],
    }
}

/// A mutation field with its payload wrapped in the `input` argument, the
/// shape the GraphQL layer hands over
fn mutation_field(
    name: &str,
    input: Vec<(&str, Val)>,
    subfields: Vec<ValidatedField>,
) -> ValidatedField {
    let input: HashMap<String, Val> = input
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect();

    ValidatedField {
        alias: None,
        name: name.to_string(),
        arguments: [("input".to_string(), Val::Object(input))]
            .into_iter()
            .collect(),
        subfields,
    }
}

fn resolver(
    system: Arc<ModelSystem>,
    connection: Arc<ScriptedConnection>,
    id: &'static str,
) -> MutationResolver {
    MutationResolver::new(system, connection, Duration::from_secs(5))
        .with_id_generator(Box::new(FixedIdGenerator(id)))
}

#[test_log::test(tokio::test)]
async fn create_returns_only_selected_fields() {
    let connection = Arc::new(ScriptedConnection::new(vec![
        vec![row(json!({"id": "generated-id"}))],
        vec![row(json!({
            "__id": "generated-id",
            "node": {"id": "generated-id", "firstName": "Bob", "age": 43}
        }))],
    ]));

    let resolver = resolver(person_skill_system(), connection.clone(), "generated-id");

    let response = resolver
        .resolve(&mutation_field(
            "createPerson",
            vec![
                ("firstName", Val::from("Bob")),
                ("lastName", Val::from("Belcher")),
                ("age", Val::from(43)),
            ],
            vec![leaf("id"), leaf("firstName"), leaf("age")],
        ))
        .await
        .unwrap();

    // lastName was written but not selected
    assert_eq!(
        response,
        json!({"id": "generated-id", "firstName": "Bob", "age": 43})
    );

    let statements = connection.statement_log();
    assert_eq!(statements.len(), 2);
    assert_eq!(
        statements[0].text,
        "CREATE (node:`Person`) SET node = $p0 RETURN node.`id` AS `id`"
    );
    assert_eq!(
        statements[0].params[0].1,
        json!({
            "id": "generated-id",
            "firstName": "Bob",
            "lastName": "Belcher",
            "age": 43
        })
    );
    assert!(connection.committed());
    assert!(!connection.rolled_back());
}

#[test_log::test(tokio::test)]
async fn update_returns_existing_relations_in_creation_order() {
    let skills = ["devops", "typescript", "graph databases", "graphql", "react"];
    let skill_rows = skills
        .iter()
        .enumerate()
        .map(|(index, name)| {
            row(json!({
                "__parent_id": "p1",
                "__id": format!("s{index}"),
                "node": {"id": format!("s{index}"), "name": name}
            }))
        })
        .collect();

    let connection = Arc::new(ScriptedConnection::new(vec![
        vec![row(json!({"id": "p1"}))],
        vec![row(json!({
            "__id": "p1",
            "node": {"id": "p1", "lastName": "Gruber"}
        }))],
        skill_rows,
    ]));

    let resolver = resolver(person_skill_system(), connection.clone(), "unused");

    let response = resolver
        .resolve(&mutation_field(
            "updatePerson",
            vec![("id", Val::from("p1")), ("lastName", Val::from("Gruber"))],
            vec![
                leaf("id"),
                leaf("lastName"),
                ValidatedField {
                    alias: None,
                    name: "skills".to_string(),
                    arguments: IndexMap::new(),
                    subfields: vec![leaf("id"), leaf("name")],
                },
            ],
        ))
        .await
        .unwrap();

    assert_eq!(response["lastName"], json!("Gruber"));
    let shaped_skills: Vec<_> = response["skills"]
        .as_array()
        .unwrap()
        .iter()
        .map(|skill| skill["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(shaped_skills, skills);

    let statements = connection.statement_log();
    assert_eq!(statements.len(), 3);
    assert!(statements[2].text.contains("-[r0:`HAS_SKILL`]->"));
    // Relation traversal is explicitly ordered so successive identical
    // requests cannot re-order the collection
    assert!(statements[2].text.ends_with("ORDER BY id(r0)"));
    assert!(connection.committed());
}

#[test_log::test(tokio::test)]
async fn bind_error_issues_no_transaction() {
    let connection = Arc::new(ScriptedConnection::new(vec![]));
    let resolver = resolver(person_skill_system(), connection.clone(), "unused");

    let err = resolver
        .resolve(&mutation_field(
            "createPerson",
            vec![
                ("firstName", Val::from("Bob")),
                ("lastName", Val::from("Belcher")),
                ("age", Val::from(43)),
                ("favoriteColor", Val::from("blue")),
            ],
            vec![leaf("id")],
        ))
        .await
        .unwrap_err();

    assert!(matches!(err, ExecutionError::Bind(_)));
    assert!(connection.statement_log().is_empty());
    assert!(!connection.committed());
    assert!(!connection.rolled_back());
}

#[test_log::test(tokio::test)]
async fn update_of_missing_entity_is_not_found() {
    let connection = Arc::new(ScriptedConnection::new(vec![
        // The write step matches nothing
        vec![],
        vec![],
    ]));

    let resolver = resolver(person_skill_system(), connection.clone(), "unused");

    let err = resolver
        .resolve(&mutation_field(
            "updatePerson",
            vec![
                ("id", Val::from("missing-id")),
                ("lastName", Val::from("Gruber")),
            ],
            vec![leaf("id")],
        ))
        .await
        .unwrap_err();

    match err {
        ExecutionError::EntityNotFound { typ, id } => {
            assert_eq!(typ, "Person");
            assert_eq!(id, "missing-id");
        }
        other => panic!("Expected EntityNotFound, got {other:?}"),
    }
}

#[test_log::test(tokio::test)]
async fn store_failure_rolls_back_and_hides_details() {
    // No scripted responses: the first query fails at the store level
    let connection = Arc::new(ScriptedConnection::new(vec![]));
    let resolver = resolver(person_skill_system(), connection.clone(), "generated-id");

    let err = resolver
        .resolve(&mutation_field(
            "createPerson",
            vec![
                ("firstName", Val::from("Bob")),
                ("lastName", Val::from("Belcher")),
                ("age", Val::from(43)),
            ],
            vec![leaf("id")],
        ))
        .await
        .unwrap_err();

    assert!(matches!(err, ExecutionError::Graph(_)));
    assert_eq!(err.user_error_message(), "Operation failed");
    assert!(connection.rolled_back());
    assert!(!connection.committed());
}

#[test_log::test(tokio::test)]
async fn create_without_input_argument_is_rejected() {
    let connection = Arc::new(ScriptedConnection::new(vec![]));
    let resolver = resolver(person_skill_system(), connection.clone(), "unused");

    let err = resolver
        .resolve(&ValidatedField {
            alias: None,
            name: "createPerson".to_string(),
            arguments: IndexMap::new(),
            subfields: vec![leaf("id")],
        })
        .await
        .unwrap_err();

    assert!(matches!(err, ExecutionError::MissingArgument(argument) if argument == "input"));
    assert!(connection.statement_log().is_empty());
    assert!(!connection.committed());
}

#[test_log::test(tokio::test)]
async fn update_with_only_identifier_returns_current_state() {
    let connection = Arc::new(ScriptedConnection::new(vec![
        vec![row(json!({"id": "p1"}))],
        vec![row(json!({
            "__id": "p1",
            "node": {"id": "p1", "lastName": "Gruber"}
        }))],
        vec![row(json!({
            "__parent_id": "p1",
            "__id": "s0",
            "node": {"id": "s0", "name": "devops"}
        }))],
    ]));

    let resolver = resolver(person_skill_system(), connection.clone(), "unused");

    let response = resolver
        .resolve(&mutation_field(
            "updatePerson",
            vec![("id", Val::from("p1"))],
            vec![
                leaf("id"),
                leaf("lastName"),
                ValidatedField {
                    alias: None,
                    name: "skills".to_string(),
                    arguments: IndexMap::new(),
                    subfields: vec![leaf("name")],
                },
            ],
        ))
        .await
        .unwrap();

    assert_eq!(
        response,
        json!({
            "id": "p1",
            "lastName": "Gruber",
            "skills": [{"name": "devops"}]
        })
    );

    // The no-op write still verifies existence, without a SET clause
    let statements = connection.statement_log();
    assert_eq!(
        statements[0].text,
        "MATCH (node:`Person` {`id`: $p0}) RETURN node.`id` AS `id`"
    );
    assert!(connection.committed());
    assert!(!connection.rolled_back());
}

/// A connection whose queries never complete, for exercising the transaction
/// deadline
struct HangingConnection {
    rolled_back: Arc<AtomicBool>,
}

#[async_trait]
impl GraphConnection for HangingConnection {
    async fn transaction(&self) -> Result<Box<dyn GraphTransaction>, GraphError> {
        Ok(Box::new(HangingTransaction {
            rolled_back: self.rolled_back.clone(),
        }))
    }
}

struct HangingTransaction {
    rolled_back: Arc<AtomicBool>,
}

#[async_trait]
impl GraphTransaction for HangingTransaction {
    async fn query(
        &mut self,
        _statement: &CypherStatement,
    ) -> Result<TransactionStepResult, GraphError> {
        std::future::pending().await
    }

    async fn commit(self: Box<Self>) -> Result<(), GraphError> {
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), GraphError> {
        self.rolled_back.store(true, Ordering::SeqCst);
        Ok(())
    }
}

#[test_log::test(tokio::test)]
async fn exceeding_the_transaction_deadline_rolls_back() {
    let rolled_back = Arc::new(AtomicBool::new(false));
    let connection = Arc::new(HangingConnection {
        rolled_back: rolled_back.clone(),
    });

    let resolver =
        MutationResolver::new(person_skill_system(), connection, Duration::from_millis(20))
            .with_id_generator(Box::new(FixedIdGenerator("generated-id")));

    let err = resolver
        .resolve(&mutation_field(
            "createPerson",
            vec![
                ("firstName", Val::from("Bob")),
                ("lastName", Val::from("Belcher")),
                ("age", Val::from(43)),
            ],
            vec![leaf("id")],
        ))
        .await
        .unwrap_err();

    match err {
        ExecutionError::Graph(graph_error) => {
            assert!(matches!(graph_error, GraphError::Timeout(_)));
            assert!(graph_error.is_retriable());
        }
        other => panic!("Expected a timeout, got {other:?}"),
    }
    assert!(rolled_back.load(Ordering::SeqCst));
}

#[test_log::test(tokio::test)]
async fn unknown_mutation_is_rejected() {
    let connection = Arc::new(ScriptedConnection::new(vec![]));
    let resolver = resolver(person_skill_system(), connection.clone(), "unused");

    let err = resolver
        .resolve(&mutation_field("deletePerson", vec![], vec![leaf("id")]))
        .await
        .unwrap_err();

    assert!(matches!(err, ExecutionError::UnknownMutation(name) if name == "deletePerson"));
}
