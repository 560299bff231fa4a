// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Map the raw rows of a mutation's transaction into the nested object the
//! caller asked for. Pure mapping: scalars are copied verbatim under their
//! aliases, relation fields group their step's rows by parent identifier in
//! row order, and a many-relation with no rows shapes to an empty array,
//! never null.

use thiserror::Error;

use exo_cypher::{
    ProjectionField, ProjectionNode, RawResult, Row, SelectionCardinality, ID_COLUMN, NODE_COLUMN,
    PARENT_ID_COLUMN,
};

#[derive(Error, Debug)]
pub enum ShapeError {
    #[error("Read-back returned no rows")]
    MissingRow,

    #[error("Missing column `{0}` in a result row")]
    MissingColumn(&'static str),
}

pub fn shape(raw: &RawResult) -> Result<serde_json::Value, ShapeError> {
    let root_rows = raw.rows(raw.projection.root.step_id);
    let row = root_rows.first().ok_or(ShapeError::MissingRow)?;

    shape_node(raw, &raw.projection.root, row)
}

fn shape_node(
    raw: &RawResult,
    node: &ProjectionNode,
    row: &Row,
) -> Result<serde_json::Value, ShapeError> {
    let scalars = row
        .get(NODE_COLUMN)
        .and_then(|value| value.as_object())
        .ok_or(ShapeError::MissingColumn(NODE_COLUMN))?;

    let mut shaped = serde_json::Map::new();

    for field in &node.fields {
        match field {
            ProjectionField::Scalar(alias) => {
                shaped.insert(
                    alias.clone(),
                    scalars.get(alias).cloned().unwrap_or(serde_json::Value::Null),
                );
            }
            ProjectionField::Relation(relation) => {
                let parent_id = row.get(ID_COLUMN).ok_or(ShapeError::MissingColumn(ID_COLUMN))?;

                let children: Vec<serde_json::Value> = raw
                    .rows(relation.node.step_id)
                    .iter()
                    .filter(|child| child.get(PARENT_ID_COLUMN) == Some(parent_id))
                    .map(|child| shape_node(raw, &relation.node, child))
                    .collect::<Result<_, _>>()?;

                let value = match relation.cardinality {
                    SelectionCardinality::Many => serde_json::Value::Array(children),
                    SelectionCardinality::One => children
                        .into_iter()
                        .next()
                        .unwrap_or(serde_json::Value::Null),
                };

                shaped.insert(relation.alias.clone(), value);
            }
        }
    }

    Ok(serde_json::Value::Object(shaped))
}
