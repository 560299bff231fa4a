// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use thiserror::Error;

use exo_cypher::PropertyType;

use crate::value::Val;

#[derive(Error, Debug)]
pub enum CastError {
    #[error("Expected a {expected} value, got `{value}`")]
    Type { expected: &'static str, value: String },
}

/// Cast an argument value to the store representation of the declared
/// property type. Strict: an `Int` property accepts only integral numbers, a
/// `Float` property accepts any number.
pub fn cast_value(value: &Val, typ: PropertyType) -> Result<serde_json::Value, CastError> {
    let mismatch = || CastError::Type {
        expected: typ.type_string(),
        value: value.to_string(),
    };

    match (value, typ) {
        (Val::String(s), PropertyType::String) => Ok(serde_json::Value::String(s.clone())),
        (Val::Bool(b), PropertyType::Boolean) => Ok(serde_json::Value::Bool(*b)),
        (Val::Number(n), PropertyType::Int) => n
            .as_i64()
            .map(|n| serde_json::Value::Number(n.into()))
            .ok_or_else(mismatch),
        (Val::Number(n), PropertyType::Float) => n
            .as_f64()
            .and_then(serde_json::Number::from_f64)
            .map(serde_json::Value::Number)
            .ok_or_else(mismatch),
        _ => Err(mismatch()),
    }
}
