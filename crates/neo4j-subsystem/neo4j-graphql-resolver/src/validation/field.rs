// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use indexmap::IndexMap;
use serde::Serialize;

use crate::value::Val;

/// A field of a request, validated against the schema by the GraphQL layer.
/// This is the shape a GraphQL execution library hands to a resolver; this
/// engine is agnostic to the transport it arrived over.
#[derive(Debug, Serialize)]
pub struct ValidatedField {
    pub alias: Option<String>,
    /// The name of the field.
    pub name: String,
    /// The arguments to the field, empty if no arguments are provided.
    pub arguments: IndexMap<String, Val>,

    /// The subfields being selected in this field, if it is an object. Empty if no fields are
    /// being selected.
    pub subfields: Vec<ValidatedField>,
}

impl ValidatedField {
    pub fn output_name(&self) -> String {
        self.alias.clone().unwrap_or_else(|| self.name.clone())
    }
}
