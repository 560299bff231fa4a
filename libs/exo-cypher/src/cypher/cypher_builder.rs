// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use super::statement::CypherStatement;

/// Build a Cypher statement by pushing text fragments and parameters.
pub struct CypherBuilder {
    /// The Cypher text being built, with placeholders for each parameter
    text: String,
    /// The list of parameter values (the i-th value backs the `$p<i>` placeholder)
    params: Vec<serde_json::Value>,
}

/// An element that knows how to render itself into a [`CypherBuilder`].
pub trait ExpressionBuilder {
    fn build(&self, builder: &mut CypherBuilder);
}

impl CypherBuilder {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            params: Vec::new(),
        }
    }

    /// Push a string
    pub fn push_str<T: AsRef<str>>(&mut self, s: T) {
        self.text.push_str(s.as_ref());
    }

    /// Push a character
    pub fn push(&mut self, c: char) {
        self.text.push(c);
    }

    /// Push a space. This is a common operation, so it is provided as a separate method.
    pub fn push_space(&mut self) {
        self.text.push(' ');
    }

    /// Push a backtick-quoted identifier (label, relationship type, property
    /// name). Without the quotes, identifiers that collide with Cypher
    /// keywords or contain unusual characters would be misparsed.
    pub fn push_identifier<T: AsRef<str>>(&mut self, s: T) {
        self.text.push('`');
        self.text.push_str(s.as_ref());
        self.text.push('`');
    }

    /// Push a property access such as `` node.`firstName` ``.
    pub fn push_property<T: AsRef<str>>(&mut self, variable: T, property: T) {
        self.push_str(variable);
        self.push('.');
        self.push_identifier(property);
    }

    /// Push a parameter, which will be replaced with a `$p<n>` placeholder in
    /// the statement text, with the value added to the parameter list.
    pub fn push_param(&mut self, param: serde_json::Value) {
        self.text.push_str("$p");
        self.text.push_str(&self.params.len().to_string());
        self.params.push(param);
    }

    /// Push elements of an iterator, separated by `sep`.
    pub fn push_iter<T>(
        &mut self,
        iter: impl ExactSizeIterator<Item = T>,
        sep: &str,
        push_elem: impl Fn(&mut Self, T),
    ) {
        let len = iter.len();
        for (i, item) in iter.enumerate() {
            push_elem(self, item);

            if i < len - 1 {
                self.text.push_str(sep);
            }
        }
    }

    /// Get the rendered statement. Calling this method should be the final step
    /// in building a Cypher expression, and thus this builder consumes `self`.
    pub fn into_statement(self) -> CypherStatement {
        let params = self
            .params
            .into_iter()
            .enumerate()
            .map(|(i, value)| (format!("p{i}"), value))
            .collect();

        CypherStatement {
            text: self.text,
            params,
        }
    }
}
