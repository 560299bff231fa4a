// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod insert_transformer;
mod select_transformer;
mod update_transformer;

use crate::{
    acypher::abstract_operation::AbstractOperation, cypher::schema::GraphSchema,
};

use super::transformer::{OperationTransformer, TranscribedOperation};

pub struct Neo4j {}

impl OperationTransformer for Neo4j {
    fn to_transaction_script(
        &self,
        operation: &AbstractOperation,
        schema: &GraphSchema,
    ) -> TranscribedOperation {
        match operation {
            AbstractOperation::Insert(insert) => {
                insert_transformer::to_transaction_script(insert, schema)
            }
            AbstractOperation::Update(update) => {
                update_transformer::to_transaction_script(update, schema)
            }
        }
    }
}
