// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use crate::{
    acypher::{abstract_operation::AbstractOperation, projection::ReadProjection},
    cypher::schema::GraphSchema,
    cypher::transaction::{TransactionScript, TransactionStepId},
};

/// A transaction script along with the bookkeeping needed to interpret its
/// results: which step performed the write, and how the remaining steps map
/// back to the caller's selection.
#[derive(Debug)]
pub struct TranscribedOperation {
    pub script: TransactionScript,
    pub write_step_id: TransactionStepId,
    pub projection: ReadProjection,
}

pub trait OperationTransformer {
    fn to_transaction_script(
        &self,
        operation: &AbstractOperation,
        schema: &GraphSchema,
    ) -> TranscribedOperation;
}
