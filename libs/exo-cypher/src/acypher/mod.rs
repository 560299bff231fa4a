// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

pub(crate) mod abstract_operation;
pub(crate) mod graph_executor;
pub(crate) mod insert;
pub(crate) mod projection;
pub(crate) mod select;
pub(crate) mod selection;
pub(crate) mod update;
