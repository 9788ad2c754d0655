// Copyright 2025 The Drasi Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Merge engine for collection documents.
//!
//! Merging is append-only and keyed by endpoint entry name: every entry of
//! the base collection survives unchanged and in order, and entries of the
//! incoming collection whose names the base does not already contain are
//! appended in their incoming order.

use std::collections::HashSet;

use crate::model::Collection;

/// Result of merging an incoming collection into a base collection.
#[derive(Debug)]
pub struct MergeOutcome {
    /// The base collection with new entries appended.
    pub collection: Collection,
    /// How many entries were appended. Zero means the upload carried no new
    /// endpoints and nothing should be stored.
    pub added: usize,
}

/// Merge `incoming` into `base`, deduplicating by entry name.
///
/// The name set is built from `base` only and is not extended while
/// iterating, so duplicate names within `incoming` that are absent from
/// `base` are each appended. Callers that need stricter behavior must
/// deduplicate `incoming` first.
pub fn merge(base: Collection, incoming: Collection) -> MergeOutcome {
    let known: HashSet<&str> = base.items.iter().map(|item| item.name.as_str()).collect();

    let mut appended = Vec::new();
    for item in incoming.items {
        if known.contains(item.name.as_str()) {
            continue;
        }
        appended.push(item);
    }

    let added = appended.len();
    let mut collection = base;
    collection.items.extend(appended);

    MergeOutcome { collection, added }
}
