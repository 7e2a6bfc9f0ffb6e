// This file is part of the terraform-provider-morpheus project
//
// Copyright (C) ANEO, 2024-2024. All rights reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License")
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

use std::collections::BTreeSet;

use crate::client::{Cloud, LookupResult};

use super::error::ReadError;

/// Typed projection of a [`Cloud`], shaped like the `morpheus_cloud` schema
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CloudRecord {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub location: String,
    pub external_id: String,
    pub inventory_level: String,
    pub guidance_mode: String,
    pub time_zone: String,
    pub costing_mode: String,
    pub labels: BTreeSet<String>,
    pub group_ids: BTreeSet<i32>,
}

impl CloudRecord {
    /// Build the record, along with one error per value that could not be converted
    ///
    /// Group ids are 32-bit in the schema: an id out of range is reported and
    /// left out of the set instead of being truncated.
    pub fn from_cloud(cloud: &Cloud) -> (Self, Vec<ReadError>) {
        let mut errors = Vec::new();

        let group_ids = cloud
            .groups
            .iter()
            .filter_map(|group| match i32::try_from(group.id) {
                Ok(id) => Some(id),
                Err(_) => {
                    errors.push(ReadError::Conversion {
                        attribute: "group_ids",
                        value: group.id,
                    });
                    None
                }
            })
            .collect();

        let record = Self {
            id: cloud.id,
            name: cloud.name.clone(),
            code: cloud.code.clone(),
            location: cloud.location.clone(),
            external_id: cloud.external_id.clone(),
            inventory_level: cloud.inventory_level.clone(),
            guidance_mode: cloud.guidance_mode.clone(),
            time_zone: cloud.time_zone.clone(),
            costing_mode: cloud.costing_mode.clone(),
            labels: cloud.labels.iter().cloned().collect(),
            group_ids,
        };

        (record, errors)
    }
}

/// Classify the outcome of a lookup
///
/// Transport failures and missing clouds stop the mapping. Conversion errors
/// do not: the record is still produced so the caller can inspect it.
pub fn map_lookup(result: LookupResult) -> Result<(CloudRecord, Vec<ReadError>), ReadError> {
    match result {
        Err(err) => Err(ReadError::Transport {
            status: err.status,
            message: err.message,
        }),
        Ok(None) => Err(ReadError::NotFound),
        Ok(Some(cloud)) => Ok(CloudRecord::from_cloud(&cloud)),
    }
}
