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

use crate::client::{CloudLookup, LookupResult};

use super::error::ReadError;

/// Partial key of a cloud, as given in the data source configuration
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: Option<i64>,
    pub name: Option<String>,
}

/// The single call issued to the appliance for an [`Identity`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<'a> {
    ById(i64),
    ByName(&'a str),
}

impl Identity {
    /// Pick the lookup strategy: a positive id always wins over the name
    pub fn lookup(&self) -> Result<Lookup<'_>, ReadError> {
        match (self.id, self.name.as_deref()) {
            (Some(id), _) if id > 0 => Ok(Lookup::ById(id)),
            (_, Some(name)) if !name.is_empty() => Ok(Lookup::ByName(name)),
            _ => Err(ReadError::MissingIdentity),
        }
    }
}

impl<'a> Lookup<'a> {
    pub async fn run<C: CloudLookup>(self, client: &C) -> LookupResult {
        match self {
            Lookup::ById(id) => client.get_cloud(id).await,
            Lookup::ByName(name) => client.find_cloud_by_name(name).await,
        }
    }
}
