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

use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use serde::{Deserialize, Deserializer};

mod morpheus;
#[cfg(test)]
pub(crate) mod test_server;

pub use morpheus::{ClientConfig, Credentials, MorpheusClient};

/// A cloud (`zone` in the Morpheus API) as returned by the appliance
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cloud {
    pub id: i64,
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub code: String,
    #[serde(default, deserialize_with = "nullable")]
    pub location: String,
    #[serde(default, deserialize_with = "nullable")]
    pub external_id: String,
    #[serde(default, deserialize_with = "nullable")]
    pub inventory_level: String,
    #[serde(default, deserialize_with = "nullable")]
    pub guidance_mode: String,
    #[serde(rename = "timezone", default, deserialize_with = "nullable")]
    pub time_zone: String,
    #[serde(default, deserialize_with = "nullable")]
    pub costing_mode: String,
    #[serde(default, deserialize_with = "nullable")]
    pub labels: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub groups: Vec<GroupRef>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
pub struct GroupRef {
    pub id: i64,
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
}

/// Failure of a call to the appliance
///
/// `status` is set whenever the appliance answered with an HTTP status,
/// and is `None` when no response was obtained at all.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    pub status: Option<u16>,
    pub message: String,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
        }
    }

    pub fn with_status(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            message: message.into(),
        }
    }
}

/// Result of a single lookup: `Ok(None)` when the call succeeded without yielding a cloud
pub type LookupResult = Result<Option<Cloud>, ApiError>;

#[async_trait]
pub trait CloudLookup: Send + Sync + 'static {
    /// Fetch a cloud by its numeric id
    async fn get_cloud(&self, id: i64) -> LookupResult;

    /// Fetch the cloud with the given name
    async fn find_cloud_by_name(&self, name: &str) -> LookupResult;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("The Morpheus client is not available: the provider has not been configured yet")]
    Unconfigured,
    #[error("The provider has already been configured, the new configuration is ignored")]
    AlreadyConfigured,
}

/// Client handle set once by the provider configuration and shared with its data sources
#[derive(Debug)]
pub struct ClientSlot<C>(Arc<OnceLock<C>>);

impl<C> Default for ClientSlot<C> {
    fn default() -> Self {
        Self(Default::default())
    }
}

impl<C> Clone for ClientSlot<C> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<C> ClientSlot<C> {
    pub fn set(&self, client: C) -> Result<(), ConfigurationError> {
        self.0
            .set(client)
            .map_err(|_| ConfigurationError::AlreadyConfigured)
    }

    pub fn get(&self) -> Result<&C, ConfigurationError> {
        self.0.get().ok_or(ConfigurationError::Unconfigured)
    }
}

fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
