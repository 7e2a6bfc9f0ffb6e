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

use async_trait::async_trait;
use tracing::{info, warn};

use tf_provider::{map, AttributePath, Diagnostics, Provider, Schema, ValueEmpty};

use crate::{
    client::{ClientSlot, MorpheusClient},
    cloud::CloudDataSource,
    config::ProviderConfig,
    utils::{WithSchema, WithValidate},
};

#[derive(Debug, Default, Clone)]
pub struct MorpheusProvider {
    client: ClientSlot<MorpheusClient>,
}

#[async_trait]
impl Provider for MorpheusProvider {
    type Config<'a> = ProviderConfig<'a>;
    type MetaState<'a> = ValueEmpty;

    fn schema(&self, _diags: &mut Diagnostics) -> Option<Schema> {
        Some(ProviderConfig::schema())
    }

    async fn validate<'a>(&self, diags: &mut Diagnostics, config: Self::Config<'a>) -> Option<()> {
        config.validate(diags, AttributePath::default()).await;

        if diags.errors.is_empty() {
            Some(())
        } else {
            None
        }
    }

    async fn configure<'a>(
        &self,
        diags: &mut Diagnostics,
        terraform_version: String,
        config: Self::Config<'a>,
    ) -> Option<()> {
        let client_config = config.client_config(diags)?;
        info!(%terraform_version, url = %client_config.url, "configuring Morpheus provider");

        let client = match MorpheusClient::connect(client_config).await {
            Ok(client) => client,
            Err(err) => {
                diags.root_error("Unable to create Morpheus client", err.to_string());
                return None;
            }
        };

        if let Err(err) = self.client.set(client) {
            warn!(%err, "provider configured twice");
            diags.root_warning("Provider already configured", err.to_string());
        }
        Some(())
    }

    fn get_resources(
        &self,
        _diags: &mut Diagnostics,
    ) -> Option<std::collections::HashMap<String, Box<dyn tf_provider::resource::DynamicResource>>>
    {
        Some(map! {})
    }

    fn get_data_sources(
        &self,
        _diags: &mut Diagnostics,
    ) -> Option<
        std::collections::HashMap<String, Box<dyn tf_provider::data_source::DynamicDataSource>>,
    > {
        Some(map! {
            "cloud" => CloudDataSource::new(self.client.clone()),
        })
    }
}
