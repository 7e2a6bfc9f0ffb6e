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

use std::fmt::Debug;

use async_trait::async_trait;

use tf_provider::{AttributePath, DataSource, Diagnostics, Schema, ValueEmpty};

use crate::client::{ClientSlot, CloudLookup};
use crate::utils::{WithSchema, WithValidate};

use super::error::ReadError;
use super::state::CloudState;

#[derive(Debug, Default)]
pub struct CloudDataSource<C: CloudLookup> {
    client: ClientSlot<C>,
}

impl<C: CloudLookup> CloudDataSource<C> {
    pub fn new(client: ClientSlot<C>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<C> DataSource for CloudDataSource<C>
where
    C: CloudLookup,
    C: Debug,
{
    type State<'a> = CloudState<'a>;
    type ProviderMetaState<'a> = ValueEmpty;

    fn schema(&self, _diags: &mut Diagnostics) -> Option<Schema> {
        Some(CloudState::schema())
    }

    async fn validate<'a>(&self, diags: &mut Diagnostics, config: Self::State<'a>) -> Option<()> {
        config.validate(diags, AttributePath::default()).await;

        if diags.errors.is_empty() {
            Some(())
        } else {
            None
        }
    }

    async fn read<'a>(
        &self,
        diags: &mut Diagnostics,
        config: Self::State<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<Self::State<'a>> {
        let client = match self.client.get() {
            Ok(client) => client,
            Err(err) => {
                ReadError::from(err).report(diags);
                return None;
            }
        };

        let mut state = config.clone();
        state.read(diags, client).await?;

        Some(state)
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use tf_provider::value::Value;

    use crate::client::Cloud;

    use super::super::fake::{Call, FakeClient};
    use super::*;

    #[tokio::test]
    async fn unconfigured_provider() {
        let data_source = CloudDataSource::<FakeClient>::new(ClientSlot::default());
        let mut diags = Diagnostics::default();
        let config = CloudState {
            id: Value::Value(42),
            ..Default::default()
        };

        let state = DataSource::read(&data_source, &mut diags, config, ValueEmpty::default()).await;
        assert_eq!(state, None);
        assert_eq!(diags.errors.len(), 1);
    }

    #[tokio::test]
    async fn read_through_shared_slot() {
        let slot = ClientSlot::default();
        let data_source = CloudDataSource::new(slot.clone());
        slot.set(FakeClient::returning(Ok(Some(Cloud {
            id: 42,
            name: "prod-cloud".into(),
            ..Default::default()
        }))))
        .unwrap();

        let mut diags = Diagnostics::default();
        let config = CloudState {
            name: Value::Value(Cow::Borrowed("prod-cloud")),
            ..Default::default()
        };
        let state = DataSource::read(&data_source, &mut diags, config, ValueEmpty::default())
            .await
            .unwrap();

        assert!(diags.errors.is_empty());
        assert_eq!(state.id, Value::Value(42));
        assert_eq!(
            slot.get().unwrap().calls(),
            vec![Call::FindCloudByName("prod-cloud".into())]
        );
    }
}
