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
use tf_provider::{value::Value, AttributePath, Diagnostics};

use crate::utils::WithValidate;

use super::state::CloudState;

#[async_trait]
impl<'a> WithValidate for CloudState<'a> {
    async fn validate(&self, diags: &mut Diagnostics, attr_path: AttributePath) {
        if self.id.is_null() && self.name.is_null() {
            diags.error_short(
                "Cloud cannot be read without name or id",
                attr_path.clone(),
            );
        }
        if let Value::Value(id) = self.id {
            if id <= 0 {
                diags.error(
                    "`id` must be positive",
                    format!("Cloud ids start at 1, got {id}."),
                    attr_path.clone().attribute("id"),
                );
            }
        }
        if let Value::Value(name) = &self.name {
            if name.is_empty() {
                diags.error_short("`name` must not be empty", attr_path.attribute("name"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use super::*;

    async fn validate(state: CloudState<'_>) -> Diagnostics {
        let mut diags = Diagnostics::default();
        state.validate(&mut diags, AttributePath::default()).await;
        diags
    }

    #[tokio::test]
    async fn accepts_id_or_name() {
        let by_id = CloudState {
            id: Value::Value(42),
            ..Default::default()
        };
        assert!(validate(by_id).await.errors.is_empty());

        let by_name = CloudState {
            name: Value::Value(Cow::Borrowed("prod-cloud")),
            ..Default::default()
        };
        assert!(validate(by_name).await.errors.is_empty());

        let not_yet_known = CloudState {
            id: Value::Unknown,
            ..Default::default()
        };
        assert!(validate(not_yet_known).await.errors.is_empty());
    }

    #[tokio::test]
    async fn rejects_unusable_identity() {
        assert_eq!(validate(CloudState::default()).await.errors.len(), 1);

        let state = CloudState {
            id: Value::Value(-1),
            name: Value::Value(Cow::Borrowed("")),
            ..Default::default()
        };
        assert_eq!(validate(state).await.errors.len(), 2);
    }
}
