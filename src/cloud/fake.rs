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

use std::sync::Mutex;

use async_trait::async_trait;

use crate::client::{CloudLookup, LookupResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    GetCloud(i64),
    FindCloudByName(String),
}

/// In-memory appliance answering every lookup with the same result
#[derive(Debug)]
pub struct FakeClient {
    response: LookupResult,
    calls: Mutex<Vec<Call>>,
}

impl FakeClient {
    pub fn returning(response: LookupResult) -> Self {
        Self {
            response,
            calls: Default::default(),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CloudLookup for FakeClient {
    async fn get_cloud(&self, id: i64) -> LookupResult {
        self.calls.lock().unwrap().push(Call::GetCloud(id));
        self.response.clone()
    }

    async fn find_cloud_by_name(&self, name: &str) -> LookupResult {
        self.calls
            .lock()
            .unwrap()
            .push(Call::FindCloudByName(name.to_owned()));
        self.response.clone()
    }
}
