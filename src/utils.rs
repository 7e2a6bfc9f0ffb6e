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

use std::cell::Cell;

use async_trait::async_trait;

use tf_provider::{AttributePath, Diagnostics, Schema};

/// Static schema of a configuration or state block
pub(crate) trait WithSchema {
    fn schema() -> Schema;
}

/// Checks that only need the configuration itself
#[async_trait]
pub(crate) trait WithValidate {
    async fn validate(&self, diags: &mut Diagnostics, attr_path: AttributePath);
}

/// Items of an iterator displayed separated by `sep`
///
/// The iterator is consumed by the first display.
pub(crate) struct Joined<'a, I> {
    items: Cell<Option<I>>,
    sep: &'a str,
}

pub(crate) trait JoinWith: Iterator + Sized {
    fn join_with(self, sep: &str) -> Joined<'_, Self> {
        Joined {
            items: Cell::new(Some(self)),
            sep,
        }
    }
}

impl<I: Iterator> JoinWith for I {}

impl<I> std::fmt::Display for Joined<'_, I>
where
    I: Iterator,
    I::Item: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let items = self.items.take().ok_or(std::fmt::Error)?;
        for (i, item) in items.enumerate() {
            if i > 0 {
                f.write_str(self.sep)?;
            }
            write!(f, "{item}")?;
        }
        Ok(())
    }
}
