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

use tf_provider::{AttributePath, Diagnostics};

use crate::client::ConfigurationError;

/// Every condition a cloud read can end up in, short of success
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReadError {
    #[error("Cloud cannot be read without name or id")]
    MissingIdentity,
    #[error("{}", transport_detail(.status, .message))]
    Transport {
        status: Option<u16>,
        message: String,
    },
    #[error("Cloud not found in response data")]
    NotFound,
    #[error("Value {value} of `{attribute}` does not fit in a 32-bit integer")]
    Conversion {
        attribute: &'static str,
        value: i64,
    },
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

fn transport_detail(status: &Option<u16>, message: &str) -> String {
    match status {
        Some(status) => format!("Status code {status}, err {message}"),
        None => message.to_owned(),
    }
}

impl ReadError {
    pub fn summary(&self) -> &'static str {
        match self {
            ReadError::MissingIdentity => "Missing data",
            ReadError::Transport {
                status: Some(_), ..
            } => "API Returned Error",
            ReadError::Transport { status: None, .. } => "API Failure",
            ReadError::NotFound => "Not Found",
            ReadError::Conversion { .. } => "Value Conversion Error",
            ReadError::Configuration(_) => "Unconfigured Provider",
        }
    }

    pub fn detail(&self) -> String {
        self.to_string()
    }

    /// Append this error to `diags`, attached to the attribute it concerns if any
    pub fn report(&self, diags: &mut Diagnostics) {
        match self {
            ReadError::Conversion { attribute, .. } => {
                diags.error(self.summary(), self.detail(), AttributePath::new(*attribute));
            }
            _ => {
                diags.root_error(self.summary(), self.detail());
            }
        }
    }
}
