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
use serde::{Deserialize, Serialize};
use tf_provider::schema::{Attribute, AttributeConstraint, AttributeType};
use tf_provider::value::{Value, ValueString};
use tf_provider::{map, AttributePath, Block, Description, Diagnostics, Schema};

use crate::client::{ClientConfig, Credentials};
use crate::utils::{WithSchema, WithValidate};

const ENV_URL: &str = "MORPHEUS_API_URL";
const ENV_ACCESS_TOKEN: &str = "MORPHEUS_API_TOKEN";
const ENV_TENANT_SUBDOMAIN: &str = "MORPHEUS_TENANT_SUBDOMAIN";
const ENV_USERNAME: &str = "MORPHEUS_API_USERNAME";
const ENV_PASSWORD: &str = "MORPHEUS_API_PASSWORD";
const ENV_INSECURE: &str = "MORPHEUS_INSECURE";

/// Content of the `provider "morpheus"` block
#[derive(Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig<'a> {
    #[serde(borrow = "'a")]
    pub url: ValueString<'a>,
    #[serde(borrow = "'a")]
    pub access_token: ValueString<'a>,
    #[serde(borrow = "'a")]
    pub tenant_subdomain: ValueString<'a>,
    #[serde(borrow = "'a")]
    pub username: ValueString<'a>,
    #[serde(borrow = "'a")]
    pub password: ValueString<'a>,
    pub insecure: Value<bool>,
}

impl std::fmt::Debug for ProviderConfig<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("url", &self.url)
            .field("access_token", &redacted(&self.access_token))
            .field("tenant_subdomain", &self.tenant_subdomain)
            .field("username", &self.username)
            .field("password", &redacted(&self.password))
            .field("insecure", &self.insecure)
            .finish()
    }
}

fn redacted(value: &ValueString) -> &'static str {
    match value {
        Value::Value(_) => "***",
        Value::Null => "null",
        Value::Unknown => "unknown",
    }
}

fn attribute(description: &str, constraint: AttributeConstraint, sensitive: bool) -> Attribute {
    Attribute {
        attr_type: AttributeType::String,
        description: Description::plain(description),
        constraint,
        sensitive,
        deprecated: false,
    }
}

impl<'a> WithSchema for ProviderConfig<'a> {
    fn schema() -> Schema {
        Schema {
            version: 1,
            block: Block {
                version: 1,
                description: Description::plain("morpheus"),
                attributes: map! {
                    "url" => attribute(
                        "The URL of the Morpheus Data Appliance where requests will be directed.",
                        AttributeConstraint::Optional,
                        false,
                    ),
                    "access_token" => attribute(
                        "Access Token of Morpheus user. This can be used instead of authenticating with Username and Password.",
                        AttributeConstraint::Optional,
                        true,
                    ),
                    "tenant_subdomain" => attribute(
                        "The tenant subdomain used for authentication",
                        AttributeConstraint::Optional,
                        false,
                    ),
                    "username" => attribute(
                        "Username of Morpheus user for authentication",
                        AttributeConstraint::Optional,
                        false,
                    ),
                    "password" => attribute(
                        "Password of Morpheus user for authentication",
                        AttributeConstraint::Optional,
                        true,
                    ),
                    "insecure" => Attribute {
                        attr_type: AttributeType::Bool,
                        description: Description::plain("Disable TLS certificate verification"),
                        constraint: AttributeConstraint::Optional,
                        sensitive: false,
                        deprecated: false,
                    },
                },
                ..Default::default()
            },
        }
    }
}

/// A setting taken from the configuration, or from its environment variable when unset
#[derive(Debug, Clone, PartialEq, Eq)]
enum Setting {
    Set(String),
    Unknown,
    Missing,
}

impl Setting {
    fn resolve(value: &ValueString, env: &impl Fn(&str) -> Option<String>, var: &str) -> Self {
        match value {
            Value::Value(value) if !value.is_empty() => Setting::Set(value.to_string()),
            Value::Unknown => Setting::Unknown,
            _ => env(var)
                .filter(|value| !value.is_empty())
                .map_or(Setting::Missing, Setting::Set),
        }
    }

    fn into_option(self) -> Option<String> {
        match self {
            Setting::Set(value) => Some(value),
            _ => None,
        }
    }
}

/// Provider settings once the environment fallbacks are applied
#[derive(Debug, Clone, PartialEq, Eq)]
struct Settings {
    url: Setting,
    access_token: Setting,
    tenant_subdomain: Setting,
    username: Setting,
    password: Setting,
    insecure: bool,
}

impl Settings {
    fn resolve(config: &ProviderConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        let insecure = match config.insecure {
            Value::Value(insecure) => insecure,
            _ => env(ENV_INSECURE)
                .map(|value| matches!(value.to_ascii_lowercase().as_str(), "1" | "true"))
                .unwrap_or(false),
        };
        Self {
            url: Setting::resolve(&config.url, &env, ENV_URL),
            access_token: Setting::resolve(&config.access_token, &env, ENV_ACCESS_TOKEN),
            tenant_subdomain: Setting::resolve(&config.tenant_subdomain, &env, ENV_TENANT_SUBDOMAIN),
            username: Setting::resolve(&config.username, &env, ENV_USERNAME),
            password: Setting::resolve(&config.password, &env, ENV_PASSWORD),
            insecure,
        }
    }

    fn check(&self, diags: &mut Diagnostics, attr_path: AttributePath) {
        if self.url == Setting::Missing {
            diags.error(
                "Missing Morpheus URL",
                format!("The appliance URL must be set, either with `url` or with the {ENV_URL} environment variable."),
                attr_path.clone().attribute("url"),
            );
        }
        if self.access_token != Setting::Missing {
            return;
        }
        for (name, setting, var) in [
            ("username", &self.username, ENV_USERNAME),
            ("password", &self.password, ENV_PASSWORD),
        ] {
            if *setting == Setting::Missing {
                diags.error(
                    "Missing Morpheus credentials",
                    format!("Without an `access_token`, `{name}` must be set, either in the provider block or with the {var} environment variable."),
                    attr_path.clone().attribute(name),
                );
            }
        }
    }

    fn into_client_config(self) -> Option<ClientConfig> {
        let credentials = match self.access_token {
            Setting::Set(token) => Credentials::AccessToken(token),
            _ => Credentials::Password {
                username: self.username.into_option()?,
                password: self.password.into_option()?,
            },
        };
        Some(ClientConfig {
            url: self.url.into_option()?,
            credentials,
            tenant_subdomain: self.tenant_subdomain.into_option(),
            insecure: self.insecure,
        })
    }
}

fn process_env(var: &str) -> Option<String> {
    std::env::var(var).ok()
}

impl<'a> ProviderConfig<'a> {
    /// Build the client configuration, reporting what is missing into `diags`
    pub fn client_config(&self, diags: &mut Diagnostics) -> Option<ClientConfig> {
        self.client_config_with(diags, process_env)
    }

    fn client_config_with(
        &self,
        diags: &mut Diagnostics,
        env: impl Fn(&str) -> Option<String>,
    ) -> Option<ClientConfig> {
        let settings = Settings::resolve(self, env);
        settings.check(diags, AttributePath::default());
        if !diags.errors.is_empty() {
            return None;
        }
        match settings.into_client_config() {
            Some(config) => Some(config),
            None => {
                diags.root_error_short("Provider configuration is not known yet");
                None
            }
        }
    }
}

#[async_trait]
impl<'a> WithValidate for ProviderConfig<'a> {
    async fn validate(&self, diags: &mut Diagnostics, attr_path: AttributePath) {
        Settings::resolve(self, process_env).check(diags, attr_path);
    }
}
