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
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{de::DeserializeOwned, Deserialize};
use tracing::{debug, instrument};

use crate::utils::JoinWith;

use super::{ApiError, Cloud, CloudLookup, LookupResult};

const CLIENT_ID: &str = "morph-api";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const ERROR_EXCERPT_LEN: usize = 200;

#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    AccessToken(String),
    Password { username: String, password: String },
}

impl Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credentials::AccessToken(_) => f.debug_tuple("AccessToken").field(&"***").finish(),
            Credentials::Password { username, .. } => f
                .debug_struct("Password")
                .field("username", username)
                .field("password", &"***")
                .finish(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub url: String,
    pub credentials: Credentials,
    pub tenant_subdomain: Option<String>,
    pub insecure: bool,
}

impl ClientConfig {
    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.url.trim_end_matches('/'), path)
    }

    /// Sub-tenant users log in as `subdomain\username`
    fn login_username<'a>(&self, username: &'a str) -> std::borrow::Cow<'a, str> {
        match self.tenant_subdomain.as_deref() {
            Some(subdomain) if !subdomain.is_empty() => format!("{subdomain}\\{username}").into(),
            _ => username.into(),
        }
    }
}

#[derive(Deserialize)]
struct TokenResult {
    access_token: String,
}

#[derive(Deserialize)]
struct GetCloudResult {
    #[serde(default)]
    zone: Option<Cloud>,
}

#[derive(Deserialize)]
struct ListCloudsResult {
    #[serde(default)]
    zones: Option<Vec<Cloud>>,
}

/// Authenticated HTTP client for the Morpheus API
pub struct MorpheusClient {
    http: Client,
    config: ClientConfig,
    token: String,
}

impl Debug for MorpheusClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MorpheusClient")
            .field("config", &self.config)
            .field("token", &"***")
            .finish()
    }
}

impl MorpheusClient {
    /// Build the HTTP client and obtain a bearer token
    ///
    /// An access token is used as is. Otherwise, the username and password
    /// are exchanged for a token with the password grant.
    #[instrument(level = "debug", skip_all, fields(url = %config.url))]
    pub async fn connect(config: ClientConfig) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .danger_accept_invalid_certs(config.insecure)
            .build()
            .map_err(|err| ApiError::new(format!("Failed to create HTTP client: {err}")))?;

        let token = match &config.credentials {
            Credentials::AccessToken(token) => token.clone(),
            Credentials::Password { username, password } => {
                let username = config.login_username(username);
                debug!(%username, "requesting access token");
                let response = http
                    .post(config.endpoint("/oauth/token"))
                    .query(&[
                        ("grant_type", "password"),
                        ("scope", "write"),
                        ("client_id", CLIENT_ID),
                    ])
                    .form(&[("username", username.as_ref()), ("password", password.as_str())])
                    .send()
                    .await
                    .map_err(|err| ApiError::new(format!("Failed to authenticate: {err}")))?;
                decode::<TokenResult>(response).await?.access_token
            }
        };

        Ok(Self {
            http,
            config,
            token,
        })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T, ApiError> {
        let url = self.config.endpoint(path);
        debug!(%url, ?query, "GET");
        let response = self
            .http
            .get(&url)
            .query(query)
            .bearer_auth(&self.token)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|err| ApiError::new(format!("Failed to fetch {path}: {err}")))?;

        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::with_status(
            status.as_u16(),
            format!(
                "Morpheus API error {}: {}",
                status,
                body.chars().take(ERROR_EXCERPT_LEN).collect::<String>()
            ),
        ));
    }

    response.json().await.map_err(|err| {
        ApiError::with_status(status.as_u16(), format!("Failed to parse response: {err}"))
    })
}

#[async_trait]
impl CloudLookup for MorpheusClient {
    #[instrument(level = "debug", skip(self))]
    async fn get_cloud(&self, id: i64) -> LookupResult {
        let result: GetCloudResult = self.get(&format!("/api/zones/{id}"), &[]).await?;
        Ok(result.zone)
    }

    #[instrument(level = "debug", skip(self))]
    async fn find_cloud_by_name(&self, name: &str) -> LookupResult {
        let result: ListCloudsResult = self.get("/api/zones", &[("name", name)]).await?;
        let mut zones = result.zones.unwrap_or_default();

        match zones.len() {
            0 | 1 => Ok(zones.pop()),
            n => Err(ApiError::new(format!(
                "Found {n} clouds named `{name}`: {}",
                zones.iter().map(|cloud| cloud.id).join_with(", ")
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_server::serve_once;
    use super::*;

    fn token_config(url: String) -> ClientConfig {
        ClientConfig {
            url,
            credentials: Credentials::AccessToken("secret-token".into()),
            tenant_subdomain: None,
            insecure: false,
        }
    }

    #[test]
    fn credentials_are_redacted() {
        let creds = Credentials::Password {
            username: "admin".into(),
            password: "hunter2".into(),
        };
        let shown = format!("{creds:?}");
        assert!(shown.contains("admin"));
        assert!(!shown.contains("hunter2"));

        let shown = format!("{:?}", Credentials::AccessToken("secret-token".into()));
        assert!(!shown.contains("secret-token"));
    }

    #[test]
    fn tenant_username() {
        let mut config = token_config("https://morpheus.local/".into());
        assert_eq!(config.login_username("admin"), "admin");
        config.tenant_subdomain = Some("acme".into());
        assert_eq!(config.login_username("admin"), "acme\\admin");
        assert_eq!(
            config.endpoint("/api/zones"),
            "https://morpheus.local/api/zones"
        );
    }

    #[tokio::test]
    async fn get_cloud_by_id() {
        let (url, server) = serve_once(
            "200 OK",
            r#"{"zone": {"id": 42, "name": "prod-cloud", "labels": ["team-a"], "groups": [{"id": 7}]}}"#,
        )
        .await;
        let client = MorpheusClient::connect(token_config(url)).await.unwrap();

        let cloud = client.get_cloud(42).await.unwrap().unwrap();
        assert_eq!(cloud.id, 42);
        assert_eq!(cloud.name, "prod-cloud");

        let request = server.await.unwrap();
        assert!(request.starts_with("GET /api/zones/42 "));
        assert!(request
            .to_ascii_lowercase()
            .contains("authorization: bearer secret-token"));
    }

    #[tokio::test]
    async fn get_cloud_server_error() {
        let (url, server) = serve_once("500 Internal Server Error", r#"{"msg": "boom"}"#).await;
        let client = MorpheusClient::connect(token_config(url)).await.unwrap();

        let err = client.get_cloud(1).await.unwrap_err();
        assert_eq!(err.status, Some(500));
        assert!(err.message.contains("boom"));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn find_cloud_by_name_no_match() {
        let (url, server) = serve_once("200 OK", r#"{"zones": []}"#).await;
        let client = MorpheusClient::connect(token_config(url)).await.unwrap();

        assert_eq!(client.find_cloud_by_name("missing").await, Ok(None));
        let request = server.await.unwrap();
        assert!(request.starts_with("GET /api/zones?name=missing "));
    }

    #[tokio::test]
    async fn undecodable_body_keeps_status() {
        let (url, server) = serve_once("200 OK", "not json").await;
        let client = MorpheusClient::connect(token_config(url)).await.unwrap();

        let err = client.get_cloud(42).await.unwrap_err();
        assert_eq!(err.status, Some(200));
        assert!(err.message.starts_with("Failed to parse response"));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn find_cloud_by_name_server_error() {
        let (url, server) = serve_once("404 Not Found", r#"{"msg": "no such path"}"#).await;
        let client = MorpheusClient::connect(token_config(url)).await.unwrap();

        let err = client.find_cloud_by_name("prod-cloud").await.unwrap_err();
        assert_eq!(err.status, Some(404));
        assert!(err.message.contains("no such path"));
        let request = server.await.unwrap();
        assert!(request.starts_with("GET /api/zones?name=prod-cloud "));
    }

    #[tokio::test]
    async fn find_cloud_by_name_ambiguous() {
        let (url, server) =
            serve_once("200 OK", r#"{"zones": [{"id": 3, "name": "dup"}, {"id": 9, "name": "dup"}]}"#)
                .await;
        let client = MorpheusClient::connect(token_config(url)).await.unwrap();

        let err = client.find_cloud_by_name("dup").await.unwrap_err();
        assert_eq!(err.status, None);
        assert!(err.message.contains("3, 9"));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn password_login() {
        let (url, server) = serve_once("200 OK", r#"{"access_token": "fresh", "expires_in": 3600}"#).await;
        let client = MorpheusClient::connect(ClientConfig {
            url,
            credentials: Credentials::Password {
                username: "admin".into(),
                password: "hunter2".into(),
            },
            tenant_subdomain: Some("acme".into()),
            insecure: false,
        })
        .await
        .unwrap();
        assert_eq!(client.token, "fresh");

        let request = server.await.unwrap();
        assert!(request.starts_with(
            "POST /oauth/token?grant_type=password&scope=write&client_id=morph-api "
        ));
        assert!(request.contains("username=acme%5Cadmin"));
        assert!(request.contains("password=hunter2"));
    }
}
