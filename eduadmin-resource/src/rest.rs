//! REST-backed data source
//!
//! Maps the four list/CRUD operations onto a conventional collection endpoint:
//!
//! | Operation | Request |
//! |-----------|---------|
//! | load | `GET {base}/{path}?pageIndex=..&pageSize=..` |
//! | create | `POST {base}/{path}` |
//! | update | `PUT {base}/{path}/{id}` |
//! | delete | `DELETE {base}/{path}/{id}` |

use std::marker::PhantomData;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::RestConfig;
use crate::error::{ResourceError, Result};
use crate::http_client::HttpUtils;
use crate::traits::{ItemCreator, ItemDeleter, ItemUpdater, ListSource};
use crate::types::{ItemId, ListQuery, LoadResponse};

/// Header carrying a per-request correlation id.
pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// One REST collection (e.g. `branches`, `rooms`, `wallets`).
///
/// `T` is the record type returned by the backend, `D` the form payload sent on
/// create and update.
pub struct RestResource<T, D = serde_json::Value> {
    client: Client,
    collection_url: String,
    resource: String,
    bearer_token: Option<String>,
    max_retries: u32,
    _marker: PhantomData<fn() -> (T, D)>,
}

impl<T, D> RestResource<T, D> {
    /// Create a resource for `path` below the configured base URL, with its own client.
    pub fn new(config: &RestConfig, path: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ResourceError::InvalidConfig {
                field: "client".to_string(),
                detail: e.to_string(),
            })?;
        Self::with_client(client, config, path)
    }

    /// Create a resource sharing an existing client (and its connection pool).
    pub fn with_client(client: Client, config: &RestConfig, path: &str) -> Result<Self> {
        let base = config.validate()?;
        let path = path.trim_matches('/');
        if path.is_empty() {
            return Err(ResourceError::InvalidConfig {
                field: "path".to_string(),
                detail: "collection path is empty".to_string(),
            });
        }

        let collection_url = format!("{}/{path}", base.as_str().trim_end_matches('/'));
        let resource = path.rsplit('/').next().unwrap_or(path).to_string();

        Ok(Self {
            client,
            collection_url,
            resource,
            bearer_token: config.bearer_token.clone(),
            max_retries: config.max_retries,
            _marker: PhantomData,
        })
    }

    /// URL of the collection.
    pub fn collection_url(&self) -> &str {
        &self.collection_url
    }

    /// URL of one record; the id is percent-encoded.
    pub fn item_url(&self, id: &ItemId) -> String {
        format!(
            "{}/{}",
            self.collection_url,
            urlencoding::encode(id.as_str())
        )
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let request_id = uuid::Uuid::new_v4().to_string();
        let mut builder = self
            .client
            .request(method, url)
            .header(REQUEST_ID_HEADER, request_id);
        if let Some(token) = &self.bearer_token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    async fn send(
        &self,
        builder: RequestBuilder,
        method_name: &str,
        url: &str,
        idempotent: bool,
    ) -> Result<String> {
        let retries = if idempotent { self.max_retries } else { 0 };
        HttpUtils::execute_request_with_retry(builder, &self.resource, method_name, url, retries)
            .await
            .inspect_err(|e| {
                if e.is_expected() {
                    log::warn!("{method_name} {url} failed: {e}");
                } else {
                    log::error!("{method_name} {url} failed: {e}");
                }
            })
    }

    fn missing_id(&self, operation: &str) -> ResourceError {
        ResourceError::MissingId {
            resource: self.resource.clone(),
            operation: operation.to_string(),
        }
    }
}

impl<T, D> RestResource<T, D>
where
    T: DeserializeOwned,
{
    /// Decode a single record, unwrapping a `{ "data": ... }` envelope if needed.
    fn decode_item(&self, body: &str) -> Result<T> {
        let value: serde_json::Value = HttpUtils::parse_json(body, &self.resource)?;
        match serde_json::from_value::<T>(value.clone()) {
            Ok(item) => Ok(item),
            Err(direct_err) => match value.get("data") {
                Some(inner) => serde_json::from_value(inner.clone()).map_err(|e| {
                    ResourceError::ParseError {
                        resource: self.resource.clone(),
                        detail: e.to_string(),
                    }
                }),
                None => Err(ResourceError::ParseError {
                    resource: self.resource.clone(),
                    detail: direct_err.to_string(),
                }),
            },
        }
    }

    /// Decode a mutation response; a blank body is an acknowledgement without a record.
    fn decode_optional_item(&self, body: &str) -> Result<Option<T>> {
        if body.trim().is_empty() {
            return Ok(None);
        }
        self.decode_item(body).map(Some)
    }

    fn encode_body(&self, data: &impl Serialize) -> Result<Vec<u8>> {
        serde_json::to_vec(data).map_err(|e| ResourceError::SerializationError {
            resource: self.resource.clone(),
            detail: e.to_string(),
        })
    }
}

#[async_trait]
impl<T, D> ListSource<T> for RestResource<T, D>
where
    T: DeserializeOwned + Send + 'static,
    D: 'static,
{
    fn resource_name(&self) -> &str {
        &self.resource
    }

    async fn load(&self, query: &ListQuery) -> Result<LoadResponse<T>> {
        let url = self.collection_url.clone();
        let builder = self
            .request(Method::GET, &url)
            .query(&query.to_query_pairs());
        let body = self.send(builder, "GET", &url, true).await?;

        let value: serde_json::Value = HttpUtils::parse_json(&body, &self.resource)?;
        let response = LoadResponse::from_json(value).map_err(|e| {
            log::error!("[{}] List items do not match the record type: {e}", self.resource);
            ResourceError::ParseError {
                resource: self.resource.clone(),
                detail: e.to_string(),
            }
        })?;
        Ok(response.unwrap_or_else(|| {
            log::warn!(
                "[{}] List response is neither a page nor a collection, treating as empty",
                self.resource
            );
            LoadResponse::empty()
        }))
    }
}

#[async_trait]
impl<T, D> ItemCreator<T, D> for RestResource<T, D>
where
    T: DeserializeOwned + Send + 'static,
    D: Serialize + Send + Sync + 'static,
{
    async fn create(&self, data: &D) -> Result<Option<T>> {
        let url = self.collection_url.clone();
        let body = self.encode_body(data)?;
        let builder = self
            .request(Method::POST, &url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body);
        let response = self.send(builder, "POST", &url, false).await?;
        self.decode_optional_item(&response)
    }
}

#[async_trait]
impl<T, D> ItemUpdater<T, D> for RestResource<T, D>
where
    T: DeserializeOwned + Send + 'static,
    D: Serialize + Send + Sync + 'static,
{
    async fn update(&self, id: &ItemId, data: &D) -> Result<Option<T>> {
        if id.is_empty() {
            return Err(self.missing_id("update"));
        }
        let url = self.item_url(id);
        let body = self.encode_body(data)?;
        let builder = self
            .request(Method::PUT, &url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body);
        let response = self.send(builder, "PUT", &url, true).await?;
        self.decode_optional_item(&response)
    }
}

#[async_trait]
impl<T, D> ItemDeleter for RestResource<T, D>
where
    T: 'static,
    D: 'static,
{
    async fn delete(&self, id: &ItemId) -> Result<()> {
        if id.is_empty() {
            return Err(self.missing_id("delete"));
        }
        let url = self.item_url(id);
        let builder = self.request(Method::DELETE, &url);
        self.send(builder, "DELETE", &url, true).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resource(base: &str, path: &str) -> Result<RestResource<serde_json::Value>> {
        RestResource::new(&RestConfig::new(base), path)
    }

    #[test]
    fn builds_collection_and_item_urls() {
        let r = resource("https://api.example.vn/api/", "/student-levels/").unwrap();
        assert_eq!(r.collection_url(), "https://api.example.vn/api/student-levels");
        assert_eq!(
            r.item_url(&ItemId::from(7)),
            "https://api.example.vn/api/student-levels/7"
        );
        assert_eq!(r.resource_name(), "student-levels");
    }

    #[test]
    fn item_ids_are_percent_encoded() {
        let r = resource("http://localhost:5000", "rooms").unwrap();
        assert_eq!(
            r.item_url(&ItemId::from("a b/c")),
            "http://localhost:5000/rooms/a%20b%2Fc"
        );
    }

    #[test]
    fn nested_path_uses_last_segment_as_name() {
        let r = resource("http://localhost:5000", "admin/family-accounts").unwrap();
        assert_eq!(r.resource_name(), "family-accounts");
    }

    #[test]
    fn rejects_empty_path_and_bad_base() {
        assert!(resource("http://localhost:5000", "/").is_err());
        assert!(resource("localhost:5000", "rooms").is_err());
    }

    #[test]
    fn decode_item_plain_and_enveloped() {
        let r = resource("http://localhost:5000", "rooms").unwrap();
        let plain: RestResource<Vec<i32>> = RestResource::new(
            &RestConfig::new("http://localhost:5000"),
            "rooms",
        )
        .unwrap();
        assert_eq!(plain.decode_item("[1,2]").unwrap(), vec![1, 2]);
        assert_eq!(plain.decode_item(r#"{"data":[3]}"#).unwrap(), vec![3]);
        assert!(plain.decode_item(r#"{"other":1}"#).is_err());

        let value = r.decode_item(r#"{"id":1}"#).unwrap();
        assert_eq!(value["id"], 1);
    }

    #[test]
    fn blank_mutation_body_is_acknowledgement() {
        let r = resource("http://localhost:5000", "rooms").unwrap();
        assert_eq!(r.decode_optional_item("").unwrap(), None);
        assert_eq!(r.decode_optional_item(" \n").unwrap(), None);
        assert_eq!(
            r.decode_optional_item(r#"{"id":2}"#).unwrap(),
            Some(serde_json::json!({"id": 2}))
        );
    }

    #[tokio::test]
    async fn empty_id_is_rejected_before_sending() {
        let r = resource("http://localhost:5000", "rooms").unwrap();
        let err = r.delete(&ItemId::default()).await.unwrap_err();
        assert_eq!(
            err,
            ResourceError::MissingId {
                resource: "rooms".to_string(),
                operation: "delete".to_string(),
            }
        );
        assert!(err.is_expected());
    }
}
