// ── Back-office facade ──
//
// Entry point for consumers. Owns the API client and the shared hotel
// cache, hands out one `ListSession` per list screen, and wraps the
// single-record operations screens call around their lists.

use std::num::NonZeroU32;
use std::sync::Arc;

use hotelops_api::{ApiClient, Resource};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::cache::ReferenceCache;
use crate::config::ClientConfig;
use crate::error::CoreError;
use crate::model::{EntityId, Hotel, Identified, Record};
use crate::paginator::Paginator;
use crate::session::ListSession;
use crate::source::ApiPageSource;

struct BackofficeInner {
    config: ClientConfig,
    client: Arc<ApiClient>,
    hotels: ReferenceCache<Vec<Hotel>>,
}

/// Handle to one back-office API. Cheap to clone.
#[derive(Clone)]
pub struct Backoffice {
    inner: Arc<BackofficeInner>,
}

impl Backoffice {
    /// Build the HTTP client from `config`. Does not touch the network.
    pub fn new(config: ClientConfig) -> Result<Self, CoreError> {
        let client =
            ApiClient::from_token(config.api_url.as_str(), &config.token, &config.transport())?
                .with_empty_markers(config.markers());
        Ok(Self::with_client(config, client))
    }

    /// Use an already-built client (tests, custom auth).
    pub fn with_client(config: ClientConfig, client: ApiClient) -> Self {
        let hotels = ReferenceCache::new(config.reference_max_age);
        Self {
            inner: Arc::new(BackofficeInner {
                config,
                client: Arc::new(client),
                hotels,
            }),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    pub fn client(&self) -> &Arc<ApiClient> {
        &self.inner.client
    }

    /// Page size for `resource`: configured override, else its default.
    pub fn per_page_for(&self, resource: Resource) -> NonZeroU32 {
        self.inner
            .config
            .per_page
            .or_else(|| NonZeroU32::new(resource.default_per_page()))
            .unwrap_or(crate::page::DEFAULT_PER_PAGE)
    }

    // ── Lists ────────────────────────────────────────────────────────

    /// A fresh list session over `resource`, decoded as `T`.
    pub fn session<T>(&self, resource: Resource) -> ListSession<ApiPageSource<T>>
    where
        T: DeserializeOwned + Identified + Send + Sync + 'static,
    {
        let source = ApiPageSource::new(Arc::clone(&self.inner.client), resource);
        let per_page = self.per_page_for(resource);
        debug!(%resource, per_page = per_page.get(), "opening list session");
        ListSession::new(Paginator::new(source, per_page))
    }

    /// A list session over opaque records.
    pub fn records(&self, resource: Resource) -> ListSession<ApiPageSource<Record>> {
        self.session(resource)
    }

    // ── Hotel reference data ─────────────────────────────────────────

    /// All hotels, served from the shared cache while fresh.
    pub async fn hotels(&self) -> Result<Arc<Vec<Hotel>>, CoreError> {
        let client = &self.inner.client;
        self.inner
            .hotels
            .get_or_load(move || async move {
                let hotels: Vec<Hotel> = client.list_all(Resource::Hotels, &[]).await?;
                info!(count = hotels.len(), "hotel list loaded");
                Ok::<_, CoreError>(hotels)
            })
            .await
    }

    pub fn invalidate_hotels(&self) {
        self.inner.hotels.invalidate();
    }

    /// Find a hotel by id or by case-insensitive name.
    pub async fn resolve_hotel(&self, query: &str) -> Result<Hotel, CoreError> {
        let query = query.trim();
        let hotels = self.hotels().await?;
        let wanted: EntityId = query.into();
        hotels
            .iter()
            .find(|h| h.id == wanted)
            .or_else(|| hotels.iter().find(|h| h.name.eq_ignore_ascii_case(query)))
            .cloned()
            .ok_or_else(|| CoreError::NotFound {
                resource: Resource::Hotels.to_string(),
                identifier: query.to_owned(),
            })
    }

    // ── Single records ───────────────────────────────────────────────

    pub async fn get_record(&self, resource: Resource, id: &EntityId) -> Result<Record, CoreError> {
        let key = id.to_string();
        self.inner
            .client
            .get_record(resource, &key)
            .await
            .map_err(|e| record_error(resource, &key, e))
    }

    pub async fn create_record(
        &self,
        resource: Resource,
        fields: &Map<String, Value>,
    ) -> Result<Record, CoreError> {
        ensure_crud(resource, "create")?;
        let record: Record = self.inner.client.create_record(resource, fields).await?;
        info!(%resource, id = %record.id, "record created");
        self.after_write(resource);
        Ok(record)
    }

    pub async fn update_record(
        &self,
        resource: Resource,
        id: &EntityId,
        fields: &Map<String, Value>,
    ) -> Result<Record, CoreError> {
        ensure_crud(resource, "update")?;
        let key = id.to_string();
        let record: Record = self
            .inner
            .client
            .update_record(resource, &key, fields)
            .await
            .map_err(|e| record_error(resource, &key, e))?;
        info!(%resource, id = %key, "record updated");
        self.after_write(resource);
        Ok(record)
    }

    pub async fn delete_record(&self, resource: Resource, id: &EntityId) -> Result<(), CoreError> {
        ensure_crud(resource, "delete")?;
        let key = id.to_string();
        self.inner
            .client
            .delete_record(resource, &key)
            .await
            .map_err(|e| record_error(resource, &key, e))?;
        info!(%resource, id = %key, "record deleted");
        self.after_write(resource);
        Ok(())
    }

    fn after_write(&self, resource: Resource) {
        if resource == Resource::Hotels {
            self.invalidate_hotels();
        }
    }
}

fn ensure_crud(resource: Resource, operation: &str) -> Result<(), CoreError> {
    if resource.supports_crud() {
        Ok(())
    } else {
        Err(CoreError::Unsupported {
            operation: format!("{operation} on {resource}"),
        })
    }
}

/// Missing records become `NotFound` naming what was asked for.
fn record_error(resource: Resource, id: &str, err: hotelops_api::Error) -> CoreError {
    if err.is_not_found() || err.is_empty_result() {
        CoreError::NotFound {
            resource: resource.to_string(),
            identifier: id.to_owned(),
        }
    } else {
        err.into()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use secrecy::SecretString;
    use url::Url;

    fn backoffice(per_page: Option<u32>) -> Backoffice {
        let mut config = ClientConfig::new(
            Url::parse("http://127.0.0.1:9/api").unwrap(),
            SecretString::from("t0ken".to_owned()),
        );
        config.per_page = per_page.and_then(NonZeroU32::new);
        Backoffice::new(config).unwrap()
    }

    #[test]
    fn per_page_defaults_by_resource() {
        let bo = backoffice(None);
        assert_eq!(bo.per_page_for(Resource::Employees).get(), 10);
        assert_eq!(bo.per_page_for(Resource::AdvanceReport).get(), 20);
    }

    #[test]
    fn per_page_override_applies_everywhere() {
        let bo = backoffice(Some(50));
        assert_eq!(bo.per_page_for(Resource::Employees).get(), 50);
        assert_eq!(bo.records(Resource::Expenses).view().per_page, 50);
    }

    #[tokio::test]
    async fn reports_reject_writes_before_any_request() {
        let bo = backoffice(None);
        let err = bo
            .delete_record(Resource::PaymentReport, &EntityId::Numeric(1))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Unsupported { .. }));
    }

    #[test]
    fn missing_record_names_the_request() {
        let err = record_error(
            Resource::Employees,
            "42",
            hotelops_api::Error::Api {
                status: 404,
                message: "Not Found".into(),
            },
        );
        assert_eq!(err.to_string(), "Not found: employees 42");
    }
}
