// ── Page sources ──
//
// The paginator only knows `PageSource`. The REST-backed implementation
// lives here too; tests plug in in-memory sources.

use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

use hotelops_api::{ApiClient, Resource};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::CoreError;
use crate::model::Identified;
use crate::page::{PageRequest, PageResult};

/// Something that can fetch one page of records.
pub trait PageSource: Send + Sync {
    type Item: Identified + Send + Sync + 'static;

    fn fetch_page(
        &self,
        request: &PageRequest,
    ) -> impl Future<Output = Result<PageResult<Self::Item>, CoreError>> + Send;
}

impl<S: PageSource> PageSource for Arc<S> {
    type Item = S::Item;

    fn fetch_page(
        &self,
        request: &PageRequest,
    ) -> impl Future<Output = Result<PageResult<Self::Item>, CoreError>> + Send {
        (**self).fetch_page(request)
    }
}

/// Pages of one API resource, decoded as `T`.
pub struct ApiPageSource<T> {
    client: Arc<ApiClient>,
    resource: Resource,
    _item: PhantomData<fn() -> T>,
}

impl<T> ApiPageSource<T> {
    pub fn new(client: Arc<ApiClient>, resource: Resource) -> Self {
        Self {
            client,
            resource,
            _item: PhantomData,
        }
    }

    pub fn resource(&self) -> Resource {
        self.resource
    }
}

impl<T> PageSource for ApiPageSource<T>
where
    T: DeserializeOwned + Identified + Send + Sync + 'static,
{
    type Item = T;

    async fn fetch_page(&self, request: &PageRequest) -> Result<PageResult<T>, CoreError> {
        let fetched = self
            .client
            .fetch_page::<T>(
                self.resource,
                &request.filter_pairs(),
                request.page(),
                request.per_page(),
            )
            .await;

        match fetched {
            Ok(raw) => {
                let has_more = raw.has_more_hint();
                Ok(PageResult::from_items(raw.items, request)
                    .with_has_more(has_more)
                    .with_total_items(raw.total)
                    .with_totals(raw.totals))
            }
            Err(e) if e.is_empty_result() => {
                debug!(resource = %self.resource, page = request.page(), "server reported no records");
                Ok(PageResult::empty(request))
            }
            Err(e) => Err(e.into()),
        }
    }
}
