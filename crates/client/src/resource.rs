//! Generic CRUD and search helper bound to one endpoint.
//!
//! Each resource service holds a [`Resource`] for its endpoint instead of
//! inheriting from a base service. The helper adds no caching, validation or
//! business logic; every call is a straight delegation to [`ApiClient`].

use std::fmt::{self, Display};
use std::marker::PhantomData;

use relic_arcade_core::{PaginatedResponse, PaginationParams};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::client::{ApiClient, Empty};
use crate::error::ApiError;

/// CRUD + search operations for records of type `T` under `endpoint`.
///
/// `C` is the create payload and `U` the full-replacement payload.
pub struct Resource<T, C = T, U = C> {
    client: ApiClient,
    endpoint: &'static str,
    _marker: PhantomData<fn() -> (T, C, U)>,
}

impl<T, C, U> Clone for Resource<T, C, U> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            endpoint: self.endpoint,
            _marker: PhantomData,
        }
    }
}

impl<T, C, U> fmt::Debug for Resource<T, C, U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resource")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl<T, C, U> Resource<T, C, U>
where
    T: DeserializeOwned,
    C: Serialize,
    U: Serialize,
{
    /// Bind a helper to `endpoint` (e.g. `/product`).
    #[must_use]
    pub const fn new(client: ApiClient, endpoint: &'static str) -> Self {
        Self {
            client,
            endpoint,
            _marker: PhantomData,
        }
    }

    /// Endpoint prefix of this resource.
    #[must_use]
    pub const fn endpoint(&self) -> &'static str {
        self.endpoint
    }

    /// List records, one page at a time.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn get_all(
        &self,
        params: Option<&PaginationParams>,
    ) -> Result<PaginatedResponse<T>, ApiError> {
        match params {
            Some(params) => self.client.get_with_query(self.endpoint, params).await,
            None => self.client.get(self.endpoint).await,
        }
    }

    /// Fetch one record.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or the record does not exist.
    pub async fn get_by_id(&self, id: impl Display) -> Result<T, ApiError> {
        self.client.get(&self.item_path(&id)).await
    }

    /// Create a record.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn create(&self, data: &C) -> Result<T, ApiError> {
        self.client.post(self.endpoint, data).await
    }

    /// Replace a record.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn update(&self, id: impl Display, data: &U) -> Result<T, ApiError> {
        self.client.put(&self.item_path(&id), data).await
    }

    /// Merge `data` into a record.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn partial_update<P>(&self, id: impl Display, data: &P) -> Result<T, ApiError>
    where
        P: Serialize + ?Sized,
    {
        self.client.patch(&self.item_path(&id), data).await
    }

    /// Delete a record.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn delete(&self, id: impl Display) -> Result<(), ApiError> {
        self.client
            .delete::<Empty>(&self.item_path(&id))
            .await
            .map(|_| ())
    }

    /// Free-text search, merged over the pagination parameters.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn search(
        &self,
        query: &str,
        params: Option<&PaginationParams>,
    ) -> Result<PaginatedResponse<T>, ApiError> {
        let params = params.cloned().unwrap_or_default().with_search(query);
        self.client
            .get_with_query(&format!("{}/search", self.endpoint), &params)
            .await
    }

    fn item_path(&self, id: &dyn Display) -> String {
        item_path(self.endpoint, id)
    }
}

/// `endpoint/<id>` with the id percent-encoded as one path segment.
pub(crate) fn item_path(endpoint: &str, id: &dyn Display) -> String {
    format!("{endpoint}/{}", urlencoding::encode(&id.to_string()))
}
