//! Product catalog service.

use relic_arcade_core::{PaginatedResponse, PaginationParams, ProductId};
use tracing::{debug, instrument};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{
    CreateProductRequest, ImageUploadResponse, LimitQuery, Product, ProductFilters,
    UpdateProductRequest,
};
use crate::resource::{Resource, item_path};
use crate::upload::{UploadFile, form_with_files};

const ENDPOINT: &str = "/product";

/// Number of featured products fetched when no limit is given.
pub const DEFAULT_FEATURED_LIMIT: u32 = 10;

/// Number of related products fetched when no limit is given.
pub const DEFAULT_RELATED_LIMIT: u32 = 6;

/// Product resource type.
pub type ProductResource = Resource<Product, CreateProductRequest, UpdateProductRequest>;

/// Catalog browsing and management.
#[derive(Debug, Clone)]
pub struct ProductService {
    client: ApiClient,
    resource: ProductResource,
}

impl ProductService {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self {
            resource: Resource::new(client.clone(), ENDPOINT),
            client,
        }
    }

    /// Generic CRUD + search over `/product`.
    #[must_use]
    pub const fn resource(&self) -> &ProductResource {
        &self.resource
    }

    /// Filter the catalog server-side.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self))]
    pub async fn get_by_filters(
        &self,
        filters: &ProductFilters,
    ) -> Result<PaginatedResponse<Product>, ApiError> {
        self.client.get_with_query("/product/filter", filters).await
    }

    /// Featured products, at most `limit` (default 10).
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self))]
    pub async fn get_featured(&self, limit: Option<u32>) -> Result<Vec<Product>, ApiError> {
        let query = LimitQuery {
            limit: limit.unwrap_or(DEFAULT_FEATURED_LIMIT),
        };
        self.client.get_with_query("/product/featured", &query).await
    }

    /// Products for a platform.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn get_by_platform(
        &self,
        platform: &str,
        params: Option<&PaginationParams>,
    ) -> Result<PaginatedResponse<Product>, ApiError> {
        self.list_by("platform", platform, params).await
    }

    /// Products for a console.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn get_by_console(
        &self,
        console: &str,
        params: Option<&PaginationParams>,
    ) -> Result<PaginatedResponse<Product>, ApiError> {
        self.list_by("console", console, params).await
    }

    /// Products in a genre.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    pub async fn get_by_genre(
        &self,
        genre: &str,
        params: Option<&PaginationParams>,
    ) -> Result<PaginatedResponse<Product>, ApiError> {
        self.list_by("genre", genre, params).await
    }

    /// Products related to `product_id`, at most `limit` (default 6).
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn get_related(
        &self,
        product_id: &ProductId,
        limit: Option<u32>,
    ) -> Result<Vec<Product>, ApiError> {
        let path = format!("{}/related", item_path(ENDPOINT, product_id));
        let query = LimitQuery {
            limit: limit.unwrap_or(DEFAULT_RELATED_LIMIT),
        };
        self.client.get_with_query(&path, &query).await
    }

    /// Upload images for a product, one `images` part per file.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if a part cannot be built or the request fails.
    #[instrument(skip(self, files), fields(product_id = %product_id, files = files.len()))]
    pub async fn upload_images(
        &self,
        product_id: &ProductId,
        files: Vec<UploadFile>,
    ) -> Result<ImageUploadResponse, ApiError> {
        let form = form_with_files("images", files)?;
        let path = format!("{}/images", item_path(ENDPOINT, product_id));

        let response: ImageUploadResponse = self.client.post_multipart(&path, form).await?;
        debug!(uploaded = response.image_urls.len(), "Product images uploaded");
        Ok(response)
    }

    #[instrument(skip(self, params))]
    async fn list_by(
        &self,
        dimension: &'static str,
        value: &str,
        params: Option<&PaginationParams>,
    ) -> Result<PaginatedResponse<Product>, ApiError> {
        let path = item_path(&format!("{ENDPOINT}/{dimension}"), &value);
        match params {
            Some(params) => self.client.get_with_query(&path, params).await,
            None => self.client.get(&path).await,
        }
    }
}
