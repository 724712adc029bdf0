//! Catalog commands.
//!
//! # Usage
//!
//! ```bash
//! ra-cli products list --page 2 --limit 20
//! ra-cli products search "mega man"
//! ra-cli products filter --platform NES --price-max 50
//! ra-cli products console "Mega Drive"
//! ra-cli products related p1 --limit 4
//! ra-cli products upload-images p1 front.jpg back.jpg
//! ```

use std::path::PathBuf;

use clap::{Args, Subcommand};
use relic_arcade_client::models::{CreateProductRequest, ProductFilters, UpdateProductRequest};
use relic_arcade_client::{RelicArcade, UploadFile};
use relic_arcade_core::{PaginationParams, ProductCondition, ProductId, SortOrder};
use rust_decimal::Decimal;

use super::{CliError, print_json, read_json};

/// Paging and sorting flags shared by listing commands.
#[derive(Args, Debug, Default)]
pub struct PageArgs {
    #[arg(long)]
    page: Option<u32>,

    #[arg(long)]
    limit: Option<u32>,

    #[arg(long)]
    sort_by: Option<String>,

    /// `asc` or `desc`
    #[arg(long)]
    sort_order: Option<SortOrder>,
}

impl PageArgs {
    /// `None` when no flag was given, so the request carries no query.
    fn params(self) -> Option<PaginationParams> {
        let params = PaginationParams {
            page: self.page,
            limit: self.limit,
            sort_by: self.sort_by,
            sort_order: self.sort_order,
            search: None,
        };
        (params != PaginationParams::default()).then_some(params)
    }
}

#[derive(Subcommand)]
pub enum ProductAction {
    /// List products
    List {
        #[command(flatten)]
        page: PageArgs,
    },
    /// Show one product
    Get { id: ProductId },
    /// Free-text search
    Search {
        query: String,

        #[command(flatten)]
        page: PageArgs,
    },
    /// Filter the catalog
    Filter {
        #[arg(long)]
        platform: Option<String>,

        #[arg(long)]
        genre: Option<String>,

        #[arg(long)]
        console: Option<String>,

        /// `mint`, `excellent`, `good` or `fair`
        #[arg(long)]
        condition: Option<ProductCondition>,

        #[arg(long)]
        price_min: Option<Decimal>,

        #[arg(long)]
        price_max: Option<Decimal>,

        #[arg(long)]
        year_min: Option<i32>,

        #[arg(long)]
        year_max: Option<i32>,

        #[arg(long)]
        region: Option<String>,

        #[arg(long)]
        original: Option<bool>,

        #[arg(long)]
        featured: Option<bool>,

        #[command(flatten)]
        page: PageArgs,
    },
    /// Featured products
    Featured {
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Products related to another product
    Related {
        id: ProductId,

        #[arg(long)]
        limit: Option<u32>,
    },
    /// Products for a platform
    Platform {
        platform: String,

        #[command(flatten)]
        page: PageArgs,
    },
    /// Products for a console
    Console {
        console: String,

        #[command(flatten)]
        page: PageArgs,
    },
    /// Products in a genre
    Genre {
        genre: String,

        #[command(flatten)]
        page: PageArgs,
    },
    /// Create a product from a JSON file
    Create {
        #[arg(short, long)]
        file: PathBuf,
    },
    /// Update fields of a product from a JSON file
    Update {
        id: ProductId,

        #[arg(short, long)]
        file: PathBuf,
    },
    /// Delete a product
    Delete { id: ProductId },
    /// Upload images for a product
    UploadImages {
        id: ProductId,

        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

pub async fn run(arcade: &RelicArcade, action: ProductAction) -> Result<(), CliError> {
    let products = arcade.products();

    match action {
        ProductAction::List { page } => {
            print_json(&products.resource().get_all(page.params().as_ref()).await?)
        }
        ProductAction::Get { id } => print_json(&products.resource().get_by_id(&id).await?),
        ProductAction::Search { query, page } => print_json(
            &products
                .resource()
                .search(&query, page.params().as_ref())
                .await?,
        ),
        ProductAction::Filter {
            platform,
            genre,
            console,
            condition,
            price_min,
            price_max,
            year_min,
            year_max,
            region,
            original,
            featured,
            page,
        } => {
            let filters = ProductFilters {
                pagination: page.params().unwrap_or_default(),
                platform,
                genre,
                console,
                condition,
                region,
                is_original: original,
                featured,
                ..ProductFilters::default()
            }
            .with_price_range(price_min, price_max)
            .with_release_years(year_min, year_max);

            print_json(&products.get_by_filters(&filters).await?)
        }
        ProductAction::Featured { limit } => print_json(&products.get_featured(limit).await?),
        ProductAction::Related { id, limit } => {
            print_json(&products.get_related(&id, limit).await?)
        }
        ProductAction::Platform { platform, page } => print_json(
            &products
                .get_by_platform(&platform, page.params().as_ref())
                .await?,
        ),
        ProductAction::Console { console, page } => print_json(
            &products
                .get_by_console(&console, page.params().as_ref())
                .await?,
        ),
        ProductAction::Genre { genre, page } => print_json(
            &products
                .get_by_genre(&genre, page.params().as_ref())
                .await?,
        ),
        ProductAction::Create { file } => {
            let request: CreateProductRequest = read_json(&file).await?;
            print_json(&products.resource().create(&request).await?)
        }
        ProductAction::Update { id, file } => {
            let changes: UpdateProductRequest = read_json(&file).await?;
            print_json(&products.resource().partial_update(&id, &changes).await?)
        }
        ProductAction::Delete { id } => {
            products.resource().delete(&id).await?;
            tracing::info!(product_id = %id, "Product deleted");
            Ok(())
        }
        ProductAction::UploadImages { id, files } => {
            let mut uploads = Vec::with_capacity(files.len());
            for path in &files {
                uploads.push(UploadFile::from_path(path).await?);
            }
            print_json(&products.upload_images(&id, uploads).await?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_page_flags_means_no_params() {
        assert!(PageArgs::default().params().is_none());
    }

    #[test]
    fn test_page_flags_build_params() {
        let args = PageArgs {
            page: Some(2),
            sort_order: Some(SortOrder::Desc),
            ..PageArgs::default()
        };
        let params = args.params();
        assert_eq!(params.as_ref().and_then(|p| p.page), Some(2));
        assert_eq!(params.and_then(|p| p.sort_order), Some(SortOrder::Desc));
    }
}
