//! Catalog reads (products, brands, categories) and CLI seeding writes.
//!
//! Listing filters are pushed down to the hosted store as PostgREST query
//! parameters rather than filtered in process. Brands, categories, and
//! product detail are cached for five minutes; listings are not (the filter
//! space is too wide to be worth keying).

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use amber_lane_core::{BrandId, CategoryId, Gender, ProductId};

use crate::models::{Brand, Category, Product, ProductDetail, ProductPage};

use super::cache::CacheValue;
use super::client::{SupabaseClient, SupabaseError};

/// Embedded resources fetched with every product row.
const PRODUCT_SELECT: &str = "*,images:product_images(url),brand:brands!inner(*)";

/// Product listing sort orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum ProductSort {
    #[default]
    #[serde(rename = "name")]
    Name,
    #[serde(rename = "price-asc")]
    PriceAsc,
    #[serde(rename = "price-desc")]
    PriceDesc,
    #[serde(rename = "newest")]
    Newest,
}

impl ProductSort {
    const fn order_param(self) -> &'static str {
        match self {
            Self::Name => "name.asc",
            Self::PriceAsc => "price.asc",
            Self::PriceDesc => "price.desc",
            Self::Newest => "created_at.desc",
        }
    }
}

/// Filters for the product listing, mapped onto PostgREST query params.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    /// Category slug.
    pub category: Option<String>,
    /// Brand slug.
    pub brand: Option<String>,
    pub gender: Option<Gender>,
    /// Substring match against name or description.
    pub search: Option<String>,
    pub featured: Option<bool>,
    pub min_price: Option<rust_decimal::Decimal>,
    pub max_price: Option<rust_decimal::Decimal>,
    pub sort: ProductSort,
    /// 1-based page number.
    pub page: u32,
    /// Page size.
    pub limit: u32,
}

impl ProductFilter {
    /// Build the PostgREST query string for this filter.
    pub(crate) fn to_query(&self) -> String {
        let mut params = vec![format!("select={PRODUCT_SELECT},category:categories!inner(*)")];

        if let Some(category) = &self.category {
            params.push(format!("category.slug=eq.{}", urlencoding::encode(category)));
        }
        if let Some(brand) = &self.brand {
            params.push(format!("brand.slug=eq.{}", urlencoding::encode(brand)));
        }
        if let Some(gender) = self.gender {
            params.push(format!("gender=eq.{}", gender.as_str()));
        }
        if let Some(search) = &self.search {
            // Commas delimit the or=() expression even when percent-encoded,
            // so they must be stripped from the needle itself.
            let cleaned = search.replace(',', "");
            let needle = urlencoding::encode(&cleaned);
            params.push(format!(
                "or=(name.ilike.*{needle}*,description.ilike.*{needle}*)"
            ));
        }
        if self.featured == Some(true) {
            params.push("featured=is.true".to_string());
        }
        if let Some(min) = self.min_price {
            params.push(format!("price=gte.{min}"));
        }
        if let Some(max) = self.max_price {
            params.push(format!("price=lte.{max}"));
        }

        params.push(format!("order={}", self.sort.order_param()));

        let page = self.page.max(1);
        let limit = if self.limit == 0 { 20 } else { self.limit };
        params.push(format!("limit={limit}"));
        params.push(format!("offset={}", (page - 1) * limit));

        params.join("&")
    }

    const fn effective_limit(&self) -> u32 {
        if self.limit == 0 { 20 } else { self.limit }
    }
}

/// Fields for seeding a new product (CLI only; the store assigns the id).
#[derive(Debug, Clone, Serialize)]
pub struct NewProduct {
    pub name: String,
    pub slug: String,
    pub description: String,
    pub price: rust_decimal::Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compare_price: Option<rust_decimal::Decimal>,
    pub gender: Gender,
    pub notes: Vec<String>,
    pub in_stock: bool,
    pub stock: u32,
    pub featured: bool,
    pub brand_id: BrandId,
    pub category_id: CategoryId,
}

impl SupabaseClient {
    /// Fetch one page of the product listing.
    ///
    /// # Errors
    ///
    /// Returns an error if the store request fails.
    #[instrument(skip(self, filter), fields(page = filter.page, sort = ?filter.sort))]
    pub async fn list_products(
        &self,
        filter: &ProductFilter,
    ) -> Result<ProductPage, SupabaseError> {
        let (products, total_count): (Vec<Product>, u64) =
            self.select_counted("products", &filter.to_query()).await?;

        let limit = u64::from(filter.effective_limit());
        Ok(ProductPage {
            products,
            total_count,
            total_pages: total_count.div_ceil(limit),
            current_page: filter.page.max(1),
        })
    }

    /// Fetch a product by slug with brand, category, images, and reviews
    /// (newest first). Cached for five minutes.
    ///
    /// # Errors
    ///
    /// Returns `SupabaseError::NotFound` if no product carries the slug.
    #[instrument(skip(self), fields(slug = %slug))]
    pub async fn get_product_by_slug(&self, slug: &str) -> Result<ProductDetail, SupabaseError> {
        let cache_key = format!("product:{slug}");

        if let Some(CacheValue::Product(product)) = self.cache().get(&cache_key).await {
            debug!("Cache hit for product");
            return Ok(*product);
        }

        let query = format!(
            "select={PRODUCT_SELECT},category:categories(*),reviews(*)&reviews.order=created_at.desc&slug=eq.{}&limit=1",
            urlencoding::encode(slug)
        );
        let detail: ProductDetail = self.select_one("products", &query).await?;

        self.cache()
            .insert(cache_key, CacheValue::Product(Box::new(detail.clone())))
            .await;

        Ok(detail)
    }

    /// Fetch every brand. Cached for five minutes.
    ///
    /// # Errors
    ///
    /// Returns an error if the store request fails.
    #[instrument(skip(self))]
    pub async fn list_brands(&self) -> Result<Vec<Brand>, SupabaseError> {
        if let Some(CacheValue::Brands(brands)) = self.cache().get("brands").await {
            debug!("Cache hit for brands");
            return Ok(brands);
        }

        let brands: Vec<Brand> = self.select("brands", "select=*&order=name.asc").await?;
        self.cache()
            .insert("brands".to_string(), CacheValue::Brands(brands.clone()))
            .await;
        Ok(brands)
    }

    /// Fetch every category. Cached for five minutes.
    ///
    /// # Errors
    ///
    /// Returns an error if the store request fails.
    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> Result<Vec<Category>, SupabaseError> {
        if let Some(CacheValue::Categories(categories)) = self.cache().get("categories").await {
            debug!("Cache hit for categories");
            return Ok(categories);
        }

        let categories: Vec<Category> = self
            .select("categories", "select=*&order=name.asc")
            .await?;
        self.cache()
            .insert(
                "categories".to_string(),
                CacheValue::Categories(categories.clone()),
            )
            .await;
        Ok(categories)
    }

    /// Find a brand by slug (CLI seeding, insert-or-skip).
    ///
    /// # Errors
    ///
    /// Returns an error if the store request fails.
    pub async fn find_brand_by_slug(&self, slug: &str) -> Result<Option<Brand>, SupabaseError> {
        let query = format!("select=*&slug=eq.{}&limit=1", urlencoding::encode(slug));
        let rows: Vec<Brand> = self.select("brands", &query).await?;
        Ok(rows.into_iter().next())
    }

    /// Find a category by slug (CLI seeding, insert-or-skip).
    ///
    /// # Errors
    ///
    /// Returns an error if the store request fails.
    pub async fn find_category_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<Category>, SupabaseError> {
        let query = format!("select=*&slug=eq.{}&limit=1", urlencoding::encode(slug));
        let rows: Vec<Category> = self.select("categories", &query).await?;
        Ok(rows.into_iter().next())
    }

    /// Find a product by slug without embeds (CLI seeding, insert-or-skip).
    ///
    /// # Errors
    ///
    /// Returns an error if the store request fails.
    pub async fn find_product_by_slug(&self, slug: &str) -> Result<Option<Product>, SupabaseError> {
        let query = format!(
            "select={PRODUCT_SELECT}&slug=eq.{}&limit=1",
            urlencoding::encode(slug)
        );
        let rows: Vec<Product> = self.select("products", &query).await?;
        Ok(rows.into_iter().next())
    }

    /// Insert a brand.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the write.
    pub async fn create_brand(&self, name: &str, slug: &str) -> Result<Brand, SupabaseError> {
        self.insert_returning("brands", &serde_json::json!({ "name": name, "slug": slug }))
            .await
    }

    /// Insert a category.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the write.
    pub async fn create_category(&self, name: &str, slug: &str) -> Result<Category, SupabaseError> {
        self.insert_returning(
            "categories",
            &serde_json::json!({ "name": name, "slug": slug }),
        )
        .await
    }

    /// Insert a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the write.
    pub async fn create_product(&self, product: &NewProduct) -> Result<Product, SupabaseError> {
        self.insert_returning("products", product).await
    }

    /// Attach an image to a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the write.
    pub async fn add_product_image(
        &self,
        product_id: &ProductId,
        url: &str,
    ) -> Result<(), SupabaseError> {
        let _: serde_json::Value = self
            .insert_returning(
                "product_images",
                &serde_json::json!({ "product_id": product_id, "url": url }),
            )
            .await?;
        Ok(())
    }

    /// Delete every catalog row (images, products, brands, categories).
    ///
    /// Used by the CLI's `clear-catalog` command. Order matters: children
    /// before parents.
    ///
    /// # Errors
    ///
    /// Returns an error if any delete fails.
    pub async fn clear_catalog(&self) -> Result<(), SupabaseError> {
        self.delete_rows("product_images", "url=not.is.null").await?;
        self.delete_rows("products", "slug=not.is.null").await?;
        self.delete_rows("brands", "slug=not.is.null").await?;
        self.delete_rows("categories", "slug=not.is.null").await?;
        Ok(())
    }
}
