//! Catalog rows: products, brands, categories, reviews.
//!
//! Shapes follow the hosted store's tables, with embedded resources
//! (`product_images`, `brands`, `reviews`) as nested structs on reads.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use amber_lane_core::{BrandId, CategoryId, Gender, ProductId, ReviewId};

/// A product listing row, with images and brand embedded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compare_price: Option<Decimal>,
    pub gender: Gender,
    #[serde(default)]
    pub notes: Vec<String>,
    pub in_stock: bool,
    pub stock: u32,
    pub featured: bool,
    pub brand_id: BrandId,
    pub category_id: CategoryId,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub images: Vec<ProductImage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<Brand>,
}

/// One image belonging to a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductImage {
    pub url: String,
}

/// A fragrance brand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brand {
    pub id: BrandId,
    pub name: String,
    pub slug: String,
}

/// A fragrance family category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
}

/// A customer review, embedded into product detail reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub product_id: ProductId,
    pub author: String,
    pub rating: u8,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

/// Product detail: the product plus its category and reviews.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: Product,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

/// One page of the product listing (`GET /api/products` response shape).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub total_count: u64,
    pub total_pages: u64,
    pub current_page: u32,
}
