//! Seed the hosted store's catalog from a YAML file.
//!
//! The file carries brands, categories, and products (with image URLs and
//! brand/category slugs). Seeding is insert-or-skip keyed by slug, so
//! re-running against a live store is safe.

use std::collections::HashSet;
use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{error, info};

use amber_lane_core::Gender;
use amber_lane_storefront::supabase::{NewProduct, SupabaseClient};

/// Root of the YAML catalog file.
#[derive(Debug, Deserialize)]
pub struct SeedCatalog {
    #[serde(default)]
    pub brands: Vec<SeedBrand>,
    #[serde(default)]
    pub categories: Vec<SeedCategory>,
    #[serde(default)]
    pub products: Vec<SeedProduct>,
}

#[derive(Debug, Deserialize)]
pub struct SeedBrand {
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Deserialize)]
pub struct SeedCategory {
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Deserialize)]
pub struct SeedProduct {
    pub name: String,
    pub slug: String,
    pub description: String,
    pub price: Decimal,
    #[serde(default)]
    pub compare_price: Option<Decimal>,
    #[serde(default)]
    pub gender: Gender,
    #[serde(default)]
    pub notes: Vec<String>,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub featured: bool,
    /// Brand slug; must appear in `brands` or already exist in the store.
    pub brand: String,
    /// Category slug; must appear in `categories` or already exist.
    pub category: String,
    #[serde(default)]
    pub images: Vec<String>,
}

/// Validate a parsed catalog, returning every problem found.
fn validate_catalog(catalog: &SeedCatalog) -> Vec<String> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for brand in &catalog.brands {
        if !seen.insert(format!("brand:{}", brand.slug)) {
            errors.push(format!("duplicate brand slug: {}", brand.slug));
        }
    }
    seen.clear();
    for category in &catalog.categories {
        if !seen.insert(format!("category:{}", category.slug)) {
            errors.push(format!("duplicate category slug: {}", category.slug));
        }
    }
    seen.clear();
    for product in &catalog.products {
        if !seen.insert(product.slug.clone()) {
            errors.push(format!("duplicate product slug: {}", product.slug));
        }
        if product.price < Decimal::ZERO {
            errors.push(format!("negative price for product: {}", product.slug));
        }
    }

    errors
}

/// Seed the catalog from a YAML file.
///
/// # Arguments
///
/// * `file_path` - Path to the YAML catalog file
/// * `clear_existing` - If true, wipe the catalog tables first
///
/// # Errors
///
/// Returns an error if the file cannot be read, fails validation, or a
/// store write fails.
pub async fn catalog(
    file_path: &str,
    clear_existing: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let path = Path::new(file_path);
    if !path.exists() {
        return Err(format!("File not found: {file_path}").into());
    }

    info!(path = %file_path, "Loading catalog from file");

    // Read and validate YAML before touching the store
    let content = tokio::fs::read_to_string(path).await?;
    let parsed: SeedCatalog = serde_yaml::from_str(&content)?;

    let errors = validate_catalog(&parsed);
    if !errors.is_empty() {
        error!("Catalog validation failed:");
        for err in &errors {
            error!("  - {err}");
        }
        return Err(format!("{} validation errors found", errors.len()).into());
    }

    info!(
        brands = parsed.brands.len(),
        categories = parsed.categories.len(),
        products = parsed.products.len(),
        "Catalog validated"
    );

    let client = super::connect()?;

    if clear_existing {
        info!("Clearing existing catalog");
        client.clear_catalog().await?;
    }

    let mut inserted = 0_u32;
    let mut skipped = 0_u32;

    for brand in &parsed.brands {
        if client.find_brand_by_slug(&brand.slug).await?.is_some() {
            skipped += 1;
            continue;
        }
        client.create_brand(&brand.name, &brand.slug).await?;
        inserted += 1;
    }

    for category in &parsed.categories {
        if client.find_category_by_slug(&category.slug).await?.is_some() {
            skipped += 1;
            continue;
        }
        client.create_category(&category.name, &category.slug).await?;
        inserted += 1;
    }

    for product in &parsed.products {
        if client.find_product_by_slug(&product.slug).await?.is_some() {
            skipped += 1;
            continue;
        }

        let brand = client
            .find_brand_by_slug(&product.brand)
            .await?
            .ok_or_else(|| format!("unknown brand slug: {}", product.brand))?;
        let category = client
            .find_category_by_slug(&product.category)
            .await?
            .ok_or_else(|| format!("unknown category slug: {}", product.category))?;

        let created = client
            .create_product(&NewProduct {
                name: product.name.clone(),
                slug: product.slug.clone(),
                description: product.description.clone(),
                price: product.price,
                compare_price: product.compare_price,
                gender: product.gender,
                notes: product.notes.clone(),
                in_stock: product.stock > 0,
                stock: product.stock,
                featured: product.featured,
                brand_id: brand.id,
                category_id: category.id,
            })
            .await?;

        for url in &product.images {
            client.add_product_image(&created.id, url).await?;
        }

        inserted += 1;
    }

    info!("Seeding complete!");
    info!("  Rows inserted: {inserted}");
    info!("  Rows skipped (already exist): {skipped}");

    Ok(())
}

/// Delete every catalog row.
///
/// # Errors
///
/// Returns an error if a store delete fails.
pub async fn clear() -> Result<(), Box<dyn std::error::Error>> {
    let client = super::connect()?;
    info!("Clearing catalog");
    client.clear_catalog().await?;
    info!("Catalog cleared");
    Ok(())
}
