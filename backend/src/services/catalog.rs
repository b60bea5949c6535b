//! Product catalog projections for the back-office screens
//!
//! Read-only: catalog mutation (creating products and variants) belongs to
//! the catalog subsystem, not this service. The receiving engine is the
//! only writer of stock and cost figures surfaced here.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::{FromRow, PgPool};

use crate::error::{AppError, AppResult};
use crate::models::{Product, Variant};

/// Catalog read service
#[derive(Clone)]
pub struct CatalogService {
    db: PgPool,
}

/// Product list row with derived stock and variant summaries
#[derive(Debug, Serialize)]
pub struct ProductSummary {
    #[serde(flatten)]
    pub product: Product,
    /// Total stock across all variants
    pub stock_quantity: i64,
    /// Distinct sizes, comma separated
    pub sizes: Option<String>,
    /// Distinct colors, comma separated
    pub colors: Option<String>,
}

/// Product detail with its variants
#[derive(Debug, Serialize)]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: Product,
    pub stock_quantity: i64,
    pub variants: Vec<Variant>,
}

/// Variant picker row for the stock-in form
#[derive(Debug, Serialize, FromRow)]
pub struct VariantListing {
    pub variant_id: String,
    pub product_id: String,
    pub color: String,
    pub size: String,
    pub stock_quantity: i32,
    pub product_name: String,
    pub cost_price: Decimal,
    pub base_price: Decimal,
}

/// Row for product queries
#[derive(Debug, FromRow)]
struct ProductRow {
    product_id: String,
    name: String,
    category: Option<String>,
    brand: Option<String>,
    base_price: Decimal,
    cost_price: Decimal,
    is_active: bool,
    created_at: DateTime<Utc>,
    stock_quantity: i64,
    sizes: Option<String>,
    colors: Option<String>,
}

/// Row for variant queries
#[derive(Debug, FromRow)]
struct VariantRow {
    variant_id: String,
    product_id: String,
    color: String,
    size: String,
    stock_quantity: i32,
}

impl ProductRow {
    fn into_product(self) -> (Product, i64, Option<String>, Option<String>) {
        let ProductRow {
            product_id,
            name,
            category,
            brand,
            base_price,
            cost_price,
            is_active,
            created_at,
            stock_quantity,
            sizes,
            colors,
        } = self;
        (
            Product {
                product_id,
                name,
                category,
                brand,
                base_price,
                cost_price,
                is_active,
                created_at,
            },
            stock_quantity,
            sizes,
            colors,
        )
    }
}

impl CatalogService {
    /// Create a new CatalogService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List all products with derived stock and size/color summaries
    pub async fn list_products(&self) -> AppResult<Vec<ProductSummary>> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT p.product_id, p.name, p.category, p.brand, p.base_price, p.cost_price,
                   p.is_active, p.created_at,
                   (SELECT COALESCE(SUM(stock_quantity), 0) FROM product_variants
                    WHERE product_id = p.product_id) AS stock_quantity,
                   (SELECT string_agg(DISTINCT size, ', ' ORDER BY size) FROM product_variants
                    WHERE product_id = p.product_id) AS sizes,
                   (SELECT string_agg(DISTINCT color, ', ' ORDER BY color) FROM product_variants
                    WHERE product_id = p.product_id) AS colors
            FROM products p
            ORDER BY p.created_at DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| {
                let (product, stock_quantity, sizes, colors) = r.into_product();
                ProductSummary {
                    product,
                    stock_quantity,
                    sizes,
                    colors,
                }
            })
            .collect())
    }

    /// Get one product with its variants
    pub async fn get_product(&self, product_id: &str) -> AppResult<ProductDetail> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT p.product_id, p.name, p.category, p.brand, p.base_price, p.cost_price,
                   p.is_active, p.created_at,
                   (SELECT COALESCE(SUM(stock_quantity), 0) FROM product_variants
                    WHERE product_id = p.product_id) AS stock_quantity,
                   NULL::TEXT AS sizes,
                   NULL::TEXT AS colors
            FROM products p
            WHERE p.product_id = $1
            "#,
        )
        .bind(product_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Product {product_id}")))?;

        let variants = sqlx::query_as::<_, VariantRow>(
            r#"
            SELECT variant_id, product_id, color, size, stock_quantity
            FROM product_variants
            WHERE product_id = $1
            ORDER BY color, size
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.db)
        .await?;

        let (product, stock_quantity, _, _) = row.into_product();

        Ok(ProductDetail {
            product,
            stock_quantity,
            variants: variants
                .into_iter()
                .map(|v| Variant {
                    variant_id: v.variant_id,
                    product_id: v.product_id,
                    color: v.color,
                    size: v.size,
                    stock_quantity: v.stock_quantity,
                })
                .collect(),
        })
    }

    /// List all variants joined with product display fields, for the
    /// stock-in form's variant picker
    pub async fn list_variants(&self) -> AppResult<Vec<VariantListing>> {
        let rows = sqlx::query_as::<_, VariantListing>(
            r#"
            SELECT pv.variant_id, pv.product_id, pv.color, pv.size, pv.stock_quantity,
                   p.name AS product_name, p.cost_price, p.base_price
            FROM product_variants pv
            JOIN products p ON p.product_id = pv.product_id
            ORDER BY p.created_at DESC, pv.variant_id ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }
}
