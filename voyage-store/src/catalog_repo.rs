use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use voyage_catalog::{Destination, Package};
use voyage_core::repository::{CatalogRepository, StoreError};

const PACKAGE_COLUMNS: &str = "id, slug, title, description, images, price, duration_days, \
     highlights, destination_id, created_at";

pub struct PgCatalogRepository {
    pool: PgPool,
}

impl PgCatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct DestinationRow {
    id: Uuid,
    slug: String,
    name: String,
    description: String,
    created_at: DateTime<Utc>,
}

impl From<DestinationRow> for Destination {
    fn from(row: DestinationRow) -> Self {
        Destination {
            id: row.id,
            slug: row.slug,
            name: row.name,
            description: row.description,
            created_at: row.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct PackageRow {
    id: Uuid,
    slug: String,
    title: String,
    description: String,
    images: Vec<String>,
    price: Decimal,
    duration_days: i32,
    highlights: Vec<String>,
    destination_id: Option<Uuid>,
    created_at: DateTime<Utc>,
}

impl From<PackageRow> for Package {
    fn from(row: PackageRow) -> Self {
        Package {
            id: row.id,
            slug: row.slug,
            title: row.title,
            description: row.description,
            images: row.images,
            price: row.price,
            duration_days: row.duration_days,
            highlights: row.highlights,
            destination_id: row.destination_id,
            created_at: row.created_at,
        }
    }
}

fn db_err(e: sqlx::Error) -> StoreError {
    StoreError::Database(e.to_string())
}

#[async_trait]
impl CatalogRepository for PgCatalogRepository {
    async fn list_destinations(&self) -> Result<Vec<Destination>, StoreError> {
        let rows: Vec<DestinationRow> = sqlx::query_as(
            "SELECT id, slug, name, description, created_at FROM destinations ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(rows.into_iter().map(Destination::from).collect())
    }

    async fn destination_by_slug(&self, slug: &str) -> Result<Option<Destination>, StoreError> {
        let row: Option<DestinationRow> = sqlx::query_as(
            "SELECT id, slug, name, description, created_at FROM destinations WHERE slug = $1",
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(row.map(Destination::from))
    }

    async fn list_packages(&self) -> Result<Vec<Package>, StoreError> {
        let sql = format!("SELECT {PACKAGE_COLUMNS} FROM packages ORDER BY title");
        let rows: Vec<PackageRow> = sqlx::query_as(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(rows.into_iter().map(Package::from).collect())
    }

    async fn packages_for_destination(
        &self,
        destination_id: Uuid,
    ) -> Result<Vec<Package>, StoreError> {
        let sql = format!(
            "SELECT {PACKAGE_COLUMNS} FROM packages WHERE destination_id = $1 ORDER BY title"
        );
        let rows: Vec<PackageRow> = sqlx::query_as(&sql)
            .bind(destination_id)
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(rows.into_iter().map(Package::from).collect())
    }

    async fn package_by_id(&self, id: Uuid) -> Result<Option<Package>, StoreError> {
        let sql = format!("SELECT {PACKAGE_COLUMNS} FROM packages WHERE id = $1");
        let row: Option<PackageRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(row.map(Package::from))
    }

    async fn package_by_slug(&self, slug: &str) -> Result<Option<Package>, StoreError> {
        let sql = format!("SELECT {PACKAGE_COLUMNS} FROM packages WHERE slug = $1");
        let row: Option<PackageRow> = sqlx::query_as(&sql)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(row.map(Package::from))
    }
}
