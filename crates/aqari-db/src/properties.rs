//! Property repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::{Pool, Postgres, Row};
use tracing::debug;
use uuid::Uuid;

use aqari_core::{
    CreatePropertyRequest, DesignAnalysis, Error, GeoPoint, ListingStatus, Property,
    PropertyRepository, PropertyType, Result,
};

/// PostgreSQL implementation of PropertyRepository.
#[derive(Clone)]
pub struct PgPropertyRepository {
    pool: Pool<Postgres>,
}

impl PgPropertyRepository {
    /// Create a new PgPropertyRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

fn property_type_from_str(s: &str) -> Result<PropertyType> {
    match s {
        "house" => Ok(PropertyType::House),
        "apartment" => Ok(PropertyType::Apartment),
        "condo" => Ok(PropertyType::Condo),
        other => Err(Error::Internal(format!(
            "Unexpected property type in store: {}",
            other
        ))),
    }
}

fn status_from_str(s: &str) -> Result<ListingStatus> {
    match s {
        "for-sale" => Ok(ListingStatus::ForSale),
        "for-rent" => Ok(ListingStatus::ForRent),
        other => Err(Error::Internal(format!(
            "Unexpected listing status in store: {}",
            other
        ))),
    }
}

fn row_to_property(row: &PgRow) -> Result<Property> {
    let property_type: String = row.try_get("property_type")?;
    let status: String = row.try_get("status")?;

    let images: serde_json::Value = row.try_get("images")?;
    let images: Vec<String> = serde_json::from_value(images)?;

    let room_analysis: Option<serde_json::Value> = row.try_get("room_analysis")?;
    let room_analysis: Option<DesignAnalysis> = match room_analysis {
        Some(value) => Some(serde_json::from_value(value)?),
        None => None,
    };

    let longitude: Option<f64> = row.try_get("longitude")?;
    let latitude: Option<f64> = row.try_get("latitude")?;
    let location = match (longitude, latitude) {
        (Some(longitude), Some(latitude)) => Some(GeoPoint {
            longitude,
            latitude,
        }),
        _ => None,
    };

    Ok(Property {
        id: row.try_get("id")?,
        address: row.try_get("address")?,
        description: row.try_get("description")?,
        price: row.try_get("price")?,
        property_type: property_type_from_str(&property_type)?,
        status: status_from_str(&status)?,
        bedrooms: row.try_get("bedrooms")?,
        bathrooms: row.try_get("bathrooms")?,
        virtual_tour_url: row.try_get("virtual_tour_url")?,
        images,
        location,
        room_analysis,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl PropertyRepository for PgPropertyRepository {
    async fn insert(&self, req: CreatePropertyRequest) -> Result<Property> {
        if req.price < 0.0 {
            return Err(Error::InvalidInput("price must be non-negative".into()));
        }
        if req.bedrooms < 0 {
            return Err(Error::InvalidInput("bedrooms must be non-negative".into()));
        }
        if req.bathrooms < 0.0 {
            return Err(Error::InvalidInput("bathrooms must be non-negative".into()));
        }

        let id = Uuid::now_v7();
        let created_at = Utc::now();
        let images = serde_json::to_value(&req.images)?;

        sqlx::query(
            r#"INSERT INTO property (
                id, address, description, price, property_type, status,
                bedrooms, bathrooms, virtual_tour_url, images,
                longitude, latitude, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)"#,
        )
        .bind(id)
        .bind(&req.address)
        .bind(&req.description)
        .bind(req.price)
        .bind(req.property_type.as_str())
        .bind(req.status.as_str())
        .bind(req.bedrooms)
        .bind(req.bathrooms)
        .bind(&req.virtual_tour_url)
        .bind(&images)
        .bind(req.location.map(|l| l.longitude))
        .bind(req.location.map(|l| l.latitude))
        .bind(created_at)
        .execute(&self.pool)
        .await?;

        debug!(
            subsystem = "db",
            component = "properties",
            op = "insert",
            property_id = %id,
            "Property created"
        );

        Ok(Property {
            id,
            address: req.address,
            description: req.description,
            price: req.price,
            property_type: req.property_type,
            status: req.status,
            bedrooms: req.bedrooms,
            bathrooms: req.bathrooms,
            virtual_tour_url: req.virtual_tour_url,
            images: req.images,
            location: req.location,
            room_analysis: None,
            created_at,
        })
    }

    async fn fetch(&self, id: Uuid) -> Result<Property> {
        let row = sqlx::query("SELECT * FROM property WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(Error::PropertyNotFound(id))?;

        row_to_property(&row)
    }

    async fn list(&self) -> Result<Vec<Property>> {
        let rows = sqlx::query("SELECT * FROM property ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;

        let properties = rows
            .iter()
            .map(row_to_property)
            .collect::<Result<Vec<_>>>()?;

        debug!(
            subsystem = "db",
            component = "properties",
            op = "list",
            result_count = properties.len(),
            "Listed properties"
        );
        Ok(properties)
    }

    async fn attach_analysis(&self, id: Uuid, analysis: &DesignAnalysis) -> Result<()> {
        let payload = serde_json::to_value(analysis)?;
        let result = sqlx::query("UPDATE property SET room_analysis = $1 WHERE id = $2")
            .bind(&payload)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::PropertyNotFound(id));
        }
        Ok(())
    }
}
