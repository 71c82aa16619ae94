//! Seed the database with the six stable demo listings.
//!
//! Usage: `DATABASE_URL=postgres://localhost/aqari cargo run --bin seed`

use anyhow::Result;
use tracing::info;

use aqari_core::{
    CreatePropertyRequest, GeoPoint, ListingStatus, PropertyRepository, PropertyType,
};
use aqari_db::Database;

fn sample_properties() -> Vec<CreatePropertyRequest> {
    vec![
        CreatePropertyRequest {
            address: "The Ritz-Carlton Residences, Amman, Jordan".to_string(),
            description: "Experience unparalleled luxury in the heart of Amman. This residence \
                          offers world-class amenities, breathtaking city views, and sophisticated \
                          interior design. Fully serviced by the Ritz-Carlton staff."
                .to_string(),
            price: 1_500_000.0,
            property_type: PropertyType::Apartment,
            status: ListingStatus::ForSale,
            bedrooms: 4,
            bathrooms: 5.0,
            virtual_tour_url: Some("https://my.matterport.com/show/?m=9S6nKxWfW5n".to_string()),
            images: vec![
                "https://images.unsplash.com/photo-1512917774080-9991f1c4c750?auto=format&fit=crop&q=80&w=2070"
                    .to_string(),
            ],
            location: Some(GeoPoint {
                longitude: 35.885,
                latitude: 31.955,
            }),
        },
        CreatePropertyRequest {
            address: "Luxury Villa, Abdoun, Amman".to_string(),
            description: "Modern villa with a private pool and spacious garden. High-end finishes \
                          and smart home features."
                .to_string(),
            price: 850_000.0,
            property_type: PropertyType::House,
            status: ListingStatus::ForSale,
            bedrooms: 5,
            bathrooms: 4.0,
            virtual_tour_url: None,
            images: vec![
                "https://images.unsplash.com/photo-1613490493576-7fde63acd811?auto=format&fit=crop&q=80&w=2071"
                    .to_string(),
            ],
            location: Some(GeoPoint {
                longitude: 35.885,
                latitude: 31.935,
            }),
        },
        CreatePropertyRequest {
            address: "Dabouq Modern Loft, Amman".to_string(),
            description: "Elegant apartment with city views. Minimalist design and great location."
                .to_string(),
            price: 250_000.0,
            property_type: PropertyType::Apartment,
            status: ListingStatus::ForSale,
            bedrooms: 3,
            bathrooms: 3.0,
            virtual_tour_url: None,
            images: vec![
                "https://images.unsplash.com/photo-1522708323590-d24dbb6b0267?auto=format&fit=crop&q=80&w=2070"
                    .to_string(),
            ],
            location: Some(GeoPoint {
                longitude: 35.825,
                latitude: 31.985,
            }),
        },
        CreatePropertyRequest {
            address: "Traditional House, Jabal Al-Weibdeh".to_string(),
            description: "Charming renovated house in Amman's art district. Perfect for artistic \
                          souls."
                .to_string(),
            price: 1200.0,
            property_type: PropertyType::House,
            status: ListingStatus::ForRent,
            bedrooms: 2,
            bathrooms: 1.0,
            virtual_tour_url: None,
            images: vec![
                "https://images.unsplash.com/photo-1583608205776-bfd35f0d9f83?auto=format&fit=crop&q=80&w=2070"
                    .to_string(),
            ],
            location: Some(GeoPoint {
                longitude: 35.918,
                latitude: 31.958,
            }),
        },
        CreatePropertyRequest {
            address: "Family Apartment, 7th Circle".to_string(),
            description: "Spacious 3-bedroom apartment near all amenities. Ideal for families."
                .to_string(),
            price: 800.0,
            property_type: PropertyType::Apartment,
            status: ListingStatus::ForRent,
            bedrooms: 3,
            bathrooms: 2.0,
            virtual_tour_url: None,
            images: vec![
                "https://images.unsplash.com/photo-1493809842364-78817add7ffb?auto=format&fit=crop&q=80&w=2070"
                    .to_string(),
            ],
            location: Some(GeoPoint {
                longitude: 35.865,
                latitude: 31.952,
            }),
        },
        CreatePropertyRequest {
            address: "Jabal Amman, منطقة المدينة, Amman, Jordan".to_string(),
            description: "Quiet area, 2nd floor, modern finishes.".to_string(),
            price: 90_000.0,
            property_type: PropertyType::Apartment,
            status: ListingStatus::ForSale,
            bedrooms: 3,
            bathrooms: 2.0,
            virtual_tour_url: None,
            images: vec![
                "https://images.unsplash.com/photo-1502672260266-1c1ef2d988?auto=format&fit=crop&q=80&w=2070"
                    .to_string(),
            ],
            location: Some(GeoPoint {
                longitude: 35.928,
                latitude: 31.946,
            }),
        },
    ]
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "postgres://localhost/aqari".to_string());

    info!("Connecting to database for seeding...");
    let db = Database::connect(&database_url).await?;
    db.migrate().await?;

    sqlx::query("DELETE FROM property")
        .execute(&db.pool)
        .await?;
    info!("Cleared existing properties");

    let samples = sample_properties();
    let count = samples.len();
    for sample in samples {
        db.properties.insert(sample).await?;
    }

    info!("Successfully seeded database with {} stable properties", count);
    Ok(())
}
