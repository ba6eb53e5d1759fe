use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

pub type Id = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum SizeUnit {
    Guntha,
    Acres,
    #[serde(rename = "Sq.ft")]
    SqFt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum PropertyType {
    Residential,
    Agricultural,
    Commercial,
    FarmHouse,
}

impl std::str::FromStr for PropertyType {
    type Err = ();

    /// Exact, case-sensitive match on the wire name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Residential" => Ok(Self::Residential),
            "Agricultural" => Ok(Self::Agricultural),
            "Commercial" => Ok(Self::Commercial),
            "FarmHouse" => Ok(Self::FarmHouse),
            _ => Err(()),
        }
    }
}

/// Admin account. Never serialized: the hash stays inside the store.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Id,
    pub username: String,
    pub password_hash: String,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: Id,
    pub title: String,
    pub description: String,
    pub price: u64,
    pub location: String,
    pub size: f64,
    pub size_unit: SizeUnit,
    pub features: Vec<String>,
    pub images: Vec<String>,
    pub is_featured: bool,
    pub property_type: PropertyType,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewProperty {
    #[validate(length(min = 5, message = "title must be at least 5 characters"))]
    pub title: String,
    #[validate(length(min = 10, message = "description must be at least 10 characters"))]
    pub description: String,
    #[validate(custom = "positive_price")]
    pub price: u64,
    #[validate(length(min = 3, message = "location is required"))]
    pub location: String,
    #[validate(custom = "positive_size")]
    pub size: f64,
    pub size_unit: SizeUnit,
    #[serde(default)]
    pub features: Vec<String>,
    #[validate(length(min = 1, message = "at least one image is required"), custom = "image_urls")]
    pub images: Vec<String>,
    #[serde(default)]
    pub is_featured: bool,
    pub property_type: PropertyType,
}

/// Partial property update; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProperty {
    #[validate(length(min = 5, message = "title must be at least 5 characters"))]
    pub title: Option<String>,
    #[validate(length(min = 10, message = "description must be at least 10 characters"))]
    pub description: Option<String>,
    #[validate(custom = "positive_price")]
    pub price: Option<u64>,
    #[validate(length(min = 3, message = "location is required"))]
    pub location: Option<String>,
    #[validate(custom = "positive_size")]
    pub size: Option<f64>,
    pub size_unit: Option<SizeUnit>,
    pub features: Option<Vec<String>>,
    #[validate(custom = "image_urls")]
    pub images: Option<Vec<String>>,
    pub is_featured: Option<bool>,
    pub property_type: Option<PropertyType>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: Id,
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub author: String,
    pub image: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewBlogPost {
    #[validate(length(min = 5, message = "title must be at least 5 characters"))]
    pub title: String,
    #[validate(length(min = 50, message = "content must be at least 50 characters"))]
    pub content: String,
    #[validate(length(min = 10, message = "excerpt must be at least 10 characters"))]
    pub excerpt: String,
    #[validate(length(min = 2, message = "author is required"))]
    pub author: String,
    #[validate(url(message = "image must be a valid URL"))]
    pub image: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBlogPost {
    #[validate(length(min = 5, message = "title must be at least 5 characters"))]
    pub title: Option<String>,
    #[validate(length(min = 50, message = "content must be at least 50 characters"))]
    pub content: Option<String>,
    #[validate(length(min = 10, message = "excerpt must be at least 10 characters"))]
    pub excerpt: Option<String>,
    #[validate(length(min = 2, message = "author is required"))]
    pub author: Option<String>,
    #[validate(url(message = "image must be a valid URL"))]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: Id,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub interest: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// Contact form submission. Has no `isRead`: new messages always start unread.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewMessage {
    #[validate(length(min = 2, message = "name must be at least 2 characters"))]
    pub name: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 10, message = "phone must be at least 10 characters"))]
    pub phone: String,
    #[validate(length(min = 1, message = "interest is required"))]
    pub interest: String,
    #[validate(length(min = 1, message = "message is required"))]
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReadStatus {
    pub is_read: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    pub id: Id,
    pub name: String,
    pub location: String,
    pub message: String,
    pub rating: f32,
    pub image: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewTestimonial {
    #[validate(length(min = 2, message = "name must be at least 2 characters"))]
    pub name: String,
    #[validate(length(min = 1, message = "location is required"))]
    pub location: String,
    #[validate(length(min = 1, message = "message is required"))]
    pub message: String,
    #[validate(range(min = 0.0, max = 5.0, message = "rating must be between 0 and 5"))]
    pub rating: f32,
    #[validate(url(message = "image must be a valid URL"))]
    pub image: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTestimonial {
    #[validate(length(min = 2, message = "name must be at least 2 characters"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "location is required"))]
    pub location: Option<String>,
    #[validate(length(min = 1, message = "message is required"))]
    pub message: Option<String>,
    #[validate(range(min = 0.0, max = 5.0, message = "rating must be between 0 and 5"))]
    pub rating: Option<f32>,
    #[validate(url(message = "image must be a valid URL"))]
    pub image: Option<String>,
}

fn positive_price(price: u64) -> Result<(), ValidationError> {
    if price == 0 {
        return Err(ValidationError::new("positive"));
    }
    Ok(())
}

fn positive_size(size: f64) -> Result<(), ValidationError> {
    if size.is_nan() || size <= 0.0 {
        return Err(ValidationError::new("positive"));
    }
    Ok(())
}

fn image_urls(images: &[String]) -> Result<(), ValidationError> {
    let ok = images.iter().all(|u| {
        (u.starts_with("http://") || u.starts_with("https://")) && validator::validate_url(u.as_str())
    });
    if ok { Ok(()) } else { Err(ValidationError::new("url")) }
}
