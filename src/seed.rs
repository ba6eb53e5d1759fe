//! Start-up data: the admin account plus the sample catalog shown on a fresh site.

use anyhow::Context;
use tracing::info;

use crate::auth::hash_password;
use crate::models::*;
use crate::repo::Repo;

/// Creates the admin user with an argon2-hashed password.
pub async fn seed_admin(repo: &dyn Repo, username: &str, password: &str) -> anyhow::Result<User> {
    let password_hash = hash_password(password)?;
    let user = repo
        .create_user(NewUser { username: username.to_string(), password_hash })
        .await
        .with_context(|| format!("admin user {username:?} already exists"))?;
    info!(user_id = user.id, username = %user.username, "seeded admin user");
    Ok(user)
}

pub async fn seed_sample_data(repo: &dyn Repo) {
    for p in sample_properties() {
        repo.create_property(p).await;
    }
    for b in sample_blog_posts() {
        repo.create_blog_post(b).await;
    }
    for t in sample_testimonials() {
        repo.create_testimonial(t).await;
    }
    info!("seeded sample properties, blog posts and testimonials");
}

fn unsplash(photo: &str, w: u32, h: u32) -> String {
    format!("https://images.unsplash.com/photo-{photo}?ixlib=rb-1.2.1&auto=format&fit=crop&w={w}&h={h}&q=80")
}

#[allow(clippy::too_many_arguments)]
fn plot(
    title: &str,
    description: &str,
    price: u64,
    location: &str,
    size: f64,
    size_unit: SizeUnit,
    features: [&str; 3],
    photo: &str,
    is_featured: bool,
    property_type: PropertyType,
) -> NewProperty {
    NewProperty {
        title: title.into(),
        description: description.into(),
        price,
        location: location.into(),
        size,
        size_unit,
        features: features.iter().map(|f| f.to_string()).collect(),
        images: vec![unsplash(photo, 500, 300)],
        is_featured,
        property_type,
    }
}

pub fn sample_properties() -> Vec<NewProperty> {
    use PropertyType::*;
    use SizeUnit::*;
    vec![
        plot(
            "Premium Residential Plot",
            "A beautiful residential plot in a prime location with excellent connectivity.",
            12_000_000,
            "Electronic City, Bangalore",
            20.0,
            Guntha,
            ["60 ft Road", "BMRDA Approved", "Corner Plot"],
            "1500382017468-9049fed747ef",
            true,
            Residential,
        ),
        plot(
            "Fertile Agricultural Land",
            "Fertile land suitable for various crops with good water source.",
            9_000_000,
            "Srirangapatna, Mysore",
            2.0,
            Acres,
            ["Borewell", "Fertile Soil", "Road Access"],
            "1628744404730-5e143358539b",
            false,
            Agricultural,
        ),
        plot(
            "Commercial Land",
            "Prime commercial land suitable for business development.",
            35_000_000,
            "Gachibowli, Hyderabad",
            40.0,
            Guntha,
            ["Highway Access", "Commercial Zone", "Prime Location"],
            "1628624747186-a941c476b7ef",
            false,
            Commercial,
        ),
        plot(
            "Prime Corner Plot",
            "East-facing corner plot in a developing residential area.",
            8_500_000,
            "Sholinganallur, Chennai",
            12.0,
            Guntha,
            ["Corner Plot", "East Facing", "Residential Area"],
            "1531971589569-0d9370cbe1e5",
            false,
            Residential,
        ),
        plot(
            "Gated Community Plot",
            "Premium plot in a gated community with all amenities.",
            15_000_000,
            "Whitefield, Bangalore",
            15.0,
            Guntha,
            ["Gated", "Park View", "24/7 Security"],
            "1602941525421-8f8b81d3edbb",
            true,
            Residential,
        ),
        plot(
            "Premium Farmland",
            "Beautiful farmland with hill view and natural water source.",
            7_500_000,
            "Devanahalli, Bangalore",
            1.0,
            Acres,
            ["Water Source", "Hill View", "Farmhouse Permitted"],
            "1543746379-c5d6bc868f57",
            false,
            Agricultural,
        ),
    ]
}

pub fn sample_blog_posts() -> Vec<NewBlogPost> {
    let post = |title: &str, content: &str, excerpt: &str, author: &str, photo: &str| NewBlogPost {
        title: title.into(),
        content: content.into(),
        excerpt: excerpt.into(),
        author: author.into(),
        image: unsplash(photo, 500, 300),
    };
    vec![
        post(
            "5 Things to Consider Before Investing in Land",
            "Detailed article about land investment considerations including location, legal verification, future development plans, return on investment analysis, and infrastructure development.",
            "Learn the essential factors you should evaluate before making a land investment to ensure maximum returns.",
            "Ananya Sharma",
            "1542879379-a2761ec6d9b5",
        ),
        post(
            "Legal Checklist for Land Purchase in India",
            "Comprehensive guide covering all legal documents required for land purchase in India, including title deed verification, encumbrance certificate, land use conversion, and tax compliance.",
            "Understand the essential legal documents and verifications required when purchasing land property in India.",
            "Raj Malhotra",
            "1526948531399-320e7e40f0ca",
        ),
        post(
            "Land Value Trends to Watch in 2023",
            "Analysis of current land value trends across major Indian cities, future growth prospects, and recommendations for potential investors.",
            "Explore the emerging trends in land values and discover which regions are experiencing the highest growth rates.",
            "Vikram Singh",
            "1594608661623-aa0bd3a69799",
        ),
    ]
}

pub fn sample_testimonials() -> Vec<NewTestimonial> {
    let review = |name: &str, location: &str, message: &str, rating: f32, photo: &str| NewTestimonial {
        name: name.into(),
        location: location.into(),
        message: message.into(),
        rating,
        image: unsplash(photo, 100, 100),
    };
    vec![
        review(
            "Priya Desai",
            "Bangalore",
            "I was looking for a residential plot in Bangalore for over 6 months. Nainaland Deals helped me find the perfect plot in just 2 weeks. Their team's knowledge and support throughout the process was exceptional.",
            5.0,
            "1494790108377-be9c29b29330",
        ),
        review(
            "Arun Kumar",
            "Chennai",
            "The team at Nainaland Deals provided excellent guidance for my agricultural land investment. Their expertise in legal documentation saved me from potential complications. Highly recommend their services!",
            5.0,
            "1507003211169-0a1dd7228f2d",
        ),
        review(
            "Meera Reddy",
            "Hyderabad",
            "As a first-time land investor, I appreciated the transparent approach of Nainaland Deals. They helped me understand the market and found a property that has already appreciated by 15% in just a year!",
            4.5,
            "1573496359142-b8d87734a5a2",
        ),
    ]
}
