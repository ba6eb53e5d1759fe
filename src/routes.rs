use std::sync::Arc;
use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use utoipa::ToSchema;
use validator::Validate;

use crate::auth::{verify_password, Auth, TokenService};
use crate::error::ApiError;
use crate::models::*;
use crate::rate_limit::RateLimiterFacade;
use crate::repo::Repo;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(web::JsonConfig::default().error_handler(|err, _req| {
                ApiError::BadRequest(err.to_string()).into()
            }))
            .app_data(web::QueryConfig::default().error_handler(|err, _req| {
                ApiError::BadRequest(err.to_string()).into()
            }))
            .app_data(web::PathConfig::default().error_handler(|_err, _req| ApiError::NotFound.into()))
            .service(web::resource("/auth/login").route(web::post().to(login)))
            .service(web::resource("/auth/me").route(web::get().to(auth_me)))
            .service(
                web::resource("/properties")
                    .route(web::get().to(list_properties))
                    .route(web::post().to(create_property)),
            )
            .service(
                web::resource("/properties/{id}")
                    .route(web::get().to(get_property))
                    .route(web::put().to(update_property))
                    .route(web::delete().to(delete_property)),
            )
            .service(
                web::resource("/blogs")
                    .route(web::get().to(list_blog_posts))
                    .route(web::post().to(create_blog_post)),
            )
            .service(
                web::resource("/blogs/{id}")
                    .route(web::get().to(get_blog_post))
                    .route(web::put().to(update_blog_post))
                    .route(web::delete().to(delete_blog_post)),
            )
            .service(
                web::resource("/messages")
                    .route(web::get().to(list_messages))
                    .route(web::post().to(create_message)),
            )
            .service(
                web::resource("/messages/{id}")
                    .route(web::get().to(get_message))
                    .route(web::delete().to(delete_message)),
            )
            .service(web::resource("/messages/{id}/read").route(web::put().to(set_message_read)))
            .service(
                web::resource("/testimonials")
                    .route(web::get().to(list_testimonials))
                    .route(web::post().to(create_testimonial)),
            )
            .service(
                web::resource("/testimonials/{id}")
                    .route(web::get().to(get_testimonial))
                    .route(web::put().to(update_testimonial))
                    .route(web::delete().to(delete_testimonial)),
            ),
    );
}

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn Repo>,
    pub tokens: TokenService,
    pub rate_limiter: Option<RateLimiterFacade>,
}

impl AppState {
    pub fn new(repo: Arc<dyn Repo>, tokens: TokenService) -> Self {
        Self { repo, tokens, rate_limiter: None }
    }

    pub fn with_rate_limiter(mut self, limiter: RateLimiterFacade) -> Self {
        self.rate_limiter = Some(limiter);
        self
    }
}

fn client_ip(req: &HttpRequest) -> String {
    req.connection_info().realip_remote_addr().unwrap_or("unknown").to_string()
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteResponse {
    pub success: bool,
}

fn deleted() -> HttpResponse {
    HttpResponse::Ok().json(DeleteResponse { success: true })
}

// ---------------- Auth -------------------------------------------------

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserSummary {
    pub id: Id,
    pub username: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserSummary,
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = LoginResponse),
        (status = 400, description = "Missing username or password"),
        (status = 401, description = "Invalid credentials"),
        (status = 429, description = "Too many login attempts")
    )
)]
pub async fn login(
    req: HttpRequest,
    data: web::Data<AppState>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    if let Some(rl) = &data.rate_limiter {
        let ip = client_ip(&req);
        if !rl.allow_login(&ip) {
            warn!(%ip, "login rate limited");
            return Err(ApiError::TooManyRequests);
        }
    }
    payload.validate()?;
    let LoginRequest { username, password } = payload.into_inner();

    let Some(user) = data.repo.get_user_by_username(&username).await else {
        warn!(%username, "login for unknown user");
        return Err(ApiError::Unauthorized);
    };
    // keep argon2 off the worker thread
    let hash = user.password_hash.clone();
    let valid = web::block(move || verify_password(&password, &hash))
        .await
        .map_err(|e| {
            error!("password check failed to run: {e}");
            ApiError::Internal
        })?;
    if !valid {
        warn!(%username, "login with wrong password");
        return Err(ApiError::Unauthorized);
    }

    let token = data.tokens.issue(&user).map_err(|e| {
        error!("token issue error: {e}");
        ApiError::Internal
    })?;
    info!(user_id = user.id, "admin logged in");
    Ok(HttpResponse::Ok().json(LoginResponse {
        token,
        user: UserSummary { id: user.id, username: user.username },
    }))
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current admin", body = UserSummary),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = []))
)]
pub async fn auth_me(auth: Auth, data: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let id = auth.0.user_id().ok_or(ApiError::Unauthorized)?;
    // token may outlive the account
    let user = data.repo.get_user(id).await.ok_or(ApiError::Unauthorized)?;
    Ok(HttpResponse::Ok().json(UserSummary { id: user.id, username: user.username }))
}

// ---------------- Properties -------------------------------------------

#[derive(Debug, Deserialize)]
pub struct PropertyQuery {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub featured: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/properties",
    params(
        ("type" = Option<PropertyType>, Query, description = "Only this property type; takes precedence over `featured`. Empty means no filter, an unknown type matches nothing"),
        ("featured" = Option<String>, Query, description = "Only featured listings when exactly `true`")
    ),
    responses(
        (status = 200, description = "List properties", body = [Property])
    )
)]
pub async fn list_properties(
    data: web::Data<AppState>,
    query: web::Query<PropertyQuery>,
) -> Result<HttpResponse, ApiError> {
    let kind = query.kind.as_deref().filter(|k| !k.is_empty());
    let properties = match kind {
        Some(kind) => match kind.parse::<PropertyType>() {
            Ok(kind) => data.repo.list_properties_by_type(kind).await,
            Err(()) => Vec::new(),
        },
        None if query.featured.as_deref() == Some("true") => data.repo.list_featured_properties().await,
        None => data.repo.list_properties().await,
    };
    Ok(HttpResponse::Ok().json(properties))
}

#[utoipa::path(
    get,
    path = "/api/properties/{id}",
    params(("id" = Id, Path, description = "Property id")),
    responses(
        (status = 200, description = "Property", body = Property),
        (status = 404, description = "Property not found")
    )
)]
pub async fn get_property(data: web::Data<AppState>, path: web::Path<Id>) -> Result<HttpResponse, ApiError> {
    let property = data.repo.get_property(path.into_inner()).await.ok_or(ApiError::NotFound)?;
    Ok(HttpResponse::Ok().json(property))
}

#[utoipa::path(
    post,
    path = "/api/properties",
    request_body = NewProperty,
    responses(
        (status = 201, description = "Property created", body = Property),
        (status = 400, description = "Invalid property data"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_property(
    auth: Auth,
    data: web::Data<AppState>,
    payload: web::Json<NewProperty>,
) -> Result<HttpResponse, ApiError> {
    payload.validate()?;
    let property = data.repo.create_property(payload.into_inner()).await;
    info!(property_id = property.id, by = %auth.0.username, "property created");
    Ok(HttpResponse::Created().json(property))
}

#[utoipa::path(
    put,
    path = "/api/properties/{id}",
    request_body = UpdateProperty,
    params(("id" = Id, Path, description = "Property id")),
    responses(
        (status = 200, description = "Property updated", body = Property),
        (status = 400, description = "Invalid property data"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Property not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_property(
    auth: Auth,
    data: web::Data<AppState>,
    path: web::Path<Id>,
    payload: web::Json<UpdateProperty>,
) -> Result<HttpResponse, ApiError> {
    payload.validate()?;
    let property = data
        .repo
        .update_property(path.into_inner(), payload.into_inner())
        .await
        .ok_or(ApiError::NotFound)?;
    info!(property_id = property.id, by = %auth.0.username, "property updated");
    Ok(HttpResponse::Ok().json(property))
}

#[utoipa::path(
    delete,
    path = "/api/properties/{id}",
    params(("id" = Id, Path, description = "Property id")),
    responses(
        (status = 200, description = "Property deleted", body = DeleteResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Property not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_property(auth: Auth, data: web::Data<AppState>, path: web::Path<Id>) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    if !data.repo.delete_property(id).await {
        return Err(ApiError::NotFound);
    }
    info!(property_id = id, by = %auth.0.username, "property deleted");
    Ok(deleted())
}

// ---------------- Blog posts -------------------------------------------

#[utoipa::path(
    get,
    path = "/api/blogs",
    responses((status = 200, description = "List blog posts", body = [BlogPost]))
)]
pub async fn list_blog_posts(data: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    Ok(HttpResponse::Ok().json(data.repo.list_blog_posts().await))
}

#[utoipa::path(
    get,
    path = "/api/blogs/{id}",
    params(("id" = Id, Path, description = "Blog post id")),
    responses(
        (status = 200, description = "Blog post", body = BlogPost),
        (status = 404, description = "Blog post not found")
    )
)]
pub async fn get_blog_post(data: web::Data<AppState>, path: web::Path<Id>) -> Result<HttpResponse, ApiError> {
    let post = data.repo.get_blog_post(path.into_inner()).await.ok_or(ApiError::NotFound)?;
    Ok(HttpResponse::Ok().json(post))
}

#[utoipa::path(
    post,
    path = "/api/blogs",
    request_body = NewBlogPost,
    responses(
        (status = 201, description = "Blog post created", body = BlogPost),
        (status = 400, description = "Invalid blog data"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_blog_post(
    auth: Auth,
    data: web::Data<AppState>,
    payload: web::Json<NewBlogPost>,
) -> Result<HttpResponse, ApiError> {
    payload.validate()?;
    let post = data.repo.create_blog_post(payload.into_inner()).await;
    info!(blog_post_id = post.id, by = %auth.0.username, "blog post created");
    Ok(HttpResponse::Created().json(post))
}

#[utoipa::path(
    put,
    path = "/api/blogs/{id}",
    request_body = UpdateBlogPost,
    params(("id" = Id, Path, description = "Blog post id")),
    responses(
        (status = 200, description = "Blog post updated", body = BlogPost),
        (status = 400, description = "Invalid blog data"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Blog post not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_blog_post(
    auth: Auth,
    data: web::Data<AppState>,
    path: web::Path<Id>,
    payload: web::Json<UpdateBlogPost>,
) -> Result<HttpResponse, ApiError> {
    payload.validate()?;
    let post = data
        .repo
        .update_blog_post(path.into_inner(), payload.into_inner())
        .await
        .ok_or(ApiError::NotFound)?;
    info!(blog_post_id = post.id, by = %auth.0.username, "blog post updated");
    Ok(HttpResponse::Ok().json(post))
}

#[utoipa::path(
    delete,
    path = "/api/blogs/{id}",
    params(("id" = Id, Path, description = "Blog post id")),
    responses(
        (status = 200, description = "Blog post deleted", body = DeleteResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Blog post not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_blog_post(auth: Auth, data: web::Data<AppState>, path: web::Path<Id>) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    if !data.repo.delete_blog_post(id).await {
        return Err(ApiError::NotFound);
    }
    info!(blog_post_id = id, by = %auth.0.username, "blog post deleted");
    Ok(deleted())
}

// ---------------- Messages ---------------------------------------------

#[utoipa::path(
    get,
    path = "/api/messages",
    responses(
        (status = 200, description = "List contact messages", body = [Message]),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_messages(_auth: Auth, data: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    Ok(HttpResponse::Ok().json(data.repo.list_messages().await))
}

#[utoipa::path(
    get,
    path = "/api/messages/{id}",
    params(("id" = Id, Path, description = "Message id")),
    responses(
        (status = 200, description = "Contact message", body = Message),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Message not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_message(_auth: Auth, data: web::Data<AppState>, path: web::Path<Id>) -> Result<HttpResponse, ApiError> {
    let message = data.repo.get_message(path.into_inner()).await.ok_or(ApiError::NotFound)?;
    Ok(HttpResponse::Ok().json(message))
}

#[utoipa::path(
    post,
    path = "/api/messages",
    request_body = NewMessage,
    responses(
        (status = 201, description = "Message received", body = Message),
        (status = 400, description = "Invalid message data"),
        (status = 429, description = "Too many submissions")
    )
)]
pub async fn create_message(
    req: HttpRequest,
    data: web::Data<AppState>,
    payload: web::Json<NewMessage>,
) -> Result<HttpResponse, ApiError> {
    payload.validate()?;
    if let Some(rl) = &data.rate_limiter {
        let ip = client_ip(&req);
        if !rl.allow_message(&ip) {
            warn!(%ip, "contact form rate limited");
            return Err(ApiError::TooManyRequests);
        }
    }
    let message = data.repo.create_message(payload.into_inner()).await;
    info!(message_id = message.id, interest = %message.interest, "contact message received");
    Ok(HttpResponse::Created().json(message))
}

#[utoipa::path(
    put,
    path = "/api/messages/{id}/read",
    request_body = ReadStatus,
    params(("id" = Id, Path, description = "Message id")),
    responses(
        (status = 200, description = "Read status updated", body = Message),
        (status = 400, description = "isRead must be a boolean"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Message not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn set_message_read(
    _auth: Auth,
    data: web::Data<AppState>,
    path: web::Path<Id>,
    payload: web::Json<ReadStatus>,
) -> Result<HttpResponse, ApiError> {
    let message = data
        .repo
        .set_read_status(path.into_inner(), payload.is_read)
        .await
        .ok_or(ApiError::NotFound)?;
    Ok(HttpResponse::Ok().json(message))
}

#[utoipa::path(
    delete,
    path = "/api/messages/{id}",
    params(("id" = Id, Path, description = "Message id")),
    responses(
        (status = 200, description = "Message deleted", body = DeleteResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Message not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_message(auth: Auth, data: web::Data<AppState>, path: web::Path<Id>) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    if !data.repo.delete_message(id).await {
        return Err(ApiError::NotFound);
    }
    info!(message_id = id, by = %auth.0.username, "message deleted");
    Ok(deleted())
}

// ---------------- Testimonials -----------------------------------------

#[utoipa::path(
    get,
    path = "/api/testimonials",
    responses((status = 200, description = "List testimonials", body = [Testimonial]))
)]
pub async fn list_testimonials(data: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    Ok(HttpResponse::Ok().json(data.repo.list_testimonials().await))
}

#[utoipa::path(
    get,
    path = "/api/testimonials/{id}",
    params(("id" = Id, Path, description = "Testimonial id")),
    responses(
        (status = 200, description = "Testimonial", body = Testimonial),
        (status = 404, description = "Testimonial not found")
    )
)]
pub async fn get_testimonial(data: web::Data<AppState>, path: web::Path<Id>) -> Result<HttpResponse, ApiError> {
    let testimonial = data.repo.get_testimonial(path.into_inner()).await.ok_or(ApiError::NotFound)?;
    Ok(HttpResponse::Ok().json(testimonial))
}

#[utoipa::path(
    post,
    path = "/api/testimonials",
    request_body = NewTestimonial,
    responses(
        (status = 201, description = "Testimonial created", body = Testimonial),
        (status = 400, description = "Invalid testimonial data"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_testimonial(
    auth: Auth,
    data: web::Data<AppState>,
    payload: web::Json<NewTestimonial>,
) -> Result<HttpResponse, ApiError> {
    payload.validate()?;
    let testimonial = data.repo.create_testimonial(payload.into_inner()).await;
    info!(testimonial_id = testimonial.id, by = %auth.0.username, "testimonial created");
    Ok(HttpResponse::Created().json(testimonial))
}

#[utoipa::path(
    put,
    path = "/api/testimonials/{id}",
    request_body = UpdateTestimonial,
    params(("id" = Id, Path, description = "Testimonial id")),
    responses(
        (status = 200, description = "Testimonial updated", body = Testimonial),
        (status = 400, description = "Invalid testimonial data"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Testimonial not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_testimonial(
    auth: Auth,
    data: web::Data<AppState>,
    path: web::Path<Id>,
    payload: web::Json<UpdateTestimonial>,
) -> Result<HttpResponse, ApiError> {
    payload.validate()?;
    let testimonial = data
        .repo
        .update_testimonial(path.into_inner(), payload.into_inner())
        .await
        .ok_or(ApiError::NotFound)?;
    info!(testimonial_id = testimonial.id, by = %auth.0.username, "testimonial updated");
    Ok(HttpResponse::Ok().json(testimonial))
}

#[utoipa::path(
    delete,
    path = "/api/testimonials/{id}",
    params(("id" = Id, Path, description = "Testimonial id")),
    responses(
        (status = 200, description = "Testimonial deleted", body = DeleteResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Testimonial not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_testimonial(auth: Auth, data: web::Data<AppState>, path: web::Path<Id>) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    if !data.repo.delete_testimonial(id).await {
        return Err(ApiError::NotFound);
    }
    info!(testimonial_id = id, by = %auth.0.username, "testimonial deleted");
    Ok(deleted())
}
