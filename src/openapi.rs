use crate::models::{
    BlogPost, Message, NewBlogPost, NewMessage, NewProperty, NewTestimonial, Property, PropertyType,
    ReadStatus, SizeUnit, Testimonial, UpdateBlogPost, UpdateProperty, UpdateTestimonial,
};
use crate::routes::{DeleteResponse, LoginRequest, LoginResponse, UserSummary};
use utoipa::openapi::schema::{KnownFormat, ObjectBuilder, Schema, SchemaFormat, SchemaType};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::openapi::RefOr;
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::login,
        crate::routes::auth_me,
        crate::routes::list_properties,
        crate::routes::get_property,
        crate::routes::create_property,
        crate::routes::update_property,
        crate::routes::delete_property,
        crate::routes::list_blog_posts,
        crate::routes::get_blog_post,
        crate::routes::create_blog_post,
        crate::routes::update_blog_post,
        crate::routes::delete_blog_post,
        crate::routes::list_messages,
        crate::routes::get_message,
        crate::routes::create_message,
        crate::routes::set_message_read,
        crate::routes::delete_message,
        crate::routes::list_testimonials,
        crate::routes::get_testimonial,
        crate::routes::create_testimonial,
        crate::routes::update_testimonial,
        crate::routes::delete_testimonial,
    ),
    components(schemas(
        Property, NewProperty, UpdateProperty, PropertyType, SizeUnit,
        BlogPost, NewBlogPost, UpdateBlogPost,
        Message, NewMessage, ReadStatus,
        Testimonial, NewTestimonial, UpdateTestimonial,
        LoginRequest, LoginResponse, UserSummary, DeleteResponse
    )),
    modifiers(&ApiExtras)
)]
pub struct ApiDoc;

/// Registers the bearer scheme and the shared `Id` schema.
struct ApiExtras;

impl Modify for ApiExtras {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).bearer_format("JWT").build()),
        );
        let id = ObjectBuilder::new()
            .schema_type(SchemaType::Integer)
            .format(Some(SchemaFormat::KnownFormat(KnownFormat::Int64)))
            .build();
        components.schemas.insert("Id".to_string(), RefOr::T(Schema::Object(id)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/auth/login",
            "/api/properties",
            "/api/properties/{id}",
            "/api/blogs/{id}",
            "/api/messages/{id}/read",
            "/api/testimonials/{id}",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer_auth"));
        assert!(components.schemas.contains_key("Id"));
    }
}
