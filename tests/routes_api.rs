use actix_web::{test, web, App};
use nainaland::{config, config::AppConfig, init_state, AppState};
use serde_json::{json, Value};

const SECRET: &str = "test-secret-must-be-32-bytes-long!!";

fn test_config(seed_samples: bool) -> AppConfig {
    AppConfig::from_lookup(|name| match name {
        "JWT_SECRET" => Some(SECRET.to_string()),
        "RATE_LIMIT_ENABLED" => Some("false".to_string()),
        "SEED_SAMPLE_DATA" => Some(seed_samples.to_string()),
        _ => None,
    })
    .unwrap()
}

async fn state(seed_samples: bool) -> AppState {
    init_state(&test_config(seed_samples)).await.unwrap()
}

macro_rules! app {
    ($state:expr) => {
        test::init_service(App::new().app_data(web::Data::new($state)).configure(config)).await
    };
}

macro_rules! login {
    ($app:expr) => {{
        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(&json!({"username": "admin", "password": "admin123"}))
            .to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status(), 200);
        let body: Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();
        body["token"].as_str().unwrap().to_string()
    }};
}

fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {token}"))
}

fn property_body() -> Value {
    json!({
        "title": "Lakeside Farm Plot",
        "description": "Two acres next to the lake with a borewell",
        "price": 4200000,
        "location": "Kanakapura",
        "size": 2,
        "sizeUnit": "Acres",
        "features": ["Borewell", "Lake View"],
        "images": ["https://img.example.com/lake.jpg"],
        "isFeatured": true,
        "propertyType": "FarmHouse"
    })
}

#[actix_web::test]
async fn login_me_and_gated_create() {
    let app = app!(state(false).await);
    let token = login!(app);

    let req = test::TestRequest::get().uri("/api/auth/me").insert_header(bearer(&token)).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let me: Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();
    assert_eq!(me["username"], "admin");

    // no header
    let req = test::TestRequest::post().uri("/api/properties").set_json(&property_body()).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 401);

    // forged token
    let req = test::TestRequest::post()
        .uri("/api/properties")
        .insert_header(bearer("not.a.token"))
        .set_json(&property_body())
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 401);

    let req = test::TestRequest::post()
        .uri("/api/properties")
        .insert_header(bearer(&token))
        .set_json(&property_body())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let created: Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();
    assert_eq!(created["id"], 1);
    assert_eq!(created["propertyType"], "FarmHouse");
    assert!(created["createdAt"].is_string());

    // public read
    let req = test::TestRequest::get().uri("/api/properties/1").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let fetched: Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();
    assert_eq!(fetched, created);
}

#[actix_web::test]
async fn login_failures() {
    let app = app!(state(false).await);

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(&json!({"username": "admin", "password": "wrong"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 401);

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(&json!({"username": "ghost", "password": "admin123"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 401);

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(&json!({"username": "admin", "password": ""}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 400);

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(&json!({"username": "admin"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 400);
}

#[actix_web::test]
async fn property_filters_over_sample_data() {
    let app = app!(state(true).await);

    let req = test::TestRequest::get().uri("/api/properties").to_request();
    let all: Value = serde_json::from_slice(&test::read_body(test::call_service(&app, req).await).await).unwrap();
    assert_eq!(all.as_array().unwrap().len(), 6);

    let req = test::TestRequest::get().uri("/api/properties?type=Agricultural").to_request();
    let agri: Value = serde_json::from_slice(&test::read_body(test::call_service(&app, req).await).await).unwrap();
    let expected: Vec<&Value> = all
        .as_array()
        .unwrap()
        .iter()
        .filter(|p| p["propertyType"] == "Agricultural")
        .collect();
    assert_eq!(agri.as_array().unwrap().iter().collect::<Vec<_>>(), expected);
    assert_eq!(expected.len(), 2);

    let req = test::TestRequest::get().uri("/api/properties?featured=true").to_request();
    let featured: Value = serde_json::from_slice(&test::read_body(test::call_service(&app, req).await).await).unwrap();
    assert!(featured.as_array().unwrap().iter().all(|p| p["isFeatured"] == true));
    assert_eq!(featured.as_array().unwrap().len(), 2);

    // type takes precedence over featured
    let req = test::TestRequest::get().uri("/api/properties?type=Commercial&featured=true").to_request();
    let commercial: Value = serde_json::from_slice(&test::read_body(test::call_service(&app, req).await).await).unwrap();
    assert_eq!(commercial.as_array().unwrap().len(), 1);

    // unknown or differently cased type matches nothing
    for uri in ["/api/properties?type=Castle", "/api/properties?type=agricultural"] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), 200, "{uri}");
        let body: Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();
        assert_eq!(body, json!([]), "{uri}");
    }

    // empty type and non-"true" featured are ignored
    for uri in ["/api/properties?type=", "/api/properties?featured=1", "/api/properties?featured=false"] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), 200, "{uri}");
        let body: Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();
        assert_eq!(body.as_array().unwrap().len(), 6, "{uri}");
    }

    let req = test::TestRequest::get().uri("/api/properties?type=&featured=true").to_request();
    let featured: Value = serde_json::from_slice(&test::read_body(test::call_service(&app, req).await).await).unwrap();
    assert_eq!(featured.as_array().unwrap().len(), 2);
}

#[actix_web::test]
async fn not_found_and_validation_errors() {
    let app = app!(state(false).await);
    let token = login!(app);

    let req = test::TestRequest::get().uri("/api/properties/999").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 404);

    let req = test::TestRequest::get().uri("/api/blogs/abc").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
    let body: Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();
    assert_eq!(body, json!({"error": "not found"}));

    // rule violation carries field detail
    let mut bad = property_body();
    bad["price"] = json!(0);
    bad["title"] = json!("Lot");
    let req = test::TestRequest::post()
        .uri("/api/properties")
        .insert_header(bearer(&token))
        .set_json(&bad)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let err: Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();
    assert_eq!(err["error"], "validation failed");
    assert!(err["details"]["price"].is_array());
    assert!(err["details"]["title"].is_array());

    // malformed JSON
    let req = test::TestRequest::post()
        .uri("/api/properties")
        .insert_header(bearer(&token))
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{\"title\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let err: Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();
    assert_eq!(err["error"], "bad request");

    // unknown enum value
    let mut bad = property_body();
    bad["sizeUnit"] = json!("Hectare");
    let req = test::TestRequest::post()
        .uri("/api/properties")
        .insert_header(bearer(&token))
        .set_json(&bad)
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 400);

    // valid update on unknown id -> 404, invalid update -> 400 first
    let req = test::TestRequest::put()
        .uri("/api/properties/999")
        .insert_header(bearer(&token))
        .set_json(&json!({"price": 100}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 404);
    let req = test::TestRequest::put()
        .uri("/api/properties/999")
        .insert_header(bearer(&token))
        .set_json(&json!({"price": 0}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 400);
}

#[actix_web::test]
async fn property_update_and_delete() {
    let app = app!(state(false).await);
    let token = login!(app);

    let req = test::TestRequest::post()
        .uri("/api/properties")
        .insert_header(bearer(&token))
        .set_json(&property_body())
        .to_request();
    let created: Value = serde_json::from_slice(&test::read_body(test::call_service(&app, req).await).await).unwrap();

    let req = test::TestRequest::put()
        .uri("/api/properties/1")
        .insert_header(bearer(&token))
        .set_json(&json!({"isFeatured": false, "id": 50, "createdAt": "2001-01-01T00:00:00Z"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let updated: Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();
    assert_eq!(updated["isFeatured"], false);
    assert_eq!(updated["id"], 1);
    assert_eq!(updated["createdAt"], created["createdAt"]);
    assert_eq!(updated["title"], created["title"]);

    let req = test::TestRequest::delete().uri("/api/properties/1").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 401);

    let req = test::TestRequest::delete().uri("/api/properties/1").insert_header(bearer(&token)).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();
    assert_eq!(body["success"], true);

    let req = test::TestRequest::get().uri("/api/properties/1").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 404);
    let req = test::TestRequest::delete().uri("/api/properties/1").insert_header(bearer(&token)).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 404);
}

#[actix_web::test]
async fn contact_messages_flow() {
    let app = app!(state(false).await);
    let token = login!(app);

    // public submission; a client-supplied isRead is ignored
    let req = test::TestRequest::post()
        .uri("/api/messages")
        .set_json(&json!({
            "name": "Ravi Kumar",
            "email": "ravi@example.com",
            "phone": "9876543210",
            "interest": "Residential Plot",
            "message": "Looking for a 20 guntha plot",
            "isRead": true
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let msg: Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();
    assert_eq!(msg["isRead"], false);
    let id = msg["id"].as_i64().unwrap();

    let req = test::TestRequest::post()
        .uri("/api/messages")
        .set_json(&json!({"name": "R", "email": "bad", "phone": "1", "interest": "", "message": ""}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 400);

    // reading the inbox is admin-only
    let req = test::TestRequest::get().uri("/api/messages").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 401);
    let req = test::TestRequest::get().uri(&format!("/api/messages/{id}")).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 401);

    let req = test::TestRequest::get().uri("/api/messages").insert_header(bearer(&token)).to_request();
    let list: Value = serde_json::from_slice(&test::read_body(test::call_service(&app, req).await).await).unwrap();
    assert_eq!(list.as_array().unwrap().len(), 1);

    let req = test::TestRequest::put()
        .uri(&format!("/api/messages/{id}/read"))
        .insert_header(bearer(&token))
        .set_json(&json!({"isRead": "yes"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 400);

    let req = test::TestRequest::put()
        .uri(&format!("/api/messages/{id}/read"))
        .insert_header(bearer(&token))
        .set_json(&json!({"isRead": true}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let read: Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();
    assert_eq!(read["isRead"], true);
    assert_eq!(read["createdAt"], msg["createdAt"]);

    let req = test::TestRequest::put()
        .uri("/api/messages/404/read")
        .insert_header(bearer(&token))
        .set_json(&json!({"isRead": true}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 404);

    let req = test::TestRequest::delete().uri(&format!("/api/messages/{id}")).insert_header(bearer(&token)).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 200);
    let req = test::TestRequest::get().uri(&format!("/api/messages/{id}")).insert_header(bearer(&token)).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 404);
}

#[actix_web::test]
async fn blog_crud_routes() {
    let app = app!(state(true).await);
    let token = login!(app);

    let req = test::TestRequest::get().uri("/api/blogs").to_request();
    let posts: Value = serde_json::from_slice(&test::read_body(test::call_service(&app, req).await).await).unwrap();
    assert_eq!(posts.as_array().unwrap().len(), 3);

    let req = test::TestRequest::post()
        .uri("/api/blogs")
        .insert_header(bearer(&token))
        .set_json(&json!({
            "title": "Reading a land survey map",
            "content": "Survey numbers, hissa numbers and boundaries explained step by step for first-time buyers.",
            "excerpt": "Survey maps without the jargon",
            "author": "Vikram Singh",
            "image": "https://img.example.com/survey.jpg"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let post: Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();
    assert_eq!(post["id"], 4);

    let req = test::TestRequest::put()
        .uri("/api/blogs/4")
        .insert_header(bearer(&token))
        .set_json(&json!({"image": "not a url"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 400);

    let req = test::TestRequest::put()
        .uri("/api/blogs/4")
        .insert_header(bearer(&token))
        .set_json(&json!({"excerpt": "Survey maps, demystified"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let updated: Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();
    assert_eq!(updated["excerpt"], "Survey maps, demystified");
    assert_eq!(updated["title"], post["title"]);

    let req = test::TestRequest::delete().uri("/api/blogs/4").insert_header(bearer(&token)).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 200);
    let req = test::TestRequest::get().uri("/api/blogs/4").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 404);
}

#[actix_web::test]
async fn testimonial_crud_routes() {
    let app = app!(state(true).await);
    let token = login!(app);

    let req = test::TestRequest::get().uri("/api/testimonials/3").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let seeded: Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();
    assert_eq!(seeded["rating"], 4.5);

    let body = json!({
        "name": "Suresh",
        "location": "Mysore",
        "message": "Found farmland within a month",
        "rating": 5,
        "image": "https://img.example.com/s.jpg"
    });
    let req = test::TestRequest::post().uri("/api/testimonials").set_json(&body).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 401);

    let req = test::TestRequest::post()
        .uri("/api/testimonials")
        .insert_header(bearer(&token))
        .set_json(&body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let created: Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();
    let id = created["id"].as_i64().unwrap();

    let req = test::TestRequest::put()
        .uri(&format!("/api/testimonials/{id}"))
        .insert_header(bearer(&token))
        .set_json(&json!({"rating": 7}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 400);

    let req = test::TestRequest::put()
        .uri(&format!("/api/testimonials/{id}"))
        .insert_header(bearer(&token))
        .set_json(&json!({"location": "Mandya"}))
        .to_request();
    let updated: Value = serde_json::from_slice(&test::read_body(test::call_service(&app, req).await).await).unwrap();
    assert_eq!(updated["location"], "Mandya");
    assert_eq!(updated["name"], "Suresh");

    let req = test::TestRequest::delete().uri(&format!("/api/testimonials/{id}")).insert_header(bearer(&token)).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 200);
    let req = test::TestRequest::get().uri("/api/testimonials").to_request();
    let list: Value = serde_json::from_slice(&test::read_body(test::call_service(&app, req).await).await).unwrap();
    assert_eq!(list.as_array().unwrap().len(), 3);
}
