use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{middleware::Compress, web, App, HttpServer};
use tracing::{info, Level};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi; // bring trait into scope for ApiDoc::openapi()
use utoipa_swagger_ui::SwaggerUi;

use nainaland::config::AppConfig;
use nainaland::openapi::ApiDoc;
use nainaland::{config, init_state, SecurityHeaders};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load .env automatically only in debug builds; deployments set the environment themselves.
    if cfg!(debug_assertions) {
        let _ = dotenv::dotenv();
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .init();

    let cfg = AppConfig::from_env()?;
    info!("Bootstrapping Nainaland API");
    info!("Frontend URL: {}", cfg.frontend_url);
    info!("Sample data: {}", cfg.seed_sample_data);
    info!("Rate limiting: {}", cfg.rate_limit.is_some());

    let state = web::Data::new(init_state(&cfg).await?);
    let openapi = ApiDoc::openapi();
    let frontend_url = cfg.frontend_url.clone();
    let enable_hsts = cfg.enable_hsts;

    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&frontend_url)
            .allowed_methods(["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
            .max_age(3600);

        App::new()
            .wrap(TracingLogger::default())
            .wrap(Compress::default())
            .wrap(SecurityHeaders::new(enable_hsts))
            .wrap(cors)
            .app_data(state.clone())
            .configure(config)
            .service(SwaggerUi::new("/docs/{_:.*}").url("/docs/openapi.json", openapi.clone()))
    })
    .bind(cfg.bind_addr.as_str())?;

    info!("Listening on http://{}", cfg.bind_addr);
    server.run().await?;
    Ok(())
}
