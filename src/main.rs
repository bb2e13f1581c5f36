use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

use testgenius_server::{
    app_state::AppState,
    auth::{AuthMiddleware, JwtService},
    config::Config,
    handlers,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env();
    if std::env::var("APP_ENV").as_deref() == Ok("production") {
        config.validate_for_production();
    }

    let host = config.web_server_host.clone();
    let port = config.web_server_port;

    let jwt_service = JwtService::new(&config.identity_jwt_secret);
    let state = Arc::new(AppState::new(config).await.unwrap_or_else(|e| {
        panic!("Failed to initialize application state: {}", e);
    }));

    log::info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(Arc::clone(&state)))
            .app_data(web::Data::new(jwt_service.clone()))
            .wrap(Logger::default())
            .wrap(Cors::permissive())
            .service(handlers::health_check)
            .service(handlers::health_check_ready)
            .service(handlers::health_check_live)
            .service(handlers::register)
            .service(handlers::login)
            .service(handlers::stripe_webhook)
            .service(
                web::scope("")
                    .wrap(AuthMiddleware)
                    .service(handlers::generate_test)
                    .service(handlers::get_usage)
                    .service(handlers::create_checkout_session)
                    .service(handlers::create_customer_portal),
            )
    })
    .bind((host, port))?
    .run()
    .await
}
