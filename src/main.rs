use actix_cors::Cors;
use actix_web::{http::header, middleware::Logger, web, App, HttpServer};
use scholar_server::{
    app_state::AppState, config::Config, handlers, middleware::RequestIdMiddleware,
};

fn cors(allowed_origin: Option<&str>) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec!["GET", "POST"])
        .allowed_headers(vec![header::CONTENT_TYPE])
        .max_age(3600);

    match allowed_origin {
        Some(origin) => cors.allowed_origin(origin),
        None => cors,
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env();
    let bind_address = (config.web_server_host.clone(), config.web_server_port);

    let state = match AppState::new(config).await {
        Ok(state) => state,
        Err(e) => {
            log::error!("Startup failed: {}", e);
            return Err(std::io::Error::other(e.to_string()));
        }
    };

    log::info!(
        "Using model {}; listening on http://{}:{}",
        state.diagnostics_service.model_identifier(),
        bind_address.0,
        bind_address.1
    );

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(cors(state.config.cors_allowed_origin.as_deref()))
            .wrap(Logger::default())
            .wrap(RequestIdMiddleware)
            .configure(handlers::configure)
            .default_service(web::route().to(handlers::not_found))
    })
    .bind(bind_address)?
    .run()
    .await
}
