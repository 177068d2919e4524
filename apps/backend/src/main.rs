use actix_web::{web, App, HttpServer};
use polis_backend::config::app::ServerConfig;
use polis_backend::infra::state::build_state;
use polis_backend::middleware::{cors_middleware, RequestTrace, TraceSpan};
use polis_backend::routes;
use tracing::{error, info};

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid server configuration");
            std::process::exit(1);
        }
    };

    let state = match build_state()
        .with_db(config.db_kind)
        .with_env_collaborators()
    {
        Ok(builder) => builder.build().await,
        Err(e) => Err(e),
    };
    let state = match state {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "Failed to build application state");
            std::process::exit(1);
        }
    };

    info!(
        host = %config.host,
        port = config.port,
        db_kind = ?config.db_kind,
        policies = state.catalog.policies.len(),
        "Starting Polis backend"
    );

    let data = web::Data::new(state);
    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
