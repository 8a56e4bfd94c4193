use actix_web::{web, App, HttpServer};
use hexlink_backend::config::Config;
use hexlink_backend::extractors::JsonBodyLimit;
use hexlink_backend::infra::state::build_state;
use hexlink_backend::middleware::{
    cors_middleware, RequestTrace, StructuredLogger, TraceSpan,
};
use hexlink_backend::routes;
use hexlink_backend::telemetry;
use tracing::{error, info, warn};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    // Connects and runs pending migrations
    let app_state = match build_state().with_db(config.db_kind).build().await {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "failed to build application state");
            std::process::exit(1);
        }
    };
    info!(db_kind = ?config.db_kind, "database ready");

    if config.debug_routes {
        warn!("debug routes enabled: /debug/rooms, /debug/clear");
    }

    let data = web::Data::new(app_state);
    let json_limit = web::Data::new(JsonBodyLimit(config.max_json_payload_size));
    let debug_routes = config.debug_routes;

    info!(host = %config.host, port = config.port, "starting hexlink backend");

    HttpServer::new(move || {
        App::new()
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .wrap(StructuredLogger)
            .wrap(cors_middleware())
            .app_data(data.clone())
            .app_data(json_limit.clone())
            .route("/", web::get().to(routes::health::root))
            .configure(routes::configure)
            .configure(|cfg| {
                if debug_routes {
                    routes::configure_debug(cfg);
                }
            })
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
