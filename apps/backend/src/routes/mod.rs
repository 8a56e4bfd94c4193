use actix_web::web;

pub mod auth;
pub mod debug;
pub mod game;
pub mod health;
pub mod matchmaking;

/// Configure the public API routes.
///
/// `main.rs` wraps these with CORS and tracing middleware; tests register
/// them bare.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure_routes)
        .configure(auth::configure_routes)
        .configure(matchmaking::configure_routes)
        .configure(game::configure_routes);
}

/// Debug routes: `/debug/**`. Only mounted when enabled in config.
pub fn configure_debug(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/debug").configure(debug::configure_routes));
}
