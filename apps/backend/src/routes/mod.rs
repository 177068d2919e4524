use actix_web::web;

pub mod health;
pub mod rooms;

/// Register every route; `main` and the HTTP tests share this.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure_routes);
    cfg.service(web::scope("/api/rooms").configure(rooms::configure_routes));
}
