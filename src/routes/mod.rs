// Route exports
pub mod player_form;

use actix_web::web;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(player_form::configure);
}
