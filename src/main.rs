use log::info;
use rocket::fairing::AdHoc;
use std::env;

use capped_2048_ai::config::Config;
use capped_2048_ai::engine::Engine;
use capped_2048_ai::handler;

#[rocket::launch]
fn rocket() -> _ {
    // Lots of web hosting services expect you to bind to the port specified by the `PORT`
    // environment variable. However, Rocket looks at the `ROCKET_PORT` environment variable.
    // If we find a value for `PORT`, we set `ROCKET_PORT` to that value.
    if let Ok(port) = env::var("PORT") {
        env::set_var("ROCKET_PORT", &port);
    }

    // We default to 'info' level logging. But if the `RUST_LOG` environment variable is set,
    // we keep that value instead.
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }

    env_logger::init();

    info!("Starting 2048 engine server...");

    // Load configuration once at startup
    let config = Config::load_or_default();
    info!(
        "Search depth {}, merge cap {}",
        config.search.search_depth, config.search.merge_cap
    );

    handler::build_rocket(Engine::new(config)).attach(AdHoc::on_response(
        "Server ID Middleware",
        |_, res| {
            Box::pin(async move {
                res.set_raw_header("Server", "capped-2048-ai");
            })
        },
    ))
}
