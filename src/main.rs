use std::sync::Arc;

use rust_devserver::config::{AppState, Config};
use rust_devserver::rewrite::SpecifierRewriter;
use rust_devserver::{browser, logger, server};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = Config::load()?;
    logger::init(&cfg)?;

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
        println!("[CONFIG] Using {workers} worker threads");
    }

    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.socket_addr()?;
    let listener = server::create_listener(addr)?;

    let state = Arc::new(AppState::new(cfg, Box::new(SpecifierRewriter)));

    logger::log_server_start(&addr, &state.config.server.root_dir);

    if state.config.server.open_browser {
        browser::open(&state.config.server.host, state.config.server.port);
    }

    server::run(listener, state).await
}
