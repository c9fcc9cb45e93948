use std::sync::Arc;

mod api;
mod config;
mod handler;
mod logger;
mod response;
mod server;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cfg = config::Config::load()?;

    // Build the Tokio runtime, pinning worker threads when configured
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let addr = cfg.socket_addr()?;

    // Bind failure is fatal; the error propagates and the process exits non-zero
    let listener = server::create_listener(addr)?;

    logger::log_server_start(&addr, &cfg);

    let shutdown = Arc::new(server::ShutdownSignal::new());
    server::start_signal_handler(Arc::clone(&shutdown));

    server::run(listener, Arc::new(cfg), shutdown).await?;
    Ok(())
}
