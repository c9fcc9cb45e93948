// Server module entry point
// Listener setup, accept loop, and per-connection serving

mod listener;
mod signal;

pub use listener::create_listener;
pub use signal::{start_signal_handler, ShutdownSignal};

use crate::config::Config;
use crate::handler;
use crate::logger;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Accept connections until the shutdown signal fires.
///
/// Accept errors are logged and never tear down the loop; a shutdown request
/// makes it return cleanly so the process can exit 0.
pub async fn run(
    listener: TcpListener,
    cfg: Arc<Config>,
    shutdown: Arc<ShutdownSignal>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        if cfg.logging.access_log {
                            logger::log_connection_accepted(&peer_addr);
                        }
                        handle_connection(stream, Arc::clone(&cfg));
                    }
                    Err(e) => logger::log_connection_error(&e),
                }
            }

            () = shutdown.notified() => {
                logger::log_shutdown();
                break;
            }
        }
    }

    Ok(())
}

/// Serve a single connection in a spawned task.
///
/// Wraps the TCP stream in `TokioIo`, serves it with HTTP/1.1 keep-alive, and
/// hands every request to the request handler.
fn handle_connection(stream: tokio::net::TcpStream, cfg: Arc<Config>) {
    tokio::spawn(async move {
        let io = TokioIo::new(stream);

        let conn = http1::Builder::new().keep_alive(true).serve_connection(
            io,
            service_fn(move |req| {
                let cfg = Arc::clone(&cfg);
                async move { handler::handle_request(req, cfg).await }
            }),
        );

        if let Err(err) = conn.await {
            logger::log_connection_error(&err);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppConfig, LoggingConfig, ServerConfig};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;

    fn test_config(environment: &str) -> Config {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                workers: None,
            },
            app: AppConfig {
                environment: environment.to_string(),
            },
            logging: LoggingConfig { access_log: false },
        }
    }

    /// Bind an ephemeral port and run the accept loop in the background.
    async fn spawn_server(cfg: Config) -> (std::net::SocketAddr, Arc<ShutdownSignal>) {
        let listener = create_listener(cfg.socket_addr().unwrap()).unwrap();
        let addr = listener.local_addr().unwrap();
        let shutdown = Arc::new(ShutdownSignal::new());

        let loop_shutdown = Arc::clone(&shutdown);
        tokio::spawn(async move {
            let _ = run(listener, Arc::new(cfg), loop_shutdown).await;
        });

        (addr, shutdown)
    }

    /// Send a raw HTTP/1.1 request and read the full response.
    async fn roundtrip(addr: std::net::SocketAddr, raw: &str) -> String {
        let mut stream = TcpStream::connect(addr).await.unwrap();
        stream.write_all(raw.as_bytes()).await.unwrap();

        let mut buf = Vec::new();
        stream.read_to_end(&mut buf).await.unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn get(path: &str) -> String {
        format!("GET {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
    }

    #[tokio::test]
    async fn root_serves_greeting() {
        let (addr, _shutdown) = spawn_server(test_config("development")).await;

        let resp = roundtrip(addr, &get("/")).await;
        assert!(resp.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(resp.ends_with("Hello from Node.js on OpenShift!"));
    }

    #[tokio::test]
    async fn health_returns_ok() {
        let (addr, _shutdown) = spawn_server(test_config("development")).await;

        let resp = roundtrip(addr, &get("/health")).await;
        assert!(resp.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(resp.ends_with("\r\n\r\nOK"));
    }

    #[tokio::test]
    async fn info_reports_metadata() {
        let (addr, _shutdown) = spawn_server(test_config("production")).await;

        let resp = roundtrip(addr, &get("/api/info")).await;
        assert!(resp.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(resp.to_lowercase().contains("content-type: application/json"));

        let body = resp.split("\r\n\r\n").nth(1).unwrap();
        let value: serde_json::Value = serde_json::from_str(body).unwrap();
        assert_eq!(value["app"], "nodejs-sample");
        assert_eq!(value["version"], "1.0.0");
        assert_eq!(value["environment"], "production");
        assert!(value["hostname"].is_string());
        assert_eq!(value.as_object().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn unknown_path_is_404() {
        let (addr, _shutdown) = spawn_server(test_config("development")).await;

        let resp = roundtrip(addr, &get("/nope")).await;
        assert!(resp.starts_with("HTTP/1.1 404 Not Found\r\n"));
    }

    #[tokio::test]
    async fn post_is_rejected_with_405() {
        let (addr, _shutdown) = spawn_server(test_config("development")).await;

        let resp = roundtrip(
            addr,
            "POST / HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\nContent-Length: 0\r\n\r\n",
        )
        .await;
        assert!(resp.starts_with("HTTP/1.1 405 Method Not Allowed\r\n"));
        assert!(resp.contains("GET, HEAD, OPTIONS"));
    }

    #[tokio::test]
    async fn head_omits_body_but_keeps_length() {
        let (addr, _shutdown) = spawn_server(test_config("development")).await;

        let resp = roundtrip(
            addr,
            "HEAD /health HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
        )
        .await;
        assert!(resp.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(resp.to_lowercase().contains("content-length: 2"));
        assert!(resp.ends_with("\r\n\r\n"));
    }

    #[tokio::test]
    async fn shutdown_stops_accept_loop() {
        let listener = create_listener("127.0.0.1:0".parse().unwrap()).unwrap();
        let shutdown = Arc::new(ShutdownSignal::new());

        let loop_shutdown = Arc::clone(&shutdown);
        let handle = tokio::spawn(run(
            listener,
            Arc::new(test_config("development")),
            loop_shutdown,
        ));

        shutdown.request();
        handle.await.unwrap().unwrap();
    }
}
