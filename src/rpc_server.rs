//! tilmarks RPC server: JSON-RPC over stdin/stdout for a UI shell.
//!
//! Protocol: one JSON object per line (newline-delimited JSON).
//! Request:  {"id":1, "method":"bookmark.add", "params":{"form":{"title":"...","url":"..."}}}
//! Response: {"id":1, "result":{...}} or {"id":1, "error":"..."}
//!
//! Responses to file and auto-fill methods may arrive out of order; match them by id.

use std::process::ExitCode;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use tilmarks::app::App;
use tilmarks::rpc_handler::{handle_async_method, handle_method, is_async_method};
use tilmarks::services::settings_engine::{SettingsEngine, SettingsEngineTrait};

/// Environment variable naming an alternate settings file.
const SETTINGS_ENV: &str = "TILMARKS_SETTINGS";

/// Simple rate limiter: max requests per second.
struct RateLimiter {
    window_start: Instant,
    request_count: u32,
    max_per_second: u32,
}

impl RateLimiter {
    fn new(max_per_second: u32) -> Self {
        Self { window_start: Instant::now(), request_count: 0, max_per_second }
    }

    /// Returns true if the request is allowed, false if rate-limited.
    fn check(&mut self) -> bool {
        if self.window_start.elapsed().as_secs() >= 1 {
            self.window_start = Instant::now();
            self.request_count = 0;
        }
        self.request_count += 1;
        self.request_count <= self.max_per_second
    }
}

/// Logs go to stderr; stdout carries the protocol. `RUST_LOG` wins over the
/// configured level.
fn init_tracing(settings_path: Option<String>) {
    let level = SettingsEngine::new(settings_path)
        .load()
        .map(|s| s.logging.level)
        .unwrap_or_else(|_| "info".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn response(id: Value, result: Result<Value, String>) -> Value {
    match result {
        Ok(val) => json!({"id": id, "result": val}),
        Err(err) => json!({"id": id, "error": err}),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let settings_path = std::env::var(SETTINGS_ENV).ok();
    init_tracing(settings_path.clone());

    let app = match App::from_settings(settings_path) {
        Ok(app) => Arc::new(Mutex::new(app)),
        Err(e) => {
            error!(error = %e, "failed to start tilmarks");
            return ExitCode::FAILURE;
        }
    };

    // Single writer so concurrent responses never interleave within a line.
    let (tx, mut rx) = mpsc::unbounded_channel::<Value>();
    let writer = tokio::spawn(async move {
        let mut stdout = tokio::io::stdout();
        while let Some(message) = rx.recv().await {
            let line = format!("{}\n", message);
            if stdout.write_all(line.as_bytes()).await.is_err() || stdout.flush().await.is_err() {
                break;
            }
        }
    });

    let _ = tx.send(json!({"event": "ready", "version": env!("CARGO_PKG_VERSION")}));
    info!("rpc server ready");

    let mut rate_limiter = RateLimiter::new(200);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(l)) => l,
            Ok(None) => break,
            Err(e) => {
                warn!(error = %e, "stdin read failed");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let req: Value = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                let _ = tx.send(json!({"id": null, "error": format!("parse error: {}", e)}));
                continue;
            }
        };

        let id = req.get("id").cloned().unwrap_or(Value::Null);

        if !rate_limiter.check() {
            let _ = tx.send(json!({"id": id, "error": "rate limit exceeded"}));
            continue;
        }

        let method = req.get("method").and_then(|v| v.as_str()).unwrap_or("").to_string();
        let params = req.get("params").cloned().unwrap_or(json!({}));

        if is_async_method(&method) {
            let app = app.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                let result = handle_async_method(app, &method, &params).await;
                let _ = tx.send(response(id, result));
            });
        } else {
            let result = handle_method(&app, &method, &params);
            let _ = tx.send(response(id, result));
        }
    }

    drop(tx);
    let _ = writer.await;
    ExitCode::SUCCESS
}
