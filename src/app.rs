use crate::config::ServerConfig;
use crate::export::{self, EncodedTable};
use crate::generator::DatasetGenerator;
use anyhow::Result;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>cinesynth</title>
</head>
<body>
  <div class="App">
    <button id="generate">Generate Data</button>
    <p id="status"></p>
  </div>
  <script>
    function download(table) {
      const blob = new Blob([table.csv], { type: "text/csv" });
      const link = document.createElement("a");
      link.href = URL.createObjectURL(blob);
      link.download = table.file_name;
      link.click();
      URL.revokeObjectURL(link.href);
    }

    document.getElementById("generate").addEventListener("click", async () => {
      const status = document.getElementById("status");
      status.textContent = "";
      try {
        const res = await fetch("/generate", { method: "POST" });
        const body = await res.json();
        if (!res.ok) {
          status.textContent = body.message || "Generation failed";
          return;
        }
        download(body.titles);
        download(body.credits);
      } catch (err) {
        status.textContent = String(err);
      }
    });
  </script>
</body>
</html>
"#;

#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<DatasetGenerator>,
}

pub async fn run_server(config: ServerConfig) -> Result<()> {
    // Pool problems surface here, before the listener is bound.
    let state = AppState {
        generator: Arc::new(DatasetGenerator::standard()?),
    };

    let app = build_router(state).layer(TraceLayer::new_for_http());

    info!("Listening on {}", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/generate", post(generate))
        .route("/health", get(health))
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn health() -> &'static str {
    "OK"
}

/// Failure inside a handler, rendered as a JSON status/message body.
#[derive(Debug)]
pub struct AppError(anyhow::Error);

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!("Request failed: {:?}", self.0);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"status": "error", "message": format!("{:#}", self.0)})),
        )
            .into_response()
    }
}

async fn generate(State(state): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    // Each click is an independent run with its own entropy.
    let mut rng = StdRng::from_os_rng();
    let datasets = state.generator.generate(&mut rng);
    let encoded = export::encode_datasets(&datasets)?;

    info!(
        "Serving {} ({} rows) and {} ({} rows)",
        encoded.titles.file_name,
        encoded.titles.rows,
        encoded.credits.file_name,
        encoded.credits.rows
    );
    Ok(Json(json!({
        "titles": table_json(&encoded.titles),
        "credits": table_json(&encoded.credits),
    })))
}

fn table_json(table: &EncodedTable) -> serde_json::Value {
    json!({
        "file_name": table.file_name,
        "rows": table.rows,
        "csv": String::from_utf8_lossy(&table.bytes),
    })
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        let mut term = signal(SignalKind::terminate()).expect("failed to install SIGTERM handler");
        term.recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Shutdown signal received (Ctrl+C)");
        }
        _ = terminate => {
            info!("Shutdown signal received (SIGTERM)");
        }
    }
}
