//! hookline demo — wires configuration, logging, and a hook registry
//! together and runs a small request pipeline through it.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use hookline::prelude::*;
use hookline_core::config::AppConfig;

#[derive(Debug, Clone)]
struct Request {
    path: String,
    user: Option<String>,
}

#[derive(Debug, Clone)]
struct Response {
    status: u16,
    body: String,
}

hook_points! {
    /// Runs before a request is routed.
    BeforeRequest => "beforeRequest": Request;
    /// Runs after a response is produced.
    AfterRequest => "afterRequest": Response;
}

/// Collapses repeated slashes and strips a trailing slash in place.
struct NormalizePath;

#[async_trait]
impl HookHandler<Request> for NormalizePath {
    async fn handle(&self, ctx: &mut Request) -> HookResult<Option<Request>> {
        let segments: Vec<&str> = ctx.path.split('/').filter(|s| !s.is_empty()).collect();
        ctx.path = format!("/{}", segments.join("/"));
        Ok(None)
    }

    fn label(&self) -> &str {
        "normalize-path"
    }
}

/// Swaps in a new request carrying the resolved user.
struct ResolveUser {
    default_user: String,
}

#[async_trait]
impl HookHandler<Request> for ResolveUser {
    async fn handle(&self, ctx: &mut Request) -> HookResult<Option<Request>> {
        if ctx.user.is_some() {
            return Ok(None);
        }
        Ok(Some(Request {
            path: ctx.path.clone(),
            user: Some(self.default_user.clone()),
        }))
    }

    fn label(&self) -> &str {
        "resolve-user"
    }
}

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Demo failed: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from `config/` and the environment
fn load_configuration() -> Result<AppConfig, HookError> {
    let env = std::env::var("HOOKLINE_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

async fn run(config: AppConfig) -> Result<(), HookError> {
    tracing::info!("Starting hookline demo v{}", env!("CARGO_PKG_VERSION"));

    let registry = Arc::new(HookRegistry::with_config(config.registry.clone()));

    let resolve_user = Hook::new(ResolveUser {
        default_user: "guest".to_string(),
    });
    let stamp = Hook::<Response>::from_fn_named("stamp-body", |ctx| {
        Box::pin(async move {
            ctx.body = format!("[{}] {}", ctx.status, ctx.body);
            Ok(None)
        })
    });

    registry
        .register::<BeforeRequest>([Hook::new(NormalizePath), resolve_user.clone()])
        .await
        .register::<AfterRequest>([stamp])
        .await;

    tracing::info!(names = ?registry.registered_names().await, "Hooks registered");

    let request = registry
        .execute::<BeforeRequest>(Request {
            path: "//reports///2024/".to_string(),
            user: None,
        })
        .await?;
    tracing::info!(path = %request.path, user = ?request.user, "Request after hooks");

    let response = registry
        .execute::<AfterRequest>(Response {
            status: 200,
            body: format!("hello {}", request.user.as_deref().unwrap_or("anonymous")),
        })
        .await?;
    tracing::info!(body = %response.body, "Response after hooks");

    registry.unregister::<BeforeRequest>([&resolve_user]).await;

    let anonymous = registry
        .execute::<BeforeRequest>(Request {
            path: "/status/".to_string(),
            user: None,
        })
        .await?;
    tracing::info!(
        path = %anonymous.path,
        user = ?anonymous.user,
        "Request after user resolution was unregistered"
    );

    Ok(())
}
