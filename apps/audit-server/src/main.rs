//! Sharia Audit Server
//!
//! A thin HTTP wrapper around the audit engine. Provides REST API
//! endpoints for:
//!
//! - Document auditing (rule matching, scoring, status tiering)
//! - Rule table listing
//!
//! ## Architecture
//!
//! The engine itself is synchronous and stateless per call; this
//! server owns the rule table lifecycle (built-in or loaded from a
//! JSON file at startup) and adds:
//!
//! - Rate limiting via tower-governor
//! - CORS for browser clients

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use clap::Parser;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use audit_engine::{RuleMatcher, RuleTable};

mod api;
mod error;

use api::{handle_audit, handle_health, handle_list_rules};

/// Command-line arguments for the audit server
#[derive(Parser, Debug)]
#[command(name = "audit-server")]
#[command(about = "Sharia audit server for contract compliance checking")]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "3000")]
    port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Path to a JSON rule table (defaults to the built-in Sharia table)
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Rate limit: requests per second per IP
    #[arg(long, default_value = "10")]
    rate_limit: u32,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Compiled matcher, shared read-only across requests
    pub matcher: Arc<RuleMatcher>,
}

fn load_rule_table(path: Option<&PathBuf>) -> anyhow::Result<RuleTable> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read rule table {}", path.display()))?;
            let table = RuleTable::from_json(&json)
                .with_context(|| format!("invalid rule table {}", path.display()))?;
            Ok(table)
        }
        None => Ok(RuleTable::builtin()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting audit server on {}:{}", args.host, args.port);

    // Rule table must be valid before the server accepts any request
    let table = load_rule_table(args.rules.as_ref())?;
    let rule_count = table.len();
    let matcher = RuleMatcher::new(table).context("failed to compile rule table")?;

    // Create rate limiter configuration
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(args.rate_limit.into())
            .burst_size(args.rate_limit * 2)
            .finish()
            .expect("Failed to create rate limiter config"),
    );

    // Create shared state
    let state = AppState {
        matcher: Arc::new(matcher),
    };

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app = Router::new()
        // Health check
        .route("/health", get(handle_health))
        // API endpoints
        .route("/api/rules", get(handle_list_rules))
        .route("/api/audit", post(handle_audit))
        // Apply middleware
        .layer(GovernorLayer {
            config: governor_conf,
        })
        .layer(cors)
        .with_state(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);
    info!("Rate limit: {} requests/second per IP", args.rate_limit);
    info!("Loaded {} audit rules", rule_count);

    axum::serve(listener, app).await?;

    Ok(())
}
