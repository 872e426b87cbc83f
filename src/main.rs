/*****************************************************************************************
 *
 *  Auriga – Record Microservice over a single JSON file
 *  ----------------------------------------------------
 *
 *  PUT /create-data · GET /get-data · POST /update-data · DELETE /delete-data
 *
 *****************************************************************************************/

mod app;
mod config;
mod errors;
mod persistence;
mod routes;
mod services;
mod state;

use std::process::ExitCode;
use std::sync::Arc;

use axum::serve;
use clap::Parser;
use tokio::net::TcpListener;

use tracing_subscriber::FmtSubscriber;
use tracing::level_filters::LevelFilter;

use crate::config::{AppConfig, Cli, Command, ListenAddress};
use crate::state::store::{SharedStore, Store};

#[tokio::main]
async fn main() -> ExitCode {
    let Cli { command: Command::Serve(args) } = Cli::parse();

    //
    // ────────────────────────────────────────────────────────
    //  Load configuration
    // ────────────────────────────────────────────────────────
    //
    let cfg = match AppConfig::resolve(&args) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("ERROR: {e}");
            return ExitCode::FAILURE;
        }
    };

    //
    // ────────────────────────────────────────────────────────
    //  Configure logging
    // ────────────────────────────────────────────────────────
    //
    let level = match cfg.log_level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info"  => LevelFilter::INFO,
        "warn"  => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => LevelFilter::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("ERROR: failed to set tracing subscriber: {e}");
        return ExitCode::FAILURE;
    }

    tracing::info!("Starting Auriga…");
    tracing::info!("Loaded configuration: {:?}", cfg);

    let addr = match ListenAddress::parse(&cfg.address) {
        Ok(addr) => addr.socket_addr(),
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    //
    // ────────────────────────────────────────────────────────
    //  Load (or seed) the record file
    // ────────────────────────────────────────────────────────
    //
    let store: SharedStore = match Store::open(&cfg.data_file, cfg.atomic_writes) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    //
    // ────────────────────────────────────────────────────────
    //  Build Axum app and start listening
    // ────────────────────────────────────────────────────────
    //
    let app = app::build_app(store.clone(), &cfg);

    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {addr}: {e}");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!("Listening on http://{}", addr);

    if let Err(e) = serve(listener, app)
        .with_graceful_shutdown(shutdown(store))
        .await
    {
        tracing::error!("Server error: {e}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

//
// ─────────────────────────────────────────────────────────────
//  Graceful shutdown handler
// ─────────────────────────────────────────────────────────────
//
async fn shutdown(store: SharedStore) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }

    tracing::warn!("CTRL+C received — flushing {}…", store.path().display());
    match store.persist() {
        Ok(()) => tracing::info!("Records saved. Goodbye."),
        Err(e) => tracing::error!("Final flush failed: {e}"),
    }
}
