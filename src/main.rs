mod activity;
mod config;
mod error;
mod export;
mod ipc;
mod model;
mod mutate;
mod query;
mod reports;
mod store;

use clap::Parser;
use std::io::{self, BufRead, Write};
use tracing_subscriber::EnvFilter;

fn init_tracing(cfg: &config::Config) {
    // stdout carries protocol frames; logs go to stderr.
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cfg.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("campusd=info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> anyhow::Result<()> {
    let cfg = config::Config::parse();
    init_tracing(&cfg);

    let store = cfg.build_store()?;
    tracing::info!(
        students = store.students.len(),
        courses = store.courses.len(),
        faculty = store.faculty.len(),
        grades = store.grades.len(),
        term = %store.term.semester,
        latency = cfg.simulate_latency,
        source = cfg.store_source().as_str(),
        "campusd ready"
    );
    let mut state =
        ipc::AppState::new(store, cfg.store_source(), cfg.seed_options(), cfg.latency());

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(v) => v,
            Err(e) => {
                tracing::error!(error = %e, "stdin read failed");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let req: ipc::Request = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                // Can't reply without id.
                tracing::warn!(error = %e, "bad request line");
                let resp = serde_json::json!({
                    "ok": false,
                    "error": { "code": "bad_json", "message": e.to_string() },
                });
                let _ = writeln!(stdout, "{resp}");
                let _ = stdout.flush();
                continue;
            }
        };

        let resp = ipc::handle_request(&mut state, req);
        let _ = writeln!(
            stdout,
            "{}",
            serde_json::to_string(&resp).unwrap_or_else(|_| "{\"ok\":false}".to_string())
        );
        let _ = stdout.flush();
    }

    tracing::info!("stdin closed, exiting");
    Ok(())
}
