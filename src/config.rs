use crate::model::Term;
use crate::store::{SeedOptions, Store, StoreSource};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(name = "campusd", version, about = "Academic records sidecar speaking JSON lines on stdio")]
pub struct Config {
    /// RNG seed for generated sample data.
    #[arg(long, env = "CAMPUSD_SEED", default_value_t = 42)]
    pub seed: u64,

    #[arg(long, env = "CAMPUSD_STUDENTS", default_value_t = 50)]
    pub students: usize,

    #[arg(long, env = "CAMPUSD_COURSES", default_value_t = 15)]
    pub courses: usize,

    #[arg(long, env = "CAMPUSD_FACULTY", default_value_t = 10)]
    pub faculty: usize,

    /// Start with no records at all.
    #[arg(long, env = "CAMPUSD_EMPTY", conflicts_with = "fixture")]
    pub empty: bool,

    /// Load records from a JSON file `{ students, courses, faculty, grades }`.
    #[arg(long, env = "CAMPUSD_FIXTURE")]
    pub fixture: Option<PathBuf>,

    /// Term stamped on new grades, e.g. "Fall 2024". Defaults to the calendar.
    #[arg(long, env = "CAMPUSD_TERM", value_parser = parse_term)]
    pub term: Option<Term>,

    /// Delay each request the way a remote API would.
    #[arg(long, env = "CAMPUSD_SIMULATE_LATENCY")]
    pub simulate_latency: bool,

    #[arg(long, env = "CAMPUSD_LATENCY_SCALE", default_value_t = 1.0)]
    pub latency_scale: f64,

    /// tracing EnvFilter directive; RUST_LOG wins when set.
    #[arg(long, env = "CAMPUSD_LOG", default_value = "campusd=info")]
    pub log_filter: String,
}

fn parse_term(s: &str) -> Result<Term, String> {
    s.parse()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    Lookup,
    List,
    Mutation,
    Export,
}

/// Artificial per-call delay. Disabled means zero for every call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Latency {
    pub enabled: bool,
    pub scale: f64,
}

impl Latency {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            scale: 1.0,
        }
    }

    pub fn delay_for(&self, kind: CallKind) -> Duration {
        if !self.enabled || !(self.scale > 0.0) {
            return Duration::ZERO;
        }
        let base_ms = match kind {
            CallKind::Lookup => 200.0,
            CallKind::List => 300.0,
            CallKind::Mutation => 400.0,
            CallKind::Export => 500.0,
        };
        Duration::from_millis((base_ms * self.scale).round() as u64)
    }
}

impl Config {
    pub fn term(&self) -> Term {
        self.term.clone().unwrap_or_else(Term::current)
    }

    pub fn seed_options(&self) -> SeedOptions {
        SeedOptions {
            seed: self.seed,
            students: self.students,
            courses: self.courses,
            faculty: self.faculty,
            term: self.term(),
        }
    }

    pub fn latency(&self) -> Latency {
        if !self.simulate_latency {
            return Latency::disabled();
        }
        Latency {
            enabled: true,
            scale: self.latency_scale,
        }
    }

    pub fn store_source(&self) -> StoreSource {
        match &self.fixture {
            Some(path) => StoreSource::Fixture(path.clone()),
            None if self.empty => StoreSource::Empty,
            None => StoreSource::Seeded,
        }
    }

    pub fn build_store(&self) -> anyhow::Result<Store> {
        Ok(self.store_source().build(&self.seed_options())?)
    }
}
