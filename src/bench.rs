//! Benchmark harness for firestore-perf
//!
//! The harness seeds a collection with synthetic events and measures how
//! long one query takes to return all of its results. A run moves through
//! a fixed sequence of phases and never goes back:
//!
//! `Init -> Connected -> [Reset] -> Seeding -> Querying -> Reporting -> Done`
//!
//! Failing to build the client or to run the query aborts the run
//! (`Failed`). Everything else is logged and the run carries on.

use std::fmt;
use std::time::{Duration, Instant};

use log::{debug, warn};
use serde::Serialize;

use crate::core::document::CollectionRef;
use crate::core::errors::{PerfError, Result};
use crate::core::query::QuerySpec;
use crate::core::store::DocumentStore;
use crate::generator::{EventFactory, TenantMode};
use crate::reset::EmulatorResetClient;

/// Project used when none is configured
pub const DEFAULT_PROJECT_ID: &str = "zing-dev-adjunct";

/// Phases of a benchmark run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Init,
    Connected,
    Reset,
    Seeding,
    Querying,
    Reporting,
    Done,
    Failed,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Init => "initializing",
            Phase::Connected => "connecting",
            Phase::Reset => "resetting",
            Phase::Seeding => "seeding",
            Phase::Querying => "querying",
            Phase::Reporting => "reporting",
            Phase::Done => "done",
            Phase::Failed => "failed",
        };
        write!(f, "{}", name)
    }
}

/// Everything a run needs, passed explicitly to the harness
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Project the client is created for
    pub project_id: String,
    /// Collection path to seed and query
    pub collection: String,
    /// Emulator host (`host:port`), if any
    pub emulator_host: Option<String>,
    /// Number of events to insert
    pub document_count: usize,
    /// Tenant assignment for generated events
    pub tenant_mode: TenantMode,
    /// The timed query
    pub query: QuerySpec,
    /// Reset the emulator before seeding
    pub reset: bool,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        HarnessConfig {
            project_id: DEFAULT_PROJECT_ID.to_string(),
            collection: "perftesting".to_string(),
            emulator_host: None,
            document_count: 0,
            tenant_mode: TenantMode::Random,
            query: QuerySpec::new(),
            reset: false,
        }
    }
}

/// Outcome of the insertion loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeedSummary {
    /// Inserts attempted
    pub requested: usize,
    /// Inserts that returned an error
    pub failed: usize,
}

impl SeedSummary {
    /// Inserts that went through
    pub fn succeeded(&self) -> usize {
        self.requested - self.failed
    }
}

/// Outcome of the timed query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryOutcome {
    /// Number of documents consumed
    pub result_count: usize,
    /// Time from issuing the query to consuming its last result
    pub elapsed: Duration,
}

impl QueryOutcome {
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

/// Final figures of a run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkReport {
    pub project_id: String,
    pub collection: String,
    pub query: String,
    /// Inserts requested. Failed inserts are still counted here.
    pub inserted: usize,
    pub failed_inserts: usize,
    pub result_count: usize,
    pub elapsed_secs: f64,
}

impl fmt::Display for BenchmarkReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} inserted ({} failed), {} found in {:.6}s",
            self.collection, self.inserted, self.failed_inserts,
            self.result_count, self.elapsed_secs)
    }
}

/// Drives one benchmark run
pub struct Harness {
    /// Run configuration
    config: HarnessConfig,
    /// Reset client, used when `config.reset` is set
    reset_client: Option<EmulatorResetClient>,
    /// Phases entered so far
    history: Vec<Phase>,
}

impl Harness {
    /// Create a harness for the given configuration
    pub fn new(config: HarnessConfig) -> Self {
        Harness {
            config,
            reset_client: None,
            history: vec![Phase::Init],
        }
    }

    /// Use `client` for the optional reset step
    pub fn with_reset_client(mut self, client: EmulatorResetClient) -> Self {
        self.reset_client = Some(client);
        self
    }

    /// Run configuration
    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Current phase
    pub fn phase(&self) -> Phase {
        self.history.last().copied().unwrap_or(Phase::Init)
    }

    /// Every phase entered, in order
    pub fn history(&self) -> &[Phase] {
        &self.history
    }

    fn enter(&mut self, phase: Phase) {
        debug!("{} -> {}", self.phase(), phase);
        self.history.push(phase);
    }

    fn fail(&mut self, phase: Phase, error: PerfError) -> PerfError {
        self.enter(Phase::Failed);
        error.fatal(phase)
    }

    /// Insert `count` synthetic events into `collection`.
    ///
    /// Every insert is attempted. Failures are logged and counted but never
    /// retried and never stop the loop.
    pub fn seed<S: DocumentStore>(&self, store: &mut S, collection: &CollectionRef, count: usize) -> SeedSummary {
        let mut factory = EventFactory::starting_now(self.config.tenant_mode);
        let mut summary = SeedSummary::default();

        for i in 0..count {
            let event = factory.next();
            summary.requested += 1;

            if let Err(e) = store.add(collection, event.into_fields()) {
                warn!("Failed to add document {} to {}: {}", i, collection.path(), e);
                summary.failed += 1;
            }
        }

        println!("Inserted {} documents", summary.requested);
        if summary.failed > 0 {
            warn!("{} of {} inserts failed, {} stored", summary.failed, summary.requested, summary.succeeded());
        }

        summary
    }

    /// Run `spec` against `collection` and consume every result.
    ///
    /// The clock starts right before the query is issued and stops once the
    /// last result has been consumed.
    pub fn query<S: DocumentStore>(&self, store: &S, collection: &CollectionRef, spec: &QuerySpec) -> Result<QueryOutcome> {
        debug!("Running {} on {}", spec, collection.path());

        let start = Instant::now();
        let results = store.run_query(collection, spec)?;

        let mut result_count = 0;
        for doc in results {
            let _doc = doc?;
            result_count += 1;
        }
        let elapsed = start.elapsed();

        Ok(QueryOutcome { result_count, elapsed })
    }

    /// Print the progress lines for the query
    pub fn report(&self, report: &BenchmarkReport) {
        println!("Query completed in {} seconds.", report.elapsed_secs);
        println!("Found {} documents", report.result_count);
    }

    /// Execute a whole run.
    ///
    /// `connect` builds the store. The store is owned by this call and
    /// dropped before it returns, on success and on failure alike.
    pub fn run<S, C>(&mut self, connect: C) -> Result<BenchmarkReport>
    where
        S: DocumentStore,
        C: FnOnce(&HarnessConfig) -> Result<S>,
    {
        let mut store = match connect(&self.config) {
            Ok(store) => store,
            Err(e) => return Err(self.fail(Phase::Connected, e)),
        };
        self.enter(Phase::Connected);
        println!("Created client");

        let collection = match store.collection(&self.config.collection) {
            Ok(collection) => collection,
            Err(e) => return Err(self.fail(Phase::Connected, e)),
        };
        println!("Found collection {}", collection.full_path());

        if self.config.reset {
            self.enter(Phase::Reset);
            match &self.reset_client {
                Some(client) => {
                    if let Err(e) = client.reset(&self.config.project_id) {
                        warn!("Emulator reset failed: {}", e);
                    }
                },
                None => warn!("Reset requested but no reset client is configured"),
            }
        }

        self.enter(Phase::Seeding);
        let seeded = self.seed(&mut store, &collection, self.config.document_count);

        self.enter(Phase::Querying);
        let outcome = match self.query(&store, &collection, &self.config.query) {
            Ok(outcome) => outcome,
            Err(e) => return Err(self.fail(Phase::Querying, e)),
        };

        self.enter(Phase::Reporting);
        let report = BenchmarkReport {
            project_id: self.config.project_id.clone(),
            collection: collection.path().to_string(),
            query: self.config.query.to_string(),
            inserted: seeded.requested,
            failed_inserts: seeded.failed,
            result_count: outcome.result_count,
            elapsed_secs: outcome.elapsed_secs(),
        };
        self.report(&report);

        self.enter(Phase::Done);
        Ok(report)
    }
}
