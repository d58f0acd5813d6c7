//! Reference reconciliation
//!
//! A [`ReconciliationEngine`] is built per check. [`setup`] establishes or
//! repairs the reference baseline and digests the current run; [`compare`]
//! may then be called any number of times; [`update_reference`] accepts new
//! outputs and must be followed by [`dump`] to become durable.
//!
//! Setup, in order:
//!
//! 1. Load the reference manifest if one is persisted
//! 2. Copy every declared output with no reference copy into the reference
//!    tree (an output missing from the run is warned about and skipped)
//! 3. Without a persisted manifest, build one from every reference copy;
//!    with one, rehash only the files copied in step 2 and leave all other
//!    entries as loaded
//! 4. Persist the manifest if step 3 created or changed it
//! 5. Digest the current run's outputs into a fresh manifest
//!
//! [`setup`]: ReconciliationEngine::setup
//! [`compare`]: ReconciliationEngine::compare
//! [`update_reference`]: ReconciliationEngine::update_reference
//! [`dump`]: ReconciliationEngine::dump

use crate::config::CheckConfig;
use morte_core::diff::compare;
use morte_core::errors::Result;
use morte_core::{
    log_op_end, log_op_error, log_op_start, ChecksumComputer, DiagnosticSink, Manifest,
    ManifestDiff,
};
use morte_core_types::RunId;
use morte_store::ReferenceStore;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

const COMPONENT: &str = "morte::engine::reconcile";

const MISSING_REFERENCES: &str = "Not all reference files exist. Copying from current model output";
const MISSING_MANIFEST: &str = "Manifest file does not exist. Generating manifest from reference files";

/// How much of the reference baseline exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BaselineState {
    /// No persisted manifest
    NoBaseline,
    /// A manifest exists but some declared outputs have no reference copy
    PartialBaseline,
    /// A manifest exists and every declared output has a reference copy
    FullBaseline,
}

/// What [`ReconciliationEngine::setup`] did
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SetupReport {
    /// Baseline state found before setup changed anything
    pub initial_state: BaselineState,
    /// Outputs copied into the reference tree
    pub copied: Vec<String>,
    /// Outputs that had no reference copy and were missing from the run too
    pub unavailable: Vec<String>,
    /// Whether the reference manifest was persisted
    pub manifest_written: bool,
}

pub struct ReconciliationEngine {
    run_id: RunId,
    store: ReferenceStore,
    current: Manifest,
    state: BaselineState,
}

impl ReconciliationEngine {
    /// Engine for the run whose outputs live in `base_dir`
    ///
    /// # Errors
    ///
    /// `InvalidInput` if the configuration declares an output path outside
    /// the tree or no hash kinds.
    pub fn new(config: &CheckConfig, base_dir: &Path) -> Result<Self> {
        let store = ReferenceStore::new(config.layout(base_dir))?;
        Ok(Self {
            run_id: RunId::new(),
            store,
            current: Manifest::new(),
            state: BaselineState::NoBaseline,
        })
    }

    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.store = self.store.with_sink(sink);
        self
    }

    pub fn with_computer(mut self, computer: Arc<dyn ChecksumComputer>) -> Self {
        self.store = self.store.with_computer(computer);
        self
    }

    pub fn run_id(&self) -> &RunId {
        &self.run_id
    }

    /// Baseline state as of the last [`setup`](Self::setup)
    pub fn state(&self) -> BaselineState {
        self.state
    }

    pub fn current_manifest(&self) -> &Manifest {
        &self.current
    }

    pub fn reference_manifest(&self) -> &Manifest {
        self.store.reference_manifest()
    }

    pub fn store(&self) -> &ReferenceStore {
        &self.store
    }

    /// Establish or repair the reference baseline and digest the current run
    ///
    /// # Errors
    ///
    /// - `ManifestCorrupt` if a persisted manifest cannot be parsed; nothing
    ///   is copied or written in that case
    /// - `Io` if a copy or the manifest write fails
    /// - checksum errors other than `FileUnavailable`
    pub fn setup(&mut self) -> Result<SetupReport> {
        log_op_start!(
            "reconcile_setup",
            run_id = %self.run_id,
            output_count = self.store.output_files().len()
        );
        let start = Instant::now();

        let report = self.setup_impl().map_err(|e| {
            log_op_error!(
                "reconcile_setup",
                &e,
                duration_ms = start.elapsed().as_millis() as u64,
                run_id = %self.run_id
            );
            e
        })?;

        log_op_end!(
            "reconcile_setup",
            duration_ms = start.elapsed().as_millis() as u64,
            run_id = %self.run_id,
            copied_count = report.copied.len(),
            manifest_written = report.manifest_written
        );

        Ok(report)
    }

    fn setup_impl(&mut self) -> Result<SetupReport> {
        let has_manifest = self.store.manifest_exists();
        if has_manifest {
            self.store.load_manifest()?;
        }

        let missing = self.store.missing_references();
        let initial_state = match (has_manifest, missing.is_empty()) {
            (false, _) => BaselineState::NoBaseline,
            (true, false) => BaselineState::PartialBaseline,
            (true, true) => BaselineState::FullBaseline,
        };

        let mut copied = Vec::new();
        let mut unavailable = Vec::new();
        if !missing.is_empty() {
            self.store.sink().warn(COMPONENT, MISSING_REFERENCES);
            for path in missing {
                if self.store.copy_to_reference(&path)? {
                    copied.push(path);
                } else {
                    unavailable.push(path);
                }
            }
        }

        let manifest_written = if has_manifest {
            let outcome = self.store.add_to_manifest(&copied, true)?;
            if outcome.modified() {
                self.store.dump()?;
            }
            outcome.modified()
        } else {
            self.store.sink().warn(COMPONENT, MISSING_MANIFEST);
            let all = self.store.output_files().to_vec();
            self.store.add_to_manifest(&all, true)?;
            self.store.dump()?;
            true
        };

        self.current = self.store.digest_outputs()?;
        self.state = if self.store.missing_references().is_empty() {
            BaselineState::FullBaseline
        } else {
            BaselineState::PartialBaseline
        };

        Ok(SetupReport {
            initial_state,
            copied,
            unavailable,
            manifest_written,
        })
    }

    /// Diff the current run against the reference manifest
    ///
    /// Only paths in the current manifest are inspected: a reference entry
    /// with no current counterpart is never reported.
    pub fn compare(&self) -> ManifestDiff {
        let diff = compare(&self.current, self.store.reference_manifest());
        tracing::debug!(
            run_id = %self.run_id,
            diff_count = diff.len(),
            "compared current run against reference"
        );
        diff
    }

    /// Accept current outputs as the new reference
    ///
    /// `paths` defaults to every path in the current manifest. Reference
    /// copies are overwritten; with `update_manifest`, exactly the copied
    /// paths are rehashed. Call [`dump`](Self::dump) to persist.
    ///
    /// Returns the paths actually copied.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for a path outside the tree, `Io` if a copy fails, or
    /// checksum errors while rehashing.
    pub fn update_reference(
        &mut self,
        paths: Option<&[String]>,
        update_manifest: bool,
    ) -> Result<Vec<String>> {
        let paths: Vec<String> = match paths {
            Some(paths) => paths.to_vec(),
            None => self.current.paths().map(str::to_string).collect(),
        };

        log_op_start!(
            "update_reference",
            run_id = %self.run_id,
            output_count = paths.len()
        );
        let start = Instant::now();

        let copied = self
            .store
            .update_reference(&paths, update_manifest)
            .map_err(|e| {
                log_op_error!(
                    "update_reference",
                    &e,
                    duration_ms = start.elapsed().as_millis() as u64,
                    run_id = %self.run_id
                );
                e
            })?;

        log_op_end!(
            "update_reference",
            duration_ms = start.elapsed().as_millis() as u64,
            run_id = %self.run_id,
            copied_count = copied.len()
        );

        Ok(copied)
    }

    /// Persist the reference manifest
    ///
    /// # Errors
    ///
    /// `Serialization` or `Io` if the manifest cannot be written.
    pub fn dump(&self) -> Result<()> {
        self.store.dump()
    }
}
