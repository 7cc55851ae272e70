//! Change-batch dispatcher and fixpoint loop
//!
//! Receives batches of change records drained from the tree journal, routes
//! each changed subtree to the text scanner and the currency sweep, and
//! every record to the usability fixer. Rewrites performed while a batch is
//! processed are never observed within that batch; they surface in the next
//! drained batch. Termination rests entirely on the transforms being
//! idempotent, with a round cap as the guard rail for a bad rule set.

use crate::change::ChangeRecord;
use crate::classify::Classifiers;
use crate::currency::CurrencySweep;
use crate::dictionary::{self, Dictionary};
use crate::error::Result;
use crate::scanner::TextScanner;
use crate::tree::{NodeId, Tree};
use crate::usability::UsabilityFixer;
use std::sync::Arc;

/// Default bound on fixpoint rounds
pub const DEFAULT_MAX_ROUNDS: usize = 64;

/// Routes change batches to the repair passes
pub struct Dispatcher {
    scanner: TextScanner,
    currency: CurrencySweep,
    usability: UsabilityFixer,
    max_rounds: usize,
}

/// What the fixpoint loop did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixpointOutcome {
    /// Batches processed
    pub rounds: usize,
    /// Whether the journal drained completely; `false` means the round cap
    /// was hit with changes still pending
    pub settled: bool,
}

impl Dispatcher {
    /// Dispatcher with the embedded German dictionary and default passes
    pub fn new() -> Result<Self> {
        DispatcherBuilder::new().build()
    }

    /// Start building a customized dispatcher
    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::new()
    }

    /// Process one batch of change records
    ///
    /// For each record whose target still renders non-empty text, the
    /// scanner and the currency sweep run over that subtree; the usability
    /// fixer sees every record regardless.
    pub fn dispatch(&self, tree: &mut Tree, batch: &[ChangeRecord]) {
        for record in batch {
            if tree.contains(record.target) && tree.is_attached(record.target) {
                let text = tree.text_of(record.target);
                if !text.trim().is_empty() {
                    self.repair_subtree(tree, record.target);
                }
            }
            self.usability.inspect(tree, record);
        }
    }

    /// Run the scanner and the currency sweep over one subtree
    ///
    /// Also the initial-modification entry point for a freshly watched
    /// tree, before any change records exist.
    pub fn repair_subtree(&self, tree: &mut Tree, root: NodeId) {
        self.scanner.scan(tree, root);
        self.currency.sweep(tree, root);
    }

    /// Drain and dispatch batches until the journal is empty
    ///
    /// Every transform produces output that no longer matches its own
    /// trigger, so the journal drains after a handful of rounds; the cap
    /// only exists to contain a non-idempotent custom rule set.
    pub fn run_to_fixpoint(&self, tree: &mut Tree) -> FixpointOutcome {
        let mut rounds = 0;
        loop {
            let batch = tree.take_changes();
            if batch.is_empty() {
                return FixpointOutcome {
                    rounds,
                    settled: true,
                };
            }
            if rounds >= self.max_rounds {
                log::warn!(
                    "repair pipeline did not settle within {} rounds, {} changes dropped",
                    self.max_rounds,
                    batch.len()
                );
                return FixpointOutcome {
                    rounds,
                    settled: false,
                };
            }
            log::debug!("dispatching batch of {} change records", batch.len());
            self.dispatch(tree, &batch);
            rounds += 1;
        }
    }
}

/// Builder for [`Dispatcher`]
pub struct DispatcherBuilder {
    dictionary: Option<Arc<Dictionary>>,
    reference_year: Option<i32>,
    marker: Option<char>,
    max_rounds: usize,
}

impl DispatcherBuilder {
    /// Builder with all defaults
    pub fn new() -> Self {
        Self {
            dictionary: None,
            reference_year: None,
            marker: None,
            max_rounds: DEFAULT_MAX_ROUNDS,
        }
    }

    /// Use a custom phrase dictionary
    pub fn dictionary(mut self, dictionary: Arc<Dictionary>) -> Self {
        self.dictionary = Some(dictionary);
        self
    }

    /// Pin the reference year used for Small dates (defaults to the
    /// current calendar year)
    pub fn reference_year(mut self, year: i32) -> Self {
        self.reference_year = Some(year);
        self
    }

    /// Use a custom currency marker
    pub fn marker(mut self, marker: char) -> Self {
        self.marker = Some(marker);
        self
    }

    /// Bound the number of fixpoint rounds
    pub fn max_rounds(mut self, max_rounds: usize) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    /// Build the dispatcher
    pub fn build(self) -> Result<Dispatcher> {
        let dictionary = match self.dictionary {
            Some(dictionary) => dictionary,
            None => Arc::new(dictionary::default_german().clone()),
        };
        let classifiers = match self.reference_year {
            Some(year) => Classifiers::with_reference_year(year)?,
            None => Classifiers::new()?,
        };
        let currency = match self.marker {
            Some(marker) => CurrencySweep::with_marker(marker)?,
            None => CurrencySweep::new()?,
        };
        Ok(Dispatcher {
            scanner: TextScanner::with_classifiers(dictionary, classifiers),
            currency,
            usability: UsabilityFixer::new(),
            max_rounds: self.max_rounds,
        })
    }
}

impl Default for DispatcherBuilder {
    fn default() -> Self {
        Self::new()
    }
}
