//! Live localization repair for a rendered UI tree
//!
//! A third-party component keeps re-rendering parts of a page with English
//! date phrases, ungrouped currency numbers, and mistranslated labels. This
//! crate watches the resulting change feed and rewrites the affected text
//! to German conventions, exactly once per defect: classification and
//! application are separate phases, and every transform's output no longer
//! matches its own trigger, so the self-triggered re-scans settle.
//!
//! ```
//! use textmend_core::{Dispatcher, Tree};
//!
//! let mut tree = Tree::new("body");
//! let card = tree.append_element(tree.root(), "div");
//! tree.append_leaf(card, "Pause Subscription");
//!
//! let dispatcher = Dispatcher::new().expect("default pipeline");
//! let outcome = dispatcher.run_to_fixpoint(&mut tree);
//! assert!(outcome.settled);
//! assert_eq!(tree.text_of(card), "Abonnement pausieren ;(");
//! ```

#![warn(missing_docs)]

pub mod change;
pub mod classify;
pub mod currency;
pub mod dictionary;
pub mod dispatcher;
pub mod error;
pub mod locale;
pub mod scanner;
pub mod tree;
pub mod usability;

pub use change::{ChangeKind, ChangeRecord};
pub use classify::{Classification, Classifiers, DateGranularity, DateRule};
pub use currency::CurrencySweep;
pub use dictionary::{default_german, Dictionary, DictionaryConfig, DictionaryEntry};
pub use dispatcher::{Dispatcher, DispatcherBuilder, FixpointOutcome};
pub use error::CoreError;
pub use scanner::TextScanner;
pub use tree::{NodeId, Tree};
pub use usability::UsabilityFixer;
