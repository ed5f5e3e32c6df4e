//! The credibility engine: who published an article, and how much that
//! should count for.
//!
//! Four pieces, layered bottom-up:
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`domain`] | URL to normalized domain |
//! | [`tables`] | tier tables and classification |
//! | [`factcheck`] | fact-check detection and title verdicts |
//! | [`reconcile`] | final-verdict rules over all the signals |
//!
//! [`SourceTables`] is the shared entry point. It is immutable after
//! construction and safe to share across tasks; build it once in `main` and
//! hand references to whoever needs it.

pub mod domain;
pub mod factcheck;
pub mod reconcile;
pub mod tables;

pub use domain::extract_domain;
pub use factcheck::{FactCheckHit, TitleVerdict, UNKNOWN_FACT_CHECKER, extract_verdict_from_title};
pub use reconcile::{Reconciliation, reconcile_signals};
pub use tables::{SourceTables, Tier};
