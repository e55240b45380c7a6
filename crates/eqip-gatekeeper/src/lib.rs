//! Eqip Gatekeeper
//!
//! The evidence normalizer. Checks referential integrity and value ranges of
//! a raw evidence bundle before any scoring happens.
//!
//! The Gatekeeper provides:
//! - Contributor list validation (empty and duplicate emails)
//! - Event and vote range checks
//! - Unknown-contributor handling (drop with a notice, or reject)
//! - Collapsing repeated descriptions to the last one
//!
//! # Examples
//!
//! ```
//! use eqip_domain::Contributor;
//! use eqip_gatekeeper::{EvidenceBundle, Gatekeeper};
//!
//! let gatekeeper = Gatekeeper::default_config();
//! let bundle = EvidenceBundle {
//!     contributors: vec![Contributor::new("a@x.io", "A")],
//!     ..EvidenceBundle::default()
//! };
//!
//! let outcome = gatekeeper.normalize(bundle).unwrap();
//! assert_eq!(outcome.evidence.contributor_count(), 1);
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod validator;

pub use config::ValidationConfig;
pub use error::GatekeeperError;
pub use validator::{EvidenceBundle, EvidenceKind, Gatekeeper, NormalizationOutcome, RejectionReason};
