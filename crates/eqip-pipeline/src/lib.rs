//! Eqip Pipeline
//!
//! Orchestrates the attribution → ownership chain and owns everything the
//! pure domain layer leaves out: wire request/response types, policy
//! parameter resolution, TOML configuration and structured logging.
//!
//! # Architecture
//!
//! ```text
//! Request → Gatekeeper → Scorer → normalize → Attribution
//!         → resolve_policy → allocate → reconcile → summarize → Arrangement
//! ```
//!
//! Every degradation (dropped evidence, unknown policy, defaulted vesting
//! parameters, missing funding data) is logged at `warn` and returned in the
//! result's `warnings`.
//!
//! # Example Usage
//!
//! ```
//! use eqip_domain::Contributor;
//! use eqip_pipeline::{Pipeline, PipelineRunRequest};
//!
//! let pipeline = Pipeline::with_defaults();
//! let request = PipelineRunRequest {
//!     contributors: vec![
//!         Contributor::new("a@x.io", "A"),
//!         Contributor::new("b@x.io", "B"),
//!     ],
//!     policy_type: "equal".to_string(),
//!     ..PipelineRunRequest::default()
//! };
//!
//! let outcome = pipeline.run(&request).unwrap();
//! assert_eq!(outcome.arrangement.allocated_shares(), 1_000_000);
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod pipeline;
pub mod policy;
mod types;

pub use config::{AllocationConfig, PipelineConfig, ScoringConfig};
pub use error::PipelineError;
pub use pipeline::Pipeline;
pub use policy::{resolve_policy, ResolvedPolicy};
pub use types::{
    AttributionRequest, OwnershipRequest, PipelineOutcome, PipelineRunRequest, PolicyParamsInput,
    QualitativeRequest,
};
