//! Simulated backends for Portico.
//!
//! This crate implements the outward-facing seams of the system: the portal
//! that exchanges login material for credentials, and the registry that
//! dispatches prompts to text-generation backends. Everything here is
//! defined by call/return contracts, so a real HTTP-backed implementation
//! can be substituted without touching the orchestrator.

pub mod config;
pub mod generate;
pub mod latency;
pub mod portal;
pub mod registry;
pub mod token_source;

pub use generate::{CannedResponseGenerator, ResponseGenerator, TemplateGenerator};
pub use latency::LatencyProfile;
pub use portal::{PortalClient, SimulatedPortalClient};
pub use registry::ModelInvocationRegistry;
pub use token_source::{RandomTokenSource, SequencedTokenSource, TokenSource};
