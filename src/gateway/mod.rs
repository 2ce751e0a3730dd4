//! Transformation gateway: turns a draft into an affirmation and a quote.
//!
//! The gateway is the only fallible step between writing a note and reading
//! it back. It calls a [`TextRewriter`] (the generative-language service in
//! production), and converts every failure into one of a fixed set of
//! pre-written results. Callers always get a complete [`Transformation`].
//!
//! # Modules
//!
//! - `client`: The rewriter seam and the HTTP client for the language service
//! - `prompt`: Fixed system instruction and structured-output schema
//! - `fallback`: Pre-written results used when the live call cannot complete
//! - `service`: The gateway combining rewriter, fallback and floor duration
//!
//! [`Transformation`]: crate::domain::Transformation

pub mod client;
pub mod fallback;
pub mod prompt;
pub mod service;

pub use client::{
    GeminiRewriter, GeminiSettings, TextRewriter, DEFAULT_ENDPOINT, DEFAULT_MODEL,
    DEFAULT_TEMPERATURE, DEFAULT_TIMEOUT,
};
pub use fallback::{FallbackPool, FALLBACKS};
pub use service::TransformationGateway;
