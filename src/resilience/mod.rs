//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Call to external provider:
//!     → timeouts.rs (hard deadline around the whole call)
//!     → on failure: caller applies its fallback (cached value, next provider,
//!       direct path); nothing here retries
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every external call has a deadline
//! - Provider failures are values (`ProviderError`), never panics

pub mod timeouts;

pub use timeouts::with_timeout;
