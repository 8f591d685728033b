//! # Observability
//!
//! Structured logging for every actor in the process.
//!
//! Actors log their lifecycle (`Actor started`, `Shutdown`, `Session started`), each committed
//! mutation at `info` (`Created`, `Updated`, `Deleted`, `Action ok`) and full request payloads at
//! `debug`. Fields are structured (`entity_type`, `id`, `size`, `session`), so logs can be
//! filtered without parsing messages.
//!
//! ```bash
//! RUST_LOG=info cargo run     # lifecycle and mutations
//! RUST_LOG=debug cargo run    # plus request payloads
//! ```

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber: `RUST_LOG` filtering, compact output, no module targets.
///
/// Falls back to `info` when `RUST_LOG` is unset or invalid. Calling it twice is harmless; the
/// second installation attempt is ignored.
pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init();
}
