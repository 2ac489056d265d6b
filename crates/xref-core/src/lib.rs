//! Xref Core - headless library for part-number cross-reference resolution.
//!
//! Given a part number (or a fragment of one), this crate finds every
//! equivalent identifier across the part-numbering schemes held in flat
//! semicolon-separated tables: Turbo P/N <-> E&E P/N in the primary table,
//! plus JRN numbers mapped in through a secondary cross-reference table.
//! The chat front-end consuming these results lives elsewhere; this crate
//! has no transport layer.
//!
//! Indices are built once at startup and are read-only afterwards, so the
//! resolver can serve any number of concurrent queries behind a shared
//! reference without locking.
//!
//! # Example
//!
//! ```rust,ignore
//! use xref_core::{CrossRef, PresentableResult};
//!
//! fn main() -> xref_core::Result<()> {
//!     let xref = CrossRef::open("data.csv", Some("jrn.csv".as_ref()))?;
//!
//!     match xref.resolve("CT-VNT11B") {
//!         PresentableResult::Matches { entries, omitted } => {
//!             for entry in entries {
//!                 println!("{} ({:?})", entry.label, entry.hint);
//!             }
//!             if omitted > 0 {
//!                 println!("... and {omitted} more");
//!             }
//!         }
//!         other => println!("{other:?}"),
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod index;
pub mod normalize;
pub mod present;
pub mod search;
pub mod table;
pub mod vin;
pub mod xref;

// Re-export commonly used types
pub use config::{DisplayConfig, NetworkConfig, SearchConfig, VariantFallback};
pub use error::{Result, XrefError};
pub use index::{IndexStats, PartIndex, Side};
pub use present::{present, GroupHint, MatchEntry, NotFoundReason, PresentableResult};
pub use search::{Resolution, Resolver, ResultSet};
pub use vin::VinClient;
pub use xref::JrnIndex;

use std::path::Path;
use tracing::warn;

/// Main entry point for cross-reference resolution.
///
/// Owns the built indices, the tiered resolver, and the display policy, and
/// optionally a VIN client for the external resolution service. Constructed
/// synchronously at startup before any query traffic; all query methods
/// take `&self`.
#[derive(Debug)]
pub struct CrossRef {
    resolver: Resolver,
    display: DisplayConfig,
    vin: Option<VinClient>,
}

impl CrossRef {
    /// Build the indices from the primary table and an optional
    /// cross-reference table, with default configuration.
    ///
    /// A missing primary table is fatal. A missing or unreadable
    /// cross-reference table is logged and tolerated: the JRN index stays
    /// empty and every query falls through to the primary index.
    pub fn open(primary: impl AsRef<Path>, xref_table: Option<&Path>) -> Result<Self> {
        Self::open_with_config(
            primary,
            xref_table,
            SearchConfig::default(),
            DisplayConfig::default(),
        )
    }

    /// [`CrossRef::open`] with explicit search and display configuration.
    pub fn open_with_config(
        primary: impl AsRef<Path>,
        xref_table: Option<&Path>,
        search: SearchConfig,
        display: DisplayConfig,
    ) -> Result<Self> {
        let index = PartIndex::load(primary)?;
        let jrn = match xref_table {
            Some(path) => match JrnIndex::load(path) {
                Ok(jrn) => jrn,
                Err(e) => {
                    warn!("Cross-reference table unavailable, continuing without it: {e}");
                    JrnIndex::default()
                }
            },
            None => JrnIndex::default(),
        };
        let resolver = Resolver::with_config(index, jrn, search)?;
        Ok(Self {
            resolver,
            display,
            vin: None,
        })
    }

    /// Wrap already-built indices. Used by tests and by callers that source
    /// rows from somewhere other than files.
    pub fn from_parts(resolver: Resolver, display: DisplayConfig) -> Self {
        Self {
            resolver,
            display,
            vin: None,
        }
    }

    /// Attach a VIN client for [`CrossRef::resolve_vin`].
    pub fn with_vin(mut self, vin: VinClient) -> Self {
        self.vin = Some(vin);
        self
    }

    /// Resolve a raw query and shape the outcome for display.
    pub fn resolve(&self, raw: &str) -> PresentableResult {
        present(&self.resolver.resolve(raw), &self.display)
    }

    /// Resolve a raw query into grouped, unformatted results.
    pub fn resolution(&self, raw: &str) -> Resolution {
        self.resolver.resolve(raw)
    }

    /// Resolve a VIN through the external service, best-effort. Returns
    /// nothing when no client is attached or the service fails; the
    /// index-backed search path is unaffected either way.
    pub async fn resolve_vin(&self, vin: &str) -> Vec<String> {
        match &self.vin {
            Some(client) => client.resolve_vin(vin).await,
            None => Vec::new(),
        }
    }

    pub fn stats(&self) -> IndexStats {
        self.resolver.index().stats()
    }
}
