//! Library data catalog.
//!
//! A [`LibraryCatalog`] aggregates the records of a library data document into
//! queryable stores: constants by name, event handlers by name, and function
//! overload sets in document order. Ingestion runs in one of two modes:
//!
//! - **Strict** — a record is admitted only if its subset tags overlap the
//!   desired subsets, and a duplicate or ambiguous definition inside the
//!   admitted set aborts construction.
//! - **Accumulate** — every record in the document is retained with no
//!   uniqueness checks. Forced whenever the desired subsets contain
//!   [`ALL_SUBSETS`].
//!
//! A catalog built with [`LibraryCatalog::live_filtered`] loads once under
//! `"all"` and afterwards controls visibility purely through an atomically
//! swappable active-subset filter; no re-parse ever happens on
//! reconfiguration. Interactive tooling toggling a library flavor on and off
//! pays only for a set swap.

mod error;
mod loader;
mod signature;
mod tags;

use std::sync::Arc;

use indexmap::IndexMap;
use smol_str::SmolStr;
use tracing::{debug, trace};

pub use error::CatalogError;
pub use loader::{DocumentReader, ParsedRecord};
pub use signature::{
    ConstantSignature, EventSignature, FunctionSignature, LibrarySignature, SignatureKind,
};
pub use tags::{ALL_SUBSETS, TagSet, is_valid_tag, parse_subset_list};

/// How ingestion treats two otherwise-valid records that collide.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DuplicateHandling {
    /// Collisions inside the admitted subset abort construction.
    #[default]
    Strict,
    /// Keep everything; no uniqueness checks.
    Accumulate,
}

/// In-memory store of library function, constant and event handler signatures.
#[derive(Clone, Debug)]
pub struct LibraryCatalog {
    /// Per-name records in document order. Multiple entries per name can only
    /// exist under accumulate mode.
    constants: IndexMap<SmolStr, Vec<ConstantSignature>>,
    events: IndexMap<SmolStr, Vec<EventSignature>>,
    /// Overload lists in document order.
    functions: IndexMap<SmolStr, Vec<FunctionSignature>>,
    desired_subsets: TagSet,
    mode: DuplicateHandling,
    live_filtering: bool,
    /// Read-time visibility filter, snapshot-swapped, never mutated in place.
    active_subsets: Arc<TagSet>,
}

impl LibraryCatalog {
    /// Build a catalog from a library data document.
    ///
    /// `mode` is forced to [`DuplicateHandling::Accumulate`] when
    /// `desired_subsets` contains [`ALL_SUBSETS`]. Failure leaves no partial
    /// catalog.
    pub fn from_xml(
        document: &str,
        desired_subsets: TagSet,
        mode: DuplicateHandling,
    ) -> Result<Self, CatalogError> {
        let mode = if desired_subsets.contains(ALL_SUBSETS) {
            DuplicateHandling::Accumulate
        } else {
            mode
        };

        let mut catalog = Self {
            constants: IndexMap::new(),
            events: IndexMap::new(),
            functions: IndexMap::new(),
            active_subsets: Arc::new(desired_subsets.clone()),
            desired_subsets,
            mode,
            live_filtering: false,
        };

        for record in DocumentReader::new(document.as_bytes()) {
            let ParsedRecord { line, signature } = record?;
            catalog.ingest(signature, line)?;
        }

        debug!(
            constants = catalog.constants.len(),
            functions = catalog.functions.len(),
            events = catalog.events.len(),
            mode = ?catalog.mode,
            subsets = %catalog.desired_subsets,
            "library catalog built"
        );
        Ok(catalog)
    }

    /// Build a catalog in live filtering mode.
    ///
    /// The whole document is loaded once under `"all"`; visibility is then
    /// governed solely by [`set_active_subsets`](Self::set_active_subsets).
    pub fn live_filtered(document: &str) -> Result<Self, CatalogError> {
        let all: TagSet = [ALL_SUBSETS].into_iter().collect();
        let mut catalog = Self::from_xml(document, all.clone(), DuplicateHandling::Accumulate)?;
        catalog.live_filtering = true;
        catalog.active_subsets = Arc::new(all);
        Ok(catalog)
    }

    // ------------------------------------------------------------------------
    // INGESTION
    // ------------------------------------------------------------------------

    fn ingest(&mut self, signature: LibrarySignature, line: u32) -> Result<(), CatalogError> {
        // Admission: accumulate mode keeps everything, strict mode keeps only
        // records tagged into the desired subsets.
        if self.mode == DuplicateHandling::Strict
            && !signature.subsets().overlaps(&self.desired_subsets)
        {
            trace!(name = %signature.name(), kind = ?signature.kind(), "record outside desired subsets, discarded");
            return Ok(());
        }

        let strict = self.mode == DuplicateHandling::Strict;
        match signature {
            LibrarySignature::Constant(constant) => {
                let slot = self.constants.entry(constant.name.clone()).or_default();
                if strict && !slot.is_empty() {
                    return Err(CatalogError::DuplicateSignature {
                        line,
                        name: constant.name,
                    });
                }
                slot.push(constant);
            }
            LibrarySignature::Event(event) => {
                let slot = self.events.entry(event.name.clone()).or_default();
                if strict && !slot.is_empty() {
                    return Err(CatalogError::DuplicateSignature {
                        line,
                        name: event.name,
                    });
                }
                slot.push(event);
            }
            LibrarySignature::Function(function) => {
                let overloads = self.functions.entry(function.name.clone()).or_default();
                if strict
                    && overloads
                        .iter()
                        .any(|existing| existing.definition_is_duplicate(&function))
                {
                    return Err(CatalogError::DuplicateSignature {
                        line,
                        name: function.name,
                    });
                }
                overloads.push(function);
            }
        }
        Ok(())
    }

    // ------------------------------------------------------------------------
    // CONFIGURATION
    // ------------------------------------------------------------------------

    /// Whether this catalog filters queries through a live active-subset set.
    pub fn is_live_filtering(&self) -> bool {
        self.live_filtering
    }

    /// The ingestion mode the catalog was built under.
    pub fn mode(&self) -> DuplicateHandling {
        self.mode
    }

    /// The current visibility filter snapshot.
    pub fn active_subsets(&self) -> Arc<TagSet> {
        Arc::clone(&self.active_subsets)
    }

    /// Replace the visibility filter with `tags`.
    ///
    /// The swap is a whole-value replacement: a reader holding the previous
    /// snapshot keeps seeing it, and subsequent queries see only the new one.
    /// No re-parse occurs. Fails on a catalog without live filtering.
    pub fn set_active_subsets(&mut self, tags: TagSet) -> Result<(), CatalogError> {
        if !self.live_filtering {
            return Err(CatalogError::LiveFilteringDisabled);
        }
        trace!(subsets = %tags, "active subsets swapped");
        self.active_subsets = Arc::new(tags);
        Ok(())
    }

    fn is_visible(&self, subsets: &TagSet) -> bool {
        if !self.live_filtering {
            return true;
        }
        self.active_subsets.contains(ALL_SUBSETS) || subsets.overlaps(&self.active_subsets)
    }

    // ------------------------------------------------------------------------
    // QUERIES
    // ------------------------------------------------------------------------

    /// The first visible constant with the given name, in document order.
    pub fn lookup_constant(&self, name: &str) -> Option<&ConstantSignature> {
        self.constants
            .get(name)?
            .iter()
            .find(|c| self.is_visible(&c.subsets))
    }

    /// The first visible event handler with the given name, in document order.
    pub fn lookup_event_handler(&self, name: &str) -> Option<&EventSignature> {
        self.events
            .get(name)?
            .iter()
            .find(|e| self.is_visible(&e.subsets))
    }

    /// All visible overloads of the named function, in document order.
    /// Empty if the name is undefined or fully filtered out.
    pub fn lookup_function_overloads(&self, name: &str) -> Vec<&FunctionSignature> {
        self.functions
            .get(name)
            .map(|overloads| {
                overloads
                    .iter()
                    .filter(|f| self.is_visible(&f.subsets))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn constant_exists(&self, name: &str) -> bool {
        self.lookup_constant(name).is_some()
    }

    pub fn event_handler_exists(&self, name: &str) -> bool {
        self.lookup_event_handler(name).is_some()
    }

    pub fn function_exists(&self, name: &str) -> bool {
        !self.lookup_function_overloads(name).is_empty()
    }

    /// Whether a visible overload matches `signature` exactly, including
    /// return type.
    pub fn function_exists_exact(&self, signature: &FunctionSignature) -> bool {
        self.lookup_function_overloads(&signature.name)
            .iter()
            .any(|f| f.signature_equivalent(signature))
    }

    /// Whether `signature` would be accepted as an overload: the name is
    /// defined and no visible overload is a duplicate of it.
    pub fn is_considered_overload(&self, signature: &FunctionSignature) -> bool {
        let overloads = self.lookup_function_overloads(&signature.name);
        !overloads.is_empty()
            && !overloads
                .iter()
                .any(|f| f.definition_is_duplicate(signature))
    }

    /// All visible constants, in document order.
    pub fn constants(&self) -> impl Iterator<Item = &ConstantSignature> {
        self.constants
            .values()
            .flatten()
            .filter(|c| self.is_visible(&c.subsets))
    }

    /// All visible event handlers, in document order.
    pub fn event_handlers(&self) -> impl Iterator<Item = &EventSignature> {
        self.events
            .values()
            .flatten()
            .filter(|e| self.is_visible(&e.subsets))
    }

    /// All function overload groups with at least one visible overload,
    /// in document order.
    pub fn function_groups(&self) -> impl Iterator<Item = (&SmolStr, Vec<&FunctionSignature>)> {
        self.functions.iter().filter_map(|(name, overloads)| {
            let visible: Vec<_> = overloads
                .iter()
                .filter(|f| self.is_visible(&f.subsets))
                .collect();
            (!visible.is_empty()).then_some((name, visible))
        })
    }
}
