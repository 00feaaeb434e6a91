use crate::{
    foundation::error::MorphError,
    silhouette::{
        extract::{ExtractOptions, extract_profile},
        measure::PathMeasurer,
        profile::RadialProfile,
        source::SilhouetteSource,
    },
};

/// One named, extracted silhouette.
#[derive(Clone, Debug, PartialEq)]
pub struct CatalogEntry {
    pub name: String,
    pub profile: RadialProfile,
}

/// Ordered, immutable set of silhouette profiles. Order is morph-cycle order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SilhouetteCatalog {
    entries: Vec<CatalogEntry>,
}

impl SilhouetteCatalog {
    /// A catalog with no silhouettes; the renderer stays in blob-only mode.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Extract every source in one pass. Deferred and skipped sources are
    /// reported but left out of the catalog.
    pub fn build(
        sources: Vec<SilhouetteSource>,
        measurer: &dyn PathMeasurer,
        opts: ExtractOptions,
    ) -> (Self, CatalogReport) {
        let mut builder = CatalogBuilder::new(sources, opts);
        builder.build_pass(measurer);
        builder.finish()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CatalogEntry> {
        self.entries.get(index)
    }

    pub fn profile(&self, index: usize) -> Option<&RadialProfile> {
        self.entries.get(index).map(|e| &e.profile)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }
}

/// A source dropped from the catalog for good.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedSource {
    pub name: String,
    pub reason: String,
}

/// Outcome of one or more build passes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CatalogReport {
    pub built: Vec<String>,
    pub skipped: Vec<SkippedSource>,
    pub deferred: Vec<String>,
}

/// Incremental catalog construction.
///
/// Sources whose measurement reports [`MorphError::SurfaceUnavailable`] stay
/// deferred and are retried on the next pass; any other failure skips the
/// source permanently. Entries keep their original order however many passes
/// it took to build them.
#[derive(Debug)]
pub struct CatalogBuilder {
    opts: ExtractOptions,
    pending: Vec<(usize, SilhouetteSource)>,
    built: Vec<(usize, CatalogEntry)>,
    report: CatalogReport,
}

impl CatalogBuilder {
    pub fn new(sources: Vec<SilhouetteSource>, opts: ExtractOptions) -> Self {
        Self {
            opts,
            pending: sources.into_iter().enumerate().collect(),
            built: Vec::new(),
            report: CatalogReport::default(),
        }
    }

    pub fn has_deferred(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Cumulative outcome of every pass so far.
    pub fn report(&self) -> &CatalogReport {
        &self.report
    }

    /// Attempt every pending source once.
    #[tracing::instrument(skip(self, measurer), fields(pending = self.pending.len()))]
    pub fn build_pass(&mut self, measurer: &dyn PathMeasurer) -> &CatalogReport {
        let pending = std::mem::take(&mut self.pending);
        for (order, source) in pending {
            match extract_profile(&source, measurer, self.opts) {
                Ok(profile) => {
                    tracing::debug!(silhouette = %source.name, "silhouette profile built");
                    self.report.built.push(source.name.clone());
                    self.built.push((
                        order,
                        CatalogEntry {
                            name: source.name,
                            profile,
                        },
                    ));
                }
                Err(err @ MorphError::SurfaceUnavailable(_)) => {
                    tracing::debug!(silhouette = %source.name, %err, "silhouette deferred");
                    self.pending.push((order, source));
                }
                Err(err) => {
                    tracing::warn!(silhouette = %source.name, %err, "silhouette skipped");
                    self.report.skipped.push(SkippedSource {
                        name: source.name,
                        reason: err.to_string(),
                    });
                }
            }
        }
        self.report.deferred = self.pending.iter().map(|(_, s)| s.name.clone()).collect();
        &self.report
    }

    /// Snapshot of everything built so far, in source order.
    pub fn catalog(&self) -> SilhouetteCatalog {
        let mut built = self.built.clone();
        built.sort_by_key(|(order, _)| *order);
        SilhouetteCatalog {
            entries: built.into_iter().map(|(_, e)| e).collect(),
        }
    }

    pub fn finish(self) -> (SilhouetteCatalog, CatalogReport) {
        let catalog = self.catalog();
        (catalog, self.report)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/silhouette/catalog.rs"]
mod tests;
