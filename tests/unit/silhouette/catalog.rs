use std::cell::Cell;

use kurbo::{BezPath, Point};

use super::*;
use crate::{
    foundation::error::MorphResult,
    silhouette::{
        builtin::{builtin_names, builtin_sources},
        measure::ArcLengthMeasurer,
        profile::PROFILE_LEN,
        source::ViewBox,
    },
};

/// Reports "not ready" for the first `failures` outlines it is asked about.
struct WarmingUp {
    failures: Cell<u32>,
    inner: ArcLengthMeasurer,
}

impl PathMeasurer for WarmingUp {
    fn point_at_fraction(&self, outline: &BezPath, fraction: f64) -> MorphResult<Point> {
        self.inner.point_at_fraction(outline, fraction)
    }

    fn sample_evenly(&self, outline: &BezPath, count: usize) -> MorphResult<Vec<Point>> {
        let left = self.failures.get();
        if left > 0 {
            self.failures.set(left - 1);
            return Err(MorphError::surface_unavailable("surface not attached"));
        }
        self.inner.sample_evenly(outline, count)
    }
}

fn square(name: &str) -> SilhouetteSource {
    SilhouetteSource::from_path_data(
        name,
        "M20,20 L80,20 L80,80 L20,80 Z",
        ViewBox::new(0.0, 0.0, 100.0, 100.0),
    )
    .unwrap()
}

fn degenerate(name: &str) -> SilhouetteSource {
    SilhouetteSource::from_path_data(name, "M1,1 L1,1", ViewBox::new(0.0, 0.0, 10.0, 10.0))
        .unwrap()
}

#[test]
fn builtin_catalog_has_three_positive_profiles() {
    let (catalog, report) = SilhouetteCatalog::build(
        builtin_sources(),
        &ArcLengthMeasurer::default(),
        ExtractOptions::default(),
    );
    assert_eq!(catalog.len(), 3);
    assert!(report.skipped.is_empty());
    assert!(report.deferred.is_empty());
    assert_eq!(catalog.names(), builtin_names().collect::<Vec<_>>());
    for entry in catalog.iter() {
        assert_eq!(entry.profile.radii().len(), PROFILE_LEN);
        assert!(
            entry
                .profile
                .radii()
                .iter()
                .all(|r| r.is_finite() && *r > 0.0)
        );
    }
}

#[test]
fn invalid_sources_are_skipped_and_order_is_kept() {
    let sources = vec![square("a"), degenerate("bad"), square("b")];
    let (catalog, report) = SilhouetteCatalog::build(
        sources,
        &ArcLengthMeasurer::default(),
        ExtractOptions::default(),
    );
    assert_eq!(catalog.names(), vec!["a", "b"]);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].name, "bad");
    assert!(report.skipped[0].reason.contains("invalid silhouette source"));
}

#[test]
fn all_invalid_yields_empty_catalog() {
    let (catalog, report) = SilhouetteCatalog::build(
        vec![degenerate("x"), degenerate("y")],
        &ArcLengthMeasurer::default(),
        ExtractOptions::default(),
    );
    assert!(catalog.is_empty());
    assert_eq!(report.skipped.len(), 2);
    assert!(catalog.profile(0).is_none());
}

#[test]
fn unavailable_surface_defers_then_retries_in_order() {
    let measurer = WarmingUp {
        failures: Cell::new(1),
        inner: ArcLengthMeasurer::default(),
    };
    let mut builder =
        CatalogBuilder::new(vec![square("first"), square("second")], ExtractOptions::default());

    let report = builder.build_pass(&measurer);
    assert_eq!(report.built, vec!["second".to_string()]);
    assert_eq!(report.deferred, vec!["first".to_string()]);
    assert!(builder.has_deferred());
    assert_eq!(builder.catalog().names(), vec!["second"]);

    let report = builder.build_pass(&measurer);
    assert!(report.deferred.is_empty());
    assert!(!builder.has_deferred());

    let (catalog, report) = builder.finish();
    assert_eq!(catalog.names(), vec!["first", "second"]);
    assert!(report.skipped.is_empty());
}
