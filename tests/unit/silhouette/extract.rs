use kurbo::{BezPath, Circle, Shape};

use super::*;
use crate::silhouette::{measure::ArcLengthMeasurer, source::ViewBox};

fn circle_source(r: f64) -> SilhouetteSource {
    SilhouetteSource {
        name: "circle".to_string(),
        outline: Circle::new((50.0, 50.0), r).to_path(1e-5),
        view_box: ViewBox::new(0.0, 0.0, 100.0, 100.0),
    }
}

struct NotReady;

impl PathMeasurer for NotReady {
    fn point_at_fraction(&self, _outline: &BezPath, _fraction: f64) -> MorphResult<kurbo::Point> {
        Err(MorphError::surface_unavailable("document not laid out"))
    }
}

#[test]
fn circle_yields_flat_profile() {
    let p = extract_profile(
        &circle_source(40.0),
        &ArcLengthMeasurer::default(),
        ExtractOptions::default(),
    )
    .unwrap();
    assert_eq!(p.radii().len(), PROFILE_LEN);
    for &r in p.radii() {
        assert!((r - 0.8).abs() < 2e-3, "{r}");
    }
}

#[test]
fn outer_envelope_wins_over_inner_contour() {
    let mut outline = Circle::new((50.0, 50.0), 40.0).to_path(1e-5);
    outline.extend(
        Circle::new((50.0, 50.0), 10.0)
            .to_path(1e-5)
            .elements()
            .iter()
            .copied(),
    );
    let src = SilhouetteSource {
        name: "ring".to_string(),
        outline,
        view_box: ViewBox::new(0.0, 0.0, 100.0, 100.0),
    };
    let p = extract_profile(&src, &ArcLengthMeasurer::default(), ExtractOptions::default())
        .unwrap();
    assert!(p.radii().iter().all(|&r| (r - 0.8).abs() < 5e-3));
}

#[test]
fn sparse_samples_are_gap_filled_and_finite() {
    let opts = ExtractOptions {
        samples: 12,
        smoothing_half_width: 0,
    };
    let p = extract_profile(&circle_source(25.0), &ArcLengthMeasurer::default(), opts).unwrap();
    assert!(p.radii().iter().all(|r| r.is_finite() && *r > 0.0));
    assert!(p.radii().iter().all(|&r| (r - 0.5).abs() < 0.05));
}

#[test]
fn fewer_than_three_samples_is_invalid() {
    let opts = ExtractOptions {
        samples: 2,
        smoothing_half_width: 25,
    };
    let err = extract_profile(&circle_source(10.0), &ArcLengthMeasurer::default(), opts)
        .unwrap_err();
    assert!(matches!(err, MorphError::InvalidSilhouetteSource(_)));
}

#[test]
fn zero_area_view_box_is_invalid() {
    let mut src = circle_source(10.0);
    src.view_box = ViewBox::new(0.0, 0.0, 100.0, 0.0);
    let err = extract_profile(&src, &ArcLengthMeasurer::default(), ExtractOptions::default())
        .unwrap_err();
    assert!(matches!(err, MorphError::InvalidSilhouetteSource(_)));
}

#[test]
fn unavailable_measurer_propagates_retryable_error() {
    let err = extract_profile(&circle_source(10.0), &NotReady, ExtractOptions::default())
        .unwrap_err();
    assert!(err.is_retryable());
}

#[test]
fn fill_gaps_interpolates_both_directions_with_wrap() {
    let mut bins = [0.0; PROFILE_LEN];
    let mut hits = [0u32; PROFILE_LEN];
    bins[0] = 1.0;
    hits[0] = 1;
    bins[10] = 2.0;
    hits[10] = 1;

    let out = fill_gaps(&bins, &hits);
    assert_eq!(out[0], 1.0);
    assert_eq!(out[10], 2.0);
    assert!((out[5] - 1.5).abs() < 1e-12);
    assert!((out[1] - 1.1).abs() < 1e-12);
    assert!((out[185] - 1.5).abs() < 1e-12);
    assert!((out[359] - (2.0 + (1.0 - 2.0) * (349.0 / 350.0))).abs() < 1e-12);
}

#[test]
fn smoothing_keeps_constants_and_softens_spikes() {
    let flat = [0.7; PROFILE_LEN];
    assert!(smooth_ring(&flat, 25).iter().all(|&v| (v - 0.7).abs() < 1e-12));

    let mut spiky = [0.5; PROFILE_LEN];
    spiky[0] = 1.5;
    let out = smooth_ring(&spiky, 25);
    assert!(out[0] < 0.7);
    assert!(out[359] > 0.5 && out[1] > 0.5);
    assert!((out[0] - out[359]).abs() < 0.05);
    let total_in: f64 = spiky.iter().sum();
    let total_out: f64 = out.iter().sum();
    assert!((total_in - total_out).abs() < 1e-9);
}
