use super::*;

#[test]
fn defaults_validate_and_match_documented_values() {
    let c = EngineConfig::default();
    c.validate().unwrap();
    assert_eq!(c.seed, 42);
    assert_eq!(c.phases.total(), 15.0);
    assert_eq!(c.max_morph_cap, 0.88);
    assert_eq!(c.render_samples, 360);
    assert_eq!(c.extraction_samples, 1440);
    assert_eq!(c.smoothing_half_width, 25);
    assert_eq!(c.core_scale, 0.32);
    assert_eq!(c.shape.overscan, 1.15);
    assert_eq!(c.shape.octaves.len(), 3);
}

#[test]
fn empty_json_is_all_defaults() {
    let c = EngineConfig::from_json_str("{}").unwrap();
    assert_eq!(c, EngineConfig::default());
}

#[test]
fn json_round_trip_preserves_overrides() {
    let mut c = EngineConfig::default();
    c.seed = 7;
    c.phases.morph_in = 1.5;
    c.silhouettes = Some(vec![SilhouetteEntry {
        name: "tri".to_string(),
        source: SilhouetteSourceRef::PathData {
            d: "M0,0 L10,0 L5,8 Z".to_string(),
            view_box: ViewBox::new(0.0, 0.0, 10.0, 10.0),
        },
    }]);
    let s = c.to_json_string().unwrap();
    let back = EngineConfig::from_json_str(&s).unwrap();
    assert_eq!(back, c);
}

#[test]
fn partial_json_overrides_only_named_fields() {
    let c = EngineConfig::from_json_str(
        r#"{ "seed": 3, "phases": { "blob_hold": 1.0 }, "shape": { "overscan": 1.3 } }"#,
    )
    .unwrap();
    assert_eq!(c.seed, 3);
    assert_eq!(c.phases.blob_hold, 1.0);
    assert_eq!(c.phases.morph_in, 3.0);
    assert_eq!(c.shape.overscan, 1.3);
    assert_eq!(c.shape.base_opacity, ShapeParams::default().base_opacity);
}

#[test]
fn silhouette_entries_parse_both_forms() {
    let c = EngineConfig::from_json_str(
        r#"{ "silhouettes": [
            { "name": "inline", "d": "M0,0 L4,0 L2,3 Z", "view_box": { "x": 0, "y": 0, "width": 4, "height": 4 } },
            { "name": "file", "svg": "figures/dancer.svg" }
        ] }"#,
    )
    .unwrap();
    let entries = c.silhouettes.unwrap();
    assert!(matches!(
        entries[0].source,
        SilhouetteSourceRef::PathData { .. }
    ));
    assert_eq!(
        entries[1].source,
        SilhouetteSourceRef::SvgFile {
            svg: PathBuf::from("figures/dancer.svg")
        }
    );
}

#[test]
fn bad_json_is_a_serde_error() {
    let err = EngineConfig::from_json_str("{ \"seed\": \"nope\" }").unwrap_err();
    assert!(matches!(err, MorphError::Serde(_)));
}

#[test]
fn validation_rejects_out_of_range_values() {
    let cases: Vec<Box<dyn Fn(&mut EngineConfig)>> = vec![
        Box::new(|c: &mut EngineConfig| c.max_morph_cap = 0.0),
        Box::new(|c: &mut EngineConfig| c.max_morph_cap = 1.01),
        Box::new(|c: &mut EngineConfig| c.render_samples = 2),
        Box::new(|c: &mut EngineConfig| c.extraction_samples = 0),
        Box::new(|c: &mut EngineConfig| c.smoothing_half_width = 181),
        Box::new(|c: &mut EngineConfig| c.core_scale = 0.0),
        Box::new(|c: &mut EngineConfig| c.palette_rate = f64::NAN),
        Box::new(|c: &mut EngineConfig| c.palettes.clear()),
        Box::new(|c: &mut EngineConfig| c.phases.silhouette_hold = f64::INFINITY),
        Box::new(|c: &mut EngineConfig| c.shape.layer_shrink = 0.4),
        Box::new(|c: &mut EngineConfig| c.shape.opacity_step = 0.3),
        Box::new(|c: &mut EngineConfig| c.shape.pointer_smoothing = 0.0),
        Box::new(|c: &mut EngineConfig| c.shape.octaves[1].amplitude = f64::NAN),
        Box::new(|c: &mut EngineConfig| {
            c.silhouettes = Some(vec![SilhouetteEntry {
                name: " ".to_string(),
                source: SilhouetteSourceRef::SvgFile {
                    svg: PathBuf::from("x.svg"),
                },
            }])
        }),
    ];
    for (i, mutate) in cases.iter().enumerate() {
        let mut c = EngineConfig::default();
        mutate(&mut c);
        let err = c.validate().unwrap_err();
        assert!(matches!(err, MorphError::Validation(_)), "case {i}: {err}");
    }
}

#[test]
fn unloadable_entries_are_dropped_and_none_means_builtin() {
    let c = EngineConfig::default();
    assert_eq!(c.resolve_sources(Path::new(".")).len(), 3);

    let c = EngineConfig {
        silhouettes: Some(vec![
            SilhouetteEntry {
                name: "missing".to_string(),
                source: SilhouetteSourceRef::SvgFile {
                    svg: PathBuf::from("does/not/exist.svg"),
                },
            },
            SilhouetteEntry {
                name: "tri".to_string(),
                source: SilhouetteSourceRef::PathData {
                    d: "M0,0 L10,0 L5,8 Z".to_string(),
                    view_box: ViewBox::new(0.0, 0.0, 10.0, 10.0),
                },
            },
        ]),
        ..EngineConfig::default()
    };
    let sources = c.resolve_sources(Path::new("."));
    assert_eq!(sources.len(), 1);
    assert_eq!(sources[0].name, "tri");

    let blob_only = EngineConfig {
        silhouettes: Some(vec![]),
        ..EngineConfig::default()
    };
    assert!(blob_only.resolve_sources(Path::new(".")).is_empty());
}
