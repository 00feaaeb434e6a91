use super::*;

fn two_tone() -> PaletteCatalog {
    let black = Palette([Rgb8::new(0, 0, 0); LAYER_COUNT]);
    let white = Palette([Rgb8::WHITE; LAYER_COUNT]);
    PaletteCatalog::new(vec![black, white], 1.0).unwrap()
}

#[test]
fn boundaries_give_current_palette_exactly() {
    let cat = PaletteCatalog::new(default_palettes(), 0.125).unwrap();
    for k in 0..8u32 {
        let t = f64::from(k) * 8.0;
        let idx = (k as usize) % cat.len();
        for layer in 0..LAYER_COUNT {
            assert_eq!(cat.color_at(t, layer), cat.palettes()[idx].0[layer]);
        }
    }
}

#[test]
fn midpoint_is_halfway_and_wraps_to_first() {
    let cat = two_tone();
    assert_eq!(cat.color_at(0.5, 0), Rgb8::new(128, 128, 128));
    // Second half of the last palette blends back toward the first.
    assert_eq!(cat.color_at(1.5, 2), Rgb8::new(128, 128, 128));
    assert_eq!(cat.color_at(2.0, 2), Rgb8::new(0, 0, 0));
}

#[test]
fn blend_is_continuous_across_boundaries() {
    let cat = PaletteCatalog::new(default_palettes(), 0.125).unwrap();
    for boundary in [8.0, 16.0, 24.0, 32.0] {
        let mut prev_gap = u8::MAX;
        for eps in [0.5, 0.05, 0.005] {
            for layer in 0..LAYER_COUNT {
                let before = cat.color_at(boundary - eps, layer);
                let after = cat.color_at(boundary + eps, layer);
                let gap = before.max_channel_delta(after);
                assert!(gap <= 4, "gap {gap} at {boundary}±{eps}");
                if layer == 0 {
                    assert!(gap <= prev_gap);
                    prev_gap = gap;
                }
            }
        }
    }
}

#[test]
fn zero_rate_freezes_on_first_palette() {
    let cat = PaletteCatalog::new(default_palettes(), 0.0).unwrap();
    let first = default_palettes()[0];
    assert_eq!(cat.color_at(1234.5, 1), first.0[1]);
}

#[test]
fn out_of_range_layer_and_time_are_clamped() {
    let cat = two_tone();
    assert_eq!(cat.color_at(0.0, 99), Rgb8::new(0, 0, 0));
    assert_eq!(cat.color_at(-3.0, 0), cat.color_at(0.0, 0));
    assert_eq!(cat.color_at(f64::INFINITY, 0), cat.color_at(0.0, 0));
}

#[test]
fn rejects_empty_catalog_and_bad_rate() {
    assert!(PaletteCatalog::new(vec![], 1.0).is_err());
    assert!(PaletteCatalog::new(default_palettes(), -1.0).is_err());
    assert!(PaletteCatalog::new(default_palettes(), f64::NAN).is_err());
}

#[test]
fn palette_json_requires_layer_count_entries() {
    let ok = r#"[{"r":1,"g":2,"b":3},{"r":4,"g":5,"b":6},{"r":7,"g":8,"b":9},{"r":0,"g":0,"b":0}]"#;
    let p: Palette = serde_json::from_str(ok).unwrap();
    assert_eq!(p.layer(2), Rgb8::new(7, 8, 9));

    let short = r#"[{"r":1,"g":2,"b":3}]"#;
    assert!(serde_json::from_str::<Palette>(short).is_err());
}
