use super::*;

fn fill() -> RadialFill {
    RadialFill {
        center: Point::new(5.0, 5.0),
        radius: 4.0,
        stops: vec![GradientStop {
            offset: 0.0,
            color: Rgb8::WHITE,
            alpha: 1.0,
        }],
    }
}

#[test]
fn recording_surface_keeps_draw_order() {
    let mut s = RecordingSurface::new(10, 20);
    assert_eq!(
        s.canvas(),
        Canvas {
            width: 10,
            height: 20
        }
    );
    s.clear(Rgb8::new(1, 2, 3)).unwrap();
    let tri = [Point::ZERO, Point::new(1.0, 0.0), Point::new(0.0, 1.0)];
    s.fill_polygon(&tri, &fill()).unwrap();

    assert_eq!(s.commands().len(), 2);
    assert_eq!(s.commands()[0], DrawCommand::Clear(Rgb8::new(1, 2, 3)));
    assert!(matches!(
        &s.commands()[1],
        DrawCommand::FillPolygon { polygon, .. } if polygon.len() == 3
    ));
}

#[test]
fn clear_starts_a_new_frame() {
    let mut s = RecordingSurface::new(4, 4);
    s.clear(Rgb8::WHITE).unwrap();
    s.fill_polygon(&[Point::ZERO; 3], &fill()).unwrap();
    s.clear(Rgb8::new(0, 0, 0)).unwrap();
    assert_eq!(s.commands(), &[DrawCommand::Clear(Rgb8::new(0, 0, 0))]);

    let taken = s.take_commands();
    assert_eq!(taken.len(), 1);
    assert!(s.commands().is_empty());
}
