use crate::geom::{AnimatedSurface, HeightQueryError, SurfaceConfig, board_cell_vertex};

#[test]
fn flat_surface_reports_zero_for_every_cell() {
    let surface = AnimatedSurface::new(SurfaceConfig::default().with_precision(16)).unwrap();
    for row in 0..8 {
        for column in 0..8 {
            assert_eq!(surface.height_at(row, column), Ok(0.0));
        }
    }
}

#[test]
fn out_of_range_cells_are_rejected() {
    let surface = AnimatedSurface::new(SurfaceConfig::default()).unwrap();
    assert_eq!(
        surface.height_at(8, 0),
        Err(HeightQueryError::OutOfRange { row: 8, column: 0, board_size: 8 })
    );
    assert!(surface.height_at(0, 8).is_err());
}

#[test]
fn height_at_reads_the_mapped_vertex() {
    let mut surface = AnimatedSurface::new(SurfaceConfig::default().with_precision(32)).unwrap();
    surface.set_control_point(1, 1, 0.2).unwrap();
    surface.set_control_point(2, 1, -0.1).unwrap();
    surface.refresh();

    for row in 0..8 {
        for column in 0..8 {
            let (vr, vc) = board_cell_vertex(32, 8, row, column).unwrap();
            let expected = surface.buffer().vertex(vr, vc).unwrap().height();
            assert_eq!(surface.height_at(row, column), Ok(expected));
        }
    }
}

#[test]
fn column_axis_is_mirrored() {
    let mut surface = AnimatedSurface::new(SurfaceConfig::default().with_precision(16)).unwrap();
    // Raise the control point nearest the high-x corner of the patch.
    surface.set_control_point(2, 1, 0.3).unwrap();
    surface.refresh();

    // Column 0 maps to the last vertex rows (high x), column 7 to the first.
    let near = surface.height_at(3, 0).unwrap();
    let far = surface.height_at(3, 7).unwrap();
    assert!(near > far);
}

#[test]
fn smaller_board_uses_wider_cells() {
    let config = SurfaceConfig::default().with_precision(16).with_board_size(4);
    let surface = AnimatedSurface::new(config).unwrap();
    assert_eq!(board_cell_vertex(16, 4, 0, 0), Ok((14, 2)));
    assert_eq!(surface.height_at(3, 3), Ok(0.0));
    assert!(surface.height_at(4, 0).is_err());
}
