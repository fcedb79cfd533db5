//! Reading and writing cell content.

use crate::{int, sheet, text, GridFault, MemoryGrid};
use excelcom_core::{Error, HostValue, SheetError, TextKind, WireText, WireValue};
use pretty_assertions::assert_eq;

#[test]
fn test_unary_round_trip() {
    let mut ws = sheet(MemoryGrid::new());
    ws.set_unary_content("B2", 42).unwrap();

    assert_eq!(ws.backend().cell("B2"), int(42));
    assert_eq!(ws.unary_content("B2").unwrap(), HostValue::I32(42));
    assert_eq!(ws.unary_content("b2").unwrap(), HostValue::I32(42));
    assert_eq!(ws.unary_content("C3").unwrap(), HostValue::Null);
}

#[test]
fn test_unary_content_at() {
    let mut ws = sheet(MemoryGrid::new());
    ws.set_unary_content_at(0, 2, "hello").unwrap();

    assert_eq!(ws.backend().cell("C1"), text("hello"));
    assert_eq!(
        ws.unary_content_at(0, 2).unwrap(),
        HostValue::String("hello".to_string())
    );
}

#[test]
fn test_unary_content_rejects_ranges() {
    let mut ws = sheet(MemoryGrid::new());

    let err = ws.unary_content("A1:B2").unwrap_err();
    assert!(matches!(err, SheetError::Engine(Error::NotASingleCell(_))));

    let err = ws.set_unary_content("B2:C2", 1).unwrap_err();
    assert!(matches!(err, SheetError::Engine(Error::NotASingleCell(_))));
    assert!(ws.backend().writes.is_empty());
}

#[test]
fn test_unary_content_accepts_one_cell_spans() {
    let mut ws = sheet(MemoryGrid::new());
    ws.set_unary_content("A1:A1", 1).unwrap();

    assert_eq!(ws.backend().writes, vec!["A1".to_string()]);
    assert_eq!(ws.backend().cell("A1"), int(1));
    assert_eq!(ws.unary_content("$A$1:A1").unwrap(), HostValue::I32(1));
}

#[test]
fn test_unary_content_at_checks_limits() {
    let mut ws = sheet(MemoryGrid::new());
    let err = ws.unary_content_at(0, 16_384).unwrap_err();
    assert!(matches!(
        err,
        SheetError::Engine(Error::OutOfRange { kind: "column", .. })
    ));
}

#[test]
fn test_special_characters_travel_as_rich_text() {
    let mut ws = sheet(MemoryGrid::new());
    ws.set_unary_content("A1", "a+b").unwrap();
    ws.set_unary_content("A2", "plain text 42").unwrap();

    assert_eq!(
        ws.backend().cell("A1"),
        WireValue::Text(WireText {
            kind: TextKind::Rich,
            value: "a+b".to_string(),
        })
    );
    assert_eq!(
        ws.backend().cell("A2"),
        WireValue::Text(WireText {
            kind: TextKind::Plain,
            value: "plain text 42".to_string(),
        })
    );
    assert_eq!(ws.unary_content("A1").unwrap().as_str(), Some("a+b"));
}

#[test]
fn test_content_is_row_major() {
    let grid = MemoryGrid::with_rows(
        "A1",
        vec![vec![int(1), int(2), int(3)], vec![int(4), int(5), int(6)]],
    );
    let mut ws = sheet(grid);

    let m = ws.content("A1:C2").unwrap();
    assert_eq!(m.row_count(), 2);
    assert_eq!(m.column_count(), 3);
    assert_eq!(
        m.into_rows(),
        vec![
            vec![HostValue::I32(1), HostValue::I32(2), HostValue::I32(3)],
            vec![HostValue::I32(4), HostValue::I32(5), HostValue::I32(6)],
        ]
    );
}

#[test]
fn test_content_between() {
    let grid = MemoryGrid::with_rows("B2", vec![vec![int(1), int(2)], vec![int(3), int(4)]]);
    let mut ws = sheet(grid);

    let m = ws.content_between(1, 1, 2, 1).unwrap();
    assert_eq!(
        m.into_rows(),
        vec![vec![HostValue::I32(1)], vec![HostValue::I32(3)]]
    );

    let err = ws.content_between(2, 0, 1, 0).unwrap_err();
    assert!(matches!(err, SheetError::Engine(Error::InvalidRangeOrder(_))));
}

#[test]
fn test_content_of_single_cell_is_one_by_one() {
    let grid = MemoryGrid::with_rows("D4", vec![vec![text("x")]]);
    let mut ws = sheet(grid);

    let m = ws.content("D4").unwrap();
    assert_eq!(m.row_count(), 1);
    assert_eq!(m.column_count(), 1);
    assert_eq!(m.get(0, 0), Some(&HostValue::String("x".to_string())));
}

#[test]
fn test_used_content() {
    let mut grid = MemoryGrid::new();
    grid.put("B2", int(1));
    grid.put("D3", WireValue::Boolean(true));
    let mut ws = sheet(grid);

    let m = ws.used_content().unwrap();
    assert_eq!(
        m.into_rows(),
        vec![
            vec![HostValue::I32(1), HostValue::Null, HostValue::Null],
            vec![HostValue::Null, HostValue::Null, HostValue::Bool(true)],
        ]
    );
}

#[test]
fn test_set_content_is_written_row_major() {
    let mut ws = sheet(MemoryGrid::new());
    ws.set_content("B2:C3", vec![vec![1, 2], vec![3, 4]]).unwrap();

    let grid = ws.backend();
    assert_eq!(grid.cell("B2"), int(1));
    assert_eq!(grid.cell("C2"), int(2));
    assert_eq!(grid.cell("B3"), int(3));
    assert_eq!(grid.cell("C3"), int(4));
    assert_eq!(grid.writes, vec!["B2:C3".to_string()]);
}

#[test]
fn test_set_content_pads_ragged_rows() {
    let mut grid = MemoryGrid::new();
    grid.put("B2", text("stale"));
    let mut ws = sheet(grid);

    let rows = vec![
        vec![HostValue::from("A22"), HostValue::from(123.25)],
        vec![HostValue::from(54.5)],
    ];
    ws.set_content("A1:B2", rows).unwrap();

    assert_eq!(ws.backend().cell("A1"), text("A22"));
    assert_eq!(ws.backend().cell("B1"), WireValue::Float64(123.25));
    assert_eq!(ws.backend().cell("A2"), WireValue::Float64(54.5));
    assert_eq!(ws.backend().cell("B2"), WireValue::Null);
}

#[test]
fn test_set_content_between() {
    let mut ws = sheet(MemoryGrid::new());
    ws.set_content_between(0, 0, 0, 2, vec![vec![Some(1), None, Some(3)]])
        .unwrap();

    assert_eq!(ws.backend().cell("A1"), int(1));
    assert_eq!(ws.backend().cell("B1"), WireValue::Null);
    assert_eq!(ws.backend().cell("C1"), int(3));
}

#[test]
fn test_set_content_with_wrong_shape_writes_nothing() {
    let mut ws = sheet(MemoryGrid::new());

    let err = ws.set_content("A1:B2", vec![vec![1, 2, 3]]).unwrap_err();
    assert!(matches!(err, SheetError::Engine(Error::DimensionMismatch(_))));

    let empty: Vec<Vec<i32>> = Vec::new();
    let err = ws.set_content("A1", empty).unwrap_err();
    assert!(matches!(err, SheetError::Engine(Error::DimensionMismatch(_))));

    assert!(ws.backend().writes.is_empty());
}

#[test]
fn test_set_content_any() {
    let mut ws = sheet(MemoryGrid::new());
    ws.set_content_any("A1:B1", &[vec![7i16, 8i16]]).unwrap();

    assert_eq!(ws.backend().cell("A1"), WireValue::Integer16(7));
    assert_eq!(ws.backend().cell("B1"), WireValue::Integer16(8));
}

#[test]
fn test_set_content_any_pads_ragged_rows() {
    let mut ws = sheet(MemoryGrid::new());
    ws.set_content_any("A1:B2", &[vec![1.5f64, 2.5], vec![3.5]])
        .unwrap();

    assert_eq!(ws.backend().cell("B1"), WireValue::Float64(2.5));
    assert_eq!(ws.backend().cell("A2"), WireValue::Float64(3.5));
    assert_eq!(ws.backend().cell("B2"), WireValue::Null);
    assert_eq!(ws.backend().writes, vec!["A1:B2".to_string()]);
}

#[test]
fn test_set_content_any_with_unsupported_type_writes_nothing() {
    let mut ws = sheet(MemoryGrid::new());

    let err = ws.set_content_any("A1:B1", &[vec!['x', 'y']]).unwrap_err();
    assert!(matches!(err, SheetError::Engine(Error::UnsupportedType("char"))));
    assert!(ws.backend().writes.is_empty());
}

#[test]
fn test_fill() {
    let mut ws = sheet(MemoryGrid::new());
    ws.fill("A1:B2", "x").unwrap();

    for token in ["A1", "A2", "B1", "B2"] {
        assert_eq!(ws.backend().cell(token), text("x"));
    }
    assert_eq!(ws.backend().cell("C1"), WireValue::Null);

    ws.fill_between(0, 0, 1, 0, ()).unwrap();
    assert_eq!(ws.backend().cell("A1"), WireValue::Null);
    assert_eq!(ws.backend().cell("A2"), WireValue::Null);
    assert_eq!(ws.backend().cell("B1"), text("x"));
}

#[test]
fn test_invalid_tokens_never_reach_the_grid() {
    let mut ws = sheet(MemoryGrid::new());

    assert!(matches!(
        ws.content("A2:B5:C6").unwrap_err(),
        SheetError::Engine(Error::InvalidFormat(_))
    ));
    assert!(matches!(
        ws.fill("ABCD3:ABCDE4", 1).unwrap_err(),
        SheetError::Engine(Error::RangeTooLarge(_))
    ));
    assert!(matches!(
        ws.set_content("A2000000:A2000001", vec![vec![1], vec![2]])
            .unwrap_err(),
        SheetError::Engine(Error::RangeTooLarge(_))
    ));
    assert!(ws.backend().writes.is_empty());
}

#[test]
fn test_backend_errors_pass_through() {
    let mut grid = MemoryGrid::new();
    grid.offline = true;
    let mut ws = sheet(grid);

    let err = ws.content("A1:B2").unwrap_err();
    assert!(matches!(err.as_backend(), Some(GridFault::Offline)));
    assert!(err.as_engine().is_none());

    let err = ws.set_unary_content("A1", 1).unwrap_err();
    assert!(matches!(err, SheetError::Backend(GridFault::Offline)));
}

#[test]
fn test_into_backend() {
    let mut ws = sheet(MemoryGrid::new());
    ws.backend_mut().put("A1", int(5));
    let grid = ws.into_backend();
    assert_eq!(grid.cell("A1"), int(5));
}
