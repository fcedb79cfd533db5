//! Find/FindNext through search cursors.

use crate::{int, sheet, text, GridFault, MemoryGrid};
use excelcom_core::{
    CellPosition, Error, HostValue, LookAt, SearchDirection, SearchOptions, SearchOrder,
    SearchScope, SheetError,
};
use pretty_assertions::assert_eq;

fn column_of_x() -> MemoryGrid {
    MemoryGrid::with_rows("A1", vec![vec![text("x")], vec![text("x")], vec![text("x")]])
}

fn tokens(cells: &[excelcom_core::CellHandle]) -> Vec<String> {
    cells.iter().map(|c| c.token()).collect()
}

#[test]
fn test_find_without_match() {
    let mut ws = sheet(column_of_x());
    let options = SearchOptions::new("y").range("A1:A3").unwrap();

    assert!(ws.find(options).unwrap().is_none());
    assert_eq!(ws.backend().find_calls, 1);
}

#[test]
fn test_find_on_empty_sheet() {
    let mut ws = sheet(MemoryGrid::new());
    assert!(ws.find_value("*").unwrap().is_none());
}

#[test]
fn test_single_match_terminates() {
    let grid = MemoryGrid::with_rows("A1", vec![vec![text("a")], vec![text("x")], vec![text("b")]]);
    let mut ws = sheet(grid);

    let options = SearchOptions::new("x").range("A1:A3").unwrap();
    let cursor = ws.find(options).unwrap().unwrap();
    assert_eq!(cursor.position(), CellPosition::new(1, 0));

    let next = ws.advance(&cursor).unwrap();
    assert!(next.is_same_match(&cursor));
    assert_eq!(next, cursor);
    assert_eq!(ws.backend().find_next_calls, 1);
}

#[test]
fn test_forward_search_starts_after_top_left_and_wraps() {
    let mut ws = sheet(column_of_x());
    let options = SearchOptions::new("x").range("A1:A3").unwrap();

    let first = ws.find(options).unwrap().unwrap();
    assert_eq!(first.last_match().token(), "A2");

    let second = ws.advance(&first).unwrap();
    assert_eq!(second.last_match().token(), "A3");
    let third = ws.advance(&second).unwrap();
    assert_eq!(third.last_match().token(), "A1");
    let fourth = ws.advance(&third).unwrap();
    assert!(fourth.is_same_match(&first));
}

#[test]
fn test_reverse_search_keeps_walking_backward() {
    let mut ws = sheet(column_of_x());
    let options = SearchOptions::new("x")
        .range("A1:A3")
        .unwrap()
        .direction(SearchDirection::Previous);

    let first = ws.find(options).unwrap().unwrap();
    assert_eq!(first.last_match().token(), "A3");

    let second = ws.advance(&first).unwrap();
    assert_eq!(second.last_match().token(), "A2");
    let third = ws.advance(&second).unwrap();
    assert_eq!(third.last_match().token(), "A1");
    assert_eq!(third.options().direction, SearchDirection::Previous);
}

#[test]
fn test_find_all_forward_and_backward() {
    let mut ws = sheet(column_of_x());

    let forward = SearchOptions::new("x").range("A1:A3").unwrap();
    assert_eq!(tokens(&ws.find_all(forward).unwrap()), vec!["A2", "A3", "A1"]);

    let backward = SearchOptions::new("x")
        .range("A1:A3")
        .unwrap()
        .direction(SearchDirection::Previous);
    assert_eq!(tokens(&ws.find_all(backward).unwrap()), vec!["A3", "A2", "A1"]);
}

#[test]
fn test_find_all_without_match_is_empty() {
    let mut ws = sheet(column_of_x());
    assert!(ws.find_all(SearchOptions::new("nothing")).unwrap().is_empty());
    assert_eq!(ws.backend().find_next_calls, 0);
}

#[test]
fn test_search_order_by_columns() {
    let grid = MemoryGrid::with_rows(
        "A1",
        vec![vec![text("x"), text("x")], vec![text("x"), text("x")]],
    );
    let mut ws = sheet(grid);

    let by_rows = SearchOptions::new("x").range("A1:B2").unwrap();
    assert_eq!(
        tokens(&ws.find_all(by_rows).unwrap()),
        vec!["B1", "A2", "B2", "A1"]
    );

    let by_columns = SearchOptions::new("x")
        .range("A1:B2")
        .unwrap()
        .order(SearchOrder::ByColumns);
    assert_eq!(
        tokens(&ws.find_all(by_columns).unwrap()),
        vec!["A2", "B1", "B2", "A1"]
    );
}

#[test]
fn test_explicit_after() {
    let mut ws = sheet(column_of_x());
    let options = SearchOptions::new("x").range("A1:A3").unwrap().after("A2");

    let cursor = ws.find(options).unwrap().unwrap();
    assert_eq!(cursor.last_match().token(), "A3");
}

#[test]
fn test_after_outside_range_is_rejected_locally() {
    let mut ws = sheet(column_of_x());
    let options = SearchOptions::new("x").range("A1:A3").unwrap().after("B1");

    let err = ws.find(options).unwrap_err();
    assert!(matches!(
        err,
        SheetError::Engine(Error::AfterOutsideRange { .. })
    ));
    assert_eq!(ws.backend().find_calls, 0);
}

#[test]
fn test_whole_and_part_matching() {
    let grid = MemoryGrid::with_rows(
        "A1",
        vec![vec![text("Apple")], vec![text("apple pie")], vec![text("APPLE")]],
    );
    let mut ws = sheet(grid);

    let part = SearchOptions::new("apple").range("A1:A3").unwrap();
    assert_eq!(tokens(&ws.find_all(part).unwrap()), vec!["A2", "A3", "A1"]);

    let whole = SearchOptions::new("apple")
        .range("A1:A3")
        .unwrap()
        .look_at(LookAt::Whole);
    assert_eq!(tokens(&ws.find_all(whole).unwrap()), vec!["A3", "A1"]);

    let whole_case = SearchOptions::new("Apple")
        .range("A1:A3")
        .unwrap()
        .look_at(LookAt::Whole)
        .match_case(true);
    assert_eq!(tokens(&ws.find_all(whole_case).unwrap()), vec!["A1"]);
}

#[test]
fn test_wildcards() {
    let grid = MemoryGrid::with_rows("A1", vec![vec![text("abc"), text("abbc"), text("ac")]]);
    let mut ws = sheet(grid);

    let single = SearchOptions::new("a?c")
        .range("A1:C1")
        .unwrap()
        .look_at(LookAt::Whole);
    assert_eq!(tokens(&ws.find_all(single).unwrap()), vec!["A1"]);

    let any = SearchOptions::new("a*c")
        .range("A1:C1")
        .unwrap()
        .look_at(LookAt::Whole);
    assert_eq!(tokens(&ws.find_all(any).unwrap()), vec!["B1", "C1", "A1"]);
}

#[test]
fn test_find_value_searches_used_range() {
    let mut grid = MemoryGrid::new();
    grid.put("C3", int(42));
    grid.put("E7", text("other"));
    let mut ws = sheet(grid);

    let cursor = ws.find_value("42").unwrap().unwrap();
    assert_eq!(cursor.anchor(), &SearchScope::UsedRange);
    assert_eq!(cursor.last_match().token(), "C3");
    assert_eq!(cursor.content(), HostValue::I32(42));
}

#[test]
fn test_default_search_visits_every_filled_cell() {
    let mut grid = MemoryGrid::new();
    grid.put("A1", int(1));
    grid.put("B2", int(2));
    grid.put("C1", int(3));
    let mut ws = sheet(grid);

    let all = ws.find_all(SearchOptions::default()).unwrap();
    assert_eq!(tokens(&all), vec!["C1", "B2", "A1"]);
}

#[test]
fn test_cursor_survives_grid_failure() {
    let mut ws = sheet(column_of_x());
    let cursor = ws
        .find(SearchOptions::new("x").range("A1:A3").unwrap())
        .unwrap()
        .unwrap();

    ws.backend_mut().offline = true;
    let err = ws.advance(&cursor).unwrap_err();
    assert!(matches!(err, SheetError::Backend(GridFault::Offline)));

    ws.backend_mut().offline = false;
    let next = ws.advance(&cursor).unwrap();
    assert_eq!(next.last_match().token(), "A3");
}
