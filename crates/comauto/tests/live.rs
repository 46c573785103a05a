//! Tests against real Office installations.
//!
//! Run with `cargo test -p comauto -- --ignored` on a Windows machine that
//! has Excel and Word installed.

#![cfg(windows)]

use comauto::excel;
use comauto::prelude::*;
use pretty_assertions::assert_eq;

fn start_excel(invoker: &mut Invoker) -> Dispatch {
    let app = Dispatch::create_application("Excel.Application", &AutomationConfig::default())
        .expect("Failed to start Excel");
    invoker.track(&app);
    app
}

fn new_sheet(invoker: &mut Invoker, app: &Dispatch) -> Dispatch {
    let books = invoker.get_object(app, "Workbooks", &[]).unwrap();
    let book = invoker.call_object(&books, "Add", &[]).unwrap();
    invoker.get_object(&book, "ActiveSheet", &[]).unwrap()
}

fn quit(invoker: &mut Invoker, app: &Dispatch) {
    for book in excel::workbooks(invoker, app) {
        let _ = invoker.set_property(&book, "Saved", &[Variant::from(true)]);
    }
    let _ = invoker.call_method(app, "Quit", &[]);
    invoker.release_all();
}

#[test]
#[ignore = "Requires Microsoft Excel"]
fn test_excel_property_round_trip() {
    let _com = Apartment::initialize_sta().unwrap();
    let mut invoker = Invoker::new();
    let app = start_excel(&mut invoker);
    let sheet = new_sheet(&mut invoker, &app);

    let cell = excel::range(&mut invoker, &sheet, "B3").expect("Range(B3)");
    invoker
        .set_property(&cell, "Value", &[Variant::from(42.5)])
        .unwrap();
    let value: Option<f64> = invoker.get_property(&cell, "Value", &[]).unwrap();
    assert_eq!(value, Some(42.5));

    let address: Option<String> = invoker.get_property(&cell, "Address", &[]).unwrap();
    assert_eq!(address.as_deref(), Some("$B$3"));

    assert!(invoker.property_exists(&cell, "Interior"));
    assert!(!invoker.property_exists(&cell, "NoSuchMember"));
    assert!(invoker
        .list_callable_members(&cell)
        .contains(&"PropertyGet: Address".to_string()));

    quit(&mut invoker, &app);
}

#[test]
#[ignore = "Requires Microsoft Excel"]
fn test_excel_unknown_member_is_com_error() {
    let _com = Apartment::initialize_sta().unwrap();
    let mut invoker = Invoker::new();
    let app = start_excel(&mut invoker);

    let err = invoker
        .get_property::<Value>(&app, "DefinitelyNotAMember", &[])
        .unwrap_err();
    assert!(matches!(err, Error::Com { .. }), "got {err:?}");
    assert!(err
        .to_string()
        .starts_with("COM error accessing member 'DefinitelyNotAMember'"));

    quit(&mut invoker, &app);
}

#[test]
#[ignore = "Requires Microsoft Excel"]
fn test_excel_selection_and_highlight() {
    let _com = Apartment::initialize_sta().unwrap();
    let mut invoker = Invoker::new();
    let app = start_excel(&mut invoker);
    let sheet = new_sheet(&mut invoker, &app);

    excel::select_cells(&mut invoker, &sheet, &["A1", "C2:D2"]).unwrap();
    let coords = excel::selected_cell_coordinates(&mut invoker, &app).unwrap();
    assert_eq!(
        coords,
        vec![CellCoord::new(1, 1), CellCoord::new(2, 3), CellCoord::new(2, 4)]
    );

    let cells = excel::selected_cell_objects(&mut invoker, &app).unwrap();
    assert_eq!(cells.len(), 3);
    excel::set_cell_background(&mut invoker, &cells[0].cell, Rgb::YELLOW).unwrap();
    let interior = invoker.get_object(&cells[0].cell, "Interior", &[]).unwrap();
    let color: Option<i32> = invoker.get_property(&interior, "Color", &[]).unwrap();
    assert_eq!(color, Some(Rgb::YELLOW.to_ole()));

    let b2 = excel::range(&mut invoker, &sheet, "B2").unwrap();
    invoker
        .set_property(&b2, "Value", &[Variant::from("x")])
        .unwrap();
    excel::highlight_used_range(&mut invoker, &sheet, Rgb::GREEN.to_ole()).unwrap();
    let used = invoker.get_object(&sheet, "UsedRange", &[]).unwrap();
    let used_address: Option<String> = invoker.get_property(&used, "Address", &[]).unwrap();
    let selection = invoker.get_object(&app, "Selection", &[]).unwrap();
    let selected_address: Option<String> =
        invoker.get_property(&selection, "Address", &[]).unwrap();
    assert_eq!(selected_address, used_address);
    let used_interior = invoker.get_object(&used, "Interior", &[]).unwrap();
    let used_color: Option<i32> = invoker.get_property(&used_interior, "Color", &[]).unwrap();
    assert_eq!(used_color, Some(Rgb::GREEN.to_ole()));

    let book = invoker.get_object(&sheet, "Parent", &[]).unwrap();
    let sheets = excel::worksheets(&mut invoker, &book);
    assert!(!sheets.is_empty());

    quit(&mut invoker, &app);
}

#[test]
#[ignore = "Requires Microsoft Excel"]
fn test_excel_process_and_rot() {
    let _com = Apartment::initialize_sta().unwrap();
    let mut invoker = Invoker::new();
    let app = start_excel(&mut invoker);
    let _sheet = new_sheet(&mut invoker, &app);

    let pid = comauto::process::excel_process_id(&mut invoker, &app).unwrap();
    assert_ne!(pid, 0);

    // Unsaved workbooks are not registered, so this only checks the walk completes
    let _ = comauto::rot::running_objects();
    let _ = comauto::rot::excel_applications();

    quit(&mut invoker, &app);
}

#[test]
#[ignore = "Requires Microsoft Word"]
fn test_word_table_demo() {
    let _com = Apartment::initialize_sta().unwrap();
    comauto::word::insert_table_demo(&AutomationConfig::default()).unwrap();
}
