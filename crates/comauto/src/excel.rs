//! Excel object model helpers
//!
//! Collection walks follow Excel's 1-based `Item(i)` convention. The lookups
//! that suppress failures (`workbooks`, `worksheets`, `range`) log them at
//! debug level; everything else propagates [`Error::Com`](comauto_core::Error).

#![cfg(windows)]

use comauto_core::{address, CellCoord, Result, Rgb};

use crate::dispatch::Dispatch;
use crate::invoker::Invoker;
use crate::variant::Variant;

/// A selected cell: its coordinate and the `Range` object for that cell
#[derive(Debug, Clone)]
pub struct SelectedCell {
    pub coord: CellCoord,
    pub cell: Dispatch,
}

/// `collection.Item(1..=Count)`, stopping at the first failure
fn collect_items(invoker: &mut Invoker, collection: &Dispatch) -> Result<Vec<Dispatch>> {
    let count: i32 = invoker.get_property(collection, "Count", &[])?.unwrap_or(0);
    let mut items = Vec::with_capacity(count.max(0) as usize);
    for i in 1..=count {
        items.push(invoker.get_object(collection, "Item", &[Variant::from(i)])?);
    }
    Ok(items)
}

/// Like [`collect_items`] but keeps whatever was gathered before a failure
fn collect_items_lenient(
    invoker: &mut Invoker,
    collection: &Dispatch,
    what: &str,
) -> Vec<Dispatch> {
    let count: i32 = match invoker.get_property(collection, "Count", &[]) {
        Ok(count) => count.unwrap_or(0),
        Err(e) => {
            log::debug!("{what}.Count: {e}");
            return Vec::new();
        }
    };

    let mut items = Vec::new();
    for i in 1..=count {
        match invoker.get_object(collection, "Item", &[Variant::from(i)]) {
            Ok(item) => items.push(item),
            Err(e) => {
                log::debug!("{what}.Item({i}): {e}");
                break;
            }
        }
    }
    items
}

/// Open workbooks of an Excel `Application`
pub fn workbooks(invoker: &mut Invoker, app: &Dispatch) -> Vec<Dispatch> {
    match invoker.get_object(app, "Workbooks", &[]) {
        Ok(books) => collect_items_lenient(invoker, &books, "Workbooks"),
        Err(e) => {
            log::debug!("Workbooks: {e}");
            Vec::new()
        }
    }
}

/// Sheets of a workbook, in tab order
pub fn worksheets(invoker: &mut Invoker, workbook: &Dispatch) -> Vec<Dispatch> {
    match invoker.get_object(workbook, "Sheets", &[]) {
        Ok(sheets) => collect_items_lenient(invoker, &sheets, "Sheets"),
        Err(e) => {
            log::debug!("Sheets: {e}");
            Vec::new()
        }
    }
}

/// `sheet.Range(address)`, or `None` if Excel rejects the address
pub fn range(invoker: &mut Invoker, sheet: &Dispatch, address: &str) -> Option<Dispatch> {
    match invoker.get_object(sheet, "Range", &[Variant::from(address)]) {
        Ok(range) => Some(range),
        Err(e) => {
            log::debug!("Range({address}): {e}");
            None
        }
    }
}

/// Fill a cell (or any range) with a solid color
pub fn set_cell_background(invoker: &mut Invoker, cell: &Dispatch, color: Rgb) -> Result<()> {
    let interior = invoker.get_object(cell, "Interior", &[])?;
    invoker.set_property(&interior, "Color", &[Variant::from(color.to_ole())])
}

pub fn select_used_range(invoker: &mut Invoker, sheet: &Dispatch) -> Result<()> {
    let used = invoker.get_object(sheet, "UsedRange", &[])?;
    invoker.call_method(&used, "Select", &[])?;
    Ok(())
}

/// Select the used range and fill it with an OLE_COLOR value
pub fn highlight_used_range(invoker: &mut Invoker, sheet: &Dispatch, ole_color: i32) -> Result<()> {
    select_used_range(invoker, sheet)?;
    let used = invoker.get_object(sheet, "UsedRange", &[])?;
    let interior = invoker.get_object(&used, "Interior", &[])?;
    invoker.set_property(&interior, "Color", &[Variant::from(ole_color)])
}

/// Select the given addresses on `sheet`. Several ranges are joined with
/// `Application.Union` so they end up in one selection.
pub fn select_cells<S: AsRef<str>>(
    invoker: &mut Invoker,
    sheet: &Dispatch,
    addresses: &[S],
) -> Result<()> {
    if addresses.is_empty() {
        return Ok(());
    }

    let mut ranges = Vec::with_capacity(addresses.len());
    for address in addresses {
        ranges.push(invoker.get_object(sheet, "Range", &[Variant::from(address.as_ref())])?);
    }

    let target = if ranges.len() == 1 {
        ranges.remove(0)
    } else {
        let app = invoker.get_object(sheet, "Application", &[])?;
        let args: Vec<Variant> = ranges.iter().map(Variant::from).collect();
        invoker.call_object(&app, "Union", &args)?
    };

    invoker.call_method(&target, "Select", &[])?;
    Ok(())
}

/// Walk `Selection.Areas` and each area's `Cells`, pairing every cell with
/// its parsed `$C$R` address. Cells whose address does not parse are skipped.
fn walk_selection(invoker: &mut Invoker, app: &Dispatch) -> Result<Vec<SelectedCell>> {
    let selection = invoker.get_object(app, "Selection", &[])?;
    let areas = invoker.get_object(&selection, "Areas", &[])?;

    let mut result = Vec::new();
    for area in collect_items(invoker, &areas)? {
        let cells = invoker.get_object(&area, "Cells", &[])?;
        for cell in collect_items(invoker, &cells)? {
            let text: Option<String> = invoker.get_property(&cell, "Address", &[])?;
            match text.as_deref().and_then(address::parse_absolute_address) {
                Some(coord) => result.push(SelectedCell { coord, cell }),
                None => log::debug!("skipping cell with address {text:?}"),
            }
        }
    }
    Ok(result)
}

/// Coordinates of every selected cell, area by area
pub fn selected_cell_coordinates(invoker: &mut Invoker, app: &Dispatch) -> Result<Vec<CellCoord>> {
    Ok(walk_selection(invoker, app)?
        .into_iter()
        .map(|selected| selected.coord)
        .collect())
}

/// Selected cells with their `Range` objects
pub fn selected_cell_objects(invoker: &mut Invoker, app: &Dispatch) -> Result<Vec<SelectedCell>> {
    walk_selection(invoker, app)
}
