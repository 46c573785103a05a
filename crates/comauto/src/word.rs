//! Word object model helpers

#![cfg(windows)]

use comauto_core::convert::to_com_bool;
use comauto_core::{RangeStyle, Result, Rgb};

use crate::config::AutomationConfig;
use crate::dispatch::Dispatch;
use crate::invoker::Invoker;
use crate::variant::Variant;

const TABLE_ROWS: i32 = 3;
const TABLE_COLUMNS: i32 = 3;

/// `wdDoNotSaveChanges`
const WD_DO_NOT_SAVE_CHANGES: i32 = 0;

/// Apply the options set in `style` to a Word `Range`; unset options leave
/// the range untouched.
pub fn apply_style(invoker: &mut Invoker, range: &Dispatch, style: &RangeStyle) -> Result<()> {
    if style.touches_font() {
        let font = invoker.get_object(range, "Font", &[])?;
        for (name, on) in [
            ("Bold", style.bold),
            ("Italic", style.italic),
            ("Underline", style.underline),
        ] {
            if on {
                invoker.set_property(&font, name, &[Variant::from(to_com_bool(true))])?;
            }
        }
        if let Some(color) = style.font_color {
            invoker.set_property(&font, "Color", &[Variant::from(color)])?;
        }
        if let Some(size) = style.font_size {
            invoker.set_property(&font, "Size", &[Variant::from(size)])?;
        }
    }

    if let Some(color) = style.background_color {
        let shading = invoker.get_object(range, "Shading", &[])?;
        invoker.set_property(&shading, "BackgroundPatternColor", &[Variant::from(color)])?;
    }
    Ok(())
}

/// Bold text in `font_color` on a `background` fill, at `size` points
pub fn apply_bold_colored_background(
    invoker: &mut Invoker,
    range: &Dispatch,
    font_color: Rgb,
    background: Rgb,
    size: f32,
) -> Result<()> {
    invoker.set_property(range, "Bold", &[Variant::from(to_com_bool(true))])?;

    let font = invoker.get_object(range, "Font", &[])?;
    invoker.set_property(&font, "Color", &[Variant::from(font_color.to_ole())])?;
    invoker.set_property(&font, "Size", &[Variant::from(size)])?;

    let shading = invoker.get_object(range, "Shading", &[])?;
    invoker.set_property(
        &shading,
        "BackgroundPatternColor",
        &[Variant::from(background.to_ole())],
    )
}

fn fill_table(invoker: &mut Invoker, table: &Dispatch) -> Result<()> {
    let header = RangeStyle::header();
    for row in 1..=TABLE_ROWS {
        for col in 1..=TABLE_COLUMNS {
            let cell =
                invoker.get_object(table, "Cell", &[Variant::from(row), Variant::from(col)])?;
            let range = invoker.get_object(&cell, "Range", &[])?;
            invoker.set_property(&range, "Text", &[Variant::from(format!("R{row}C{col}"))])?;
            if row == 1 {
                apply_style(invoker, &range, &header)?;
            }
        }
    }
    Ok(())
}

fn build_demo_document(invoker: &mut Invoker, app: &Dispatch) -> Result<()> {
    let documents = invoker.get_object(app, "Documents", &[])?;
    let doc = invoker.call_object(&documents, "Add", &[])?;

    let content = invoker.get_object(&doc, "Content", &[])?;
    let tables = invoker.get_object(&doc, "Tables", &[])?;
    let table = invoker.call_object(
        &tables,
        "Add",
        &[
            Variant::from(&content),
            Variant::from(TABLE_ROWS),
            Variant::from(TABLE_COLUMNS),
        ],
    )?;
    fill_table(invoker, &table)?;
    log::info!("filled {TABLE_ROWS}x{TABLE_COLUMNS} table");

    invoker.set_property(&doc, "Saved", &[Variant::from(to_com_bool(true))])?;
    invoker.call_method(&doc, "Close", &[Variant::from(WD_DO_NOT_SAVE_CHANGES)])?;
    Ok(())
}

/// Start Word, build a styled 3x3 table in a new document, then discard the
/// document and quit. Word is asked to quit even when building the document
/// fails, and every object obtained along the way is released.
pub fn insert_table_demo(config: &AutomationConfig) -> Result<()> {
    let app = Dispatch::create_application("Word.Application", config)?;
    let mut invoker = Invoker::new();
    invoker.track(&app);

    let outcome = build_demo_document(&mut invoker, &app);
    if let Err(e) = invoker.call_method(&app, "Quit", &[]) {
        log::warn!("Word.Quit failed: {e}");
    }

    let released = invoker.release_all();
    log::debug!("released {released} object(s)");
    outcome
}
