use serde::Serialize;

use crate::ui;

pub mod table;

/// Serialize a response for the `json` (pretty) and `raw` (single line)
/// formats. Commands draw the `table` format themselves.
pub fn render<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<String> {
    if pretty {
        Ok(serde_json::to_string_pretty(value)?)
    } else {
        Ok(serde_json::to_string(value)?)
    }
}

/// Print a serialized response.
pub fn output<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let rendered = render(value, pretty)?;
    println!("{rendered}");
    Ok(())
}

/// Options for tables drawn on the current terminal.
#[must_use]
pub fn table_options() -> table::TableOptions {
    let prefs = ui::prefs();
    table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.color,
    }
}
