//! `table-inserter`: toolbar button and Ctrl+Shift+T inserting an HTML table

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::plugin::{ActionFn, EditorPlugin, KeyboardShortcut, ToolbarButton};

pub const MAX_ROWS: usize = 20;
pub const MAX_COLS: usize = 10;

const STYLES: &str = r#"
.lilac-editor__content .lilac-table {
  margin: 16px 0;
  width: 100%;
  border-collapse: collapse;
  font-size: inherit;
}
.lilac-editor__content .lilac-table th,
.lilac-editor__content .lilac-table td {
  padding: 8px 12px;
  text-align: left;
  min-width: 100px;
}
.lilac-editor__content .lilac-table th {
  font-weight: 600;
  background: var(--lilac-color-surface);
}
.lilac-editor__content .lilac-table-bordered {
  border: 1px solid var(--lilac-color-border);
}
.lilac-editor__content .lilac-table-bordered th,
.lilac-editor__content .lilac-table-bordered td {
  border: 1px solid var(--lilac-color-border);
}
.lilac-editor__content .lilac-table tr:nth-child(even) {
  background: rgba(0, 0, 0, 0.02);
}
"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableOptions {
    /// Body rows, clamped to 1..=20
    pub rows: usize,
    /// Clamped to 1..=10
    pub cols: usize,
    pub header: bool,
    pub borders: bool,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            rows: 3,
            cols: 3,
            header: true,
            borders: true,
        }
    }
}

/// Table markup for `options`.
///
/// With a header row the body cells are numbered from row 2, matching the
/// header's position as row 1.
pub fn table_html(options: &TableOptions) -> String {
    let rows = options.rows.clamp(1, MAX_ROWS);
    let cols = options.cols.clamp(1, MAX_COLS);

    let mut html = format!(
        "<table class=\"lilac-table{}\">",
        if options.borders { " lilac-table-bordered" } else { "" }
    );

    if options.header {
        html.push_str("<thead><tr>");
        for c in 1..=cols {
            html.push_str(&format!("<th>Header {}</th>", c));
        }
        html.push_str("</tr></thead>");
    }

    html.push_str("<tbody>");
    let first = if options.header { 2 } else { 1 };
    for r in first..first + rows {
        html.push_str("<tr>");
        for c in 1..=cols {
            html.push_str(&format!("<td>Cell {}-{}</td>", r, c));
        }
        html.push_str("</tr>");
    }
    html.push_str("</tbody></table>");
    html
}

pub fn table_plugin(options: TableOptions) -> EditorPlugin {
    let insert: ActionFn = Rc::new(move |ctx| {
        ctx.insert_content(table_html(&options));
        Ok(())
    });

    let mut button = ToolbarButton::new("insert-table", "Insert Table", |_| Ok(()));
    button.on_click = ActionFn::clone(&insert);
    button.icon = "table".to_string();
    button.tooltip = Some("Insert table (Ctrl+Shift+T)".to_string());
    button.shortcut = Some("Ctrl+Shift+T".to_string());
    button.group = Some("insert".to_string());

    let mut shortcut = KeyboardShortcut::new("t", |_| Ok(())).ctrl().shift();
    shortcut.action = insert;

    let config = serde_json::to_value(options).unwrap_or_default();

    EditorPlugin::new("table-inserter", "Table Inserter", "1.0.0")
        .with_description("Insert and manage HTML tables")
        .with_author("Lilac Editor")
        .with_toolbar_button(button)
        .with_shortcut(shortcut)
        .with_styles(STYLES)
        .with_config(config)
        .on_install(|_| {
            tracing::info!("Table Inserter plugin installed");
            Ok(())
        })
        .on_uninstall(|_| {
            tracing::info!("Table Inserter plugin uninstalled");
            Ok(())
        })
}
