use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_table(value),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

fn options() -> table::TableOptions {
    let prefs = ui::prefs();
    table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}

/// Objects render as `key | value` pairs sorted by key; arrays of objects
/// nested in them (per-table reports, warnings) follow as their own tables.
fn render_table<T: Serialize>(value: &T) -> anyhow::Result<String> {
    let value = serde_json::to_value(value)?;
    let mut sections = Vec::new();

    match value {
        Value::Object(map) => {
            let mut pairs = Vec::new();
            for (key, value) in map {
                match value {
                    Value::Array(items) if items.iter().any(Value::is_object) => {
                        sections.push(format!("{key}:\n{}", render_array(&items)));
                    }
                    other => pairs.push(vec![key, cell(&other)]),
                }
            }
            sections.insert(0, table::render_rows(&["key", "value"], &pairs, options()));
        }
        Value::Array(items) => sections.push(render_array(&items)),
        scalar => sections.push(cell(&scalar)),
    }

    Ok(sections.join("\n\n"))
}

fn render_array(items: &[Value]) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }

    let mut headers = Vec::<String>::new();
    for map in items.iter().filter_map(Value::as_object) {
        for key in map.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }
    if headers.is_empty() {
        let rows = items.iter().map(|item| vec![cell(item)]).collect::<Vec<_>>();
        return table::render_rows(&["value"], &rows, options());
    }

    let rows = items
        .iter()
        .map(|item| {
            headers
                .iter()
                .map(|header| item.get(header).map_or_else(|| String::from("-"), cell))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();
    let header_refs = headers.iter().map(String::as_str).collect::<Vec<_>>();
    table::render_rows(&header_refs, &rows, options())
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::String(v) => v.clone(),
        Value::Array(items) => items.iter().map(cell).collect::<Vec<_>>().join(", "),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde::Serialize;

    use super::render;
    use crate::cli::OutputFormat;

    #[derive(Serialize)]
    struct TableReport {
        table: &'static str,
        changed: usize,
    }

    #[derive(Serialize)]
    struct Summary {
        status: &'static str,
        consensus: Vec<&'static str>,
        tables: Vec<TableReport>,
    }

    fn summary() -> Summary {
        Summary {
            status: "marked",
            consensus: vec!["a.com", "b.com"],
            tables: vec![
                TableReport {
                    table: "chile",
                    changed: 2,
                },
                TableReport {
                    table: "peru",
                    changed: 1,
                },
            ],
        }
    }

    #[test]
    fn json_render_is_valid_json() {
        let out = render(&summary(), OutputFormat::Json).expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["status"], "marked");
        assert_eq!(parsed["tables"][1]["changed"], 1);
    }

    #[test]
    fn raw_render_is_single_line_json() {
        let out = render(&summary(), OutputFormat::Raw).expect("raw render should work");
        assert!(!out.contains('\n'));
    }

    #[test]
    fn table_render_splits_nested_rows() {
        let out = render(&summary(), OutputFormat::Table).expect("table render should work");
        assert!(out.lines().next().is_some_and(|line| line.contains("key")));
        assert!(out.contains("a.com, b.com"));
        assert!(out.contains("tables:"));
        assert!(out.contains("peru"));
    }
}
