use mw_core::SENTINEL_STATUS;

#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    pub max_width: Option<usize>,
    pub color: bool,
}

const MIN_WIDTH: usize = 4;

/// Render an aligned plain-text table. Widths count characters, so accented
/// cells (`Sí`) line up.
#[must_use]
pub fn render_rows(headers: &[&str], rows: &[Vec<String>], options: TableOptions) -> String {
    let mut widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| width_of(cell))
                .max()
                .unwrap_or(0)
                .max(width_of(header))
                .max(MIN_WIDTH)
        })
        .collect();

    if let Some(max_width) = options.max_width {
        shrink_to(&mut widths, headers, max_width);
    }

    let header_line = headers
        .iter()
        .zip(&widths)
        .map(|(header, width)| pad(&truncate(header, *width), *width, false, None))
        .collect::<Vec<_>>()
        .join("  ");
    let divider = "-".repeat(width_of(&header_line));

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(header_line);
    lines.push(divider);
    for row in rows {
        let line = widths
            .iter()
            .enumerate()
            .map(|(index, width)| {
                let cell = truncate(row.get(index).map_or("-", String::as_str), *width);
                let numeric = looks_numeric(&cell);
                let color = if options.color { color_for(&cell) } else { None };
                pad(&cell, *width, numeric, color)
            })
            .collect::<Vec<_>>()
            .join("  ");
        lines.push(line);
    }
    lines.join("\n")
}

fn width_of(value: &str) -> usize {
    value.chars().count()
}

/// Narrow the widest columns one step at a time until the row fits.
fn shrink_to(widths: &mut [usize], headers: &[&str], max_width: usize) {
    let separators = widths.len().saturating_sub(1) * 2;
    while widths.iter().sum::<usize>() + separators > max_width {
        let widest = widths
            .iter()
            .enumerate()
            .filter(|(index, width)| **width > width_of(headers[*index]).max(MIN_WIDTH))
            .max_by_key(|(_, width)| **width)
            .map(|(index, _)| index);
        let Some(index) = widest else {
            break;
        };
        widths[index] -= 1;
    }
}

fn truncate(value: &str, width: usize) -> String {
    if width_of(value) <= width {
        return value.to_string();
    }
    if width <= 1 {
        return "…".to_string();
    }
    let mut out: String = value.chars().take(width - 1).collect();
    out.push('…');
    out
}

fn looks_numeric(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty() && trimmed.chars().all(|ch| ch.is_ascii_digit() || ch == '.')
}

fn pad(value: &str, width: usize, numeric: bool, color: Option<&str>) -> String {
    let fill = " ".repeat(width.saturating_sub(width_of(value)));
    let value = match color {
        Some(code) => format!("\u{1b}[{code}m{value}\u{1b}[0m"),
        None => value.to_string(),
    };
    if numeric {
        format!("{fill}{value}")
    } else {
        format!("{value}{fill}")
    }
}

/// ANSI color for cells that carry a reachability or run status.
fn color_for(value: &str) -> Option<&'static str> {
    match value {
        "SI" | "marked" | "NOERROR" => Some("32"),
        "nothing_to_do" | "no_consensus" | "SIN DEDUCCION" => Some("33"),
        "NO" => Some("31"),
        v if v == SENTINEL_STATUS => Some("35"),
        _ => None,
    }
}
