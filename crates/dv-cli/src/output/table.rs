//! Plain aligned tables for terminal output.

#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    pub max_width: Option<usize>,
    pub color: bool,
}

const MIN_COLUMN: usize = 4;
const GAP: &str = "  ";

/// Render `rows` under `headers`, numbers right-aligned.
#[must_use]
pub fn render(headers: &[&str], rows: &[Vec<String>], options: TableOptions) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, value) in widths.iter_mut().zip(row) {
            *width = (*width).max(value.chars().count());
        }
    }
    if let Some(max) = options.max_width {
        shrink(&mut widths, max);
    }

    let header = headers
        .iter()
        .zip(&widths)
        .map(|(h, w)| pad(&clip(h, *w), *w, false))
        .collect::<Vec<_>>()
        .join(GAP);
    let rule = "-".repeat(header.chars().count());

    let mut lines = vec![header.trim_end().to_string(), rule];
    for row in rows {
        let line = widths
            .iter()
            .enumerate()
            .map(|(index, width)| {
                let value = clip(row.get(index).map_or("-", String::as_str), *width);
                let padded = pad(&value, *width, is_number(&value));
                if options.color { paint(&padded, &value) } else { padded }
            })
            .collect::<Vec<_>>()
            .join(GAP);
        lines.push(line.trim_end().to_string());
    }
    lines.join("\n")
}

/// Narrow the widest columns one character at a time until the table fits.
fn shrink(widths: &mut [usize], max: usize) {
    let gaps = widths.len().saturating_sub(1) * GAP.len();
    while widths.iter().sum::<usize>() + gaps > max {
        let Some(widest) = widths
            .iter_mut()
            .filter(|w| **w > MIN_COLUMN)
            .max_by_key(|w| **w)
        else {
            return;
        };
        *widest -= 1;
    }
}

fn clip(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let mut out: String = value.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn pad(value: &str, width: usize, right: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(value.chars().count()));
    if right {
        format!("{fill}{value}")
    } else {
        format!("{value}{fill}")
    }
}

fn is_number(value: &str) -> bool {
    !value.is_empty() && value.parse::<f64>().is_ok()
}

/// Color well-known status words.
fn paint(padded: &str, value: &str) -> String {
    let code = match value.to_ascii_lowercase().as_str() {
        "active" | "true" | "success" | "ok" => "32",
        "archived" | "info" | "pending" => "33",
        "deleted" | "false" | "error" | "failed" => "31",
        _ => return padded.to_string(),
    };
    format!("\u{1b}[{code}m{padded}\u{1b}[0m")
}
