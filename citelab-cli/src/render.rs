//! Fixed-width text table rendering for CLI output.

/// Render a table with a header row, columns padded to the widest cell.
pub fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let columns = headers.len();
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(columns) {
            if cell.len() > widths[i] {
                widths[i] = cell.len();
            }
        }
    }

    let mut out = String::new();
    render_row(&mut out, headers.iter().map(|h| h.to_string()), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    render_row(&mut out, rule.into_iter(), &widths);
    for row in rows {
        render_row(&mut out, row.iter().cloned(), &widths);
    }
    out
}

fn render_row(out: &mut String, cells: impl Iterator<Item = String>, widths: &[usize]) {
    let rendered: Vec<String> = cells
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect();
    out.push_str("  ");
    out.push_str(rendered.join("  ").trim_end());
    out.push('\n');
}

/// Two-decimal fixed format.
pub fn num(value: f64) -> String {
    format!("{value:.2}")
}

/// Whole-number format for counts.
pub fn count(value: f64) -> String {
    format!("{value:.0}")
}

/// Fraction rendered as a one-decimal percentage.
pub fn percent(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_pads_columns_to_widest_cell() {
        let out = table(
            &["Country", "Value"],
            &[
                vec!["Alpha".to_string(), "1.00".to_string()],
                vec!["Longlandname".to_string(), "12.50".to_string()],
            ],
        );
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("Country"));
        assert!(lines[1].starts_with("  ---"));
        assert!(lines[2].starts_with("  Alpha"));
        assert!(lines[3].starts_with("  Longlandname"));
    }

    #[test]
    fn formats() {
        assert_eq!(num(1.005), "1.00");
        assert_eq!(count(1234.0), "1234");
        assert_eq!(percent(0.5), "50.0%");
        assert_eq!(percent(0.733), "73.3%");
    }
}
