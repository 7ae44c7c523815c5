use crate::naming::target_name;

use super::Dataset;

/// Markdown for the last row that got a computed name and the row right
/// after it, so an operator can eyeball where the update stopped.
///
/// `None` when no row carries `audio{count}-Tung.wav` in column `col`.
pub fn boundary_preview(data: &Dataset, col: usize, count: u64) -> Option<String> {
    let pos = data.find_row(col, &target_name(count))?;
    let row = data.row(pos)?;

    let mut out = format!(
        "--- Row {} ---\n{}",
        pos + 1,
        render_markdown(data.headers(), &[row])
    );
    if let Some(next) = data.row(pos + 1) {
        out.push_str(&format!(
            "\n--- Row {} (keeps original value) ---\n{}",
            pos + 2,
            render_markdown(data.headers(), &[next])
        ));
    }
    Some(out)
}

/// Pipe table with left-aligned, padded columns.
pub fn render_markdown(headers: &[String], rows: &[&[String]]) -> String {
    let headers: Vec<String> = headers.iter().map(|h| escape(h)).collect();
    let rows: Vec<Vec<String>> = rows
        .iter()
        .map(|r| r.iter().map(|c| escape(c)).collect())
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count().max(3)).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let mut out = String::new();
    out.push_str(&line(&headers, &widths));
    let rule: Vec<String> = widths
        .iter()
        .map(|w| format!(":{}", "-".repeat(w - 1)))
        .collect();
    out.push_str(&line(&rule, &widths));
    for row in &rows {
        out.push_str(&line(row, &widths));
    }
    out
}

fn line(cells: &[String], widths: &[usize]) -> String {
    let padded: Vec<String> = widths
        .iter()
        .enumerate()
        .map(|(i, w)| {
            let cell = cells.get(i).map(String::as_str).unwrap_or("");
            let pad = w.saturating_sub(cell.chars().count());
            format!("{}{}", cell, " ".repeat(pad))
        })
        .collect();
    format!("| {} |\n", padded.join(" | "))
}

fn escape(cell: &str) -> String {
    cell.replace('|', "\\|").replace('\n', " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_render_markdown_single_row() {
        let headers = strings(&["file_name", "text"]);
        let row = strings(&["audio1-Tung.wav", "a|b"]);

        let md = render_markdown(&headers, &[row.as_slice()]);

        assert_eq!(
            md,
            "| file_name       | text |\n\
             | :-------------- | :--- |\n\
             | audio1-Tung.wav | a\\|b |\n"
        );
    }

    #[test]
    fn test_boundary_preview_shows_next_row() {
        let data = Dataset {
            headers: strings(&["file_name", "text"]),
            rows: vec![
                strings(&["audio1-Tung.wav", "one"]),
                strings(&["audio2-Tung.wav", "two"]),
                strings(&["3", "three"]),
            ],
        };

        let text = boundary_preview(&data, 0, 2).unwrap();

        assert!(text.starts_with("--- Row 2 ---\n"));
        assert!(text.contains("| audio2-Tung.wav | two "));
        assert!(text.contains("--- Row 3 (keeps original value) ---"));
        assert!(text.contains("| 3  "));
    }

    #[test]
    fn test_boundary_preview_last_row_has_no_successor() {
        let data = Dataset {
            headers: strings(&["file_name"]),
            rows: vec![strings(&["audio1-Tung.wav"])],
        };

        let text = boundary_preview(&data, 0, 1).unwrap();

        assert!(!text.contains("Row 2"));
    }

    #[test]
    fn test_boundary_preview_missing_row() {
        let data = Dataset {
            headers: strings(&["file_name"]),
            rows: vec![strings(&["audio1-Tung.wav"])],
        };

        assert!(boundary_preview(&data, 0, 306).is_none());
    }
}
