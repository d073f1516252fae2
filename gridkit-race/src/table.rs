//! Plain-text classification table

use gridkit_common::ClassificationRow;

const HEADERS: [&str; 4] = ["Pos", "#", "Driver", "Team"];

/// Render rows as right-aligned columns under `Pos  #  Driver  Team`
///
/// Missing names render as empty cells.
pub fn format_table(rows: &[ClassificationRow]) -> String {
    let cells: Vec<[String; 4]> = rows
        .iter()
        .map(|row| {
            [
                row.position.to_string(),
                row.driver_number.to_string(),
                row.full_name.clone().unwrap_or_default(),
                row.team_name.clone().unwrap_or_default(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for line in &cells {
        for (width, cell) in widths.iter_mut().zip(line) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = render_line(&HEADERS.map(String::from), &widths);
    for line in &cells {
        out.push('\n');
        out.push_str(&render_line(line, &widths));
    }
    out
}

fn render_line(cells: &[String; 4], widths: &[usize; 4]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:>width$}", cell, width = *width))
        .collect::<Vec<_>>()
        .join("  ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridkit_common::Driver;

    #[test]
    fn test_header_only_for_empty_rows() {
        assert_eq!(format_table(&[]), "Pos  #  Driver  Team");
    }

    #[test]
    fn test_columns_right_aligned() {
        let rows = vec![
            ClassificationRow::for_driver(1, &Driver::new(1, "Max Verstappen", "Red Bull Racing"), None),
            ClassificationRow::for_driver(10, &Driver::new(44, "Lewis Hamilton", "Mercedes"), None),
        ];
        let table = format_table(&rows);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Pos   #          Driver             Team");
        assert_eq!(lines[1], "  1   1  Max Verstappen  Red Bull Racing");
        assert_eq!(lines[2], " 10  44  Lewis Hamilton         Mercedes");
    }

    #[test]
    fn test_missing_names_are_blank() {
        let row = ClassificationRow {
            position: 3,
            driver_number: 81,
            full_name: None,
            team_name: None,
            best_lap: None,
        };
        let table = format_table(&[row]);
        assert_eq!(table.lines().nth(1), Some("  3  81              "));
    }
}
