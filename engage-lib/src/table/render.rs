//! Plain-text rendering of the current page.

use std::fmt::Write;

use super::Alignment;
use super::Row;
use super::Table;

impl<T: Row> Table<T> {
    /// Renders the current page as aligned text.
    ///
    /// Honors `hide_header` and `no_row_border`, and ends with a page footer.
    pub fn render_text(&self) -> String {
        let view = self.view();
        let columns = self.columns();

        let cells: Vec<Vec<String>> = view
            .rows
            .iter()
            .map(|row| columns.iter().map(|c| c.display(row)).collect())
            .collect();

        let mut widths: Vec<usize> = columns
            .iter()
            .map(|c| {
                if self.config().hide_header {
                    0
                } else {
                    header_label(&c.label, &c.key, view.sort).chars().count()
                }
            })
            .collect();
        for row in &cells {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }
        let line_width = widths.iter().sum::<usize>() + 3 * widths.len().saturating_sub(1);

        let mut out = String::new();
        if !self.config().hide_header {
            let labels: Vec<String> = columns
                .iter()
                .map(|c| header_label(&c.label, &c.key, view.sort))
                .collect();
            push_line(&mut out, &labels, &widths, columns.iter().map(|c| c.alignment()));
            out.push_str(&"=".repeat(line_width));
            out.push('\n');
        }

        for (i, row) in cells.iter().enumerate() {
            if i > 0 && !self.config().no_row_border {
                out.push_str(&"-".repeat(line_width));
                out.push('\n');
            }
            push_line(&mut out, row, &widths, columns.iter().map(|c| c.alignment()));
        }

        let _ = writeln!(
            out,
            "page {} of {} ({} rows)",
            view.page.page_index().saturating_add(1),
            view.page.page_count(view.info.total).max(1),
            view.info.total
        );
        out
    }
}

fn header_label(label: &str, key: &str, sort: Option<&super::SortState>) -> String {
    match sort {
        Some(sort) if sort.key == key => match sort.direction {
            super::Direction::Asc => format!("{} ^", label),
            super::Direction::Desc => format!("{} v", label),
        },
        _ => label.to_string(),
    }
}

fn push_line(
    out: &mut String,
    cells: &[String],
    widths: &[usize],
    alignments: impl Iterator<Item = Alignment>,
) {
    let parts: Vec<String> = cells
        .iter()
        .zip(widths)
        .zip(alignments)
        .map(|((cell, width), align)| match align {
            Alignment::Left => format!("{:<width$}", cell, width = *width),
            Alignment::Right => format!("{:>width$}", cell, width = *width),
        })
        .collect();
    out.push_str(parts.join(" | ").trim_end());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use crate::model::Record;
    use crate::table::Column;
    use crate::table::Table;
    use crate::table::TableConfig;

    fn rows() -> Vec<Record> {
        vec![
            Record::new().set("name", "Oak").set("votes", 12i64),
            Record::new().set("name", "Pine").set("votes", 3i64),
        ]
    }

    fn columns() -> Vec<Column<Record>> {
        vec![
            Column::new("name", "Name").sortable(),
            Column::new("votes", "Votes").numeric(),
        ]
    }

    #[test]
    fn test_render_with_header_and_borders() {
        let mut table = Table::new(columns(), rows());
        table.click_header("name");
        let text = table.render_text();
        let expected = "\
Name ^ | Votes
==============
Oak    |    12
--------------
Pine   |     3
page 1 of 1 (2 rows)
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_render_without_header_or_borders() {
        let config = TableConfig::default().hide_header().no_row_border();
        let table = Table::with_config(columns(), rows(), config).unwrap();
        assert_eq!(table.render_text(), "Oak  | 12\nPine |  3\npage 1 of 1 (2 rows)\n");
    }
}
