//! Reading order and label pairing for detected cells.

use crate::image::cell::Cell;

/// A cell paired with its label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NamedCell<'a> {
    pub name: &'a str,
    pub cell: Cell,
}

/// Result of pairing cells with labels.
#[derive(Debug, Clone, PartialEq)]
pub struct Pairing<'a> {
    pub named: Vec<NamedCell<'a>>,
    pub detected: usize,
    pub expected: usize,
}

impl Pairing<'_> {
    pub const fn is_mismatch(&self) -> bool {
        self.detected != self.expected
    }
}

/// Sort cells into row-major reading order.
///
/// Cells are ordered by vertical center, then grouped into visual rows: a
/// cell joins the current row while its center lies within `tolerance` of
/// the row's first cell. Each row is ordered by horizontal center.
pub fn reading_order(mut cells: Vec<Cell>, tolerance: f32) -> Vec<Cell> {
    cells.sort_by(|a, b| a.center_y.total_cmp(&b.center_y));

    let mut ordered = Vec::with_capacity(cells.len());
    let mut row: Vec<Cell> = Vec::new();
    let mut anchor = cells.first().map_or(0.0, |cell| cell.center_y);

    for cell in cells {
        if (cell.center_y - anchor).abs() >= tolerance {
            flush_row(&mut row, &mut ordered);
            anchor = cell.center_y;
        }
        row.push(cell);
    }
    flush_row(&mut row, &mut ordered);

    ordered
}

fn flush_row(row: &mut Vec<Cell>, ordered: &mut Vec<Cell>) {
    row.sort_by(|a, b| a.center_x.total_cmp(&b.center_x));
    ordered.append(row);
}

/// Pair ordered cells with `names` positionally, up to the shorter length.
pub fn pair_names<'a>(cells: &[Cell], names: &'a [String]) -> Pairing<'a> {
    let named = cells
        .iter()
        .zip(names)
        .map(|(cell, name)| NamedCell {
            name: name.as_str(),
            cell: *cell,
        })
        .collect();

    Pairing {
        named,
        detected: cells.len(),
        expected: names.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::Rect;

    fn cell(cx: f32, cy: f32) -> Cell {
        Cell {
            bounds: Rect::new(0, 0, 1, 1),
            center_x: cx,
            center_y: cy,
        }
    }

    fn centers(cells: &[Cell]) -> Vec<(f32, f32)> {
        cells.iter().map(|c| (c.center_x, c.center_y)).collect()
    }

    #[test]
    fn orders_rows_then_columns() {
        let cells = vec![
            cell(300.0, 410.0),
            cell(100.0, 100.0),
            cell(500.0, 95.0),
            cell(100.0, 400.0),
            cell(300.0, 105.0),
        ];

        let ordered = reading_order(cells, 50.0);
        assert_eq!(
            centers(&ordered),
            vec![
                (100.0, 100.0),
                (300.0, 105.0),
                (500.0, 95.0),
                (100.0, 400.0),
                (300.0, 410.0),
            ]
        );
    }

    #[test]
    fn anchor_is_first_cell_of_row() {
        // 0 -> 40 stays in row, 80 is 80 away from the anchor and starts a new one
        let ordered = reading_order(vec![cell(2.0, 80.0), cell(5.0, 0.0), cell(9.0, 40.0)], 50.0);
        assert_eq!(
            centers(&ordered),
            vec![(5.0, 0.0), (9.0, 40.0), (2.0, 80.0)]
        );
    }

    #[test]
    fn empty_input() {
        assert!(reading_order(Vec::new(), 50.0).is_empty());
    }

    #[test]
    fn pairing_truncates_to_fewer_cells() {
        let names: Vec<String> = ["One", "Two", "Three"].map(String::from).to_vec();
        let pairing = pair_names(&[cell(0.0, 0.0), cell(10.0, 0.0)], &names);

        assert!(pairing.is_mismatch());
        assert_eq!(pairing.named.len(), 2);
        assert_eq!(pairing.named[1].name, "Two");
    }

    #[test]
    fn pairing_truncates_to_fewer_names() {
        let names = vec!["Only".to_string()];
        let pairing = pair_names(&[cell(0.0, 0.0), cell(10.0, 0.0)], &names);

        assert!(pairing.is_mismatch());
        assert_eq!(pairing.named.len(), 1);
        assert_eq!(pairing.detected, 2);
        assert_eq!(pairing.expected, 1);
    }
}
