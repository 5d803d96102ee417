//! Reading adjacency matrices out of worksheets.
//!
//! Expected sheet shape: the first row holds the column labels `1..=N`, the
//! first column the row labels `1..=N`, and the body is a 0/1 matrix. The
//! top-left cell is an optional caption for the label column.

use std::path::Path;

use calamine::{Data, Range, Reader, open_workbook_auto};
use sociogram_core::{AdjacencyMatrix, NodeId};
use sociogram_error::{Error, Result};
use tracing::debug;

use crate::cell::cell_ref;

/// A worksheet's matrix plus what is needed to write the sheet back out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSheet {
    pub name: String,
    pub corner_label: Option<String>,
    pub matrix: AdjacencyMatrix,
}

/// Open `path` and read worksheet `sheet` as an adjacency matrix.
pub fn load_sheet(path: &Path, sheet: &str) -> Result<SourceSheet> {
    let mut workbook = open_workbook_auto(path).map_err(|e| {
        Error::workbook_read_failed(e.to_string())
            .with_operation("loader::load_sheet")
            .with_context("path", path.display().to_string())
    })?;

    if !workbook.sheet_names().iter().any(|name| name == sheet) {
        return Err(Error::sheet_not_found(sheet)
            .with_operation("loader::load_sheet")
            .with_context("path", path.display().to_string()));
    }

    let range = workbook.worksheet_range(sheet).map_err(|e| {
        Error::workbook_read_failed(e.to_string())
            .with_operation("loader::load_sheet")
            .with_context("path", path.display().to_string())
            .with_context("sheet", sheet)
    })?;

    sheet_from_range(sheet, &range)
        .map_err(|e| e.with_context("path", path.display().to_string()))
}

/// Convenience wrapper returning only the matrix.
pub fn load_matrix(path: &Path, sheet: &str) -> Result<AdjacencyMatrix> {
    load_sheet(path, sheet).map(|source| source.matrix)
}

fn invalid(sheet: &str, row: usize, col: usize, message: String) -> Error {
    Error::invalid_matrix(message)
        .with_operation("loader::sheet_from_range")
        .with_context("sheet", sheet)
        .with_context("cell", cell_ref(row, col))
}

/// Node label stored in a header cell: a positive whole number.
fn label_value(cell: &Data) -> Option<u32> {
    match cell {
        Data::Int(v) => u32::try_from(*v).ok(),
        Data::Float(v) if v.fract() == 0.0 && *v >= 0.0 && *v <= f64::from(u32::MAX) => {
            Some(*v as u32)
        }
        Data::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Matrix entry: numeric 0 or 1 only.
fn link_value(cell: &Data) -> Option<u8> {
    match cell {
        Data::Int(0) => Some(0),
        Data::Int(1) => Some(1),
        Data::Float(v) if *v == 0.0 => Some(0),
        Data::Float(v) if *v == 1.0 => Some(1),
        _ => None,
    }
}

fn describe(cell: &Data) -> String {
    match cell {
        Data::Empty => "empty cell".to_string(),
        other => format!("'{}'", other),
    }
}

/// Validate a worksheet range and turn it into a [`SourceSheet`].
pub fn sheet_from_range(sheet: &str, range: &Range<Data>) -> Result<SourceSheet> {
    let rows: Vec<&[Data]> = range.rows().collect();
    let (height, width) = (rows.len(), rows.first().map_or(0, |r| r.len()));
    if height < 2 || width < 2 {
        return Err(invalid(
            sheet,
            0,
            0,
            format!("sheet has {}x{} cells, expected labels and a matrix", height, width),
        ));
    }
    if height != width {
        return Err(invalid(
            sheet,
            0,
            0,
            format!(
                "matrix is not square: {} rows, {} columns",
                height - 1,
                width - 1
            ),
        ));
    }
    let n = height - 1;

    for k in 1..=n {
        let expected = NodeId::from_index(k - 1).as_u32();
        for (row, col) in [(0, k), (k, 0)] {
            let cell = &rows[row][col];
            if label_value(cell) != Some(expected) {
                return Err(invalid(
                    sheet,
                    row,
                    col,
                    format!("expected node label {}, found {}", expected, describe(cell)),
                ));
            }
        }
    }

    let mut matrix_rows = Vec::with_capacity(n);
    for (row, cells) in rows.iter().enumerate().skip(1) {
        let mut values = Vec::with_capacity(n);
        for (col, cell) in cells.iter().enumerate().skip(1) {
            let value = link_value(cell).ok_or_else(|| {
                invalid(
                    sheet,
                    row,
                    col,
                    format!("expected 0 or 1, found {}", describe(cell)),
                )
            })?;
            values.push(value);
        }
        matrix_rows.push(values);
    }

    let corner_label = match &rows[0][0] {
        Data::Empty => None,
        other => Some(other.to_string()),
    };

    let matrix = AdjacencyMatrix::from_rows(matrix_rows)
        .map_err(|e| e.with_context("sheet", sheet))?;
    debug!(sheet, nodes = matrix.size(), "matrix loaded");

    Ok(SourceSheet {
        name: sheet.to_string(),
        corner_label,
        matrix,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sociogram_error::ErrorKind;

    /// Range with labels `1..=n` around `body`.
    fn labelled(body: &[&[Data]]) -> Range<Data> {
        let n = body.len() as u32;
        let mut range = Range::new((0, 0), (n, n));
        for k in 1..=n {
            range.set_value((0, k), Data::Float(k as f64));
            range.set_value((k, 0), Data::Int(k as i64));
        }
        for (r, row) in body.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                range.set_value((r as u32 + 1, c as u32 + 1), cell.clone());
            }
        }
        range
    }

    fn num(v: f64) -> Data {
        Data::Float(v)
    }

    #[test]
    fn reads_labelled_matrix() {
        let range = labelled(&[
            &[num(0.0), num(1.0), Data::Int(0)],
            &[num(0.0), num(0.0), num(1.0)],
            &[num(1.0), num(0.0), num(0.0)],
        ]);
        let sheet = sheet_from_range("Лист1", &range).unwrap();
        assert_eq!(sheet.name, "Лист1");
        assert_eq!(sheet.corner_label, None);
        assert_eq!(
            sheet.matrix,
            AdjacencyMatrix::from_rows(vec![vec![0, 1, 0], vec![0, 0, 1], vec![1, 0, 0]])
                .unwrap()
        );
    }

    #[test]
    fn keeps_corner_caption() {
        let mut range = labelled(&[&[num(0.0), num(1.0)], &[num(1.0), num(0.0)]]);
        range.set_value((0, 0), Data::String("id".to_string()));
        let sheet = sheet_from_range("Лист1", &range).unwrap();
        assert_eq!(sheet.corner_label.as_deref(), Some("id"));
    }

    #[test]
    fn rejects_values_other_than_zero_and_one() {
        let range = labelled(&[&[num(0.0), num(2.0)], &[num(1.0), num(0.0)]]);
        let err = sheet_from_range("Лист1", &range).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidMatrix);
        assert_eq!(err.context_value("cell"), Some("C2"));
    }

    #[test]
    fn rejects_empty_cells() {
        let range = labelled(&[&[num(0.0), Data::Empty], &[num(1.0), num(0.0)]]);
        let err = sheet_from_range("Лист1", &range).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidMatrix);
        assert!(err.message().contains("empty cell"));
    }

    #[test]
    fn rejects_non_square() {
        let mut range = Range::new((0, 0), (2, 3));
        for k in 1..=3u32 {
            range.set_value((0, k), Data::Int(k as i64));
        }
        for k in 1..=2u32 {
            range.set_value((k, 0), Data::Int(k as i64));
        }
        let err = sheet_from_range("Лист1", &range).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidMatrix);
        assert!(err.message().contains("not square"));
    }

    #[test]
    fn rejects_out_of_order_labels() {
        let mut range = labelled(&[&[num(0.0), num(1.0)], &[num(1.0), num(0.0)]]);
        range.set_value((2, 0), Data::Int(5));
        let err = sheet_from_range("Лист1", &range).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidMatrix);
        assert_eq!(err.context_value("cell"), Some("A3"));
    }
}
