//! Output workbook assembly.
//!
//! For every processed worksheet the report holds a copy of the source
//! matrix and a statistics sheet:
//!
//! ```text
//!        A     B       C       D      ...  c      c+1      c+2      c+3
//!   1   [id]  C_plus  Э_plus  КУО          (blank) S_group Э_group  BB_group
//!   2    1    ...     ...     ...          0       ...     ...      ...
//!   3    2    ...
//! ```
//!
//! where `c = max(N - 21, 1)`. The node table is written after the group
//! table, so on small sheets the overlapping cells show node values. The
//! rendered picture is anchored at `I1`.

use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Image, Workbook, Worksheet, XlsxError};
use sociogram_core::{AdjacencyMatrix, ControlRatio, SheetStatistics};
use sociogram_error::{Error, Result};
use tracing::debug;

pub const GROUP_HEADERS: [&str; 3] = ["S_group", "Э_group", "BB_group"];
pub const NODE_HEADERS: [&str; 3] = ["C_plus", "Э_plus", "КУО"];

/// Zero-based anchor of the embedded picture (cell `I1`).
pub const IMAGE_ANCHOR: (u32, u16) = (0, 8);

const UNBOUNDED_LABEL: &str = "inf";

/// First column of the group statistics table for a matrix with `columns`
/// node columns.
pub fn group_table_column(columns: usize) -> u16 {
    columns.saturating_sub(21).max(1) as u16
}

/// One worksheet's worth of report content.
#[derive(Debug, Clone)]
pub struct ReportSheet<'a> {
    pub source_name: &'a str,
    pub statistics_name: &'a str,
    pub corner_label: Option<&'a str>,
    pub matrix: &'a AdjacencyMatrix,
    pub statistics: &'a SheetStatistics,
    pub image_png: Option<&'a [u8]>,
}

fn write_failed(operation: &'static str, sheet: &str) -> impl FnOnce(XlsxError) -> Error {
    let sheet = sheet.to_string();
    move |e| {
        Error::workbook_write_failed(e.to_string())
            .with_operation(operation)
            .with_context("sheet", sheet)
    }
}

/// Collects report sheets in order and serializes the workbook.
pub struct ReportBuilder {
    workbook: Workbook,
    header: Format,
    sheet_count: usize,
}

impl Default for ReportBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportBuilder {
    pub fn new() -> Self {
        let header = Format::new()
            .set_bold()
            .set_border(FormatBorder::Thin)
            .set_align(FormatAlign::Center);
        Self {
            workbook: Workbook::new(),
            header,
            sheet_count: 0,
        }
    }

    /// Number of report sheets added so far.
    pub fn sheet_count(&self) -> usize {
        self.sheet_count
    }

    /// Append the source copy and the statistics sheet for one worksheet.
    pub fn add_sheet(&mut self, sheet: &ReportSheet<'_>) -> Result<()> {
        let header = self.header.clone();

        let source = self.workbook.add_worksheet();
        write_source(source, sheet, &header)
            .map_err(write_failed("report::write_source", sheet.source_name))?;

        let stats = self.workbook.add_worksheet();
        write_statistics(stats, sheet, &header)
            .map_err(write_failed("report::write_statistics", sheet.statistics_name))?;

        self.sheet_count += 1;
        debug!(
            source = sheet.source_name,
            statistics = sheet.statistics_name,
            "report sheet added"
        );
        Ok(())
    }

    /// Serialize the workbook to xlsx bytes.
    pub fn finish(mut self) -> Result<Vec<u8>> {
        self.workbook.save_to_buffer().map_err(|e| {
            Error::workbook_write_failed(e.to_string()).with_operation("report::finish")
        })
    }
}

fn write_source(
    ws: &mut Worksheet,
    sheet: &ReportSheet<'_>,
    header: &Format,
) -> std::result::Result<(), XlsxError> {
    ws.set_name(sheet.source_name)?;
    if let Some(label) = sheet.corner_label {
        ws.write_string_with_format(0, 0, label, header)?;
    }

    let matrix = sheet.matrix;
    for node in matrix.node_ids() {
        let pos = node.index() as u32 + 1;
        ws.write_number_with_format(0, pos as u16, node.as_u32(), header)?;
        ws.write_number_with_format(pos, 0, node.as_u32(), header)?;
        for (col, &value) in matrix.row(node).iter().enumerate() {
            ws.write_number(pos, col as u16 + 1, value)?;
        }
    }
    Ok(())
}

fn write_statistics(
    ws: &mut Worksheet,
    sheet: &ReportSheet<'_>,
    header: &Format,
) -> std::result::Result<(), XlsxError> {
    ws.set_name(sheet.statistics_name)?;

    let group = &sheet.statistics.group;
    let start = group_table_column(sheet.matrix.size());
    for (offset, title) in GROUP_HEADERS.iter().enumerate() {
        ws.write_string_with_format(0, start + 1 + offset as u16, *title, header)?;
    }
    ws.write_number_with_format(1, start, 0, header)?;
    for (offset, value) in [group.s_group, group.e_group, group.bb_group]
        .into_iter()
        .enumerate()
    {
        ws.write_number(1, start + 1 + offset as u16, value)?;
    }

    if let Some(label) = sheet.corner_label {
        ws.write_string_with_format(0, 0, label, header)?;
    }
    for (offset, title) in NODE_HEADERS.iter().enumerate() {
        ws.write_string_with_format(0, 1 + offset as u16, *title, header)?;
    }
    for stat in &sheet.statistics.nodes {
        let row = stat.node.index() as u32 + 1;
        ws.write_number_with_format(row, 0, stat.node.as_u32(), header)?;
        ws.write_number(row, 1, stat.c_plus)?;
        ws.write_number(row, 2, stat.e_plus)?;
        match stat.kuo {
            ControlRatio::Finite(value) => ws.write_number(row, 3, value)?,
            ControlRatio::Unbounded => ws.write_string(row, 3, UNBOUNDED_LABEL)?,
        };
    }

    if let Some(png) = sheet.image_png {
        let image = Image::new_from_buffer(png)?;
        ws.insert_image(IMAGE_ANCHOR.0, IMAGE_ANCHOR.1, &image)?;
    }
    Ok(())
}
