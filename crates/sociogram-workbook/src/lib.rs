//! Workbook boundary: reading adjacency matrices from worksheets and writing
//! the statistics report back out.

pub mod cell;
pub mod loader;
pub mod publish;
pub mod report;

pub use loader::{SourceSheet, load_matrix, load_sheet};
pub use publish::publish_atomically;
pub use report::{ReportBuilder, ReportSheet, group_table_column};
