use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};
use rust_xlsxwriter::{Format, Workbook};

use crate::errors::{AppError, Result};
use crate::model::{attendance::AttendanceHistoryRow, grade::GradeHistoryRow};

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
}

/// A header row plus data rows, in display order.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

/// A record that can become one spreadsheet row.
pub trait TabularRow {
    const COLUMNS: &'static [&'static str];

    fn cells(&self) -> Vec<Cell>;
}

impl TabularRow for GradeHistoryRow {
    const COLUMNS: &'static [&'static str] = &["student", "course", "score", "date"];

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::Text(self.student.clone()),
            Cell::Text(self.course.clone()),
            Cell::Number(self.score),
            Cell::Text(self.date.format("%Y-%m-%d").to_string()),
        ]
    }
}

impl TabularRow for AttendanceHistoryRow {
    const COLUMNS: &'static [&'static str] = &["student", "course", "status", "date"];

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::Text(self.student.clone()),
            Cell::Text(self.course.clone()),
            Cell::Text(self.status.clone()),
            Cell::Text(self.date.format("%Y-%m-%d").to_string()),
        ]
    }
}

impl Table {
    pub fn from_rows<R: TabularRow>(records: &[R]) -> Self {
        Table {
            columns: R::COLUMNS.iter().map(|c| c.to_string()).collect(),
            rows: records.iter().map(TabularRow::cells).collect(),
        }
    }
}

/// Writes the table to a single-sheet XLSX workbook.
pub fn export_spreadsheet(table: &Table, sheet_name: &str) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    let sheet = workbook.add_worksheet().set_name(sheet_name)?;

    for (col, header) in table.columns.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, header, &header_format)?;
    }

    for (row, cells) in table.rows.iter().enumerate() {
        let row = (row + 1) as u32;
        for (col, cell) in cells.iter().enumerate() {
            match cell {
                Cell::Text(text) => sheet.write_string(row, col as u16, text)?,
                Cell::Number(value) => sheet.write_number(row, col as u16, *value)?,
            };
        }
    }

    Ok(workbook.save_to_buffer()?)
}

/// Reads the first worksheet back; the first row is taken as the header.
pub fn read_spreadsheet(bytes: &[u8]) -> Result<Table> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| AppError::Spreadsheet("workbook has no worksheets".into()))?;
    let range = workbook.worksheet_range(&sheet_name)?;

    let mut rows = range.rows();
    let columns = rows
        .next()
        .map(|header| header.iter().map(|c| c.to_string()).collect())
        .unwrap_or_default();

    let rows = rows
        .map(|row| row.iter().map(cell_from).collect())
        .collect();

    Ok(Table { columns, rows })
}

fn cell_from(data: &Data) -> Cell {
    match data {
        Data::Float(v) => Cell::Number(*v),
        Data::Int(v) => Cell::Number(*v as f64),
        Data::Empty => Cell::Text(String::new()),
        other => Cell::Text(other.to_string()),
    }
}
