//! Inventory export: XLSX workbook, CSV text and PDF table

use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference, Rect, Rgb,
};
use rust_xlsxwriter::{Format, Workbook};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    config::ExportConfig,
    error::{AppError, AppResult},
    models::{enums::Location, equipment::Equipment},
};

/// Column headers, in output order
pub const HEADERS: [&str; 10] = [
    "Name",
    "Model",
    "Serial Number",
    "Inventory Number",
    "State",
    "Quantity",
    "Category",
    "Location",
    "Last Updated",
    "Notes",
];

const QUANTITY_COLUMN: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Xlsx,
    Csv,
    Pdf,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Csv => "csv",
            ExportFormat::Pdf => "pdf",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            ExportFormat::Csv => "text/csv; charset=utf-8",
            ExportFormat::Pdf => "application/pdf",
        }
    }
}

/// A rendered export, ready to be sent as a download
#[derive(Debug)]
pub struct ExportFile {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Flat tabular projection of one item. `quantity` backs the numeric XLSX cell.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRow {
    pub cells: [String; 10],
    pub quantity: i32,
}

impl From<&Equipment> for ExportRow {
    fn from(item: &Equipment) -> Self {
        let cells = [
            item.name.clone(),
            item.model.clone(),
            item.serial_number.clone(),
            item.inventory_number.clone(),
            item.state.label().to_string(),
            item.quantity.to_string(),
            item.category.label().to_string(),
            item.location.label().to_string(),
            item.last_updated.format("%Y-%m-%d %H:%M").to_string(),
            item.notes.clone(),
        ];
        ExportRow {
            cells,
            quantity: item.quantity,
        }
    }
}

#[derive(Clone)]
pub struct ExportService {
    default_format: ExportFormat,
}

impl ExportService {
    pub fn new(config: &ExportConfig) -> Self {
        Self {
            default_format: config.default_format,
        }
    }

    /// Restrict `items` to `location` (when given), project and serialize.
    pub fn export(
        &self,
        items: &[Equipment],
        location: Option<Location>,
        format: Option<ExportFormat>,
    ) -> AppResult<ExportFile> {
        let format = format.unwrap_or(self.default_format);
        let rows: Vec<ExportRow> = items
            .iter()
            .filter(|item| location.map_or(true, |l| item.location == l))
            .map(ExportRow::from)
            .collect();

        let bytes = match format {
            ExportFormat::Xlsx => write_xlsx(&rows),
            ExportFormat::Csv => write_csv(&rows),
            ExportFormat::Pdf => write_pdf(&rows),
        }
        .map_err(|e| {
            tracing::error!("Error exporting inventory as {}: {}", format.extension(), e);
            e
        })?;

        tracing::info!(rows = rows.len(), format = format.extension(), "Inventory exported");

        Ok(ExportFile {
            file_name: file_name(location, format),
            content_type: format.content_type(),
            bytes,
        })
    }
}

pub fn file_name(location: Option<Location>, format: ExportFormat) -> String {
    match location {
        None => format!("inventory_full.{}", format.extension()),
        Some(l) => format!("inventory_{}.{}", l.as_str(), format.extension()),
    }
}

pub fn write_csv(rows: &[ExportRow]) -> AppResult<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(HEADERS)
        .map_err(|e| AppError::Export(e.to_string()))?;
    for row in rows {
        writer
            .write_record(&row.cells)
            .map_err(|e| AppError::Export(e.to_string()))?;
    }
    writer
        .into_inner()
        .map_err(|e| AppError::Export(e.to_string()))
}

pub fn write_xlsx(rows: &[ExportRow]) -> AppResult<Vec<u8>> {
    let xlsx_err = |e: rust_xlsxwriter::XlsxError| AppError::Export(e.to_string());

    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Inventory").map_err(xlsx_err)?;

    for (col, header) in HEADERS.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *header, &bold)
            .map_err(xlsx_err)?;
    }

    for (i, row) in rows.iter().enumerate() {
        let r = (i + 1) as u32;
        for (col, value) in row.cells.iter().enumerate() {
            if col == QUANTITY_COLUMN {
                worksheet
                    .write_number(r, col as u16, f64::from(row.quantity))
                    .map_err(xlsx_err)?;
            } else {
                worksheet
                    .write_string(r, col as u16, value.as_str())
                    .map_err(xlsx_err)?;
            }
        }
    }

    workbook.save_to_buffer().map_err(xlsx_err)
}

// Landscape A4, in millimetres
const PAGE_WIDTH: f32 = 297.0;
const PAGE_HEIGHT: f32 = 210.0;
const MARGIN: f32 = 10.0;
const HEADER_HEIGHT: f32 = 6.0;
const LINE_HEIGHT: f32 = 3.6;
const CELL_PADDING: f32 = 1.2;
const FONT_SIZE: f32 = 8.0;
/// Relative column widths; scaled to the printable width
const COLUMN_WEIGHTS: [f32; 10] = [3.0, 2.0, 2.0, 2.0, 1.4, 1.0, 2.0, 1.6, 2.0, 3.0];

/// Rows grow to fit wrapped cell text. A row taller than a page continues
/// on the next one.
pub fn write_pdf(rows: &[ExportRow]) -> AppResult<Vec<u8>> {
    let pdf_err = |e: printpdf::Error| AppError::Export(e.to_string());

    let (doc, page, layer) = PdfDocument::new("Inventory", Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
    let regular = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_err)?;
    let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold).map_err(pdf_err)?;

    let columns = column_layout();
    let mut current = doc.get_page(page).get_layer(layer);
    let mut y = draw_header(&current, &columns, &bold);
    let page_lines = lines_fitting(y);

    for row in rows {
        let cells: Vec<Vec<String>> = columns
            .iter()
            .zip(row.cells.iter())
            .map(|((_, width), value)| wrap(value, *width))
            .collect();
        let height = cells.iter().map(Vec::len).max().unwrap_or(1);

        let mut start = 0;
        while start < height {
            let room = lines_fitting(y);
            // Keep a row on one page whenever a fresh page can hold it
            if room == 0 || (start == 0 && room < height && height <= page_lines) {
                (current, y) = next_page(&doc, &columns, &bold);
                continue;
            }
            let end = (start + room).min(height);
            for ((x, _), lines) in columns.iter().zip(&cells) {
                for (i, line) in lines.iter().enumerate().take(end).skip(start) {
                    let baseline = y - CELL_PADDING - LINE_HEIGHT * ((i - start) as f32 + 1.0) + 0.8;
                    current.use_text(line.as_str(), FONT_SIZE, Mm(*x + 1.0), Mm(baseline), &regular);
                }
            }
            y -= 2.0 * CELL_PADDING + LINE_HEIGHT * (end - start) as f32;
            start = end;
        }
    }

    doc.save_to_bytes().map_err(pdf_err)
}

/// (x offset, width) of every column
fn column_layout() -> Vec<(f32, f32)> {
    let total: f32 = COLUMN_WEIGHTS.iter().sum();
    let printable = PAGE_WIDTH - 2.0 * MARGIN;
    let mut x = MARGIN;
    COLUMN_WEIGHTS
        .iter()
        .map(|w| {
            let width = printable * w / total;
            let col = (x, width);
            x += width;
            col
        })
        .collect()
}

/// Text lines that fit between `y` and the bottom margin
fn lines_fitting(y: f32) -> usize {
    ((y - MARGIN - 2.0 * CELL_PADDING) / LINE_HEIGHT).floor().max(0.0) as usize
}

fn next_page(
    doc: &PdfDocumentReference,
    columns: &[(f32, f32)],
    font: &IndirectFontRef,
) -> (PdfLayerReference, f32) {
    let (page, layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
    let layer = doc.get_page(page).get_layer(layer);
    let y = draw_header(&layer, columns, font);
    (layer, y)
}

/// Draws the grey header band and returns the y coordinate below it
fn draw_header(layer: &PdfLayerReference, columns: &[(f32, f32)], font: &IndirectFontRef) -> f32 {
    let top = PAGE_HEIGHT - MARGIN;
    layer.set_fill_color(Color::Rgb(Rgb::new(0.26, 0.26, 0.26, None)));
    layer.add_rect(Rect::new(
        Mm(MARGIN),
        Mm(top - HEADER_HEIGHT),
        Mm(PAGE_WIDTH - MARGIN),
        Mm(top),
    ));
    layer.set_fill_color(Color::Rgb(Rgb::new(1.0, 1.0, 1.0, None)));
    for ((x, _), header) in columns.iter().zip(HEADERS.iter()) {
        layer.use_text(*header, FONT_SIZE, Mm(*x + 1.0), Mm(top - 4.2), font);
    }
    layer.set_fill_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
    top - HEADER_HEIGHT
}

/// Break text into lines that fit a column at the body font size.
/// Words longer than a line are split.
fn wrap(text: &str, width_mm: f32) -> Vec<String> {
    // Helvetica averages roughly half an em per glyph
    let max_chars = ((width_mm - 2.0) / (FONT_SIZE * 0.5 * 0.3528)).max(1.0) as usize;

    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            let mut chars: Vec<char> = word.chars().collect();
            while chars.len() > max_chars {
                if !line.is_empty() {
                    lines.push(std::mem::take(&mut line));
                }
                lines.push(chars.drain(..max_chars).collect());
            }
            if chars.is_empty() {
                continue;
            }
            let len = line.chars().count();
            if len > 0 && len + 1 + chars.len() > max_chars {
                lines.push(std::mem::take(&mut line));
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.extend(chars);
        }
        if !line.is_empty() {
            lines.push(line);
        }
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}
