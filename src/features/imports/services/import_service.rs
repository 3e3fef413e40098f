use std::io::Cursor;
use std::sync::Arc;

use calamine::{Data, Reader, Xlsx};
use rust_decimal::Decimal;
use rust_xlsxwriter::{Format, Workbook};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::catalog::dtos::CreateItemDto;
use crate::features::catalog::services::CatalogService;
use crate::features::imports::dtos::{ImportResultDto, RowErrorDto};

/// Column layout shared by the template, the export, and the import
const COLUMNS: [&str; 8] = [
    "Barcode",
    "Name",
    "Description",
    "Price",
    "Category",
    "Subcategory",
    "Images",
    "Specs",
];

/// Separator for multi-valued cells (images, specs)
const LIST_SEPARATOR: char = '|';

/// Service for Excel import/export of catalog items
pub struct ImportService {
    catalog_service: Arc<CatalogService>,
}

impl ImportService {
    pub fn new(catalog_service: Arc<CatalogService>) -> Self {
        Self { catalog_service }
    }

    /// Build the import template: header row plus one sample row
    pub fn template(&self) -> Result<Vec<u8>> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        let bold = Format::new().set_bold();

        for (col, title) in COLUMNS.iter().enumerate() {
            worksheet
                .write_string_with_format(0, col as u16, *title, &bold)
                .map_err(|e| AppError::Internal(format!("Failed to build template: {}", e)))?;
            worksheet
                .set_column_width(col as u16, 24)
                .map_err(|e| AppError::Internal(format!("Failed to build template: {}", e)))?;
        }

        let sample = [
            "8991002100",
            "Kompor Tanam 3 Tungku",
            "Kompor gas tanam kaca tempered",
            "1250000",
            "Dapur",
            "Kompor",
            "https://cdn.example.com/kompor-1.jpg|https://cdn.example.com/kompor-2.jpg",
            "3 tungku|Pemantik otomatis",
        ];
        for (col, value) in sample.iter().enumerate() {
            worksheet
                .write_string(1, col as u16, *value)
                .map_err(|e| AppError::Internal(format!("Failed to build template: {}", e)))?;
        }

        workbook
            .save_to_buffer()
            .map_err(|e| AppError::Internal(format!("Failed to serialize template: {}", e)))
    }

    /// Export every item as an XLSX workbook
    pub async fn export(&self) -> Result<Vec<u8>> {
        let items = self.catalog_service.list_all().await?;

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        let bold = Format::new().set_bold();

        for (col, title) in COLUMNS.iter().enumerate() {
            worksheet
                .write_string_with_format(0, col as u16, *title, &bold)
                .map_err(|e| AppError::Internal(format!("Failed to build export: {}", e)))?;
        }

        for (i, item) in items.iter().enumerate() {
            let row = (i + 1) as u32;
            let price = item.price.map(|p| p.to_string()).unwrap_or_default();
            let images = join_list(&item.images);
            let specs = join_list(&item.specs);
            let cells = [
                item.barcode.as_str(),
                item.name.as_str(),
                item.description.as_deref().unwrap_or(""),
                price.as_str(),
                item.category.as_str(),
                item.subcategory.as_deref().unwrap_or(""),
                images.as_str(),
                specs.as_str(),
            ];
            for (col, value) in cells.iter().enumerate() {
                worksheet
                    .write_string(row, col as u16, *value)
                    .map_err(|e| AppError::Internal(format!("Failed to build export: {}", e)))?;
            }
        }

        workbook
            .save_to_buffer()
            .map_err(|e| AppError::Internal(format!("Failed to serialize export: {}", e)))
    }

    /// Import items from an uploaded XLSX file.
    ///
    /// Rows are independent: a malformed row is skipped and reported,
    /// the rest of the file is still imported.
    pub async fn import(&self, data: Vec<u8>) -> Result<ImportResultDto> {
        let mut workbook = Xlsx::new(Cursor::new(data))
            .map_err(|e| AppError::BadRequest(format!("Unreadable Excel file: {}", e)))?;

        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| AppError::BadRequest("Workbook has no sheets".to_string()))?
            .map_err(|e| AppError::BadRequest(format!("Unreadable worksheet: {}", e)))?;

        let rows: Vec<Vec<Data>> = range
            .rows()
            .skip(1) // header
            .map(|r| r.to_vec())
            .collect();

        let parsed = parse_rows(&rows);
        let mut errors = parsed.errors;
        let mut success = 0i64;

        for (row, dto) in parsed.items {
            match self.catalog_service.create(dto).await {
                Ok(_) => success += 1,
                Err(e) => errors.push(RowErrorDto {
                    row,
                    error: e.to_string(),
                }),
            }
        }

        errors.sort_by_key(|e| e.row);
        let skipped = errors.len() as i64;

        tracing::info!(
            "Excel import finished: total={}, success={}, skipped={}",
            parsed.total,
            success,
            skipped
        );

        Ok(ImportResultDto {
            total: parsed.total,
            success,
            skipped,
            errors,
        })
    }
}

/// Outcome of parsing the data rows of a workbook, before any store
/// writes happen
pub(crate) struct ParsedImport {
    pub total: i64,
    /// Spreadsheet row number paired with the parsed item
    pub items: Vec<(u32, CreateItemDto)>,
    pub errors: Vec<RowErrorDto>,
}

/// Parse data rows (header already stripped). Entirely empty rows are
/// ignored; the first data row is spreadsheet row 2.
pub(crate) fn parse_rows(rows: &[Vec<Data>]) -> ParsedImport {
    let mut total = 0i64;
    let mut items = Vec::new();
    let mut errors = Vec::new();

    for (i, cells) in rows.iter().enumerate() {
        if is_empty_row(cells) {
            continue;
        }
        total += 1;
        let row = (i + 2) as u32;

        match parse_row(cells) {
            Ok(dto) => items.push((row, dto)),
            Err(error) => errors.push(RowErrorDto { row, error }),
        }
    }

    ParsedImport {
        total,
        items,
        errors,
    }
}

fn is_empty_row(cells: &[Data]) -> bool {
    cells.iter().all(|c| match c {
        Data::Empty => true,
        Data::String(s) => s.trim().is_empty(),
        _ => false,
    })
}

/// Parse one data row into a create DTO
pub(crate) fn parse_row(cells: &[Data]) -> std::result::Result<CreateItemDto, String> {
    let barcode = cell_str(cells, 0).ok_or_else(|| "barcode is required".to_string())?;
    let name = cell_str(cells, 1).ok_or_else(|| "name is required".to_string())?;
    let description = cell_str(cells, 2);

    let price = match cell_str(cells, 3) {
        None => None,
        Some(raw) => Some(
            raw.parse::<Decimal>()
                .map_err(|_| format!("invalid price '{}'", raw))?,
        ),
    };

    let category = cell_str(cells, 4).ok_or_else(|| "category is required".to_string())?;
    let subcategory = cell_str(cells, 5);
    let images = split_list(cell_str(cells, 6));
    let specs = split_list(cell_str(cells, 7));

    let dto = CreateItemDto {
        barcode,
        name,
        description,
        price,
        category,
        subcategory,
        images,
        specs,
    };

    dto.validate().map_err(|e| e.to_string())?;
    Ok(dto)
}

/// Render a cell as trimmed text; numeric cells lose a trailing ".0"
/// so barcodes survive Excel's number coercion.
fn cell_str(cells: &[Data], idx: usize) -> Option<String> {
    match cells.get(idx)? {
        Data::Empty => None,
        Data::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Data::Float(f) => {
            if f.fract() == 0.0 {
                Some(format!("{}", *f as i64))
            } else {
                Some(f.to_string())
            }
        }
        Data::Int(i) => Some(i.to_string()),
        Data::Bool(b) => Some(b.to_string()),
        other => {
            let text = other.to_string();
            let trimmed = text.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
    }
}

fn split_list(cell: Option<String>) -> Vec<String> {
    cell.map(|s| {
        s.split(LIST_SEPARATOR)
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect()
    })
    .unwrap_or_default()
}

fn join_list(values: &[String]) -> String {
    values.join(&LIST_SEPARATOR.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<Data> {
        cells
            .iter()
            .map(|c| {
                if c.is_empty() {
                    Data::Empty
                } else {
                    Data::String(c.to_string())
                }
            })
            .collect()
    }

    fn valid_row() -> Vec<Data> {
        row(&[
            "8991002100",
            "Kompor Tanam",
            "Kompor gas tanam",
            "1250000",
            "Dapur",
            "Kompor",
            "https://cdn.example.com/a.jpg|https://cdn.example.com/b.jpg",
            "3 tungku|Pemantik otomatis",
        ])
    }

    #[test]
    fn test_parse_row_valid() {
        let dto = parse_row(&valid_row()).unwrap();
        assert_eq!(dto.barcode, "8991002100");
        assert_eq!(dto.price, Some("1250000".parse().unwrap()));
        assert_eq!(dto.images.len(), 2);
        assert_eq!(dto.specs, vec!["3 tungku", "Pemantik otomatis"]);
    }

    #[test]
    fn test_parse_row_empty_price_means_on_request() {
        let mut cells = valid_row();
        cells[3] = Data::Empty;
        let dto = parse_row(&cells).unwrap();
        assert_eq!(dto.price, None);
    }

    #[test]
    fn test_parse_row_numeric_barcode_survives_excel_coercion() {
        let mut cells = valid_row();
        cells[0] = Data::Float(8991002100.0);
        let dto = parse_row(&cells).unwrap();
        assert_eq!(dto.barcode, "8991002100");
    }

    #[test]
    fn test_parse_row_missing_required_fields() {
        let mut cells = valid_row();
        cells[0] = Data::Empty;
        assert_eq!(parse_row(&cells).unwrap_err(), "barcode is required");

        let mut cells = valid_row();
        cells[1] = Data::Empty;
        assert_eq!(parse_row(&cells).unwrap_err(), "name is required");

        let mut cells = valid_row();
        cells[4] = Data::Empty;
        assert_eq!(parse_row(&cells).unwrap_err(), "category is required");
    }

    #[test]
    fn test_parse_row_rejects_bad_price() {
        let mut cells = valid_row();
        cells[3] = Data::String("hubungi kami".to_string());
        assert!(parse_row(&cells).unwrap_err().contains("invalid price"));
    }

    #[test]
    fn test_parse_row_rejects_eleven_images() {
        let mut cells = valid_row();
        let urls: Vec<String> = (0..11)
            .map(|i| format!("https://cdn.example.com/{i}.jpg"))
            .collect();
        cells[6] = Data::String(urls.join("|"));
        assert!(parse_row(&cells).is_err());
    }

    #[test]
    fn test_parse_rows_counts_and_row_numbers() {
        let rows = vec![
            valid_row(),
            row(&["", "", "", "", "", "", "", ""]), // blank, ignored
            {
                let mut bad = valid_row();
                bad[1] = Data::Empty;
                bad
            },
            valid_row(),
        ];

        let parsed = parse_rows(&rows);
        assert_eq!(parsed.total, 3);
        assert_eq!(parsed.items.len(), 2);
        assert_eq!(parsed.errors.len(), 1);
        // blank row still advances the spreadsheet row counter
        assert_eq!(parsed.errors[0].row, 4);
        assert_eq!(parsed.items[0].0, 2);
        assert_eq!(parsed.items[1].0, 5);
    }
}
