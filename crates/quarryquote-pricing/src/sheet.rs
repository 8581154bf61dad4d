//! Bulk price-sheet I/O.
//!
//! A sheet is a CSV file with a header row and six positional columns (see
//! [`SHEET_HEADERS`]). Rows degrade one at a time: a malformed record is
//! logged and skipped, and the rest of the sheet is still returned.

use std::fs::File;
use std::io;
use std::path::Path;

use quarryquote_core::Product;

use crate::error::PricingError;
use crate::normalize::{PriceNormalizer, RawPriceRow};

/// Column headings written by [`write_price_sheet`]. Readers match columns
/// by position, not by these names.
pub const SHEET_HEADERS: [&str; 6] = [
    "Plant,or,Quarry Name/Type/Location Number",
    "Address",
    "Product",
    "Non-Account Holder Price Per Ton",
    "Account Holder Price Per Ton",
    "Delivery Cost Per Ton Added in If We Are Hauling",
];

/// Reads and normalizes every usable row of the sheet at `path`.
///
/// # Errors
///
/// Returns [`PricingError::SourceIo`] if the file cannot be opened.
pub fn read_price_sheet(
    path: &Path,
    normalizer: &PriceNormalizer,
) -> Result<Vec<Product>, PricingError> {
    let file = File::open(path).map_err(|e| PricingError::SourceIo {
        path: path.display().to_string(),
        source: e,
    })?;
    Ok(read_price_sheet_from_reader(file, normalizer))
}

/// Like [`read_price_sheet`], but an unreadable file is logged and yields an
/// empty list.
#[must_use]
pub fn load_price_sheet(path: &Path, normalizer: &PriceNormalizer) -> Vec<Product> {
    match read_price_sheet(path, normalizer) {
        Ok(products) => products,
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "price sheet not readable");
            Vec::new()
        }
    }
}

/// Normalizes every usable row from an in-memory or streamed sheet.
pub fn read_price_sheet_from_reader<R: io::Read>(
    reader: R,
    normalizer: &PriceNormalizer,
) -> Vec<Product> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut products = Vec::new();
    for result in csv_reader.records() {
        match result {
            Ok(record) => {
                let raw = RawPriceRow::from_fields(record.iter());
                if let Some(product) = normalizer.normalize_row(&raw) {
                    products.push(product);
                }
            }
            Err(e) => {
                let line = e.position().map(csv::Position::line);
                tracing::warn!(?line, error = %e, "skipping malformed price sheet record");
            }
        }
    }

    tracing::debug!(count = products.len(), "price sheet normalized");
    products
}

/// Writes products as a sheet that [`read_price_sheet_from_reader`] reads
/// back unchanged when no surcharge is configured.
///
/// # Errors
///
/// Returns [`csv::Error`] if writing to `writer` fails.
pub fn write_price_sheet<W: io::Write>(writer: W, products: &[Product]) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(SHEET_HEADERS)?;
    for product in products {
        csv_writer.write_record(RawPriceRow::from_product(product).fields())?;
    }
    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHEET: &str = "\
Location,Address,Product,Non-Account,Account,Delivery
Cherokee/Rock Quarry/594,\"40 Sutton Hill Rd, Cherokee, AL 35616\",#89 Stone,$20.00,$19.00,$2.50

Lacey's Spring/Rock Quarry/71501,\"105 Vaughn Rd, Laceys Spring, AL 35754\",,,,
Short/Row
";

    #[test]
    fn reader_skips_blank_and_empty_rows() {
        let products = read_price_sheet_from_reader(SHEET.as_bytes(), &PriceNormalizer::default());
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].product_name, "#89 Stone");
        assert_eq!(products[0].address, "40 Sutton Hill Rd, Cherokee, AL 35616");
    }

    #[test]
    fn reader_tolerates_short_rows() {
        let products = read_price_sheet_from_reader(SHEET.as_bytes(), &PriceNormalizer::default());
        // "Short/Row" has a location and nothing else; it carries no usable data.
        assert!(products.iter().all(|p| p.location_name.as_deref() != Some("Short")));
    }

    #[test]
    fn header_only_sheet_is_empty() {
        let products =
            read_price_sheet_from_reader(SHEET_HEADERS.join(",").as_bytes(), &PriceNormalizer::default());
        assert!(products.is_empty());
    }

    #[test]
    fn load_missing_file_returns_empty() {
        let products = load_price_sheet(
            Path::new("/definitely/not/here/prices.csv"),
            &PriceNormalizer::default(),
        );
        assert!(products.is_empty());
    }

    #[test]
    fn read_missing_file_is_source_error() {
        let err = read_price_sheet(
            Path::new("/definitely/not/here/prices.csv"),
            &PriceNormalizer::default(),
        )
        .unwrap_err();
        assert!(matches!(err, PricingError::SourceIo { .. }));
    }

    #[test]
    fn write_then_read_preserves_products() {
        let original = read_price_sheet_from_reader(SHEET.as_bytes(), &PriceNormalizer::default());
        let mut buffer = Vec::new();
        write_price_sheet(&mut buffer, &original).expect("write sheet");
        let reread = read_price_sheet_from_reader(buffer.as_slice(), &PriceNormalizer::default());
        assert_eq!(reread, original);
    }
}
