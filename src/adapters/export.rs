use crate::domain::model::PricedOrder;
use crate::utils::error::{QuoteError, Result};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Serialize)]
struct BreakdownRow<'a> {
    service: &'a str,
    name: &'a str,
    requested_units: u64,
    billed_units: u64,
    unit_price: f64,
    line_total: f64,
    line_setup: f64,
}

pub fn write_breakdown<W: Write>(order: &PricedOrder, writer: W) -> Result<W> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for line in &order.lines {
        csv_writer.serialize(BreakdownRow {
            service: line.service.as_str(),
            name: &line.display_name,
            requested_units: line.requested_units,
            billed_units: line.effective_units,
            unit_price: line.unit_price,
            line_total: line.line_total,
            line_setup: line.line_setup,
        })?;
    }
    csv_writer
        .into_inner()
        .map_err(|e| QuoteError::IoError(e.into_error()))
}

pub fn breakdown_csv(order: &PricedOrder) -> Result<String> {
    let bytes = write_breakdown(order, Vec::new())?;
    String::from_utf8(bytes)
        .map_err(|e| QuoteError::IoError(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

pub fn export_breakdown<P: AsRef<Path>>(order: &PricedOrder, path: P) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::File::create(path)?;
    write_breakdown(order, file)?;
    tracing::info!("Breakdown written to {}", path.display());
    Ok(())
}
