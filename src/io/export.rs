use anyhow::Result;
use std::io::Write;

use crate::application::LedgerService;
use crate::domain::format_cents;

/// Exporter for converting the current ledger to interchange formats
pub struct Exporter<'a> {
    service: &'a LedgerService,
}

impl<'a> Exporter<'a> {
    pub fn new(service: &'a LedgerService) -> Self {
        Self { service }
    }

    /// Export transactions to CSV format. Returns the number of rows.
    pub fn export_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(["id", "kind", "amount", "description", "category"])?;

        let mut count = 0;
        for tx in self.service.transactions() {
            csv_writer.write_record([
                tx.id.to_string(),
                tx.kind.as_str().to_string(),
                format_cents(tx.amount),
                tx.description.clone(),
                tx.category
                    .map(|c| c.as_str().to_string())
                    .unwrap_or_default(),
            ])?;
            count += 1;
        }

        csv_writer.flush()?;
        Ok(count)
    }

    /// Export transactions as a JSON array, the same shape as the
    /// persisted slot.
    pub fn export_json<W: Write>(&self, mut writer: W) -> Result<usize> {
        let transactions = self.service.transactions();
        let json = serde_json::to_string_pretty(transactions)?;
        writer.write_all(json.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(transactions.len())
    }
}
