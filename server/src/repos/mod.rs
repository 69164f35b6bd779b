pub mod forecast_records;

use tokio_postgres::Row;

use crate::models::RawRecord;

/// Deserialize the JSONB `document` column of each row.
pub fn from_documents(rows: Vec<Row>) -> anyhow::Result<Vec<RawRecord>> {
    rows.into_iter()
        .map(|row| {
            let document: serde_json::Value = row.try_get("document")?;
            Ok(serde_json::from_value(document)?)
        })
        .collect()
}
