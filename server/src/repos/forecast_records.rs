use chrono::{DateTime, Utc};

use crate::db;
use crate::models::RawRecord;

/// All records from `time` onwards, oldest first.
pub async fn upcoming<'a>(
    client: &db::Client<'a>,
    time: &DateTime<Utc>,
) -> anyhow::Result<Vec<RawRecord>> {
    let stmt = "SELECT document FROM forecast_records \
                WHERE target_time >= $1
                ORDER BY target_time ASC";
    let rows = client.query(stmt, &[&time]).await?;
    super::from_documents(rows)
}

/// Records stored for the hour bucket `time` falls into.
pub async fn current_hour<'a>(
    client: &db::Client<'a>,
    time: &DateTime<Utc>,
) -> anyhow::Result<Vec<RawRecord>> {
    let stmt = "SELECT document FROM forecast_records \
                WHERE target_time = date_trunc('hour', $1::timestamptz)";
    let rows = client.query(stmt, &[&time]).await?;
    super::from_documents(rows)
}
