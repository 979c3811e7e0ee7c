// CSV export of approved submissions.
use chrono::{DateTime, SecondsFormat, Utc};
use std::path::{Path, PathBuf};

use crate::db::{self, Session, Status, Submission};
use crate::error::Result;

pub const CSV_HEADER: [&str; 5] = ["id", "text", "category", "platform", "timestamp"];

/// Serialize every approved submission as CSV, header row first.
///
/// The `text` column carries the anonymized text when one is stored. With no
/// approved rows the output is the header alone.
pub async fn export_approved(session: &mut Session) -> Result<Vec<u8>> {
    let approved = db::submissions_with_status(session.conn(), Status::Approved).await?;
    let bytes = render_csv(&approved)?;
    tracing::info!("Exported {} approved submissions", approved.len());
    Ok(bytes)
}

fn render_csv(rows: &[Submission]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;
    for s in rows {
        writer.write_record([
            s.id.to_string().as_str(),
            s.display_text(),
            s.category.as_str(),
            s.platform.as_str(),
            s.timestamp
                .to_rfc3339_opts(SecondsFormat::Secs, true)
                .as_str(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    Ok(bytes)
}

pub fn export_filename(now: DateTime<Utc>) -> String {
    format!("dataset_export_{}.csv", now.format("%Y%m%d_%H%M%S"))
}

/// Write the export into `dir`, returning the file path.
///
/// Returns `None` and writes nothing when there is no approved submission.
pub async fn write_export(
    session: &mut Session,
    dir: &Path,
    now: DateTime<Utc>,
) -> Result<Option<PathBuf>> {
    let approved = db::submissions_with_status(session.conn(), Status::Approved).await?;
    if approved.is_empty() {
        tracing::warn!("No approved data to export");
        return Ok(None);
    }

    let bytes = render_csv(&approved)?;
    std::fs::create_dir_all(dir)?;
    let path = dir.join(export_filename(now));
    std::fs::write(&path, bytes)?;

    tracing::info!("Exported {} approved submissions to {}", approved.len(), path.display());
    Ok(Some(path))
}
