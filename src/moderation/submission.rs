use chrono::Utc;

use crate::db::{self, Category, NewSubmission, Platform, Session, Status, Submission, SubmissionInput};
use crate::error::{Error, Result};

impl SubmissionInput {
    /// Check every field and convert to typed values.
    ///
    /// Checks run in a fixed order (text, category, platform, status) so the
    /// first problem found is the one reported.
    pub fn validate(self) -> Result<NewSubmission> {
        let text = self.text.trim();
        if text.is_empty() {
            return Err(Error::validation("empty text"));
        }

        let category: Category = self.category.parse()?;
        let platform: Platform = self.platform.parse()?;
        let status = match self.status.as_deref() {
            Some(s) => s.parse::<Status>()?,
            None => Status::Pending,
        };

        let anonymized_text = self
            .anonymized_text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(text)
            .to_string();

        let context = self
            .context
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string);

        Ok(NewSubmission {
            text: text.to_string(),
            anonymized_text,
            category,
            platform,
            context,
            status,
        })
    }
}

/// Validate and store one submission in its own committed transaction.
pub async fn submit(session: &mut Session, input: SubmissionInput) -> Result<Submission> {
    let new = match input.validate() {
        Ok(new) => new,
        Err(e) => {
            tracing::debug!("Rejected submission: {}", e);
            return Err(e);
        }
    };

    let mut tx = session.begin().await?;
    let submission = db::insert_submission(&mut *tx, &new, Utc::now()).await?;
    tx.commit().await?;

    tracing::info!(
        id = submission.id,
        category = %submission.category,
        platform = %submission.platform,
        "Submission recorded"
    );
    Ok(submission)
}
