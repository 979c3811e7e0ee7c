use super::{Session, Submission, SubmissionInput};
use crate::error::Result;
use crate::moderation::submit;

const SAMPLES: [(&str, &str, &str, &str); 4] = [
    ("Women should not be allowed to work", "gender", "X", "pending"),
    ("This religion is responsible for all problems", "religion", "Reddit", "approved"),
    ("People speaking this language are stupid", "language", "X", "pending"),
    ("This group secretly controls the government", "conspiracy", "Reddit", "pending"),
];

/// Insert one fixed example per category. The religion sample is pre-approved
/// so an export has something to emit.
pub async fn add_sample_data(session: &mut Session) -> Result<Vec<Submission>> {
    let mut created = Vec::with_capacity(SAMPLES.len());
    for (text, category, platform, status) in SAMPLES {
        let input = SubmissionInput {
            text: text.to_string(),
            category: category.to_string(),
            platform: platform.to_string(),
            status: Some(status.to_string()),
            ..Default::default()
        };
        created.push(submit(session, input).await?);
    }
    tracing::info!("Added {} sample submissions", created.len());
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{Status, Store};
    use crate::moderation::review;

    #[tokio::test]
    async fn samples_cover_every_category() {
        let store = Store::connect("sqlite::memory:").await.unwrap();
        store.ensure_schema().await.unwrap();
        let mut session = store.open_session().await.unwrap();

        let created = add_sample_data(&mut session).await.unwrap();
        assert_eq!(created.len(), 4);

        let stats = review::stats(&mut session).await.unwrap();
        assert_eq!(stats.total, 4);
        assert_eq!(stats.approved, 1);
        assert_eq!(stats.pending, 3);
        assert!(stats.per_category.values().all(|&n| n == 1));
        assert!(created
            .iter()
            .any(|s| s.status == Status::Approved && s.category.as_str() == "religion"));
    }
}
