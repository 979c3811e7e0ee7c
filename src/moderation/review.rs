use crate::db::{self, Category, Session, Stats, Status, Submission};
use crate::error::{Error, Result};

/// Pending submissions, most recent first.
pub async fn list_pending(session: &mut Session, limit: i64) -> Result<Vec<Submission>> {
    db::list_submissions(session.conn(), Some(Status::Pending), limit, 0).await
}

/// Submissions of any status, most recent first.
pub async fn list_recent(session: &mut Session, limit: i64, offset: i64) -> Result<Vec<Submission>> {
    db::list_submissions(session.conn(), None, limit, offset).await
}

pub async fn get(session: &mut Session, id: i64) -> Result<Submission> {
    db::get_submission(session.conn(), id)
        .await?
        .ok_or(Error::NotFound(id))
}

pub async fn approve(session: &mut Session, id: i64) -> Result<Submission> {
    transition(session, id, Status::Approved).await
}

pub async fn reject(session: &mut Session, id: i64) -> Result<Submission> {
    transition(session, id, Status::Rejected).await
}

// Overwrites whatever status the row had; a decided row can be decided again.
async fn transition(session: &mut Session, id: i64, status: Status) -> Result<Submission> {
    let mut tx = session.begin().await?;

    let previous = db::get_submission(&mut *tx, id)
        .await?
        .ok_or(Error::NotFound(id))?;

    let updated = db::update_status(&mut *tx, id, status)
        .await?
        .ok_or(Error::NotFound(id))?;
    tx.commit().await?;

    if previous.status != Status::Pending {
        tracing::warn!(
            id,
            from = %previous.status,
            to = %status,
            "Submission re-reviewed"
        );
    } else {
        tracing::info!(id, status = %status, "Submission reviewed");
    }
    Ok(updated)
}

/// Counts per status and per category over the whole table.
pub async fn stats(session: &mut Session) -> Result<Stats> {
    let mut stats = Stats {
        per_category: Category::ALL.into_iter().map(|c| (c, 0)).collect(),
        ..Default::default()
    };

    for (status, count) in db::count_by_status(session.conn()).await? {
        match status {
            Status::Pending => stats.pending = count,
            Status::Approved => stats.approved = count,
            Status::Rejected => stats.rejected = count,
        }
        stats.total += count;
    }

    for (category, count) in db::count_by_category(session.conn()).await? {
        stats.per_category.insert(category, count);
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{Store, SubmissionInput};
    use crate::moderation::submit;

    async fn test_store() -> Store {
        let store = Store::connect("sqlite::memory:").await.unwrap();
        store.ensure_schema().await.unwrap();
        store
    }

    async fn add(session: &mut Session, text: &str, category: &str) -> Submission {
        submit(
            session,
            SubmissionInput {
                text: text.to_string(),
                category: category.to_string(),
                platform: "Reddit".to_string(),
                ..Default::default()
            },
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn approve_moves_counts() {
        let store = test_store().await;
        let mut session = store.open_session().await.unwrap();
        let first = add(&mut session, "one", "gender").await;
        add(&mut session, "two", "religion").await;

        let before = stats(&mut session).await.unwrap();
        assert_eq!(before.pending, 2);
        assert_eq!(before.approved, 0);

        let approved = approve(&mut session, first.id).await.unwrap();
        assert_eq!(approved.status, Status::Approved);

        let after = stats(&mut session).await.unwrap();
        assert_eq!(after.approved, before.approved + 1);
        assert_eq!(after.pending, before.pending - 1);
        assert_eq!(after.total, 2);
    }

    #[tokio::test]
    async fn reject_sets_status() {
        let store = test_store().await;
        let mut session = store.open_session().await.unwrap();
        let s = add(&mut session, "bad", "language").await;

        let rejected = reject(&mut session, s.id).await.unwrap();
        assert_eq!(rejected.status, Status::Rejected);
        assert_eq!(get(&mut session, s.id).await.unwrap().status, Status::Rejected);
        assert_eq!(stats(&mut session).await.unwrap().rejected, 1);
    }

    #[tokio::test]
    async fn missing_id_is_not_found() {
        let store = test_store().await;
        let mut session = store.open_session().await.unwrap();

        assert!(matches!(approve(&mut session, 42).await, Err(Error::NotFound(42))));
        assert!(matches!(reject(&mut session, 7).await, Err(Error::NotFound(7))));
        assert!(matches!(get(&mut session, 1).await, Err(Error::NotFound(1))));
    }

    #[tokio::test]
    async fn decided_submission_can_be_reversed() {
        let store = test_store().await;
        let mut session = store.open_session().await.unwrap();
        let s = add(&mut session, "flip", "conspiracy").await;

        approve(&mut session, s.id).await.unwrap();
        let reversed = reject(&mut session, s.id).await.unwrap();
        assert_eq!(reversed.status, Status::Rejected);

        let counts = stats(&mut session).await.unwrap();
        assert_eq!(counts.approved, 0);
        assert_eq!(counts.rejected, 1);
    }

    #[tokio::test]
    async fn pending_list_is_newest_first_and_limited() {
        let store = test_store().await;
        let mut session = store.open_session().await.unwrap();
        let a = add(&mut session, "a", "gender").await;
        let b = add(&mut session, "b", "gender").await;
        let c = add(&mut session, "c", "gender").await;
        let d = add(&mut session, "d", "gender").await;
        approve(&mut session, c.id).await.unwrap();

        let pending = list_pending(&mut session, 10).await.unwrap();
        let ids: Vec<i64> = pending.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![d.id, b.id, a.id]);

        let limited = list_pending(&mut session, 2).await.unwrap();
        assert_eq!(limited.len(), 2);
        assert_eq!(limited[0].id, d.id);
    }

    #[tokio::test]
    async fn recent_list_pages_across_statuses() {
        let store = test_store().await;
        let mut session = store.open_session().await.unwrap();
        let a = add(&mut session, "a", "gender").await;
        let b = add(&mut session, "b", "religion").await;
        let c = add(&mut session, "c", "language").await;
        reject(&mut session, b.id).await.unwrap();

        let page1 = list_recent(&mut session, 2, 0).await.unwrap();
        let page2 = list_recent(&mut session, 2, 2).await.unwrap();
        assert_eq!(page1.iter().map(|s| s.id).collect::<Vec<_>>(), vec![c.id, b.id]);
        assert_eq!(page2.iter().map(|s| s.id).collect::<Vec<_>>(), vec![a.id]);
    }

    #[tokio::test]
    async fn stats_fill_every_category() {
        let store = test_store().await;
        let mut session = store.open_session().await.unwrap();
        add(&mut session, "x", "gender").await;
        add(&mut session, "y", "gender").await;
        add(&mut session, "z", "religion").await;

        let counts = stats(&mut session).await.unwrap();
        assert_eq!(counts.total, 3);
        assert_eq!(counts.per_category.len(), 4);
        assert_eq!(counts.per_category[&Category::Gender], 2);
        assert_eq!(counts.per_category[&Category::Religion], 1);
        assert_eq!(counts.per_category[&Category::Language], 0);
        assert_eq!(counts.per_category[&Category::Conspiracy], 0);
    }
}
