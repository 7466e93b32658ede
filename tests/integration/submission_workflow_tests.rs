/*!
 * End-to-end submission scenarios against a stateful fake service
 */

use std::sync::Arc;

use gengo::{GengoClient, JobDraft};

use crate::common::fake_service::FakeGengo;
use crate::common::init_test_logging;

fn fake_client() -> (Arc<FakeGengo>, GengoClient) {
    init_test_logging();
    let fake = Arc::new(FakeGengo::new());
    let client = GengoClient::with_transport(fake.clone());
    (fake, client)
}

fn liverpool() -> JobDraft {
    JobDraft::text("Liverpool", "Liverpool Football Club", "en", "ja")
}

#[tokio::test]
async fn test_submitTwice_shouldReportSecondAsDuplicateOfFirst() {
    let (fake, client) = fake_client();

    let first = client.jobs().submit(false, false, vec![liverpool()]).await.unwrap();
    assert_eq!(first.job_count, 1);
    assert!(first.duplicates.is_empty());

    let second = client.jobs().submit(false, false, vec![liverpool()]).await.unwrap();
    assert_eq!(second.job_count, 0);
    assert_eq!(second.duplicates.len(), 1);

    let duplicate = &second.duplicates[0];
    assert_eq!(duplicate.key, "job_1");
    assert_eq!(duplicate.job, liverpool());
    assert_eq!(duplicate.existing_jobs.len(), 1);

    // The reported job is the one stored by the first submission
    let existing = &duplicate.existing_jobs[0];
    let stored = client.job().get(existing.id(), false).await.unwrap();
    assert_eq!(stored.body(), Some("Liverpool Football Club"));
    assert_eq!(fake.stored_jobs(), 1);
}

#[tokio::test]
async fn test_submitTwice_withForce_shouldNotReportDuplicate() {
    let (fake, client) = fake_client();

    client.jobs().submit(false, false, vec![liverpool()]).await.unwrap();
    let forced = client
        .jobs()
        .submit(false, false, vec![liverpool().force(true)])
        .await
        .unwrap();

    assert_eq!(forced.job_count, 1);
    assert!(forced.duplicates.is_empty());
    assert_eq!(fake.stored_jobs(), 2);
}

#[tokio::test]
async fn test_submitMixedBatch_shouldOnlyFlagResubmittedJob() {
    let (_fake, client) = fake_client();
    client.jobs().submit(false, false, vec![liverpool()]).await.unwrap();

    let batch = vec![
        JobDraft::text("Manchester", "Manchester United", "en", "ja"),
        liverpool(),
        JobDraft::text("Everton", "Everton", "en", "ja"),
    ];
    let confirmation = client.jobs().submit(true, false, batch).await.unwrap();

    assert_eq!(confirmation.job_count, 2);
    assert!(confirmation.has_group_id());

    let flagged = confirmation.duplicates_in_submission_order();
    assert_eq!(flagged.len(), 1);
    assert_eq!(flagged[0].ordinal, 2);
    assert_eq!(flagged[0].job.slug(), "Liverpool");
}

#[tokio::test]
async fn test_submit_withSameBodyOtherTarget_shouldBeAccepted() {
    let (_fake, client) = fake_client();
    client.jobs().submit(false, false, vec![liverpool()]).await.unwrap();

    let german = JobDraft::text("Liverpool", "Liverpool Football Club", "en", "de");
    let confirmation = client.jobs().submit(false, false, vec![german]).await.unwrap();

    assert_eq!(confirmation.job_count, 1);
    assert!(confirmation.duplicates.is_empty());
}

#[test]
fn test_submit_withEmptyBatch_shouldNotReachService() {
    let (fake, client) = fake_client();

    let result = tokio_test::block_on(async {
        client.jobs().submit(false, false, Vec::<JobDraft>::new()).await
    });

    assert!(result.unwrap_err().is_validation());
    assert_eq!(fake.stored_jobs(), 0);
}
