/*!
 * Method groups exercised against the mock transport
 */

use chrono::{TimeZone, Utc};
use serde_json::json;

use gengo::endpoints::{Approval, Rejection, RejectionReason, Stars};
use gengo::{
    FileQuoteRequest, FileUpload, GengoError, JobDraft, QueryParams, TranslationStatus,
    TranslationTier, Transport,
};

use crate::common::{existing_job, mock_client, ok_body, preferred_translators_fixture};

#[tokio::test]
async fn test_balance_shouldSendSignedGet() {
    let (mock, client) = mock_client();
    mock.respond_ok("account/balance", json!({"credits": "25.32", "currency": "USD"}));

    let balance = client.account().balance().await.unwrap();

    assert_eq!(balance.credits, 25.32);
    let call = mock.last_call().unwrap();
    assert_eq!(call.method, "GET");
    assert!(call.authenticated);
}

#[tokio::test]
async fn test_balance_withErrorEnvelope_shouldSurfaceServiceCode() {
    let (mock, client) = mock_client();
    mock.respond_error("account/balance", "1000", "authentication failed");

    let err = client.account().balance().await.unwrap_err();
    assert_eq!(err.service_code(), Some("1000"));
}

#[tokio::test]
async fn test_balance_withGarbageBody_shouldBeProtocolError() {
    let (mock, client) = mock_client();
    mock.respond("account/balance", "<html>502</html>");

    let err = client.account().balance().await.unwrap_err();
    assert!(matches!(err, GengoError::Protocol(_)));
}

#[tokio::test]
async fn test_preferredTranslators_shouldParseEveryGroup() {
    let (mock, client) = mock_client();
    mock.respond_ok("account/preferred_translators", preferred_translators_fixture());

    let groups = client.account().preferred_translators().await.unwrap();

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].tier, TranslationTier::Standard);
    let ids: Vec<i64> = groups[0].translators.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![8596, 24123]);
    assert_eq!(groups[1].source_language, "ja");
    assert_eq!(groups[1].tier, TranslationTier::Pro);
    assert_eq!(groups[1].translators[0].number_of_jobs, 10);
}

#[tokio::test]
async fn test_languages_shouldBeUnauthenticated() {
    let (mock, client) = mock_client();
    mock.respond_ok(
        "translate/service/languages",
        json!([{"language": "English", "localized_name": "English", "lc": "en", "unit_type": "word"}]),
    );

    let languages = client.service().languages().await.unwrap();

    assert_eq!(languages[0].code, "en");
    assert!(!mock.last_call().unwrap().authenticated);
}

#[tokio::test]
async fn test_languagePairsFrom_shouldFilterBySource() {
    let (mock, client) = mock_client();
    mock.respond_ok(
        "translate/service/language_pairs",
        json!([{"lc_src": "de", "lc_tgt": "en", "tier": "standard", "unit_price": "0.05", "currency": "USD"}]),
    );

    let pairs = client.service().language_pairs_from("de").await.unwrap();

    assert_eq!(pairs[0].unit_price, 0.05);
    assert_eq!(mock.last_call().unwrap().params.get("lc_src"), Some("de"));
    assert!(client.service().language_pairs_from(" ").await.unwrap_err().is_validation());
}

#[tokio::test]
async fn test_quote_shouldPostJobArray() {
    let (mock, client) = mock_client();
    mock.respond_ok(
        "translate/service/quote",
        json!({"jobs": {"job_1": {"unit_count": 4, "credits": "0.20", "eta": 25000, "currency": "USD", "type": "text"}}}),
    );

    let quotes = client
        .service()
        .quote(false, vec![JobDraft::text("q", "a short text", "en", "ja")])
        .await
        .unwrap();

    assert_eq!(quotes[0].unit_count, 4);
    assert_eq!(quotes[0].eta.as_secs(), 25000);

    let payload = mock.last_call().unwrap().payload.unwrap();
    assert_eq!(payload["jobs"][0]["body_src"], "a short text");
    assert_eq!(payload["as_group"], 0);
}

#[tokio::test]
async fn test_quote_withNoJobs_shouldNotCallService() {
    let (mock, client) = mock_client();

    let err = client.service().quote(false, Vec::<JobDraft>::new()).await.unwrap_err();

    assert!(err.is_validation());
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn test_quoteFiles_shouldAttachEachUpload() {
    let (mock, client) = mock_client();
    mock.respond_ok(
        "translate/service/quote/file",
        json!({"jobs": [{
            "unit_count": "12", "credits": "0.60", "eta": "3600", "currency": "USD",
            "identifier": "abc123", "type": "file", "title": "notes.txt", "body": "Hello"
        }]}),
    );

    let upload = FileUpload::new("notes.txt", "Hello").unwrap().with_file_key("file_01");
    let request = FileQuoteRequest::new(upload, "notes", "en", "ja");

    let quotes = client.service().quote_files(&[request]).await.unwrap();

    assert_eq!(quotes[0].quote.identifier.as_deref(), Some("abc123"));
    assert_eq!(quotes[0].title.as_deref(), Some("notes.txt"));

    let call = mock.last_call().unwrap();
    assert_eq!(call.file_keys, vec!["file_01".to_string()]);
    assert_eq!(call.payload.unwrap()["jobs"][0]["file_key"], "file_01");
}

#[tokio::test]
async fn test_recent_shouldSendFiltersAndParseIds() {
    let (mock, client) = mock_client();
    mock.respond_ok(
        "translate/jobs",
        json!([{"job_id": "11", "ctime": 1_370_000_100}, {"job_id": 12, "ctime": "1370000200"}]),
    );
    let after = Utc.timestamp_opt(1_370_000_000, 0).unwrap();

    let recent = client
        .jobs()
        .recent(Some(TranslationStatus::Reviewable), Some(after), 5)
        .await
        .unwrap();

    let ids: Vec<i64> = recent.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![11, 12]);

    let params = mock.last_call().unwrap().params;
    assert_eq!(params.get("status"), Some("reviewable"));
    assert_eq!(params.get("timestamp_after"), Some("1370000000"));
    assert_eq!(params.get("count"), Some("5"));
}

#[tokio::test]
async fn test_recent_withInvalidFilters_shouldFailBeforeAnyCall() {
    let (mock, client) = mock_client();
    let epoch = Utc.timestamp_opt(0, 0).unwrap();

    let unknown = client.jobs().recent(Some(TranslationStatus::Unknown), None, 5).await;
    let too_early = client.jobs().recent(None, Some(epoch), 5).await;

    assert!(unknown.unwrap_err().is_validation());
    assert!(too_early.unwrap_err().is_validation());
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn test_recent_withZeroCount_shouldReturnEmptyWithoutCall() {
    let (mock, client) = mock_client();

    let recent = client.jobs().recent(None, None, 0).await.unwrap();

    assert!(recent.is_empty());
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn test_byIds_shouldJoinIdsIntoPath() {
    let (mock, client) = mock_client();
    mock.respond_ok(
        "translate/jobs/1,2",
        json!({"jobs": [existing_job(1, "a", "x"), existing_job(2, "b", "y")]}),
    );

    let jobs = client.jobs().by_ids(&[1, 2]).await.unwrap();

    assert_eq!(jobs.len(), 2);
    assert_eq!(jobs[1].slug(), Some("b"));
    assert!(client.jobs().by_ids(&[]).await.unwrap().is_empty());
    assert!(client.jobs().by_ids(&[3, -1]).await.unwrap_err().is_validation());
    assert_eq!(mock.call_count(), 1);
}

#[tokio::test]
async fn test_group_shouldParseJobIds() {
    let (mock, client) = mock_client();
    mock.respond_ok(
        "translate/jobs/group/7",
        json!({"ctime": 1_370_000_000, "jobs": [{"job_id": "21"}, {"job_id": "22"}]}),
    );

    let group = client.jobs().group(7).await.unwrap();
    assert_eq!(group.job_ids, vec![21, 22]);
}

#[tokio::test]
async fn test_submit_withReportedDuplicate_shouldPairItWithDraft() {
    let (mock, client) = mock_client();
    mock.respond_ok(
        "translate/jobs",
        json!({
            "order_id": "40",
            "job_count": "1",
            "credits_used": "0.05",
            "currency": "USD",
            "jobs": {"job_2": [existing_job(3, "old", "Manchester United")]}
        }),
    );
    let jobs = vec![
        JobDraft::text("a", "Liverpool Football Club", "en", "ja"),
        JobDraft::text("b", "Manchester United", "en", "ja"),
    ];

    let confirmation = client.jobs().submit(true, false, jobs).await.unwrap();

    assert_eq!(confirmation.order_id, 40);
    assert_eq!(confirmation.duplicates[0].key, "job_2");
    assert_eq!(confirmation.duplicates[0].job.slug(), "b");

    let payload = mock.last_call().unwrap().payload.unwrap();
    assert_eq!(payload["as_group"], 1);
    assert_eq!(payload["allow_fork"], 0);
    assert_eq!(payload["jobs"]["job_1"]["slug"], "a");
}

#[tokio::test]
async fn test_getJob_shouldAskForMachineTranslation() {
    let (mock, client) = mock_client();
    mock.respond_ok("translate/job/5", json!({"job": existing_job(5, "s", "text")}));

    let job = client.job().get(5, true).await.unwrap();

    assert_eq!(job.id(), 5);
    assert_eq!(job.status(), TranslationStatus::Available);
    assert_eq!(mock.last_call().unwrap().params.get("pre_mt"), Some("1"));
    assert!(client.job().get(0, false).await.unwrap_err().is_validation());
}

#[tokio::test]
async fn test_approve_shouldPutApprovalPayload() {
    let (mock, client) = mock_client();
    mock.respond_ok("translate/job/5", json!({}));

    let approval = Approval::new(Stars::Five).for_translator("Great work");
    client.job().approve(5, &approval).await.unwrap();

    let call = mock.last_call().unwrap();
    assert_eq!(call.method, "PUT");
    assert_eq!(
        call.payload.unwrap(),
        json!({"action": "approve", "rating": 5, "for_translator": "Great work"})
    );
}

#[tokio::test]
async fn test_reject_withoutCaptcha_shouldNotCallService() {
    let (mock, client) = mock_client();

    let rejection = Rejection::new(RejectionReason::Quality, "Wrong terms", "");
    let err = client.job().reject(5, &rejection).await.unwrap_err();

    assert!(err.is_validation());
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn test_reject_withCancel_shouldSendFollowUp() {
    let (mock, client) = mock_client();
    mock.respond_ok("translate/job/5", json!({}));

    let rejection = Rejection::new(RejectionReason::Incomplete, "Half missing", "X7YZ").cancel();
    client.job().reject(5, &rejection).await.unwrap();

    let payload = mock.last_call().unwrap().payload.unwrap();
    assert_eq!(payload["reason"], "incomplete");
    assert_eq!(payload["follow_up"], "cancel");
}

#[tokio::test]
async fn test_commentsAndFeedback_shouldReadNestedProperties() {
    let (mock, client) = mock_client();
    mock.respond_ok(
        "translate/job/5/comments",
        json!({"thread": [{"body": "Please keep names", "author": "customer", "ctime": 1_370_000_000}]}),
    );
    mock.respond_ok(
        "translate/job/5/feedback",
        json!({"feedback": {"rating": "4.0", "for_translator": "Thanks"}}),
    );

    let comments = client.job().comments(5).await.unwrap();
    let feedback = client.job().feedback(5).await.unwrap();

    assert_eq!(comments[0].body, "Please keep names");
    assert_eq!(feedback.rating, 4.0);
    assert_eq!(feedback.for_translator.as_deref(), Some("Thanks"));
}

#[tokio::test]
async fn test_postComment_withBlankBody_shouldBeValidationError() {
    let (mock, client) = mock_client();
    mock.respond_ok("translate/job/5/comment", json!({}));

    assert!(client.job().post_comment(5, "  ").await.unwrap_err().is_validation());
    client.job().post_comment(5, "Any update?").await.unwrap();

    assert_eq!(mock.call_count(), 1);
    assert_eq!(mock.last_call().unwrap().payload.unwrap()["body"], "Any update?");
}

#[tokio::test]
async fn test_revisions_shouldReadRevisionIds() {
    let (mock, client) = mock_client();
    mock.respond_ok(
        "translate/job/5/revisions",
        json!({"revisions": [{"rev_id": "1", "ctime": 1_370_000_000}, {"rev_id": "2", "ctime": 1_370_000_500}]}),
    );
    mock.respond_ok(
        "translate/job/5/revision/2",
        json!({"revision": {"ctime": 1_370_000_500, "body_tgt": "リバプール"}}),
    );

    let revisions = client.job().revisions(5).await.unwrap();
    let revision = client.job().revision(5, revisions[1].id).await.unwrap();

    assert_eq!(revisions.len(), 2);
    assert_eq!(revision.body.as_deref(), Some("リバプール"));
}

#[tokio::test]
async fn test_previewImage_shouldReturnRawBytes() {
    let (mock, client) = mock_client();
    mock.respond_bytes("translate/job/5/preview", vec![0x89, b'P', b'N', b'G']);

    let image = client.job().preview_image(5).await.unwrap();
    assert_eq!(&image[1..], b"PNG");
}

#[tokio::test]
async fn test_order_shouldParseJobLists() {
    let (mock, client) = mock_client();
    mock.respond_ok(
        "translate/order/232",
        json!({"order": {
            "order_id": "232", "total_credits": "0.30", "currency": "USD", "total_units": "6",
            "as_group": "1", "jobs_queued": "0", "total_jobs": "2",
            "jobs_available": ["2455"], "jobs_reviewable": ["2456"]
        }}),
    );
    mock.respond_ok("translate/order/232", json!({}));

    let order = client.order().get(232).await.unwrap();
    client.order().delete(232).await.unwrap();

    assert!(order.as_group);
    assert_eq!(order.available_jobs, vec![2455]);
    assert_eq!(order.reviewable_jobs, vec![2456]);
    assert!(order.pending_jobs.is_empty());
    assert_eq!(mock.last_call().unwrap().method, "DELETE");
}

#[tokio::test]
async fn test_glossaries_shouldParseTargets() {
    let (mock, client) = mock_client();
    mock.respond_ok(
        "translate/glossary/",
        json!([{
            "id": 115, "customer_user_id": 50110, "source_language_id": 8,
            "source_language_code": "en-US", "target_languages": [[14, "ja"]],
            "is_public": false, "unit_count": 2, "status": 1,
            "title": "1342087748.csv", "ctime": "2012-07-12 10:09:08.713596"
        }]),
    );

    let glossaries = client.glossary().all().await.unwrap();

    assert_eq!(glossaries[0].id, 115);
    assert_eq!(glossaries[0].target_languages[0].code, "ja");
    assert!(glossaries[0].created.is_some());
}

#[tokio::test]
async fn test_postForm_shouldRecordFields() {
    let (mock, client) = mock_client();
    mock.respond("translate/job/5/comment", ok_body(json!({})));

    let fields = QueryParams::new().with("body", "form comment");
    let raw = client
        .transport()
        .post_form("translate/job/5/comment", fields)
        .await
        .unwrap();

    assert!(raw.contains("\"ok\""));
    let call = mock.last_call().unwrap();
    assert_eq!(call.method, "POST");
    assert_eq!(call.params.get("body"), Some("form comment"));
}

#[tokio::test]
async fn test_stats_withMissingUserSince_shouldBeProtocolError() {
    let (mock, client) = mock_client();
    mock.respond_ok("account/stats", json!({"credits_spent": "10.00", "currency": "USD"}));

    let err = client.account().stats().await.unwrap_err();
    assert!(matches!(err, GengoError::Protocol(_)));
}

#[tokio::test]
async fn test_reviseAndDelete_shouldUseJobPath() {
    let (mock, client) = mock_client();
    mock.respond_ok("translate/job/8", json!({}));

    assert!(client.job().revise(8, " ").await.unwrap_err().is_validation());
    client.job().revise(8, "Use formal register").await.unwrap();
    client.job().delete(8).await.unwrap();

    let calls = mock.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].method, "PUT");
    assert_eq!(calls[0].payload.as_ref().unwrap()["action"], "revise");
    assert_eq!(calls[1].method, "DELETE");
}

#[tokio::test]
async fn test_glossaryGet_shouldAppendIdToPath() {
    let (mock, client) = mock_client();
    mock.respond_ok(
        "translate/glossary/115",
        json!({"id": "115", "source_language_code": "en-US", "target_languages": [], "title": "terms.csv"}),
    );

    let glossary = client.glossary().get(115).await.unwrap();

    assert_eq!(glossary.title.as_deref(), Some("terms.csv"));
    assert_eq!(glossary.source_language.code, "en-US");
    assert!(client.glossary().get(0).await.unwrap_err().is_validation());
}
