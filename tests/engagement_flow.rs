mod support;

use lurebird::LureError;
use lurebird::engagement::{ConversationState, Engagement, EngagementOptions, Speaker};
use lurebird::error::BackendError;
use lurebird::intel::{IndicatorKind, PrimaryTactic, TacticAssessment};
use support::{
    ASSESSMENT_JSON, backend, mount_analysis, mount_analysis_failure, mount_reply,
    mount_reply_failure, test_persona,
};
use wiremock::MockServer;

fn engagement(server: &MockServer) -> Engagement {
    Engagement::seeded(
        test_persona(),
        backend(server),
        EngagementOptions::default(),
        7,
    )
    .expect("engagement builds")
}

#[tokio::test]
async fn first_turn_extracts_iocs_and_enters_request_state() {
    let server = MockServer::start().await;
    mount_analysis(&server, &format!("```json\n{ASSESSMENT_JSON}\n```")).await;
    mount_reply(&server, "Oh my, which link do you mean, dear?").await;

    let mut engagement = engagement(&server);
    assert_eq!(engagement.state(), ConversationState::InitialContact);
    assert_eq!(engagement.turn_count(), 0);

    let reply = engagement
        .respond("Click here to verify: http://bad.example/verify")
        .await
        .unwrap();

    assert_eq!(reply, "Oh my, which link do you mean, dear?");
    assert_eq!(engagement.turn_count(), 1);
    assert_eq!(engagement.state(), ConversationState::Request);

    let record = &engagement.intel_log()[0];
    let urls = record.iocs.get(&IndicatorKind::Urls).unwrap();
    assert!(urls.contains("http://bad.example/verify"));
    assert_eq!(record.tactics.primary_tactic, PrimaryTactic::Urgency);
    assert_eq!(record.tactics.pressure_level, 8);

    assert_eq!(engagement.history().len(), 2);
    assert_eq!(engagement.history()[0].role, Speaker::Scammer);
    assert_eq!(engagement.history()[1].role, Speaker::Agent);
}

#[tokio::test]
async fn request_rule_wins_when_both_keyword_classes_present() {
    let server = MockServer::start().await;
    mount_analysis(&server, ASSESSMENT_JSON).await;
    mount_reply(&server, "Goodness, let me get my glasses.").await;

    let mut engagement = engagement(&server);
    engagement
        .respond("URGENT: click the link immediately!")
        .await
        .unwrap();

    assert_eq!(engagement.state(), ConversationState::Request);
}

#[tokio::test]
async fn analyzer_failure_degrades_but_engagement_continues() {
    let server = MockServer::start().await;
    mount_analysis_failure(&server, 500).await;
    mount_reply(&server, "Sorry dear, my computer is being slow again.").await;

    let mut engagement = engagement(&server);
    let reply = engagement
        .respond("Your account will be locked today!")
        .await
        .unwrap();

    assert_eq!(reply, "Sorry dear, my computer is being slow again.");
    assert_eq!(engagement.turn_count(), 1);
    assert_eq!(
        engagement.intel_log()[0].tactics,
        TacticAssessment::fallback()
    );
    // IOC extraction is independent of the analyzer and still ran.
    assert!(
        engagement.intel_log()[0]
            .iocs
            .contains_key(&IndicatorKind::UrgencyWords)
    );
}

#[tokio::test]
async fn reply_failure_is_fatal_for_the_turn() {
    let server = MockServer::start().await;
    mount_analysis(&server, ASSESSMENT_JSON).await;
    mount_reply_failure(&server, 500).await;

    let mut engagement = engagement(&server);
    let err = engagement.respond("hello friend").await.unwrap_err();

    assert!(matches!(
        err,
        LureError::Backend(BackendError::Api { status: 500, .. })
    ));
    // The turn did not complete: no agent reply, no increment. The intel
    // record and the scammer's turn were already appended.
    assert_eq!(engagement.turn_count(), 0);
    assert_eq!(engagement.history().len(), 1);
    assert_eq!(engagement.history()[0].role, Speaker::Scammer);
    assert_eq!(engagement.intel_log().len(), 1);
}

#[tokio::test]
async fn rate_limited_reply_surfaces_as_rate_limit_error() {
    let server = MockServer::start().await;
    mount_analysis(&server, ASSESSMENT_JSON).await;
    mount_reply_failure(&server, 429).await;

    let mut engagement = engagement(&server);
    let err = engagement.respond("hello friend").await.unwrap_err();
    assert!(matches!(
        err,
        LureError::Backend(BackendError::RateLimited { .. })
    ));
}

#[tokio::test]
async fn keyword_free_conversation_escalates_to_disengage() {
    let server = MockServer::start().await;
    mount_analysis(&server, ASSESSMENT_JSON).await;
    mount_reply(&server, "That reminds me of my garden...").await;

    let mut engagement = engagement(&server);
    for turn in 0..17 {
        engagement.respond("hello friend").await.unwrap();
        if turn == 15 {
            // 16 completed turns; the transition saw turn_count 15.
            assert_eq!(engagement.state(), ConversationState::LateStage);
        }
    }

    assert_eq!(engagement.turn_count(), 17);
    assert_eq!(engagement.state(), ConversationState::Disengage);

    let summary = engagement.summary();
    assert_eq!(summary.total_turns, 17);
    assert_eq!(summary.final_state, ConversationState::Disengage);
    assert_eq!(summary.estimated_time_wasted_minutes, 34);
}

#[tokio::test]
async fn report_deduplicates_iocs_across_turns() {
    let server = MockServer::start().await;
    mount_analysis(&server, ASSESSMENT_JSON).await;
    mount_reply(&server, "Which website was that again?").await;

    let mut engagement = engagement(&server);
    engagement
        .respond("go to http://x.com please")
        .await
        .unwrap();
    engagement
        .respond("I said go to http://x.com!")
        .await
        .unwrap();

    let report = engagement.report();
    assert_eq!(report.summary.total_messages, 2);
    assert_eq!(report.summary.duration_estimate_minutes, 4);
    let urls = report.summary.unique_iocs.get(&IndicatorKind::Urls).unwrap();
    assert_eq!(urls.len(), 1);
    assert_eq!(report.threat_profile.avg_sophistication, Some(6.0));
    assert_eq!(report.threat_profile.sophistication_trend, vec![6, 6]);

    // Idempotent: a second pass over the same log is identical.
    assert_eq!(engagement.report(), report);
}

#[tokio::test]
async fn export_document_contains_all_entities() {
    let server = MockServer::start().await;
    mount_analysis(&server, ASSESSMENT_JSON).await;
    mount_reply(&server, "Let me write that down.").await;

    let mut engagement = engagement(&server);
    engagement
        .respond("wire the transfer to account 12345")
        .await
        .unwrap();

    let value = serde_json::to_value(engagement.export()).unwrap();
    assert_eq!(value["persona"]["name"], "Margaret");
    assert_eq!(value["scam_type"], "phishing");
    assert_eq!(value["messages"].as_array().unwrap().len(), 2);
    assert_eq!(value["intelligence"].as_array().unwrap().len(), 1);
    assert_eq!(value["summary"]["total_turns"], 1);
}
