//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Environment variable: DATABASE_URL (JWT_SECRET and API_PORT are optional)
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_json, assert_status, check_test_env, fixtures::*, TestServer, ADMIN_EMAIL,
    ADMIN_PASSWORD,
};
use reqwest::StatusCode;

async fn signup_and_login(server: &TestServer) -> AuthResponse {
    let signup = SignupRequest::unique();
    let response = server.post("/api/v1/auth/signup", &signup).await.unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post("/api/v1/auth/login", &LoginRequest::from_signup(&signup))
        .await
        .unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

async fn admin_token(server: &TestServer) -> String {
    let login = LoginRequest {
        email: ADMIN_EMAIL.to_string(),
        password: ADMIN_PASSWORD.to_string(),
    };
    let response = server.post("/api/v1/auth/login", &login).await.unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(auth.user.role, "admin");
    auth.access_token
}

async fn submit(
    server: &TestServer,
    submission: ComplaintSubmission,
    token: Option<&str>,
) -> CreatedComplaint {
    let response = server
        .post_form("/api/v1/complaints", submission.into_form(), token)
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_signup_and_login() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = signup_and_login(&server).await;

    assert!(auth.success);
    assert_eq!(auth.user.role, "user");
    assert!(!auth.access_token.is_empty());
    assert!(!auth.refresh_token.is_empty());
}

#[tokio::test]
async fn test_signup_duplicate_email() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = SignupRequest::unique();

    server.post("/api/v1/auth/signup", &request).await.unwrap();

    let response = server.post("/api/v1/auth/signup", &request).await.unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();
}

#[tokio::test]
async fn test_login_wrong_password() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let signup = SignupRequest::unique();
    server.post("/api/v1/auth/signup", &signup).await.unwrap();

    let login = LoginRequest {
        email: signup.email,
        password: "WrongPass999".to_string(),
    };
    let response = server.post("/api/v1/auth/login", &login).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_refresh_token() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = signup_and_login(&server).await;

    let body = serde_json::json!({ "refresh_token": auth.refresh_token });
    let response = server.post("/api/v1/auth/refresh", &body).await.unwrap();
    let refreshed: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(refreshed.user.id, auth.user.id);

    // an access token is not accepted as a refresh token
    let body = serde_json::json!({ "refresh_token": auth.access_token });
    let response = server.post("/api/v1/auth/refresh", &body).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// Complaint Tests
// ============================================================================

#[tokio::test]
async fn test_public_submission_is_tracked_and_listed() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = signup_and_login(&server).await;

    let created = submit(
        &server,
        ComplaintSubmission::unique("public").with_file("photo.png", b"\x89PNG fake"),
        Some(&auth.access_token),
    )
    .await;
    assert!(created.success);
    assert_eq!(created.message, "Complaint submitted successfully!");
    assert_eq!(created.display_code, format!("COMP{}", created.complaint_id));

    // both identifier forms resolve to the same complaint
    for identifier in [created.complaint_id.to_string(), created.display_code.clone()] {
        let response = server
            .get(&format!("/api/v1/complaints/track/{identifier}"))
            .await
            .unwrap();
        let tracked: TrackResponse = assert_json(response, StatusCode::OK).await.unwrap();
        assert_eq!(tracked.complaint.id, created.complaint_id);
        assert_eq!(tracked.complaint.user_id, Some(auth.user.id));
        assert_eq!(tracked.complaint.status, "New");
        assert_eq!(tracked.timeline.len(), 1);
        assert_eq!(tracked.timeline[0].old_status, None);
        assert_eq!(tracked.complaint.attachments.len(), 1);
    }

    // the stored attachment is served back
    let tracked: TrackResponse = assert_json(
        server
            .get(&format!("/api/v1/complaints/track/{}", created.complaint_id))
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    let path = &tracked.complaint.attachments[0];
    assert!(path.starts_with("uploads/"));
    let response = server.get(&format!("/{path}")).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .get_auth("/api/v1/users/@me/complaints", &auth.access_token)
        .await
        .unwrap();
    let mine: ComplaintList = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(mine.complaints.len(), 1);

    let response = server
        .get(&format!("/api/v1/users/{}/complaints", auth.user.id))
        .await
        .unwrap();
    let by_id: ComplaintList = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(by_id.complaints.len(), 1);
}

#[tokio::test]
async fn test_anonymous_submission_drops_submitter() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = signup_and_login(&server).await;

    let created = submit(
        &server,
        ComplaintSubmission::unique("anonymous"),
        Some(&auth.access_token),
    )
    .await;

    let response = server
        .get(&format!("/api/v1/complaints/track/{}", created.complaint_id))
        .await
        .unwrap();
    let tracked: TrackResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(tracked.complaint.user_id, None);
    assert_eq!(tracked.complaint.submission_type, "anonymous");

    for path in ["/api/v1/complaints/anonymous", "/api/v1/user-complaints/0", "/api/v1/user-complaints/null"] {
        let response = server.get(path).await.unwrap();
        let list: ComplaintList = assert_json(response, StatusCode::OK).await.unwrap();
        assert!(
            list.complaints.iter().any(|c| c.id == created.complaint_id),
            "{path}"
        );
    }
}

#[tokio::test]
async fn test_submission_validation() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let mut missing_title = ComplaintSubmission::unique("anonymous");
    missing_title.title = "   ".to_string();
    let response = server
        .post_form("/api/v1/complaints", missing_title.into_form(), None)
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let bad_file = ComplaintSubmission::unique("anonymous").with_file("script.sh", b"#!/bin/sh");
    let response = server
        .post_form("/api/v1/complaints", bad_file.into_form(), None)
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_track_unknown_and_malformed() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .get("/api/v1/complaints/track/COMP999999999")
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server.get("/api/v1/complaints/track/COMPX").await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

// ============================================================================
// Admin Tests
// ============================================================================

#[tokio::test]
async fn test_admin_routes_require_admin() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = signup_and_login(&server).await;

    let response = server.get("/api/v1/admin/stats").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let response = server
        .get_auth("/api/v1/admin/stats", &auth.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

#[tokio::test]
async fn test_admin_transition_writes_timeline() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = admin_token(&server).await;
    let created = submit(&server, ComplaintSubmission::unique("anonymous"), None).await;
    let path = format!("/api/v1/admin/complaints/{}", created.complaint_id);

    let update = UpdateComplaint {
        status: "Resolved".to_string(),
        assigned_to: Some("Crew 4".to_string()),
        internal_notes: Some("Replaced the bulb".to_string()),
        public_reply: Some("Fixed".to_string()),
    };
    let response = server.put_auth(&path, &admin, &update).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    // public tracking hides the internal note
    let response = server
        .get(&format!("/api/v1/complaints/track/{}", created.complaint_id))
        .await
        .unwrap();
    let tracked: TrackResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(tracked.complaint.status, "Resolved");
    assert_eq!(tracked.complaint.assigned_to.as_deref(), Some("Crew 4"));
    assert!(tracked.complaint.resolved_at.is_some());
    assert_eq!(tracked.timeline.len(), 2);
    assert!(tracked.timeline.iter().all(|e| e.is_public));
    assert_eq!(
        tracked.timeline[0].update_message,
        "Status updated from New to Resolved. Assigned to: Crew 4. Fixed"
    );

    let response = server
        .get_auth(&format!("{path}/timeline"), &admin)
        .await
        .unwrap();
    let full: TimelineList = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(full.timeline.len(), 3);
    assert!(full
        .timeline
        .iter()
        .any(|e| !e.is_public && e.update_message == "Internal notes: Replaced the bulb"));

    let response = server
        .put_auth(&path, &admin, &UpdateComplaint::status("Done"))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let response = server
        .put_auth("/api/v1/admin/complaints/999999999", &admin, &UpdateComplaint::status("Closed"))
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_admin_stats_and_listing() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = admin_token(&server).await;
    let created = submit(&server, ComplaintSubmission::unique("anonymous"), None).await;

    let response = server.get_auth("/api/v1/admin/stats", &admin).await.unwrap();
    let envelope: StatsEnvelope = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(envelope.success);
    let stats = envelope.stats;
    assert!(stats.total >= 1);
    assert!(stats.new >= 1);
    assert!(stats.total >= stats.new + stats.pending + stats.resolved + stats.escalated);
    assert!(stats.total >= stats.critical + stats.high_priority);

    let response = server
        .get_auth("/api/v1/admin/complaints", &admin)
        .await
        .unwrap();
    let all: ComplaintList = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(all.complaints.iter().any(|c| c.id == created.complaint_id));
}

#[tokio::test]
async fn test_admin_export() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = admin_token(&server).await;
    let submission = ComplaintSubmission::unique("anonymous");
    let category = submission.category.clone();
    submit(&server, submission, None).await;

    let response = server
        .get_auth(&format!("/api/v1/admin/export?category={category}"), &admin)
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()["content-type"]
        .to_str()
        .unwrap()
        .starts_with("text/csv"));
    assert!(response.headers()["content-disposition"]
        .to_str()
        .unwrap()
        .starts_with("attachment; filename=complaints-"));
    let body = response.text().await.unwrap();
    let mut lines = body.lines();
    assert_eq!(
        lines.next(),
        Some("ID,Title,Category,Description,Priority,Status,Type,Created,Resolved,User Name,User Email")
    );
    assert_eq!(lines.count(), 1);

    let response = server
        .get_auth(
            &format!("/api/v1/admin/export?format=json&status=all&category={category}"),
            &admin,
        )
        .await
        .unwrap();
    let rows: Vec<serde_json::Value> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["category"], category.as_str());
}

#[tokio::test]
async fn test_escalation_rules_and_manual_run() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = admin_token(&server).await;

    let response = server
        .get_auth("/api/v1/admin/escalation-rules", &admin)
        .await
        .unwrap();
    let list: EscalationRuleList = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(list.rules.iter().any(|r| r.urgency_level == "critical"));

    let body = serde_json::json!({ "hoursBeforeEscalation": 0 });
    let response = server
        .put_auth("/api/v1/admin/escalation-rules/low", &admin, &body)
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let low = list.rules.iter().find(|r| r.urgency_level == "low");
    let (hours, active) = low.map_or((168, false), |r| (r.hours_before_escalation, r.is_active));
    let body = serde_json::json!({ "hoursBeforeEscalation": hours, "isActive": active });
    let response = server
        .put_auth("/api/v1/admin/escalation-rules/low", &admin, &body)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .post_empty_auth("/api/v1/admin/escalation/run", &admin)
        .await
        .unwrap();
    let run: EscalationRun = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(run.success);
    if !run.already_running {
        assert!(run.rules_evaluated >= 1);
    }
}
