//! Integration tests for the GameReady backend.

use std::sync::Arc;

use reqwest::Client;
use serde_json::{json, Value};
use tempfile::TempDir;

use crate::config::Config;
use crate::db::{init_database, Repository};
use crate::{create_router, AppState};

/// Test fixture for integration tests.
struct TestFixture {
    client: Client,
    base_url: String,
    _temp_dir: TempDir,
}

impl TestFixture {
    async fn new() -> Self {
        Self::with_psk(Some("test-api-key".to_string())).await
    }

    async fn with_psk(psk: Option<String>) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.sqlite");
        let media_path = temp_dir.path().join("media");

        // Initialize database
        let pool = init_database(&db_path).await.expect("Failed to init DB");
        let repo = Arc::new(Repository::new(pool));

        // Create config
        let config = Config {
            api_psk: psk.clone(),
            db_path,
            media_path,
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            log_level: "warn".to_string(),
        };

        let state = AppState {
            repo,
            config: Arc::new(config),
        };

        let app = create_router(state);

        // Bind to random port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to get addr");
        let base_url = format!("http://{}", addr);

        // Spawn server
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Wait for server to start
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        let mut client_builder = Client::builder();
        if let Some(key) = psk {
            let mut headers = reqwest::header::HeaderMap::new();
            headers.insert("x-api-key", key.parse().unwrap());
            client_builder = client_builder.default_headers(headers);
        }

        TestFixture {
            client: client_builder.build().unwrap(),
            base_url,
            _temp_dir: temp_dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Create a team and return (id, joinCode).
    async fn create_team(&self, name: &str) -> (String, String) {
        let resp = self
            .client
            .post(self.url("/api/teams"))
            .json(&json!({ "name": name }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
        let body: Value = resp.json().await.unwrap();
        (
            body["data"]["id"].as_str().unwrap().to_string(),
            body["data"]["joinCode"].as_str().unwrap().to_string(),
        )
    }

    /// Create a user and return its id.
    async fn create_user(&self, username: &str, role: &str, team_id: Option<&str>) -> String {
        let mut payload = json!({ "username": username, "role": role });
        if let Some(team_id) = team_id {
            payload["teamId"] = json!(team_id);
        }
        let resp = self
            .client
            .post(self.url("/api/users"))
            .json(&payload)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
        let body: Value = resp.json().await.unwrap();
        body["data"]["id"].as_str().unwrap().to_string()
    }

    /// Submit a report with the given metrics for a date.
    async fn submit_report(
        &self,
        athlete_id: &str,
        date: &str,
        metrics: [u8; 7],
    ) -> reqwest::Response {
        self.client
            .post(self.url("/api/reports"))
            .json(&json!({
                "athleteId": athlete_id,
                "reportDate": date,
                "sleepQuality": metrics[0],
                "energyFatigue": metrics[1],
                "muscleSoreness": metrics[2],
                "moodStress": metrics[3],
                "motivation": metrics[4],
                "nutritionQuality": metrics[5],
                "hydration": metrics[6]
            }))
            .send()
            .await
            .unwrap()
    }
}

#[tokio::test]
async fn test_health_check() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), "OK");
}

#[tokio::test]
async fn test_auth_missing_psk() {
    let fixture = TestFixture::with_psk(Some("secret-key".to_string())).await;

    // Request without API key
    let client = Client::new();
    let resp = client
        .get(format!("{}/api/teams", fixture.base_url))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 401);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");

    // Wrong key is also rejected
    let resp = client
        .get(format!("{}/api/teams", fixture.base_url))
        .header("x-api-key", "wrong-key")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);
}

#[tokio::test]
async fn test_auth_valid_psk() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/api/teams"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn test_user_registration_creates_profile() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .post(fixture.url("/api/users"))
        .json(&json!({ "username": "jess", "email": "jess@example.com" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();

    // The profile exists immediately, with athlete defaults
    assert_eq!(body["data"]["role"], "ATHLETE");
    assert_eq!(body["data"]["currentStatus"], "AVAILABLE");
    assert_eq!(body["data"]["timezone"], "UTC");
    assert_eq!(body["data"]["dailyReminderEnabled"], true);

    // Empty username is rejected
    let resp = fixture
        .client
        .post(fixture.url("/api/users"))
        .json(&json!({ "username": "  " }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    // Duplicate usernames conflict
    fixture.create_user("taken", "COACH", None).await;
    let resp = fixture
        .client
        .post(fixture.url("/api/users"))
        .json(&json!({ "username": "taken" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 409);
}

#[tokio::test]
async fn test_team_crud() {
    let fixture = TestFixture::new().await;

    let (team_id, join_code) = fixture.create_team("Harriers").await;

    // Join codes are six uppercase alphanumeric characters
    assert_eq!(join_code.len(), 6);
    assert!(join_code
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));

    // Update settings
    let resp = fixture
        .client
        .put(fixture.url(&format!("/api/teams/{}", team_id)))
        .json(&json!({ "targetReadiness": 75, "logoDisplayMode": "HEADER" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["targetReadiness"], 75);
    assert_eq!(body["data"]["logoDisplayMode"], "HEADER");

    // Out-of-range target rejected
    let resp = fixture
        .client
        .put(fixture.url(&format!("/api/teams/{}", team_id)))
        .json(&json!({ "targetReadiness": 101 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    // Delete
    let resp = fixture
        .client
        .delete(fixture.url(&format!("/api/teams/{}", team_id)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let resp = fixture
        .client
        .get(fixture.url(&format!("/api/teams/{}", team_id)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn test_join_flow() {
    let fixture = TestFixture::new().await;

    let (team_id, join_code) = fixture.create_team("Rovers").await;
    let athlete_id = fixture.create_user("ana", "ATHLETE", None).await;

    // Codes are normalized: lowercase with whitespace still joins
    let resp = fixture
        .client
        .post(fixture.url("/api/teams/join"))
        .json(&json!({ "code": format!("  {}  ", join_code.to_lowercase()), "userId": athlete_id }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["teamId"], team_id.as_str());
    assert!(body["data"]["teamIds"]
        .as_array()
        .unwrap()
        .iter()
        .any(|t| t.as_str() == Some(team_id.as_str())));

    // Malformed codes are rejected by the format check
    let resp = fixture
        .client
        .post(fixture.url("/api/teams/join"))
        .json(&json!({ "code": "ab!", "userId": athlete_id }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "MALFORMED_JOIN_CODE");

    // Well-formed but unknown codes are a not-found failure
    let resp = fixture
        .client
        .post(fixture.url("/api/teams/join"))
        .json(&json!({ "code": "ZZZZ99", "userId": athlete_id }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "JOIN_CODE_NOT_FOUND");
}

#[tokio::test]
async fn test_join_code_regeneration() {
    let fixture = TestFixture::new().await;

    let (team_id, old_code) = fixture.create_team("Wanderers").await;
    let athlete_id = fixture.create_user("ben", "ATHLETE", None).await;

    let resp = fixture
        .client
        .post(fixture.url(&format!("/api/teams/{}/join-code", team_id)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    let new_code = body["data"]["joinCode"].as_str().unwrap().to_string();
    assert_ne!(new_code, old_code);

    // The old code stops working
    let resp = fixture
        .client
        .post(fixture.url("/api/teams/join"))
        .json(&json!({ "code": old_code, "userId": athlete_id }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    // The new one works
    let resp = fixture
        .client
        .post(fixture.url("/api/teams/join"))
        .json(&json!({ "code": new_code, "userId": athlete_id }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn test_tag_ownership_enforced_on_schedule_writes() {
    let fixture = TestFixture::new().await;

    let (team_a, _) = fixture.create_team("Alpha").await;
    let (team_b, _) = fixture.create_team("Beta").await;

    // Tag owned by team A
    let resp = fixture
        .client
        .post(fixture.url(&format!("/api/teams/{}/tags", team_a)))
        .json(&json!({ "name": "Game Day", "targetMin": 75, "targetMax": 90 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    let tag_a = body["data"]["id"].as_str().unwrap().to_string();

    // Assigning it into team B's schedule is rejected
    let resp = fixture
        .client
        .put(fixture.url(&format!("/api/teams/{}/schedule/day", team_b)))
        .json(&json!({ "weekday": "Mon", "tagId": tag_a }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "TAG_OWNERSHIP_MISMATCH");

    // Team A itself can schedule it
    let resp = fixture
        .client
        .put(fixture.url(&format!("/api/teams/{}/schedule/day", team_a)))
        .json(&json!({ "weekday": "Mon", "tagId": tag_a }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn test_schedule_override_precedence() {
    let fixture = TestFixture::new().await;

    let (team_id, _) = fixture.create_team("Celtic").await;

    let make_tag = |name: &str| {
        let fixture = &fixture;
        let team_id = team_id.clone();
        let name = name.to_string();
        async move {
            let resp = fixture
                .client
                .post(fixture.url(&format!("/api/teams/{}/tags", team_id)))
                .json(&json!({ "name": name }))
                .send()
                .await
                .unwrap();
            let body: Value = resp.json().await.unwrap();
            body["data"]["id"].as_str().unwrap().to_string()
        }
    };
    let tag_a = make_tag("Training").await;
    let tag_b = make_tag("Game Day").await;

    // Weekly pattern: Mondays are training days
    fixture
        .client
        .put(fixture.url(&format!("/api/teams/{}/schedule/day", team_id)))
        .json(&json!({ "weekday": "Mon", "tagId": tag_a }))
        .send()
        .await
        .unwrap();

    // Override 2025-12-25 (a Thursday) as a game day
    fixture
        .client
        .put(fixture.url(&format!("/api/teams/{}/schedule/day", team_id)))
        .json(&json!({ "date": "2025-12-25", "tagId": tag_b }))
        .send()
        .await
        .unwrap();

    let resolve = |date: &str| {
        let fixture = &fixture;
        let team_id = team_id.clone();
        let date = date.to_string();
        async move {
            let resp = fixture
                .client
                .get(fixture.url(&format!(
                    "/api/teams/{}/schedule/resolve?date={}",
                    team_id, date
                )))
                .send()
                .await
                .unwrap();
            assert_eq!(resp.status(), 200);
            let body: Value = resp.json().await.unwrap();
            body["data"].clone()
        }
    };

    // The override wins on its date; Mondays still follow the pattern
    let day = resolve("2025-12-25").await;
    assert_eq!(day["tag"]["id"], tag_b.as_str());
    let day = resolve("2025-12-22").await;
    assert_eq!(day["tag"]["id"], tag_a.as_str());

    // An explicit null override clears a patterned Monday
    fixture
        .client
        .put(fixture.url(&format!("/api/teams/{}/schedule/day", team_id)))
        .json(&json!({ "date": "2025-12-22", "tagId": null }))
        .send()
        .await
        .unwrap();
    let day = resolve("2025-12-22").await;
    assert!(day["tag"].is_null());
    // Untouched Mondays keep the pattern tag
    let day = resolve("2025-12-29").await;
    assert_eq!(day["tag"]["id"], tag_a.as_str());
}

#[tokio::test]
async fn test_tag_delete_purges_schedule() {
    let fixture = TestFixture::new().await;

    let (team_id, _) = fixture.create_team("United").await;

    let resp = fixture
        .client
        .post(fixture.url(&format!("/api/teams/{}/tags", team_id)))
        .json(&json!({ "name": "Rest" }))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    let tag_id = body["data"]["id"].as_str().unwrap().to_string();

    // Schedule it on a weekday and a specific date
    for payload in [
        json!({ "weekday": "Wed", "tagId": tag_id }),
        json!({ "date": "2025-11-05", "tagId": tag_id }),
    ] {
        let resp = fixture
            .client
            .put(fixture.url(&format!("/api/teams/{}/schedule/day", team_id)))
            .json(&payload)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
    }

    // Delete the tag
    let resp = fixture
        .client
        .delete(fixture.url(&format!("/api/teams/{}/tags/{}", team_id, tag_id)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    // Both mappings were purged
    let resp = fixture
        .client
        .get(fixture.url(&format!("/api/teams/{}/schedule", team_id)))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert!(body["data"]["weeklyPattern"]
        .as_object()
        .unwrap()
        .is_empty());
    assert!(body["data"]["dateOverrides"]
        .as_object()
        .unwrap()
        .is_empty());

    // Resolution is a clean "no tag", not an error
    let resp = fixture
        .client
        .get(fixture.url(&format!(
            "/api/teams/{}/schedule/resolve?date=2025-11-05",
            team_id
        )))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert!(body["data"]["tag"].is_null());
}

#[tokio::test]
async fn test_report_submission_scores_and_conflicts() {
    let fixture = TestFixture::new().await;

    let (team_id, _) = fixture.create_team("Saints").await;
    let athlete_id = fixture
        .create_user("mia", "ATHLETE", Some(team_id.as_str()))
        .await;

    // Pinned scoring scenario
    let resp = fixture
        .submit_report(&athlete_id, "2025-03-10", [8, 6, 5, 7, 9, 6, 7])
        .await;
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["readinessScore"], 65);

    // Second report for the same day conflicts
    let resp = fixture
        .submit_report(&athlete_id, "2025-03-10", [5, 5, 5, 5, 5, 5, 5])
        .await;
    assert_eq!(resp.status(), 409);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "CONFLICT");

    // Out-of-range metrics never reach the scorer
    let resp = fixture
        .submit_report(&athlete_id, "2025-03-11", [11, 5, 5, 5, 5, 5, 5])
        .await;
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    // Coaches cannot submit reports
    let coach_id = fixture
        .create_user("coach", "COACH", Some(team_id.as_str()))
        .await;
    let resp = fixture
        .submit_report(&coach_id, "2025-03-10", [5, 5, 5, 5, 5, 5, 5])
        .await;
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn test_report_boundary_scores() {
    let fixture = TestFixture::new().await;

    let athlete_id = fixture.create_user("kim", "ATHLETE", None).await;

    let resp = fixture
        .submit_report(&athlete_id, "2025-04-01", [1, 1, 1, 1, 1, 1, 1])
        .await;
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["readinessScore"], 0);

    let resp = fixture
        .submit_report(&athlete_id, "2025-04-02", [10, 10, 10, 10, 10, 10, 10])
        .await;
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["readinessScore"], 100);
}

#[tokio::test]
async fn test_report_update_recomputes_score() {
    let fixture = TestFixture::new().await;

    let athlete_id = fixture.create_user("leo", "ATHLETE", None).await;

    let resp = fixture
        .submit_report(&athlete_id, "2025-05-01", [5, 5, 5, 5, 5, 5, 5])
        .await;
    let body: Value = resp.json().await.unwrap();
    let report_id = body["data"]["id"].as_str().unwrap().to_string();

    let resp = fixture
        .client
        .put(fixture.url(&format!("/api/reports/{}", report_id)))
        .json(&json!({
            "sleepQuality": 10, "energyFatigue": 10, "muscleSoreness": 10,
            "moodStress": 10, "motivation": 10, "nutritionQuality": 10, "hydration": 10
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["readinessScore"], 100);
}

#[tokio::test]
async fn test_coach_dashboard_aggregates() {
    let fixture = TestFixture::new().await;

    let (team_id, _) = fixture.create_team("City").await;
    let a1 = fixture
        .create_user("athlete1", "ATHLETE", Some(team_id.as_str()))
        .await;
    let a2 = fixture
        .create_user("athlete2", "ATHLETE", Some(team_id.as_str()))
        .await;
    let a3 = fixture
        .create_user("athlete3", "ATHLETE", Some(team_id.as_str()))
        .await;

    // Scores: 100 and 0 on the selected date; athlete3 never reports
    fixture
        .submit_report(&a1, "2025-06-10", [10, 10, 10, 10, 10, 10, 10])
        .await;
    fixture
        .submit_report(&a2, "2025-06-10", [1, 1, 1, 1, 1, 1, 1])
        .await;

    let resp = fixture
        .client
        .get(fixture.url(&format!(
            "/api/teams/{}/dashboard?date=2025-06-10",
            team_id
        )))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    let data = &body["data"];

    assert_eq!(data["teamAverage"], 50);
    // Default team target 100 gives a 95-100 band: one above/in, one below
    assert_eq!(data["targetRange"]["min"], 95);
    assert_eq!(data["targetRange"]["max"], 100);
    assert_eq!(data["inTarget"], 1);
    assert_eq!(data["belowTarget"], 1);
    assert_eq!(data["aboveTarget"], 0);
    // 2 of 3 athletes reported
    assert_eq!(data["compliancePct"], 67);

    // Squad is sorted worst-first, non-submitters last
    let squad = data["squad"].as_array().unwrap();
    assert_eq!(squad.len(), 3);
    assert_eq!(squad[0]["readiness"], 0);
    assert_eq!(squad[1]["readiness"], 100);
    assert_eq!(squad[2]["submitted"], false);
    assert_eq!(squad[2]["pill"], "NON_COMPLIANT");
    assert_eq!(squad[2]["athleteId"], a3.as_str());

    // All-1 metrics trip the rest pill
    assert_eq!(squad[0]["pill"], "REST");

    // Insights cover all seven metrics
    assert_eq!(data["insights"].as_array().unwrap().len(), 7);
}

#[tokio::test]
async fn test_player_overview() {
    let fixture = TestFixture::new().await;

    let athlete_id = fixture.create_user("noa", "ATHLETE", None).await;

    let today = chrono::Utc::now().date_naive();
    let resp = fixture
        .submit_report(&athlete_id, &today.to_string(), [8, 6, 5, 7, 9, 6, 7])
        .await;
    assert_eq!(resp.status(), 200);

    let resp = fixture
        .client
        .get(fixture.url(&format!("/api/users/{}/overview", athlete_id)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    let data = &body["data"];

    assert_eq!(data["todayScore"], 65);
    assert_eq!(data["streak"], 1);
    assert_eq!(data["series"].as_array().unwrap().len(), 7);
    // Soreness (5) is the limiter today
    assert_eq!(data["attentionMetric"]["key"], "muscle_soreness");
    assert_eq!(data["bestMetric"]["key"], "motivation");
    assert!(data["feedback"].is_string());
    // Fewer than 3 reports in the window: no baseline yet
    assert!(data["baseline"].is_null());

    // Coaches have no overview
    let coach_id = fixture.create_user("boss", "COACH", None).await;
    let resp = fixture
        .client
        .get(fixture.url(&format!("/api/users/{}/overview", coach_id)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn test_labels_unique_per_day() {
    let fixture = TestFixture::new().await;

    let athlete_id = fixture.create_user("pat", "ATHLETE", None).await;

    let resp = fixture
        .client
        .post(fixture.url(&format!("/api/users/{}/labels", athlete_id)))
        .json(&json!({ "labelDate": "2025-07-01", "label": "Gym session" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    // Second label for the same day conflicts
    let resp = fixture
        .client
        .post(fixture.url(&format!("/api/users/{}/labels", athlete_id)))
        .json(&json!({ "labelDate": "2025-07-01", "label": "Physio" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 409);

    // Update rewrites the text
    let resp = fixture
        .client
        .put(fixture.url(&format!(
            "/api/users/{}/labels/2025-07-01",
            athlete_id
        )))
        .json(&json!({ "label": "Physio" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["label"], "Physio");

    // Delete then list is empty
    let resp = fixture
        .client
        .delete(fixture.url(&format!(
            "/api/users/{}/labels/2025-07-01",
            athlete_id
        )))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let resp = fixture
        .client
        .get(fixture.url(&format!(
            "/api/users/{}/labels?from=2025-07-01&to=2025-07-31",
            athlete_id
        )))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_feature_request_upvote_toggle() {
    let fixture = TestFixture::new().await;

    let user_id = fixture.create_user("sam", "ATHLETE", None).await;

    let resp = fixture
        .client
        .post(fixture.url("/api/feature-requests"))
        .json(&json!({
            "userId": user_id,
            "title": "Dark mode",
            "description": "Please add a dark theme for evening check-ins."
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    let request_id = body["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["status"], "OPEN");
    assert_eq!(body["data"]["upvoteCount"], 0);

    // First toggle upvotes
    let resp = fixture
        .client
        .post(fixture.url(&format!("/api/feature-requests/{}/upvote", request_id)))
        .json(&json!({ "userId": user_id }))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["upvoted"], true);
    assert_eq!(body["data"]["upvoteCount"], 1);

    // Second toggle removes it
    let resp = fixture
        .client
        .post(fixture.url(&format!("/api/feature-requests/{}/upvote", request_id)))
        .json(&json!({ "userId": user_id }))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["upvoted"], false);
    assert_eq!(body["data"]["upvoteCount"], 0);

    // Status moves through the lifecycle, and comments attach
    let resp = fixture
        .client
        .put(fixture.url(&format!("/api/feature-requests/{}/status", request_id)))
        .json(&json!({ "status": "IN_PROGRESS" }))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["status"], "IN_PROGRESS");

    let resp = fixture
        .client
        .post(fixture.url(&format!(
            "/api/feature-requests/{}/comments",
            request_id
        )))
        .json(&json!({ "userId": user_id, "comment": "Working on it." }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn test_logo_upload_sniffing() {
    let fixture = TestFixture::new().await;

    let (team_id, _) = fixture.create_team("Dynamo").await;

    // A well-formed PNG header passes the sniff
    let png_bytes: Vec<u8> = vec![0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0, 0, 0, 0];
    let form = reqwest::multipart::Form::new().part(
        "logo",
        reqwest::multipart::Part::bytes(png_bytes).file_name("crest.png"),
    );
    let resp = fixture
        .client
        .post(fixture.url(&format!("/api/teams/{}/logo", team_id)))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    let logo_path = body["data"]["logoPath"].as_str().unwrap();
    assert!(logo_path.starts_with("team_logos/"));
    assert!(logo_path.contains("crest.png"));

    // Content that only pretends to be an image is rejected
    let form = reqwest::multipart::Form::new().part(
        "logo",
        reqwest::multipart::Part::bytes(b"#!/bin/sh".to_vec()).file_name("evil.png"),
    );
    let resp = fixture
        .client
        .post(fixture.url(&format!("/api/teams/{}/logo", team_id)))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 415);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "UNSUPPORTED_MEDIA_TYPE");
}

#[tokio::test]
async fn test_not_found_errors() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/api/users/non-existent-id"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "NOT_FOUND");

    let resp = fixture
        .client
        .get(fixture.url("/api/teams/non-existent-id/dashboard?date=2025-01-01"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}
