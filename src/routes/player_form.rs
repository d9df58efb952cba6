use actix_web::{error, http::StatusCode, web, HttpRequest, HttpResponse, Responder};
use crate::core::{escape_html, ResultElement, SubmissionHandler, SubmitEvent};
use crate::models::{ErrorResponse, FormFields, HealthResponse};
use crate::services::{ClusterApi, HttpClusterApi};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub api: Arc<HttpClusterApi>,
}

/// Error body for rejected form payloads
#[derive(Debug)]
pub struct FormPayloadError(ErrorResponse);

impl std::fmt::Display for FormPayloadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.0.error, self.0.message)
    }
}

impl error::ResponseError for FormPayloadError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::from_u16(self.0.status_code).unwrap_or(StatusCode::BAD_REQUEST))
            .json(&self.0)
    }
}

/// Handle urlencoded form payload errors
pub fn handle_form_payload_error(err: error::UrlencodedError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("Form payload error on {}: {}", req.path(), err);
    FormPayloadError(ErrorResponse {
        error: "invalid_form".to_string(),
        message: format!("Invalid form: {}", err),
        status_code: 400,
    })
    .into()
}

/// Configure the form page and health routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .app_data(web::FormConfig::default().error_handler(handle_form_payload_error))
        .route("/", web::get().to(form_page))
        .route("/player-form", web::post().to(submit_form))
        .route("/api/v1/health", web::get().to(health_check));
}

/// Health check endpoint
///
/// Reports `degraded` when the clustering API cannot be reached.
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let status = match state.api.ping().await {
        Ok(()) => "healthy",
        Err(e) => {
            tracing::warn!("Clustering API unreachable: {}", e);
            "degraded"
        }
    };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Empty player form
async fn form_page() -> impl Responder {
    html(render_page(&FormFields::default(), ""))
}

/// Form submission
///
/// POST /player-form (application/x-www-form-urlencoded, one field per
/// element id). Answers with the page, fields preserved and the result
/// element filled in.
///
/// Every request gets its own page and result element, so a handler is
/// built per request and its stale-response guard never has a rival
/// submission to drop. The guard matters for hosts that keep one
/// [`SubmissionHandler`] alive across submissions of the same page.
async fn submit_form(
    state: web::Data<AppState>,
    fields: web::Form<FormFields>,
) -> impl Responder {
    let fields = fields.into_inner();
    let element = ResultElement::new();
    let api: Arc<dyn ClusterApi> = state.api.clone();
    let handler = SubmissionHandler::new(api, Arc::new(element.clone()));

    tracing::info!("Player form submitted (level: {:?})", fields.level);

    let mut event = SubmitEvent::new();
    handler.on_submit(&mut event, &fields).await;

    html(render_page(&fields, &element.content()))
}

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body)
}

/// Full player form page with `result_html` inside the `result` element
pub fn render_page(fields: &FormFields, result_html: &str) -> String {
    let input = |id: &str, label: &str, placeholder: &str| {
        format!(
            r#"<label for="{id}">{label}</label><input id="{id}" name="{id}" placeholder="{placeholder}" value="{value}"><br>"#,
            id = id,
            label = label,
            placeholder = escape_html(placeholder),
            value = escape_html(fields.value(id).unwrap_or_default()),
        )
    };

    format!(
        concat!(
            "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>Player Clustering</title></head><body>",
            "<h1>Find Similar Players</h1>",
            "<form id=\"playerForm\" method=\"post\" action=\"/player-form\">",
            "{services}{level}{rank}{budget}{travel}{goals}{languages}",
            "<button type=\"submit\">Submit</button></form>",
            "<div id=\"result\">{result}</div>",
            "</body></html>"
        ),
        services = input("desiredServices", "Desired services", r#"["coaching"]"#),
        level = input("level", "Level", "beginner"),
        rank = input("rank", "Rank", "50"),
        budget = input("budget", "Max budget per session", "40"),
        travel = input("travel", "Travel distance", "10"),
        goals = input("goals", "Goals", r#"["fitness"]"#),
        languages = input("languages", "Languages", r#"["English"]"#),
        result = result_html,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::ClusterEndpoints;
    use actix_web::{test, App};
    use std::time::Duration;

    fn state(base_url: String) -> AppState {
        AppState {
            api: Arc::new(
                HttpClusterApi::new(base_url, ClusterEndpoints::default(), Duration::from_secs(5))
                    .unwrap(),
            ),
        }
    }

    #[::core::prelude::v1::test]
    fn test_page_preserves_escaped_values() {
        let fields = FormFields {
            goals: r#"["win"]"#.to_string(),
            ..Default::default()
        };

        let page = render_page(&fields, "<p>done</p>");

        assert!(page.contains(r#"id="playerForm""#));
        assert!(page.contains(r#"value="[&quot;win&quot;]""#));
        assert!(page.contains(r#"<div id="result"><p>done</p></div>"#));
    }

    #[actix_web::test]
    async fn test_submit_renders_cluster_into_page() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/cluster-player")
            .match_header("content-type", "application/json")
            .with_header("content-type", "application/json")
            .with_body(r#"{"cluster": 1, "recommendedPlayers": [{"id": "p7", "level": "beginner", "rank": 12, "maxBudgetPerSession": 35}]}"#)
            .create_async()
            .await;

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state(server.url())))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/player-form")
            .set_form([
                ("desiredServices", r#"["coaching"]"#),
                ("level", "beginner"),
                ("rank", "12"),
                ("budget", "35"),
                ("travel", "4"),
                ("goals", r#"["fitness"]"#),
                ("languages", r#"["English"]"#),
            ])
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        let page = String::from_utf8(body.to_vec()).unwrap();

        mock.assert_async().await;
        assert!(page.contains("Predicted Cluster:</strong> 1</p>"));
        assert!(page.contains("<li>p7 - Level: beginner, Rank: 12, Budget: $35</li>"));
    }

    #[actix_web::test]
    async fn test_health_degraded_when_api_down() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state("http://127.0.0.1:1".to_string())))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/v1/health").to_request();
        let health: HealthResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(health.status, "degraded");
    }

    #[actix_web::test]
    async fn test_health_healthy_when_api_answers() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .with_status(404)
            .create_async()
            .await;

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state(server.url())))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/v1/health").to_request();
        let health: HealthResponse = test::call_and_read_body_json(&app, req).await;

        mock.assert_async().await;
        assert_eq!(health.status, "healthy");
        assert_eq!(health.version, env!("CARGO_PKG_VERSION"));
    }

    #[actix_web::test]
    async fn test_non_urlencoded_submission_is_rejected_as_json() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state("http://127.0.0.1:1".to_string())))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/player-form")
            .insert_header(("content-type", "application/json"))
            .set_payload(r#"{"level": "beginner"}"#)
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(body.error, "invalid_form");
        assert_eq!(body.status_code, 400);
        assert!(body.message.starts_with("Invalid form:"));
    }

    #[actix_web::test]
    async fn test_each_submission_renders_its_own_result() {
        let mut server = mockito::Server::new_async().await;
        let _beginner = server
            .mock("POST", "/cluster-player")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({ "level": "beginner" })))
            .with_body(r#"{"cluster": 0, "recommendedPlayers": []}"#)
            .create_async()
            .await;
        let _pro = server
            .mock("POST", "/cluster-player")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({ "level": "professional" })))
            .with_body(r#"{"cluster": 3, "recommendedPlayers": []}"#)
            .create_async()
            .await;

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state(server.url())))
                .configure(configure),
        )
        .await;

        let submit = |level: &'static str| {
            test::TestRequest::post()
                .uri("/player-form")
                .set_form([
                    ("desiredServices", "[]"),
                    ("level", level),
                    ("rank", "1"),
                    ("budget", "1"),
                    ("travel", "1"),
                    ("goals", "[]"),
                    ("languages", "[]"),
                ])
                .to_request()
        };

        let first = test::call_and_read_body(&app, submit("beginner")).await;
        let second = test::call_and_read_body(&app, submit("professional")).await;

        let first = String::from_utf8(first.to_vec()).unwrap();
        let second = String::from_utf8(second.to_vec()).unwrap();
        assert!(first.contains("Predicted Cluster:</strong> 0</p>"));
        assert!(second.contains("Predicted Cluster:</strong> 3</p>"));
    }
}
