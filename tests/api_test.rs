use agency_site::adapters::webhook::{ConfiguredSink, LoggingLeadSink};
use agency_site::app::routes::{CaseListResponse, SearchResponse};
use agency_site::domain::model::{CaseStudy, ContactResponse, HitKind};
use agency_site::{router, AppState, Catalog};
use anyhow::Result;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde::de::DeserializeOwned;
use tower::ServiceExt;

fn app() -> Router {
    let catalog = Catalog::builtin().expect("builtin catalog");
    let state = AppState::new(
        catalog,
        ConfiguredSink::Logging(LoggingLeadSink),
        "website",
        None,
    );
    router(state)
}

async fn get(app: Router, uri: &str) -> Result<(StatusCode, Vec<u8>)> {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty())?)
        .await?;
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    Ok((status, bytes.to_vec()))
}

async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Result<(StatusCode, Vec<u8>)> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))?;
    let response = app.oneshot(request).await?;
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    Ok((status, bytes.to_vec()))
}

fn parse<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    Ok(serde_json::from_slice(bytes)?)
}

/// 聯絡表單缺少必要欄位時回傳 400
#[tokio::test]
async fn test_contact_missing_required_fields_returns_400() -> Result<()> {
    for body in [
        serde_json::json!({"email": "jane@example.com", "message": "hi"}),
        serde_json::json!({"name": "Jane", "message": "hi"}),
        serde_json::json!({"name": "Jane", "email": "jane@example.com"}),
        serde_json::json!({}),
    ] {
        let (status, bytes) = post_json(app(), "/api/contact", body).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let response: ContactResponse = parse(&bytes)?;
        assert!(!response.success);
        assert!(response.message.starts_with("Missing required fields"));
    }
    Ok(())
}

#[tokio::test]
async fn test_contact_malformed_json_returns_400() -> Result<()> {
    let request = Request::builder()
        .method("POST")
        .uri("/api/contact")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))?;
    let response = app().oneshot(request).await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn test_contact_accepted_without_webhook() -> Result<()> {
    let body = serde_json::json!({
        "name": "Jane Doe",
        "email": "jane@example.com",
        "company": "Acme",
        "phone": "+1 555 0100",
        "message": "We need an app.",
        "interest": "mobile-apps"
    });
    let (status, bytes) = post_json(app(), "/api/contact", body).await?;
    assert_eq!(status, StatusCode::OK);

    let response: ContactResponse = parse(&bytes)?;
    assert!(response.success);
    Ok(())
}

/// 搜尋：標籤、標題、描述的子字串（不分大小寫）都能命中
#[tokio::test]
async fn test_search_matches_tag_title_and_description() -> Result<()> {
    for query in ["FinTech", "digital onboarding", "identity verification"] {
        let uri = format!("/api/search?q={}", query.replace(' ', "%20"));
        let (status, bytes) = get(app(), &uri).await?;
        assert_eq!(status, StatusCode::OK);

        let response: SearchResponse = parse(&bytes)?;
        assert!(
            response
                .results
                .iter()
                .any(|h| h.kind == HitKind::CaseStudy && h.id == "fintech-onboarding"),
            "query '{}' should find the fintech case study",
            query
        );
        assert_eq!(response.total, response.results.len());
    }
    Ok(())
}

#[tokio::test]
async fn test_search_empty_query_yields_empty_results() -> Result<()> {
    for uri in ["/api/search", "/api/search?q=", "/api/search?q=%20%20"] {
        let (status, bytes) = get(app(), uri).await?;
        assert_eq!(status, StatusCode::OK);

        let response: SearchResponse = parse(&bytes)?;
        assert!(response.results.is_empty());
        assert_eq!(response.total, 0);
    }
    Ok(())
}

#[tokio::test]
async fn test_search_bad_limit_returns_400() -> Result<()> {
    let (status, _) = get(app(), "/api/search?q=app&limit=lots").await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

/// 案例列表：選擇分類後只回傳該分類
#[tokio::test]
async fn test_case_list_category_filter() -> Result<()> {
    let (status, bytes) = get(app(), "/api/cases?category=Mobile").await?;
    assert_eq!(status, StatusCode::OK);

    let response: CaseListResponse = parse(&bytes)?;
    assert_eq!(response.total, 1);
    assert!(response.cases.iter().all(|c| c.category == "Mobile"));
    assert!(response.categories.contains(&"Automation".to_string()));
    Ok(())
}

#[tokio::test]
async fn test_case_list_all_sorted_by_title() -> Result<()> {
    let (status, bytes) = get(app(), "/api/cases?category=all&sort=title").await?;
    assert_eq!(status, StatusCode::OK);

    let response: CaseListResponse = parse(&bytes)?;
    assert_eq!(response.total, 6);
    let titles: Vec<String> = response.cases.iter().map(|c| c.title.to_lowercase()).collect();
    let mut sorted = titles.clone();
    sorted.sort();
    assert_eq!(titles, sorted);
    Ok(())
}

#[tokio::test]
async fn test_case_list_featured_only() -> Result<()> {
    let (status, bytes) = get(app(), "/api/cases?featured=true").await?;
    assert_eq!(status, StatusCode::OK);

    let response: CaseListResponse = parse(&bytes)?;
    assert_eq!(response.total, 2);
    assert!(response.cases.iter().all(|c| c.featured));
    // 預設依發布日期新到舊
    assert_eq!(response.cases[0].id, "logistics-route-optimizer");
    assert_eq!(response.cases[1].id, "retail-analytics-platform");
    Ok(())
}

#[tokio::test]
async fn test_case_list_unknown_sort_returns_400() -> Result<()> {
    let (status, bytes) = get(app(), "/api/cases?sort=popular").await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let response: ContactResponse = parse(&bytes)?;
    assert!(response.message.contains("Unknown sort order"));
    Ok(())
}

#[tokio::test]
async fn test_case_detail_and_not_found() -> Result<()> {
    let (status, bytes) = get(app(), "/api/cases/crm-lead-automation").await?;
    assert_eq!(status, StatusCode::OK);
    let case: CaseStudy = parse(&bytes)?;
    assert_eq!(case.company, "Atlas Interiors");

    let (status, bytes) = get(app(), "/api/cases/does-not-exist").await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let response: ContactResponse = parse(&bytes)?;
    assert_eq!(response.message, "Case study 'does-not-exist' not found");
    Ok(())
}

#[tokio::test]
async fn test_services_endpoints() -> Result<()> {
    let (status, bytes) = get(app(), "/api/services").await?;
    assert_eq!(status, StatusCode::OK);
    let services: Vec<serde_json::Value> = parse(&bytes)?;
    assert_eq!(services.len(), 4);

    let (status, bytes) = get(app(), "/api/services/business-automation").await?;
    assert_eq!(status, StatusCode::OK);
    let service: serde_json::Value = parse(&bytes)?;
    assert_eq!(service["title"], "Business Automation");
    assert!(!service["faqs"].as_array().unwrap().is_empty());

    let (status, _) = get(app(), "/api/services/catering").await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn test_component_structure_disabled_by_default() -> Result<()> {
    let (status, _) = get(app(), "/api/component-structure").await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn test_health_and_unknown_route() -> Result<()> {
    let (status, bytes) = get(app(), "/health").await?;
    assert_eq!(status, StatusCode::OK);
    let health: serde_json::Value = parse(&bytes)?;
    assert_eq!(health["status"], "up");

    let (status, _) = get(app(), "/api/nope").await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}
