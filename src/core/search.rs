use crate::core::catalog::Catalog;
use crate::domain::model::{CaseStudy, HitKind, PageEntry, SearchHit, ServiceDescriptor};

pub const DEFAULT_LIMIT: usize = 20;
pub const MAX_LIMIT: usize = 100;

/// Lowercased, trimmed search needle. `None` for blank queries.
pub fn normalize_query(query: &str) -> Option<String> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

fn any_contains(values: &[String], needle: &str) -> bool {
    values.iter().any(|v| contains(v, needle))
}

/// `needle` must already be normalized.
pub fn case_matches(case: &CaseStudy, needle: &str) -> bool {
    contains(&case.title, needle)
        || contains(&case.description, needle)
        || any_contains(&case.tags, needle)
        || contains(&case.company, needle)
        || any_contains(&case.technologies, needle)
}

fn service_matches(service: &ServiceDescriptor, needle: &str) -> bool {
    contains(&service.title, needle)
        || contains(&service.description, needle)
        || any_contains(&service.benefits, needle)
}

fn page_matches(page: &PageEntry, needle: &str) -> bool {
    contains(&page.title, needle)
        || contains(&page.description, needle)
        || any_contains(&page.keywords, needle)
}

/// Case-insensitive substring search over the whole catalog.
///
/// Hits are grouped case studies first, then services, then pages, each in
/// catalog order, and truncated to `limit` (clamped to `1..=MAX_LIMIT`).
pub fn search(catalog: &Catalog, query: &str, limit: Option<usize>) -> Vec<SearchHit> {
    let Some(needle) = normalize_query(query) else {
        return Vec::new();
    };
    let limit = limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);

    let cases = catalog
        .case_studies
        .iter()
        .filter(|c| case_matches(c, &needle))
        .map(|c| SearchHit {
            kind: HitKind::CaseStudy,
            id: c.id.clone(),
            title: c.title.clone(),
            description: c.description.clone(),
            url: format!("/cases/{}", c.id),
        });

    let services = catalog
        .services
        .iter()
        .filter(|s| service_matches(s, &needle))
        .map(|s| SearchHit {
            kind: HitKind::Service,
            id: s.slug.clone(),
            title: s.title.clone(),
            description: s.description.clone(),
            url: format!("/services/{}", s.slug),
        });

    let pages = catalog
        .pages
        .iter()
        .filter(|p| page_matches(p, &needle))
        .map(|p| SearchHit {
            kind: HitKind::Page,
            id: p.path.clone(),
            title: p.title.clone(),
            description: p.description.clone(),
            url: p.path.clone(),
        });

    let hits: Vec<SearchHit> = cases.chain(services).chain(pages).take(limit).collect();
    tracing::debug!("Search '{}' matched {} hits", needle, hits.len());
    hits
}
