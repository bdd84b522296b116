use crate::domain::model::{CaseStudy, PageEntry, ServiceDescriptor};
use crate::utils::error::{Result, SiteError};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::path::Path;

const BUILTIN_CATALOG: &str = include_str!("../../data/catalog.toml");

/// Static site content: case studies, services and searchable pages.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub case_studies: Vec<CaseStudy>,
    #[serde(default)]
    pub services: Vec<ServiceDescriptor>,
    #[serde(default)]
    pub pages: Vec<PageEntry>,
}

impl Catalog {
    /// 從 TOML 檔案載入並驗證目錄
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SiteError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析並驗證目錄
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let catalog: Catalog = toml::from_str(content).map_err(|e| SiteError::CatalogError {
            message: format!("TOML parsing error: {}", e),
        })?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// The catalog compiled into the binary.
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_CATALOG)
    }

    pub fn case_study(&self, id: &str) -> Option<&CaseStudy> {
        self.case_studies.iter().find(|c| c.id == id)
    }

    pub fn service(&self, slug: &str) -> Option<&ServiceDescriptor> {
        self.services.iter().find(|s| s.slug == slug)
    }

    /// Distinct case-study categories, alphabetically.
    pub fn categories(&self) -> Vec<String> {
        self.case_studies
            .iter()
            .map(|c| c.category.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

impl Validate for Catalog {
    fn validate(&self) -> Result<()> {
        let mut ids = HashSet::new();
        for case in &self.case_studies {
            if case.id.trim().is_empty() || case.title.trim().is_empty() {
                return Err(SiteError::CatalogError {
                    message: format!("case study '{}' needs a non-empty id and title", case.id),
                });
            }
            if !ids.insert(case.id.as_str()) {
                return Err(SiteError::CatalogError {
                    message: format!("duplicate case study id: {}", case.id),
                });
            }
        }

        let mut slugs = HashSet::new();
        for service in &self.services {
            if service.slug.trim().is_empty() || service.title.trim().is_empty() {
                return Err(SiteError::CatalogError {
                    message: format!("service '{}' needs a non-empty slug and title", service.slug),
                });
            }
            if !slugs.insert(service.slug.as_str()) {
                return Err(SiteError::CatalogError {
                    message: format!("duplicate service slug: {}", service.slug),
                });
            }
        }

        Ok(())
    }
}
