//! Bilingual catalog resources: departments and job titles.
//!
//! Both carry the same shape (English/Arabic name and description plus a
//! creation stamp), so one payload struct serves both endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::Resource;

/// Department as served by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct Department {
    pub id: i64,
    pub name_en: String,
    pub name_ar: String,
    pub description_en: Option<String>,
    pub description_ar: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Resource for Department {
    const PATH: &'static str = "departments";
    const LABEL: &'static str = "department";
}

/// Job title as served by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct JobTitle {
    pub id: i64,
    pub name_en: String,
    pub name_ar: String,
    pub description_en: Option<String>,
    pub description_ar: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Resource for JobTitle {
    const PATH: &'static str = "job-titles";
    const LABEL: &'static str = "job title";
}

/// Payload for creating or updating a department or job title.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogPayload {
    pub name_en: String,
    pub name_ar: String,
    pub description_en: Option<String>,
    pub description_ar: Option<String>,
}
