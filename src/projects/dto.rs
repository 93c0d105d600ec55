use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::projects::repo::{Project, ProjectFields};

/// Body for creating or replacing a project. Fields default to empty so an
/// absent field and an empty one fail validation the same way.
#[derive(Debug, Deserialize)]
pub struct ProjectRequest {
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
}

impl ProjectRequest {
    pub fn validate(&self) -> Result<ProjectFields<'_>, ApiError> {
        if self.image_url.is_empty()
            || self.title.is_empty()
            || self.description.is_empty()
            || self.technologies.is_empty()
        {
            return Err(ApiError::Validation("Missing fields"));
        }
        Ok(ProjectFields {
            image_url: &self.image_url,
            title: &self.title,
            description: &self.description,
            technologies: &self.technologies,
        })
    }
}

/// Envelope for responses carrying a single project.
#[derive(Debug, Serialize)]
pub struct ProjectResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub project: Project,
}

/// Envelope for the listing endpoint.
#[derive(Debug, Serialize)]
pub struct ProjectListResponse {
    pub success: bool,
    pub projects: Vec<Project>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_body() -> ProjectRequest {
        ProjectRequest {
            image_url: "https://img.example/p.png".into(),
            title: "Portfolio".into(),
            description: "My site".into(),
            technologies: vec!["rust".into()],
        }
    }

    #[test]
    fn valid_body_passes() {
        assert!(full_body().validate().is_ok());
    }

    #[test]
    fn each_missing_field_fails() {
        for mutate in [
            (|r: &mut ProjectRequest| r.image_url.clear()) as fn(&mut ProjectRequest),
            |r| r.title.clear(),
            |r| r.description.clear(),
            |r| r.technologies.clear(),
        ] {
            let mut body = full_body();
            mutate(&mut body);
            let err = body.validate().unwrap_err();
            assert_eq!(err.to_string(), "Missing fields");
        }
    }

    #[test]
    fn absent_json_fields_deserialize_empty() {
        let body: ProjectRequest = serde_json::from_str(r#"{"title":"x"}"#).unwrap();
        assert!(body.image_url.is_empty());
        assert!(body.technologies.is_empty());
        assert!(body.validate().is_err());
    }
}
