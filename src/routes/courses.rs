//! Course catalog endpoints

use hyper::{Response, StatusCode};
use serde::Serialize;
use std::sync::Arc;

use crate::db::schemas::{CourseDoc, Module};
use crate::routes::{error_response, json_response, BoxBody, ErrorResponse};
use crate::server::AppState;

/// Course as it appears on the wire (ObjectId flattened to hex)
#[derive(Serialize)]
pub struct CourseJson {
    pub id: String,
    pub title: String,
    pub description: String,
    pub modules: Vec<Module>,
}

impl From<CourseDoc> for CourseJson {
    fn from(course: CourseDoc) -> Self {
        Self {
            id: course.id_hex(),
            title: course.title,
            description: course.description,
            modules: course.modules,
        }
    }
}

/// GET /api/courses
pub async fn handle_list_courses(state: Arc<AppState>) -> Response<BoxBody> {
    match state.repo.all_courses().await {
        Ok(courses) => {
            let body: Vec<CourseJson> = courses.into_iter().map(CourseJson::from).collect();
            json_response(StatusCode::OK, &body)
        }
        Err(e) => error_response(&e),
    }
}

/// GET /api/courses/{id}
pub async fn handle_course_by_id(state: Arc<AppState>, course_id: &str) -> Response<BoxBody> {
    if course_id.is_empty() {
        return json_response(
            StatusCode::BAD_REQUEST,
            &ErrorResponse {
                error: "Course ID required".into(),
            },
        );
    }

    match state.repo.course_by_id(course_id).await {
        Ok(Some(course)) => json_response(StatusCode::OK, &CourseJson::from(course)),
        Ok(None) => json_response(
            StatusCode::NOT_FOUND,
            &ErrorResponse {
                error: "Course not found".into(),
            },
        ),
        Err(e) => error_response(&e),
    }
}
