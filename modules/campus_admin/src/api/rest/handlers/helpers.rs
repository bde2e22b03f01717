//! Email checks and recognition client endpoints

use crate::api::rest::{dto::*, error::Problem};
use crate::domain::validation::{extract_domain, extract_username};
use crate::module::CampusServices;
use axum::{extract::rejection::JsonRejection, Extension, Json};
use std::sync::Arc;

pub async fn validate_email(
    Extension(services): Extension<Arc<CampusServices>>,
    body: Result<Json<ValidateEmailRequest>, JsonRejection>,
) -> Result<Json<EmailCheckDto>, Problem> {
    let Json(req) = body?;
    let validator = &services.email;
    let email = req.email.trim().to_lowercase();
    let issue = validator.validate(&email).err().map(|i| i.to_string());

    let is_student_email = validator.is_student_email(&email);
    let student_id = if is_student_email {
        Some(validator.extract_student_id(&email)).filter(|id| !id.is_empty())
    } else {
        None
    };

    Ok(Json(EmailCheckDto {
        valid: issue.is_none(),
        issue,
        domain: extract_domain(&email),
        username: extract_username(&email),
        is_institution_email: validator.is_institution_email(&email),
        is_student_email,
        is_teacher_email: validator.is_teacher_email(&email),
        student_id,
        email,
    }))
}

pub async fn recognition_config(
    Extension(services): Extension<Arc<CampusServices>>,
) -> Result<Json<RecognitionConfigDto>, Problem> {
    let config = services.recognition.client_config().await?;
    Ok(Json(config.into()))
}

pub async fn recognition_status(
    Extension(services): Extension<Arc<CampusServices>>,
) -> Json<SystemStatusDto> {
    Json(services.recognition.system_status().await.into())
}
