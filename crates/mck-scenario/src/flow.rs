//! The sequential smoke flow: ~20 calls across six resource groups, each
//! depending on the side effects (created records, issued token) of the
//! calls before it. The first failure aborts everything after it; nothing
//! created remotely is rolled back.

use chrono::{Duration, Timelike as _, Utc};
use reqwest::{Method, StatusCode};
use serde_json::Value;

use mck_client::{Expectation, Session};

use crate::error::ScenarioError;
use crate::identity::RunIdentity;
use crate::payloads::{
    AppointmentPatch, LoginRequest, MedicationPatch, NewAppointment, NewMedication, NewPost,
    NewReply, ProfileUpdate, RegisterRequest,
};

const OK: Expectation = Expectation::Exact(StatusCode::OK);
const CREATED: Expectation = Expectation::Exact(StatusCode::CREATED);

/// Run the full smoke scenario against `session`.
///
/// Strictly sequential: every call is awaited before the next is issued.
///
/// # Errors
///
/// Returns `ScenarioError` on the first contract violation, transport
/// failure, or missing response field; no later call is issued.
pub async fn run(session: &mut Session) -> Result<(), ScenarioError> {
    let identity = RunIdentity::generate()?;
    establish_identity(session, &identity).await?;
    replace_profile(session).await?;

    let medication_id = exercise_medications(session).await?;
    let appointment_id = exercise_appointments(session).await?;
    exercise_forum(session).await?;
    check_dashboard(session).await?;

    cleanup(session, &appointment_id, &medication_id).await?;
    Ok(())
}

/// Register a fresh account, log in with the same credentials, attach the
/// bearer token, and smoke-check it against `/auth/me`.
async fn establish_identity(
    session: &mut Session,
    identity: &RunIdentity,
) -> Result<(), ScenarioError> {
    let register = RegisterRequest {
        email: identity.email.clone(),
        username: identity.username.clone(),
        password: identity.password.clone(),
        full_name: "API Tester".to_string(),
    };
    session
        .call_json(Method::POST, "/auth/register", CREATED, &register)
        .await?;

    let login = LoginRequest {
        email: identity.email.clone(),
        password: identity.password.clone(),
    };
    let body = session
        .call_json(Method::POST, "/auth/login", OK, &login)
        .await?;
    let token = require_str(&body, "POST", "/auth/login", "access_token")?;
    session.authenticate(token);
    tracing::debug!(user = %identity.username, "bearer token attached");

    session.call(Method::GET, "/auth/me", OK).await?;
    Ok(())
}

async fn replace_profile(session: &Session) -> Result<(), ScenarioError> {
    let profile = ProfileUpdate {
        full_name: "API Test User".to_string(),
        phone: "+1-202-555-0100".to_string(),
        gender: "other".to_string(),
        emergency_contact: "Friend (202-555-0199)".to_string(),
        medical_history: "hypertension".to_string(),
        psychiatric_history: "none".to_string(),
        date_of_birth: "1990-01-01".to_string(),
    };
    session
        .call_json(Method::PUT, "/profile", OK, &profile)
        .await?;
    Ok(())
}

/// List, create, patch by id, and re-list medications; returns the created
/// record's id.
async fn exercise_medications(session: &Session) -> Result<String, ScenarioError> {
    session.call(Method::GET, "/medications", OK).await?;

    let today = Utc::now().date_naive();
    let medication = NewMedication {
        name: "Vitamin D".to_string(),
        dosage: "1000 IU".to_string(),
        frequency: "Daily".to_string(),
        time_to_take: "08:00".to_string(),
        start_date: today,
        end_date: today + Duration::days(30),
        refill_date: today + Duration::days(25),
        doctor_name: "Dr. Smith".to_string(),
        doctor_contact: "dr.smith@example.com".to_string(),
        notes: "Take with breakfast".to_string(),
        reminder_enabled: true,
    };
    let body = session
        .call_json(Method::POST, "/medications", CREATED, &medication)
        .await?;
    let id = require_id(&body, "POST", "/medications")?;

    let patch = MedicationPatch {
        notes: "Take with breakfast and water".to_string(),
    };
    session
        .call_json(Method::PUT, &format!("/medications/{id}"), OK, &patch)
        .await?;

    session.call(Method::GET, "/medications", OK).await?;
    Ok(id)
}

/// Create an appointment, mark it completed, and list; returns its id.
async fn exercise_appointments(session: &Session) -> Result<String, ScenarioError> {
    let now = Utc::now().naive_utc();
    let appointment = NewAppointment {
        title: "Therapy Session".to_string(),
        description: "Weekly therapy check-in".to_string(),
        doctor_name: "Dr. Adams".to_string(),
        location: "123 Wellness St".to_string(),
        appointment_date: now.with_nanosecond(0).unwrap_or(now),
        reminder_time: 120,
    };
    let body = session
        .call_json(Method::POST, "/appointments", CREATED, &appointment)
        .await?;
    let id = require_id(&body, "POST", "/appointments")?;

    let patch = AppointmentPatch {
        status: "completed".to_string(),
    };
    session
        .call_json(Method::PUT, &format!("/appointments/{id}"), OK, &patch)
        .await?;

    session.call(Method::GET, "/appointments", OK).await?;
    Ok(id)
}

/// Create a forum post, list, fetch it by id, and reply under it.
async fn exercise_forum(session: &Session) -> Result<(), ScenarioError> {
    let post = NewPost {
        title: "Coping Strategies".to_string(),
        content: "Sharing healthy coping strategies that worked this week.".to_string(),
        category: "support".to_string(),
    };
    let body = session
        .call_json(Method::POST, "/forum/posts", CREATED, &post)
        .await?;
    let id = require_id(&body, "POST", "/forum/posts")?;

    session.call(Method::GET, "/forum/posts", OK).await?;
    session
        .call(Method::GET, &format!("/forum/posts/{id}"), OK)
        .await?;

    let reply = NewReply {
        content: "Thanks for sharing these tips!".to_string(),
    };
    session
        .call_json(
            Method::POST,
            &format!("/forum/posts/{id}/replies"),
            CREATED,
            &reply,
        )
        .await?;
    Ok(())
}

/// The aggregate stats endpoint only needs to answer 200; the content is not
/// validated.
async fn check_dashboard(session: &Session) -> Result<(), ScenarioError> {
    session.call(Method::GET, "/dashboard/stats", OK).await?;
    Ok(())
}

/// Delete the appointment and medication created earlier. The forum post and
/// the account itself are left behind on purpose (manual inspection on the
/// target service).
async fn cleanup(
    session: &Session,
    appointment_id: &str,
    medication_id: &str,
) -> Result<(), ScenarioError> {
    session
        .call(
            Method::DELETE,
            &format!("/appointments/{appointment_id}"),
            Expectation::Success,
        )
        .await?;
    session
        .call(
            Method::DELETE,
            &format!("/medications/{medication_id}"),
            Expectation::Success,
        )
        .await?;
    Ok(())
}

/// Pull a string field out of a response body.
fn require_str(
    body: &Value,
    method: &str,
    path: &str,
    field: &str,
) -> Result<String, ScenarioError> {
    body.get(field)
        .and_then(Value::as_str)
        .map(ToString::to_string)
        .ok_or_else(|| missing(body, method, path, field))
}

/// Pull a server-assigned id out of a response body.
///
/// The backend returns numeric ids; string ids are accepted too since the id
/// is only ever interpolated back into a path.
fn require_id(body: &Value, method: &str, path: &str) -> Result<String, ScenarioError> {
    match body.get("id") {
        Some(Value::String(id)) => Ok(id.clone()),
        Some(Value::Number(id)) => Ok(id.to_string()),
        _ => Err(missing(body, method, path, "id")),
    }
}

fn missing(body: &Value, method: &str, path: &str, field: &str) -> ScenarioError {
    ScenarioError::MissingField {
        method: method.to_string(),
        path: path.to_string(),
        field: field.to_string(),
        body: body.clone(),
    }
}
