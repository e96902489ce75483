use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;

use cupreg_core::{
    hash_password, validate_new_password, verify_admin_secret, verify_captain_password,
    EndpointClass, RateLimitDecision, Team,
};

use crate::auth::ClientIdentity;
use crate::dto::{AdminLoginRequest, CaptainLoginRequest, RegisterTeamRequest};
use crate::error::AppError;
use crate::state::AppState;

/// Administrator console login: one process-wide shared secret.
///
/// The limiter is consulted before the secret is ever compared; a
/// locked-out identity never reaches the verifier. A missing secret is a
/// configuration error and records nothing against the caller.
pub async fn admin_login(
    State(state): State<AppState>,
    ClientIdentity(identity): ClientIdentity,
    Json(body): Json<AdminLoginRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    if let RateLimitDecision::Limited { retry_after_secs } =
        state.limiter.check(&identity, EndpointClass::Admin)
    {
        tracing::warn!("Admin login rate limited for {identity} ({retry_after_secs}s left)");
        return Err(AppError::RateLimited { retry_after_secs });
    }

    let valid = verify_admin_secret(&body.password, &state.config.auth.admin_secret)?;
    if !valid {
        state.limiter.record_failure(&identity, EndpointClass::Admin);
        tracing::warn!("Failed admin login attempt from {identity}");
        return Err(AppError::InvalidAdminPassword);
    }

    tracing::info!("Admin login succeeded from {identity}");
    Ok(Json(json!({ "success": true })))
}

/// Captain portal login: per-account email/password.
///
/// Unknown email and wrong password take the same recorded-failure path
/// and produce the same response, so the endpoint cannot be used to
/// enumerate accounts. A store fault short-circuits to a generic 500
/// without recording anything: nothing was verified.
pub async fn captain_login(
    State(state): State<AppState>,
    ClientIdentity(identity): ClientIdentity,
    Json(body): Json<CaptainLoginRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    if let RateLimitDecision::Limited { retry_after_secs } =
        state.limiter.check(&identity, EndpointClass::Captain)
    {
        tracing::warn!("Captain login rate limited for {identity} ({retry_after_secs}s left)");
        return Err(AppError::RateLimited { retry_after_secs });
    }

    let email = body.email.trim().to_lowercase();
    let password = body.password;
    if email.is_empty() || password.is_empty() {
        return Err(AppError::MissingCredentials);
    }

    let team = state.teams.find_by_email(&email).await?;

    let Some(team) = team else {
        state
            .limiter
            .record_failure(&identity, EndpointClass::Captain);
        tracing::warn!("Captain login with unknown email from {identity}");
        return Err(AppError::InvalidCaptainCredentials);
    };

    let stored = team.credential.clone();
    let valid = tokio::task::spawn_blocking(move || verify_captain_password(&password, &stored))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    if !valid {
        state
            .limiter
            .record_failure(&identity, EndpointClass::Captain);
        tracing::warn!("Failed captain login attempt for {email} from {identity}");
        return Err(AppError::InvalidCaptainCredentials);
    }

    tracing::info!("Captain login succeeded for {email}");
    Ok(Json(json!({ "success": true, "team": team })))
}

/// Team registration. New credentials are always issued in the modern
/// hashed form; the legacy plaintext format only ever enters the store
/// via pre-existing accounts.
pub async fn register_team(
    State(state): State<AppState>,
    Json(body): Json<RegisterTeamRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let team_name = body.team_name.trim().to_string();
    let captain_name = body.captain_name.trim().to_string();
    let email = body.email.trim().to_lowercase();

    if team_name.is_empty() || captain_name.is_empty() || email.is_empty() || body.password.is_empty()
    {
        return Err(AppError::Validation(
            "Team name, captain name, email and password are required".to_string(),
        ));
    }

    validate_new_password(&body.password)?;

    let password = body.password;
    let credential = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    let team = Team {
        id: uuid::Uuid::new_v4().to_string(),
        name: team_name,
        captain_name,
        email,
        phone: body.phone,
        division: body.division,
        credential,
    };

    state.teams.insert(team.clone()).await?;
    tracing::info!("Registered new team {} ({})", team.name, team.email);

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "team": team })),
    ))
}
