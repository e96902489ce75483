use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct AdminLoginRequest {
    pub password: String,
}

/// Missing fields deserialize to empty strings so the handler can answer
/// with the field-validation message rather than a deserialization error.
#[derive(Debug, Deserialize)]
pub struct CaptainLoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterTeamRequest {
    #[serde(default)]
    pub team_name: String,
    #[serde(default)]
    pub captain_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub division: Option<String>,
}
