use serde::Deserialize;

/// Query string of the mock login page
#[derive(Debug, Clone, Deserialize)]
pub struct LoginPageQuery {
    #[serde(rename = "sessionId")]
    pub session_id: Option<String>,
}

/// Form posted by the mock login page
#[derive(Debug, Clone, Deserialize)]
pub struct LoginForm {
    #[serde(rename = "sessionId")]
    pub session_id: Option<String>,
    #[serde(rename = "phoneNumber")]
    pub phone_number: Option<String>,
}

impl LoginForm {
    /// Both fields, when present and non-empty
    pub fn required_fields(&self) -> Option<(&str, &str)> {
        let session_id = self.session_id.as_deref().filter(|s| !s.is_empty())?;
        let phone_number = self.phone_number.as_deref().filter(|s| !s.is_empty())?;
        Some((session_id, phone_number))
    }
}
