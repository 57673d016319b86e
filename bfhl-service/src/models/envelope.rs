use serde::Serialize;

/// Uniform response wrapper: success flag, operator email, then either the
/// operation result or an error message.
#[derive(Debug, Serialize)]
pub struct Envelope<'a, T> {
    pub is_success: bool,
    pub official_email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'a str>,
}

impl<'a> Envelope<'a, ()> {
    /// `{is_success: true, official_email}` with no payload.
    pub fn ok(official_email: &'a str) -> Self {
        Self {
            is_success: true,
            official_email,
            data: None,
            error: None,
        }
    }

    pub fn failure(official_email: &'a str, error: &'a str) -> Self {
        Self {
            is_success: false,
            official_email,
            data: None,
            error: Some(error),
        }
    }
}

impl<'a, T> Envelope<'a, T> {
    pub fn success(official_email: &'a str, data: T) -> Self {
        Self {
            is_success: true,
            official_email,
            data: Some(data),
            error: None,
        }
    }
}
