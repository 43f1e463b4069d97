#[derive(thiserror::Error, Debug, serde::Deserialize, serde::Serialize)]
#[allow(clippy::enum_variant_names)]
pub enum Error {
    #[error("Generic {0}")]
    Generic(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Not logged in: {0}")]
    NotLoggedIn(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Payment failed: {0}")]
    PaymentFailed(String),
}
