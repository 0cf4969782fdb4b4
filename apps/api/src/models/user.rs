use serde::{Deserialize, Serialize};

/// The signed-in user as reported by the identity provider's ID token.
/// `id` is the provider's stable subject and keys the stored progress
/// document; everything else is display metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub id: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub photo_url: Option<String>,
}
