use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNotificationResponse {
    /// Empty when the notification reached no recipients.
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub recipients: u64,
    pub external_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationList {
    pub total_count: u64,
    pub offset: u64,
    pub limit: u64,
    pub notifications: Vec<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerList {
    pub total_count: u64,
    pub offset: u64,
    pub limit: u64,
    pub players: Vec<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletePlayerResponse {
    pub success: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsvExportResponse {
    pub csv_file_url: String,
}
