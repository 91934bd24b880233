use serde::{Deserialize, Serialize};

/// Long-running operation as returned by the operation service.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Operation {
    pub id: String,
    pub description: String,
    pub created_by: String,
    pub done: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<Status>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<serde_json::Value>,
}

/// RPC status carried by a failed operation.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct Status {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<serde_json::Value>,
}

/// The parts of a compute instance this tool reads back.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Instance {
    pub id: String,
    pub folder_id: String,
    pub name: String,
    pub zone_id: String,
    pub status: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Image {
    pub id: String,
    pub folder_id: String,
    pub name: String,
    pub family: String,
}

/// Where an operation stands after a poll.
#[derive(Debug, Clone, PartialEq)]
pub enum OperationState {
    Pending,
    Succeeded(serde_json::Value),
    Failed(Status),
}

impl Operation {
    pub fn state(&self) -> OperationState {
        if !self.done {
            return OperationState::Pending;
        }
        if let Some(status) = &self.error {
            return OperationState::Failed(status.clone());
        }
        // A finished operation with neither field set carries an empty response.
        OperationState::Succeeded(
            self.response
                .clone()
                .unwrap_or_else(|| serde_json::Value::Object(Default::default())),
        )
    }
}
