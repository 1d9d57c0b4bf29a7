use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, Result},
    utils::lenient,
};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "UserRecord")]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Upstream sends `_id`, `id`, or both.
#[derive(Default, Deserialize)]
#[serde(default)]
struct UserRecord {
    #[serde(rename = "_id", deserialize_with = "lenient::string")]
    mongo_id: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    id: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    name: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    email: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    phone: Option<String>,
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.mongo_id.or(record.id),
            name: record.name,
            email: record.email,
            phone: record.phone,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl UpdateProfileRequest {
    /// Trims provided fields and rejects values the API would refuse.
    pub fn normalized(self) -> Result<Self> {
        let name = self.name.map(|n| n.trim().to_string());
        if name.as_deref().is_some_and(str::is_empty) {
            return Err(AppError::BadRequest("Name cannot be empty".to_string()));
        }

        let email = self.email.map(|e| e.trim().to_string());
        if email.as_deref().is_some_and(|e| e.is_empty() || !e.contains('@')) {
            return Err(AppError::BadRequest("Invalid email address".to_string()));
        }

        Ok(Self {
            name,
            email,
            phone: self.phone,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.phone.is_none()
    }
}
