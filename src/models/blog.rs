use serde::{Deserialize, Serialize};

use crate::utils::lenient;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub slug: String,
    pub title: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub excerpt: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub published_at: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BlogQuery {
    pub limit: Option<u32>,
}
