use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, Result},
    utils::{lenient, phone},
};

/// Address as the account dashboard form names its fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AddressForm {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub phone: Option<String>,
    pub address: String,
    pub address2: Option<String>,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub country: Option<String>,
    pub is_default: bool,
}

/// Address as the commerce API names its fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "AddressRecord")]
pub struct ApiAddress {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub address_line1: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line2: Option<String>,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    pub is_default: bool,
}

/// Wire shape of an upstream address. Every field tolerates nulls and
/// numbers so one odd record does not vanish from the dashboard.
#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct AddressRecord {
    #[serde(rename = "_id", deserialize_with = "lenient::string")]
    mongo_id: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    id: Option<String>,
    #[serde(deserialize_with = "lenient::string_or_empty")]
    first_name: String,
    #[serde(deserialize_with = "lenient::string_or_empty")]
    last_name: String,
    #[serde(deserialize_with = "lenient::string")]
    phone: Option<String>,
    #[serde(deserialize_with = "lenient::string_or_empty")]
    address_line1: String,
    #[serde(deserialize_with = "lenient::string")]
    address_line2: Option<String>,
    #[serde(deserialize_with = "lenient::string_or_empty")]
    city: String,
    #[serde(deserialize_with = "lenient::string_or_empty")]
    state: String,
    #[serde(deserialize_with = "lenient::string_or_empty")]
    postal_code: String,
    #[serde(deserialize_with = "lenient::string")]
    country: Option<String>,
    #[serde(deserialize_with = "lenient::boolean")]
    is_default: bool,
}

impl From<AddressRecord> for ApiAddress {
    fn from(record: AddressRecord) -> Self {
        Self {
            id: record.mongo_id.or(record.id),
            first_name: record.first_name,
            last_name: record.last_name,
            phone: record.phone,
            address_line1: record.address_line1,
            address_line2: record.address_line2,
            city: record.city,
            state: record.state,
            postal_code: record.postal_code,
            country: record.country,
            is_default: record.is_default,
        }
    }
}

impl AddressForm {
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("name", &self.name),
            ("address", &self.address),
            ("city", &self.city),
            ("pincode", &self.pincode),
        ];

        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(AppError::BadRequest(format!("{} is required", field)));
            }
        }

        let pincode = self.pincode.trim();
        if pincode.len() != 6 || !pincode.chars().all(|c| c.is_ascii_digit()) {
            return Err(AppError::BadRequest(
                "Pincode must be 6 digits".to_string(),
            ));
        }

        if let Some(raw) = self.phone.as_deref().filter(|p| !p.trim().is_empty()) {
            if phone::national_digits(raw).is_none() {
                return Err(AppError::BadRequest(
                    "Phone number must be 10 digits".to_string(),
                ));
            }
        }

        Ok(())
    }
}

impl From<&AddressForm> for ApiAddress {
    fn from(form: &AddressForm) -> Self {
        let name = form.name.trim();
        let (first_name, last_name) = match name.split_once(char::is_whitespace) {
            Some((first, rest)) => (first.to_string(), rest.trim().to_string()),
            None => (name.to_string(), String::new()),
        };

        Self {
            id: form.id.clone(),
            first_name,
            last_name,
            phone: form
                .phone
                .as_deref()
                .and_then(phone::national_digits),
            address_line1: form.address.trim().to_string(),
            address_line2: form
                .address2
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            city: form.city.trim().to_string(),
            state: form.state.trim().to_string(),
            postal_code: form.pincode.trim().to_string(),
            country: form.country.clone(),
            is_default: form.is_default,
        }
    }
}

impl From<ApiAddress> for AddressForm {
    fn from(address: ApiAddress) -> Self {
        let name = format!("{} {}", address.first_name.trim(), address.last_name.trim())
            .trim()
            .to_string();

        Self {
            id: address.id,
            name,
            phone: address.phone,
            address: address.address_line1,
            address2: address.address_line2,
            city: address.city,
            state: address.state,
            pincode: address.postal_code,
            country: address.country,
            is_default: address.is_default,
        }
    }
}
