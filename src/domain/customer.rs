//! The customer record and its create/update payloads.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::contact_field::ContactField;

/// A customer as known to the backend. `id` and the timestamps are
/// server-assigned and read-only on the client.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub emails: Vec<String>,
    #[serde(default)]
    pub phone_numbers: Vec<String>,
    #[serde(default)]
    pub whatsapp_numbers: Vec<String>,
    #[serde(default)]
    pub website_urls: Vec<String>,
    #[serde(default)]
    pub facebook_urls: Vec<String>,
    #[serde(default)]
    pub instagram_urls: Vec<String>,
    #[serde(default)]
    pub youtube_urls: Vec<String>,
    #[serde(default)]
    pub location_urls: Vec<String>,
    #[serde(default)]
    pub company_logo: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Customer {
    /// Borrow the entries of the given repeated field.
    pub fn contact_field(&self, field: ContactField) -> &[String] {
        match field {
            ContactField::Emails => &self.emails,
            ContactField::PhoneNumbers => &self.phone_numbers,
            ContactField::WhatsappNumbers => &self.whatsapp_numbers,
            ContactField::WebsiteUrls => &self.website_urls,
            ContactField::FacebookUrls => &self.facebook_urls,
            ContactField::InstagramUrls => &self.instagram_urls,
            ContactField::YoutubeUrls => &self.youtube_urls,
            ContactField::LocationUrls => &self.location_urls,
        }
    }
}

/// Payload for creating a customer. No identifier; the server assigns one.
#[derive(Clone, Debug, Default, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewCustomer {
    #[validate(length(min = 2, max = 100))]
    pub name: String,
    pub emails: Vec<String>,
    pub phone_numbers: Vec<String>,
    pub whatsapp_numbers: Vec<String>,
    pub website_urls: Vec<String>,
    pub facebook_urls: Vec<String>,
    pub instagram_urls: Vec<String>,
    pub youtube_urls: Vec<String>,
    pub location_urls: Vec<String>,
    pub company_logo: String,
    #[validate(length(max = 500))]
    pub description: String,
}

/// Partial payload for updating a customer; `None` fields are omitted from
/// the request body and left untouched by the server.
#[derive(Clone, Debug, Default, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCustomer {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 2, max = 100))]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emails: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_numbers: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whatsapp_numbers: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website_urls: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook_urls: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram_urls: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub youtube_urls: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_urls: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_logo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 500))]
    pub description: Option<String>,
}

/// Trims entries and drops blank ones, preserving order. With `dedup` set,
/// repeats after the first occurrence are dropped as well.
pub fn clean_entries(values: &[String], dedup: bool) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for value in values {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            continue;
        }
        if dedup && !seen.insert(trimmed.to_string()) {
            continue;
        }
        out.push(trimmed.to_string());
    }
    out
}
