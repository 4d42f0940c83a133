//! Read-only projections shaped for rendering.

use serde::Serialize;

use crate::domain::contact_field::ContactField;

/// Live preview of the form's working copy: trimmed scalar fields and the
/// non-blank entries of every repeated field, in typing order. Recomputed by
/// the form controller after each mutation.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPreview {
    pub name: String,
    pub initials: String,
    pub company_logo: String,
    pub description: String,
    pub emails: Vec<String>,
    pub phone_numbers: Vec<String>,
    pub whatsapp_numbers: Vec<String>,
    pub website_urls: Vec<String>,
    pub facebook_urls: Vec<String>,
    pub instagram_urls: Vec<String>,
    pub youtube_urls: Vec<String>,
    pub location_urls: Vec<String>,
}

impl CustomerPreview {
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

    pub(crate) fn contact_field_mut(&mut self, field: ContactField) -> &mut Vec<String> {
        match field {
            ContactField::Emails => &mut self.emails,
            ContactField::PhoneNumbers => &mut self.phone_numbers,
            ContactField::WhatsappNumbers => &mut self.whatsapp_numbers,
            ContactField::WebsiteUrls => &mut self.website_urls,
            ContactField::FacebookUrls => &mut self.facebook_urls,
            ContactField::InstagramUrls => &mut self.instagram_urls,
            ContactField::YoutubeUrls => &mut self.youtube_urls,
            ContactField::LocationUrls => &mut self.location_urls,
        }
    }

    /// Total populated contact entries, used for the preview chip counters.
    pub fn contact_count(&self) -> usize {
        ContactField::ALL
            .into_iter()
            .map(|field| self.contact_field(field).len())
            .sum()
    }
}

/// Avatar fallback: first letters of up to two words, uppercased, or `C`
/// when the name is blank.
pub fn initials(name: &str) -> String {
    let letters: String = name
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(2)
        .collect();
    if letters.is_empty() {
        "C".to_string()
    } else {
        letters.to_uppercase()
    }
}
