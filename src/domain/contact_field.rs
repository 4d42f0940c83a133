//! Descriptors for the repeated contact fields of a customer record.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Validation family applied to the slots of a repeated field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Email,
    Phone,
    /// Validated and scheme-normalized at submit time.
    Url,
    /// Free text: a street address or a maps link, stored as typed.
    Location,
}

/// The repeated contact fields a customer carries, in display order.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum ContactField {
    Emails,
    PhoneNumbers,
    WhatsappNumbers,
    WebsiteUrls,
    FacebookUrls,
    InstagramUrls,
    YoutubeUrls,
    LocationUrls,
}

impl ContactField {
    pub const COUNT: usize = 8;

    pub const ALL: [ContactField; Self::COUNT] = [
        Self::Emails,
        Self::PhoneNumbers,
        Self::WhatsappNumbers,
        Self::WebsiteUrls,
        Self::FacebookUrls,
        Self::InstagramUrls,
        Self::YoutubeUrls,
        Self::LocationUrls,
    ];

    /// Maximum number of slots the form offers for this field.
    pub const fn max_slots(self) -> usize {
        match self {
            Self::Emails => 5,
            Self::PhoneNumbers | Self::WhatsappNumbers | Self::WebsiteUrls | Self::LocationUrls => {
                3
            }
            Self::FacebookUrls | Self::InstagramUrls | Self::YoutubeUrls => 2,
        }
    }

    pub const fn kind(self) -> FieldKind {
        match self {
            Self::Emails => FieldKind::Email,
            Self::PhoneNumbers | Self::WhatsappNumbers => FieldKind::Phone,
            Self::WebsiteUrls | Self::FacebookUrls | Self::InstagramUrls | Self::YoutubeUrls => {
                FieldKind::Url
            }
            Self::LocationUrls => FieldKind::Location,
        }
    }

    /// Wire name of the field, as the backend expects it.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Emails => "emails",
            Self::PhoneNumbers => "phoneNumbers",
            Self::WhatsappNumbers => "whatsappNumbers",
            Self::WebsiteUrls => "websiteUrls",
            Self::FacebookUrls => "facebookUrls",
            Self::InstagramUrls => "instagramUrls",
            Self::YoutubeUrls => "youtubeUrls",
            Self::LocationUrls => "locationUrls",
        }
    }

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

impl Display for ContactField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_covers_every_field_once() {
        for (position, field) in ContactField::ALL.into_iter().enumerate() {
            assert_eq!(field.index(), position);
        }
    }

    #[test]
    fn slot_limits_match_the_form_layout() {
        assert_eq!(ContactField::Emails.max_slots(), 5);
        assert_eq!(ContactField::PhoneNumbers.max_slots(), 3);
        assert_eq!(ContactField::WhatsappNumbers.max_slots(), 3);
        assert_eq!(ContactField::WebsiteUrls.max_slots(), 3);
        assert_eq!(ContactField::FacebookUrls.max_slots(), 2);
        assert_eq!(ContactField::InstagramUrls.max_slots(), 2);
        assert_eq!(ContactField::YoutubeUrls.max_slots(), 2);
        assert_eq!(ContactField::LocationUrls.max_slots(), 3);
    }

    #[test]
    fn locations_are_plain_text() {
        assert_eq!(ContactField::LocationUrls.kind(), FieldKind::Location);
        assert_eq!(ContactField::YoutubeUrls.kind(), FieldKind::Url);
    }
}
