//! Dynamic form controller for adding and editing customers.
//!
//! The controller owns the working copy of a record: scalar fields plus one
//! ordered slot list per repeated contact field. Every mutation re-validates
//! the touched field and refreshes the live preview projection; sanitization
//! (trimming, dropping blank slots, URL normalization) happens only when the
//! form is submitted.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use thiserror::Error;

use crate::domain::contact_field::{ContactField, FieldKind};
use crate::domain::customer::{clean_entries, Customer, NewCustomer, UpdateCustomer};
use crate::domain::urls::normalize_url;
use crate::domain::validation;
use crate::dto::customer::{initials, CustomerPreview};
use crate::repository::CustomerWriter;
use crate::services::customer as customer_service;
use crate::services::ServiceError;

/// Lifecycle of a single form instance. `Succeeded` is terminal; a failed
/// submit returns to `Editing` with the working copy intact.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormState {
    #[default]
    Editing,
    Submitting,
    Succeeded,
}

/// Addressable parts of the form, used to key inline errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum FieldRef {
    Name,
    CompanyLogo,
    Description,
    Slot(ContactField, usize),
}

impl Display for FieldRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Name => write!(f, "name"),
            Self::CompanyLogo => write!(f, "companyLogo"),
            Self::Description => write!(f, "description"),
            Self::Slot(field, index) => write!(f, "{field}[{index}]"),
        }
    }
}

/// One failing field with its displayable message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldIssue {
    pub field: FieldRef,
    pub message: &'static str,
}

#[derive(Debug, Error)]
pub enum FormError {
    /// Local validation failed; no collaborator call was made.
    #[error("{} field(s) failed validation", .0.len())]
    Invalid(Vec<FieldIssue>),
    /// A submit is already in flight for this form instance.
    #[error("a submit is already in progress")]
    InFlight,
    /// The form already reached its terminal state; start a new form to
    /// save again.
    #[error("the form has already been submitted")]
    Completed,
    /// The collaborator rejected the submit; the form stays editable.
    #[error(transparent)]
    Submit(#[from] ServiceError),
}

/// Working copy of a customer record with growable contact field slots.
#[derive(Debug)]
pub struct CustomerForm {
    id: Option<String>,
    name: String,
    company_logo: String,
    description: String,
    slots: [Vec<String>; ContactField::COUNT],
    errors: BTreeMap<FieldRef, &'static str>,
    preview: CustomerPreview,
    state: FormState,
    dedup: bool,
}

impl Default for CustomerForm {
    fn default() -> Self {
        Self::new()
    }
}

impl CustomerForm {
    /// Blank form for the add flow: one empty slot per repeated field.
    pub fn new() -> Self {
        let mut form = Self {
            id: None,
            name: String::new(),
            company_logo: String::new(),
            description: String::new(),
            slots: std::array::from_fn(|_| vec![String::new()]),
            errors: BTreeMap::new(),
            preview: CustomerPreview::default(),
            state: FormState::Editing,
            dedup: false,
        };
        form.refresh_preview();
        form
    }

    /// Form hydrated from a server record for the edit flow. Each populated
    /// entry becomes one slot; empty server arrays keep a single blank slot.
    pub fn from_customer(customer: &Customer) -> Self {
        let mut form = Self::new();
        form.id = Some(customer.id.clone());
        form.name = customer.name.clone();
        form.company_logo = customer.company_logo.clone();
        form.description = customer.description.clone();
        for field in ContactField::ALL {
            let values = customer.contact_field(field);
            if !values.is_empty() {
                form.slots[field.index()] = values.to_vec();
            }
        }
        form.refresh_preview();
        form
    }

    /// Enables duplicate removal during payload assembly. Off by default.
    pub fn set_dedup(&mut self, dedup: bool) {
        self.dedup = dedup;
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn company_logo(&self) -> &str {
        &self.company_logo
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn slots(&self, field: ContactField) -> &[String] {
        &self.slots[field.index()]
    }

    pub fn slot_count(&self, field: ContactField) -> usize {
        self.slots[field.index()].len()
    }

    /// Inline error for a field, if its last-checked value failed a rule.
    pub fn error(&self, field: FieldRef) -> Option<&'static str> {
        self.errors.get(&field).copied()
    }

    /// Live projection for the preview card.
    pub fn preview(&self) -> &CustomerPreview {
        &self.preview
    }

    /// Whether the "Add" affordance for this field is enabled.
    pub fn can_add_slot(&self, field: ContactField) -> bool {
        self.slot_count(field) < field.max_slots()
    }

    /// Appends one blank slot; rejected at the field's configured maximum.
    pub fn add_slot(&mut self, field: ContactField) -> bool {
        if !self.can_add_slot(field) {
            return false;
        }
        self.slots[field.index()].push(String::new());
        self.refresh_preview();
        true
    }

    /// Removes the slot at `index`. Rejected for the sole remaining slot, so
    /// the "Add" affordance always keeps an anchor, and for out-of-range
    /// indices.
    pub fn remove_slot(&mut self, field: ContactField, index: usize) -> bool {
        let values = &mut self.slots[field.index()];
        if values.len() <= 1 || index >= values.len() {
            return false;
        }
        values.remove(index);
        self.revalidate_field(field);
        self.refresh_preview();
        true
    }

    /// Overwrites a slot's raw value, re-validating that slot only.
    pub fn set_slot(&mut self, field: ContactField, index: usize, value: impl Into<String>) -> bool {
        let Some(slot) = self.slots[field.index()].get_mut(index) else {
            return false;
        };
        *slot = value.into();
        self.revalidate_slot(field, index);
        self.refresh_preview();
        true
    }

    pub fn set_name(&mut self, value: impl Into<String>) {
        self.name = value.into();
        self.apply_rule(FieldRef::Name, validation::validate_name(&self.name));
        self.refresh_preview();
    }

    pub fn set_company_logo(&mut self, value: impl Into<String>) {
        self.company_logo = value.into();
        self.apply_rule(
            FieldRef::CompanyLogo,
            validation::validate_url(&self.company_logo),
        );
        self.refresh_preview();
    }

    pub fn set_description(&mut self, value: impl Into<String>) {
        self.description = value.into();
        self.apply_rule(
            FieldRef::Description,
            validation::validate_description(&self.description),
        );
        self.refresh_preview();
    }

    /// Runs the full-record rules, returning every failing field.
    pub fn validate(&self) -> Vec<FieldIssue> {
        let mut issues = Vec::new();
        let mut check = |field: FieldRef, result: Result<(), &'static str>| {
            if let Err(message) = result {
                issues.push(FieldIssue { field, message });
            }
        };

        check(FieldRef::Name, validation::validate_name(&self.name));
        check(
            FieldRef::CompanyLogo,
            validation::validate_url(&self.company_logo),
        );
        check(
            FieldRef::Description,
            validation::validate_description(&self.description),
        );
        for field in ContactField::ALL {
            for (index, value) in self.slots[field.index()].iter().enumerate() {
                check(
                    FieldRef::Slot(field, index),
                    validation::validate_slot(field.kind(), value, Self::required(field, index)),
                );
            }
        }
        issues
    }

    /// Validates, sanitizes and hands the payload to the collaborator. With
    /// an id present this is an update, otherwise a create. On success the
    /// form reaches its terminal state and the server's record is returned;
    /// on collaborator failure the working copy stays editable for retry.
    pub async fn submit<R>(&mut self, repo: &R) -> Result<Customer, FormError>
    where
        R: CustomerWriter + ?Sized,
    {
        match self.state {
            FormState::Editing => {}
            FormState::Submitting => return Err(FormError::InFlight),
            FormState::Succeeded => return Err(FormError::Completed),
        }
        let issues = self.validate();
        if !issues.is_empty() {
            return Err(FormError::Invalid(issues));
        }

        self.state = FormState::Submitting;
        let result = match self.id.clone() {
            Some(id) => customer_service::update_customer(repo, &id, &self.update_payload()).await,
            None => customer_service::create_customer(repo, &self.create_payload()).await,
        };
        match result {
            Ok(customer) => {
                self.state = FormState::Succeeded;
                Ok(customer)
            }
            Err(err) => {
                self.state = FormState::Editing;
                log::error!("Failed to save customer: {err}");
                Err(FormError::Submit(err))
            }
        }
    }

    const fn required(field: ContactField, index: usize) -> bool {
        matches!(field, ContactField::Emails) && index == 0
    }

    fn apply_rule(&mut self, field: FieldRef, result: Result<(), &'static str>) {
        match result {
            Ok(()) => {
                self.errors.remove(&field);
            }
            Err(message) => {
                self.errors.insert(field, message);
            }
        }
    }

    fn revalidate_slot(&mut self, field: ContactField, index: usize) {
        let result = validation::validate_slot(
            field.kind(),
            &self.slots[field.index()][index],
            Self::required(field, index),
        );
        self.apply_rule(FieldRef::Slot(field, index), result);
    }

    /// Indices shift after a removal, so the whole field is re-checked.
    fn revalidate_field(&mut self, field: ContactField) {
        self.errors
            .retain(|key, _| !matches!(key, FieldRef::Slot(f, _) if *f == field));
        for index in 0..self.slots[field.index()].len() {
            self.revalidate_slot(field, index);
        }
    }

    fn refresh_preview(&mut self) {
        let mut preview = CustomerPreview {
            name: self.name.trim().to_string(),
            initials: initials(&self.name),
            company_logo: self.company_logo.trim().to_string(),
            description: self.description.trim().to_string(),
            ..CustomerPreview::default()
        };
        for field in ContactField::ALL {
            *preview.contact_field_mut(field) = clean_entries(&self.slots[field.index()], false);
        }
        self.preview = preview;
    }

    /// Trimmed, blank-free entries for one field, scheme-normalized for
    /// url-kinded fields. Locations pass through as typed.
    fn sanitized(&self, field: ContactField) -> Vec<String> {
        let cleaned = clean_entries(&self.slots[field.index()], self.dedup);
        match field.kind() {
            FieldKind::Url => cleaned.iter().map(|v| normalize_url(v)).collect(),
            _ => cleaned,
        }
    }

    fn create_payload(&self) -> NewCustomer {
        NewCustomer {
            name: self.name.trim().to_string(),
            emails: self.sanitized(ContactField::Emails),
            phone_numbers: self.sanitized(ContactField::PhoneNumbers),
            whatsapp_numbers: self.sanitized(ContactField::WhatsappNumbers),
            website_urls: self.sanitized(ContactField::WebsiteUrls),
            facebook_urls: self.sanitized(ContactField::FacebookUrls),
            instagram_urls: self.sanitized(ContactField::InstagramUrls),
            youtube_urls: self.sanitized(ContactField::YoutubeUrls),
            location_urls: self.sanitized(ContactField::LocationUrls),
            company_logo: normalize_url(&self.company_logo),
            description: self.description.trim().to_string(),
        }
    }

    fn update_payload(&self) -> UpdateCustomer {
        let create = self.create_payload();
        UpdateCustomer {
            name: Some(create.name),
            emails: Some(create.emails),
            phone_numbers: Some(create.phone_numbers),
            whatsapp_numbers: Some(create.whatsapp_numbers),
            website_urls: Some(create.website_urls),
            facebook_urls: Some(create.facebook_urls),
            instagram_urls: Some(create.instagram_urls),
            youtube_urls: Some(create.youtube_urls),
            location_urls: Some(create.location_urls),
            company_logo: Some(create.company_logo),
            description: Some(create.description),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_form_has_one_blank_slot_per_field() {
        let form = CustomerForm::new();
        for field in ContactField::ALL {
            assert_eq!(form.slots(field), &[String::new()]);
        }
        assert_eq!(form.state(), FormState::Editing);
        assert!(form.id().is_none());
    }

    #[test]
    fn hydration_maps_entries_one_to_one() {
        let customer = Customer {
            id: "customer_1".to_string(),
            name: "Acme".to_string(),
            emails: vec!["a@b.com".to_string(), "c@d.com".to_string()],
            ..Customer::default()
        };

        let form = CustomerForm::from_customer(&customer);

        assert_eq!(form.id(), Some("customer_1"));
        assert_eq!(
            form.slots(ContactField::Emails),
            &["a@b.com".to_string(), "c@d.com".to_string()]
        );
        // Empty server arrays still get an editable blank slot.
        assert_eq!(form.slots(ContactField::PhoneNumbers), &[String::new()]);
    }

    #[test]
    fn add_then_remove_restores_the_slot_count() {
        let mut form = CustomerForm::new();
        for field in ContactField::ALL {
            let before = form.slot_count(field);
            assert!(form.add_slot(field));
            assert!(form.remove_slot(field, before));
            assert_eq!(form.slot_count(field), before);
        }
    }

    #[test]
    fn add_slot_stops_at_the_field_maximum() {
        let mut form = CustomerForm::new();
        for _ in 1..ContactField::FacebookUrls.max_slots() {
            assert!(form.add_slot(ContactField::FacebookUrls));
        }
        assert!(!form.can_add_slot(ContactField::FacebookUrls));
        assert!(!form.add_slot(ContactField::FacebookUrls));
        assert_eq!(
            form.slot_count(ContactField::FacebookUrls),
            ContactField::FacebookUrls.max_slots()
        );
    }

    #[test]
    fn sole_slot_cannot_be_removed() {
        let mut form = CustomerForm::new();
        assert!(!form.remove_slot(ContactField::Emails, 0));
        assert_eq!(form.slot_count(ContactField::Emails), 1);
    }

    #[test]
    fn set_slot_revalidates_that_slot_only() {
        let mut form = CustomerForm::new();
        form.add_slot(ContactField::Emails);
        form.set_slot(ContactField::Emails, 1, "not-an-email");

        assert_eq!(
            form.error(FieldRef::Slot(ContactField::Emails, 1)),
            Some("Please enter a valid email address")
        );
        assert_eq!(form.error(FieldRef::Slot(ContactField::Emails, 0)), None);

        form.set_slot(ContactField::Emails, 1, "fixed@now.com");
        assert_eq!(form.error(FieldRef::Slot(ContactField::Emails, 1)), None);
    }

    #[test]
    fn removing_a_slot_shifts_errors_with_the_values() {
        let mut form = CustomerForm::new();
        form.add_slot(ContactField::WebsiteUrls);
        form.add_slot(ContactField::WebsiteUrls);
        form.set_slot(ContactField::WebsiteUrls, 0, "good.com");
        form.set_slot(ContactField::WebsiteUrls, 1, "bad url");
        form.set_slot(ContactField::WebsiteUrls, 2, "also.good.com");

        assert!(form.remove_slot(ContactField::WebsiteUrls, 1));

        assert_eq!(form.error(FieldRef::Slot(ContactField::WebsiteUrls, 0)), None);
        assert_eq!(form.error(FieldRef::Slot(ContactField::WebsiteUrls, 1)), None);
        assert_eq!(form.error(FieldRef::Slot(ContactField::WebsiteUrls, 2)), None);
    }

    #[test]
    fn preview_shows_raw_values_without_normalization() {
        let mut form = CustomerForm::new();
        form.set_name("  Acme Corporation  ");
        form.set_slot(ContactField::WebsiteUrls, 0, " example.com ");
        form.set_slot(ContactField::Emails, 0, "a@b.com");

        let preview = form.preview();
        assert_eq!(preview.name, "Acme Corporation");
        assert_eq!(preview.initials, "AC");
        // Trimmed for display, but no https:// prefix while editing.
        assert_eq!(preview.website_urls, vec!["example.com".to_string()]);
        assert_eq!(preview.contact_count(), 2);
    }

    #[test]
    fn blank_slots_never_reach_the_preview() {
        let mut form = CustomerForm::new();
        form.add_slot(ContactField::PhoneNumbers);
        form.add_slot(ContactField::PhoneNumbers);
        form.set_slot(ContactField::PhoneNumbers, 1, "+15551234567");

        assert_eq!(
            form.preview().phone_numbers,
            vec!["+15551234567".to_string()]
        );
    }

    #[test]
    fn validate_requires_name_and_first_email() {
        let form = CustomerForm::new();
        let issues = form.validate();

        assert!(issues.contains(&FieldIssue {
            field: FieldRef::Name,
            message: "Customer name is required",
        }));
        assert!(issues.contains(&FieldIssue {
            field: FieldRef::Slot(ContactField::Emails, 0),
            message: "Email is required",
        }));
    }

    #[test]
    fn later_email_slots_are_optional() {
        let mut form = CustomerForm::new();
        form.set_name("Acme");
        form.set_slot(ContactField::Emails, 0, "a@b.com");
        form.add_slot(ContactField::Emails);

        assert!(form.validate().is_empty());
    }

    #[test]
    fn create_payload_is_sanitized() {
        let mut form = CustomerForm::new();
        form.set_name("Acme");
        form.set_slot(ContactField::Emails, 0, " a@b.com ");
        form.add_slot(ContactField::Emails);
        form.set_slot(ContactField::WebsiteUrls, 0, "example.com");
        form.set_slot(ContactField::LocationUrls, 0, "42 Main Street");

        let payload = form.create_payload();

        assert_eq!(payload.name, "Acme");
        assert_eq!(payload.emails, vec!["a@b.com".to_string()]);
        assert_eq!(
            payload.website_urls,
            vec!["https://example.com".to_string()]
        );
        // Locations are free text and keep their typed form.
        assert_eq!(payload.location_urls, vec!["42 Main Street".to_string()]);
        assert!(payload.phone_numbers.is_empty());
        assert!(payload.facebook_urls.is_empty());
    }

    #[test]
    fn dedup_is_opt_in() {
        let mut form = CustomerForm::new();
        form.set_name("Acme");
        form.set_slot(ContactField::Emails, 0, "a@b.com");
        form.add_slot(ContactField::Emails);
        form.set_slot(ContactField::Emails, 1, "a@b.com");

        assert_eq!(form.create_payload().emails.len(), 2);

        form.set_dedup(true);
        assert_eq!(form.create_payload().emails, vec!["a@b.com".to_string()]);
    }
}
