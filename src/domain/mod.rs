pub mod contact_field;
pub mod customer;
pub mod image;
pub mod urls;
pub mod validation;
