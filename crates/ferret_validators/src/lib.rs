//! Validator family (spec §4.5): one module per sensitive-data family, all
//! sharing the `Validator` contract in [`common`]. Validators emit *raw*
//! confidence only — context, cross-validator, and calibration adjustments
//! are concentrated in the Enhanced Validator Manager (spec §4.6, open
//! question (c)).

pub mod common;
pub mod credit_card;
pub mod email;
pub mod intellectual_property;
pub mod ip_address;
pub mod metadata;
pub mod passport;
pub mod person_name;
pub mod phone;
pub mod secrets;
pub mod social_media;
pub mod ssn;

pub use common::Validator;
pub use credit_card::CreditCardValidator;
pub use email::EmailValidator;
pub use intellectual_property::IntellectualPropertyValidator;
pub use ip_address::IpAddressValidator;
pub use metadata::MetadataValidator;
pub use passport::PassportValidator;
pub use person_name::PersonNameValidator;
pub use phone::PhoneValidator;
pub use secrets::SecretsValidator;
pub use social_media::{PlatformPattern, SocialMediaValidator};
pub use ssn::SsnValidator;

/// Builds the set of body-validators enabled by default (every family
/// except metadata and social media, which need configuration to run
/// meaningfully).
pub fn default_body_validators() -> Vec<Box<dyn Validator>> {
    vec![
        Box::new(CreditCardValidator),
        Box::new(EmailValidator),
        Box::new(PhoneValidator),
        Box::new(SsnValidator),
        Box::new(PassportValidator),
        Box::new(SecretsValidator),
        Box::new(IpAddressValidator),
        Box::new(PersonNameValidator),
        Box::new(IntellectualPropertyValidator::default()),
    ]
}
