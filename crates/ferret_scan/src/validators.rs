//! Maps the CLI's `--checks` allow-list (spec §6: "a comma-separated set
//! from the closed vocabulary") onto concrete validator instances, without
//! a central match on validator identity at the call site — each family
//! already knows its own `name()` (spec §3.5 supplement).

use ferret_validators::{
    default_body_validators, CreditCardValidator, EmailValidator, IntellectualPropertyValidator,
    IpAddressValidator, PassportValidator, PersonNameValidator, PhoneValidator, SecretsValidator,
    SocialMediaValidator, SsnValidator, Validator,
};

/// Builds the enabled validator set. An empty `checks` list enables every
/// body validator the library ships by default (metadata is always run by
/// the manager separately; social media needs platform configuration this
/// crate does not load, so it is only included when named explicitly).
pub fn build_validators(checks: &[String]) -> Vec<Box<dyn Validator>> {
    if checks.is_empty() {
        return default_body_validators();
    }

    checks
        .iter()
        .filter_map(|name| validator_for(name))
        .collect()
}

fn validator_for(name: &str) -> Option<Box<dyn Validator>> {
    match name {
        "creditcard" => Some(Box::new(CreditCardValidator)),
        "email" => Some(Box::new(EmailValidator)),
        "phone" => Some(Box::new(PhoneValidator)),
        "ssn" => Some(Box::new(SsnValidator)),
        "passport" => Some(Box::new(PassportValidator)),
        "secrets" => Some(Box::new(SecretsValidator)),
        "ip_address" => Some(Box::new(IpAddressValidator)),
        "person_name" => Some(Box::new(PersonNameValidator)),
        "intellectual_property" => Some(Box::new(IntellectualPropertyValidator::default())),
        "social_media" => Some(Box::new(SocialMediaValidator::new(Vec::new()))),
        // "metadata" is handled unconditionally by the manager's own
        // MetadataValidator and has no body-validator counterpart here.
        "metadata" => None,
        other => {
            tracing::warn!(check = other, "unknown check category; ignoring");
            None
        }
    }
}
