use crate::constants::PHONE_NUMBER_FIELD;
use crate::types::Record;
use serde_json::Value;

/// Trait for rewriting a record's fields into canonical form in place
pub trait Normalizer {
    /// Returns true when the record was changed
    fn normalize(&self, record: &mut Record) -> bool;
}

/// Rewrites `Phone Number` into `+1XXXXXXXXXX` form for North American numbers.
/// Anything it cannot recognize is left exactly as it was.
#[derive(Debug, Default, Clone, Copy)]
pub struct PhoneNormalizer;

impl Normalizer for PhoneNormalizer {
    fn normalize(&self, record: &mut Record) -> bool {
        let Some(Value::String(phone)) = record.get_mut(PHONE_NUMBER_FIELD) else {
            return false;
        };
        match normalize_phone_number(phone) {
            Some(canonical) if canonical != *phone => {
                *phone = canonical;
                true
            }
            _ => false,
        }
    }
}

/// Canonical form of `phone`, or `None` when the digit count does not match
/// a 10-digit number or an 11-digit number with a leading `1`.
pub fn normalize_phone_number(phone: &str) -> Option<String> {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();

    match digits.len() {
        10 => Some(format!("+1{digits}")),
        11 if digits.starts_with('1') => Some(format!("+{digits}")),
        _ => None,
    }
}
