//! Generated signup test data
//!
//! Live signup forms reject reused addresses, so every submitted run
//! needs a fresh one. Two shapes are in circulation: a timestamped
//! disposable address, and a name-plus-year address for flows where a
//! human-looking value matters.

use chrono::Utc;
use uuid::Uuid;

const NAMES: [&str; 12] = [
    "alex", "maria", "john", "kate", "mark", "lena", "peter", "olga", "mike", "lisa", "adam",
    "emma",
];

/// Fresh unique address, `qatest_<utc stamp>_<6 hex>@example.com`.
#[must_use]
pub fn random_email() -> String {
    let stamp = Utc::now().format("%Y%m%d_%H%M%S");
    let nonce = Uuid::new_v4().simple().to_string();
    format!("qatest_{stamp}_{}@example.com", &nonce[..6])
}

/// Human-looking address, `<name><year>@test.test`.
#[must_use]
pub fn name_year_email() -> String {
    let pick = Uuid::new_v4().as_bytes()[0] as usize % NAMES.len();
    let year = Utc::now().format("%Y");
    format!("{}{year}@test.test", NAMES[pick])
}
