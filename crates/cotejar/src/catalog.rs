//! Built-in translation decks
//!
//! The reference copy for the three account flows ships inside the
//! crate: signup form, signin form, and the reset-password popup, each
//! covering all eight supported locales. Decks are embedded with
//! `include_str!` and parsed once on first access.
//!
//! The strings are kept byte-for-byte as the product renders them,
//! including the mixed-script labels some locales carry (a Latin `E`
//! followed by Cyrillic letters, or the reverse). Tests pin those
//! codepoints so a well-meaning edit cannot silently "fix" them.

use std::sync::OnceLock;

use crate::table::TranslationTable;

/// Names accepted by [`builtin`], in flow order.
pub const DECK_NAMES: [&str; 3] = ["signup", "signin", "reset_password"];

const SIGNUP_JSON: &str = include_str!("../data/signup.json");
const SIGNIN_JSON: &str = include_str!("../data/signin.json");
const RESET_PASSWORD_JSON: &str = include_str!("../data/reset_password.json");

/// Signup form deck: field labels, consent copy, and the success popup.
#[must_use]
pub fn signup() -> &'static TranslationTable {
    static TABLE: OnceLock<TranslationTable> = OnceLock::new();
    TABLE.get_or_init(|| parse_deck(SIGNUP_JSON))
}

/// Signin form deck: field labels, links, and the submit button.
#[must_use]
pub fn signin() -> &'static TranslationTable {
    static TABLE: OnceLock<TranslationTable> = OnceLock::new();
    TABLE.get_or_init(|| parse_deck(SIGNIN_JSON))
}

/// Reset-password deck: the request popup and its success state.
#[must_use]
pub fn reset_password() -> &'static TranslationTable {
    static TABLE: OnceLock<TranslationTable> = OnceLock::new();
    TABLE.get_or_init(|| parse_deck(RESET_PASSWORD_JSON))
}

/// Looks up a built-in deck by name.
///
/// Matching ignores case and `_`/`-` separators, so `"SignUp"`,
/// `"sign-up"`, and `"signup"` all resolve to the same deck.
#[must_use]
pub fn builtin(name: &str) -> Option<&'static TranslationTable> {
    let folded: String = name
        .trim()
        .chars()
        .filter(|c| *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect();
    match folded.as_str() {
        "signup" => Some(signup()),
        "signin" => Some(signin()),
        "resetpassword" => Some(reset_password()),
        _ => None,
    }
}

fn parse_deck(raw: &str) -> TranslationTable {
    // SAFETY: Embedded decks are known-valid JSON
    #[allow(clippy::expect_used)]
    TranslationTable::from_json_str(raw).expect("embedded deck should parse")
}
