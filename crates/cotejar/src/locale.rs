//! Locale model
//!
//! The eight UI locales the product ships, and every identifier the web
//! stack attaches to them: the lowercase code used in decks and scopes,
//! the `html[lang]` prefix, the WPML cookie value, the URL path segment,
//! URL hints for recognizing a locale from a link, and the label shown
//! in the language menu.
//!
//! UA and CN are the irregular ones. Ukrainian pages answer to both
//! `/ua/` paths and `uk` language codes; Simplified Chinese uses `/cn/`
//! paths, `zh`-family language codes, a `zh-hans` cookie and three
//! different menu spellings.

use crate::result::CotejarError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A supported UI locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// English, the reference locale.
    #[serde(alias = "EN")]
    En,
    /// Russian.
    #[serde(alias = "RU")]
    Ru,
    /// French.
    #[serde(alias = "FR")]
    Fr,
    /// German.
    #[serde(alias = "DE")]
    De,
    /// Italian.
    #[serde(alias = "IT")]
    It,
    /// Spanish.
    #[serde(alias = "ES")]
    Es,
    /// Ukrainian; answers to `uk` language codes.
    #[serde(alias = "UA", alias = "uk", alias = "UK")]
    Ua,
    /// Simplified Chinese; answers to `zh`-family codes.
    #[serde(alias = "CN", alias = "zh", alias = "ZH", alias = "zh-hans")]
    Cn,
}

impl Locale {
    /// Every supported locale, in deck order.
    pub const ALL: [Self; 8] = [
        Self::En,
        Self::Ru,
        Self::Fr,
        Self::De,
        Self::It,
        Self::Es,
        Self::Ua,
        Self::Cn,
    ];

    /// Lowercase code used in decks, scopes and scenario files.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ru => "ru",
            Self::Fr => "fr",
            Self::De => "de",
            Self::It => "it",
            Self::Es => "es",
            Self::Ua => "ua",
            Self::Cn => "cn",
        }
    }

    /// Expected prefix of `document.documentElement.lang`.
    #[must_use]
    pub const fn html_lang_prefix(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ru => "ru",
            Self::Fr => "fr",
            Self::De => "de",
            Self::It => "it",
            Self::Es => "es",
            Self::Ua => "uk",
            Self::Cn => "zh",
        }
    }

    /// Value the WPML `wp-wpml_current_language` cookie carries.
    #[must_use]
    pub const fn wpml_cookie_value(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ru => "ru",
            Self::Fr => "fr",
            Self::De => "de",
            Self::It => "it",
            Self::Es => "es",
            Self::Ua => "uk",
            Self::Cn => "zh-hans",
        }
    }

    /// URL path segment for the localized site root; English lives at
    /// the bare root.
    #[must_use]
    pub const fn url_path(self) -> &'static str {
        match self {
            Self::En => "",
            Self::Ru => "ru/",
            Self::Fr => "fr/",
            Self::De => "de/",
            Self::It => "it/",
            Self::Es => "es/",
            Self::Ua => "ua/",
            Self::Cn => "cn/",
        }
    }

    /// Substrings that identify this locale inside a URL.
    #[must_use]
    pub const fn url_hints(self) -> &'static [&'static str] {
        match self {
            Self::En => &["/en/", "lang=en"],
            Self::Ru => &["/ru/", "lang=ru"],
            Self::Fr => &["/fr/", "lang=fr"],
            Self::De => &["/de/", "lang=de"],
            Self::It => &["/it/", "lang=it"],
            Self::Es => &["/es/", "lang=es"],
            Self::Ua => &["/ua/", "/uk/", "lang=uk", "lang=ua"],
            Self::Cn => &["/cn/", "lang=zh", "lang=cn"],
        }
    }

    /// Canonical label in the language menu.
    #[must_use]
    pub const fn menu_label(self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Ru => "Русский",
            Self::Fr => "Français",
            Self::De => "Deutsch",
            Self::It => "Italiano",
            Self::Es => "Español",
            Self::Ua => "Українська",
            Self::Cn => "Chinese (Simplified)",
        }
    }

    /// Resolve a language-menu label, tolerating the spelling drift the
    /// menu has shipped with.
    #[must_use]
    pub fn from_menu_label(label: &str) -> Option<Self> {
        let label = label.trim();
        if label.eq_ignore_ascii_case("Chinese") || label == "中文" {
            return Some(Self::Cn);
        }
        Self::ALL
            .into_iter()
            .find(|locale| label.eq_ignore_ascii_case(locale.menu_label()))
    }

    /// Whether a `document.documentElement.lang` value belongs to this
    /// locale. Pages report region-qualified tags like `ru-RU` or
    /// `zh-Hans`, so this is a prefix check.
    #[must_use]
    pub fn matches_html_lang(self, lang: &str) -> bool {
        lang.trim()
            .to_ascii_lowercase()
            .starts_with(self.html_lang_prefix())
    }

    /// Recognize a locale from a URL. Ukrainian is checked first since
    /// its `uk` hints overlap other locales' shapes; an unhinted URL is
    /// English.
    #[must_use]
    pub fn from_url_hint(url: &str) -> Self {
        let ordered = [
            Self::Ua,
            Self::Ru,
            Self::Fr,
            Self::De,
            Self::It,
            Self::Es,
            Self::Cn,
        ];
        ordered
            .into_iter()
            .find(|locale| locale.url_hints().iter().any(|hint| url.contains(hint)))
            .unwrap_or(Self::En)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = CotejarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        Self::ALL
            .into_iter()
            .find(|locale| {
                code.eq_ignore_ascii_case(locale.code())
                    || code.eq_ignore_ascii_case(locale.html_lang_prefix())
                    || code.eq_ignore_ascii_case(locale.wpml_cookie_value())
            })
            .ok_or_else(|| CotejarError::UnknownLocale {
                name: code.to_string(),
            })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn all_lists_the_eight_locales_in_deck_order() {
        assert_eq!(Locale::ALL.len(), 8);
        assert_eq!(Locale::ALL[0], Locale::En);
        assert_eq!(Locale::ALL[7], Locale::Cn);
        let codes: Vec<_> = Locale::ALL.iter().map(|l| l.code()).collect();
        assert_eq!(codes, vec!["en", "ru", "fr", "de", "it", "es", "ua", "cn"]);
    }

    #[test]
    fn irregular_locales_carry_their_real_identifiers() {
        assert_eq!(Locale::Ua.html_lang_prefix(), "uk");
        assert_eq!(Locale::Ua.wpml_cookie_value(), "uk");
        assert_eq!(Locale::Ua.url_path(), "ua/");
        assert_eq!(Locale::Cn.html_lang_prefix(), "zh");
        assert_eq!(Locale::Cn.wpml_cookie_value(), "zh-hans");
        assert_eq!(Locale::En.url_path(), "");
    }

    #[test]
    fn parses_codes_and_aliases() {
        assert_eq!("en".parse::<Locale>().unwrap(), Locale::En);
        assert_eq!("EN".parse::<Locale>().unwrap(), Locale::En);
        assert_eq!("uk".parse::<Locale>().unwrap(), Locale::Ua);
        assert_eq!("zh".parse::<Locale>().unwrap(), Locale::Cn);
        assert_eq!("zh-hans".parse::<Locale>().unwrap(), Locale::Cn);
        assert_eq!(" ru ".parse::<Locale>().unwrap(), Locale::Ru);
    }

    #[test]
    fn unknown_code_is_an_unknown_locale_error() {
        let err = "xx".parse::<Locale>().unwrap_err();
        assert!(err.to_string().contains("xx"));
    }

    #[test]
    fn menu_labels_resolve_with_spelling_drift() {
        assert_eq!(Locale::from_menu_label("Українська"), Some(Locale::Ua));
        assert_eq!(Locale::from_menu_label("chinese"), Some(Locale::Cn));
        assert_eq!(Locale::from_menu_label("中文"), Some(Locale::Cn));
        assert_eq!(
            Locale::from_menu_label("Chinese (Simplified)"),
            Some(Locale::Cn)
        );
        assert_eq!(Locale::from_menu_label("Klingon"), None);
    }

    #[test]
    fn html_lang_matching_is_a_prefix_check() {
        assert!(Locale::Ru.matches_html_lang("ru-RU"));
        assert!(Locale::Ua.matches_html_lang("uk"));
        assert!(Locale::Cn.matches_html_lang("zh-Hans"));
        assert!(Locale::En.matches_html_lang(" en-US "));
        assert!(!Locale::Ua.matches_html_lang("ua"));
        assert!(!Locale::De.matches_html_lang("en"));
    }

    #[test]
    fn url_hints_prefer_ukrainian_and_default_to_english() {
        assert_eq!(
            Locale::from_url_hint("https://site.test/ua/promo?lang=uk"),
            Locale::Ua
        );
        assert_eq!(
            Locale::from_url_hint("https://site.test/page?lang=ua"),
            Locale::Ua
        );
        assert_eq!(Locale::from_url_hint("https://site.test/de/"), Locale::De);
        assert_eq!(
            Locale::from_url_hint("https://site.test/?lang=zh"),
            Locale::Cn
        );
        assert_eq!(Locale::from_url_hint("https://site.test/"), Locale::En);
    }

    #[test]
    fn serde_uses_lowercase_codes_with_aliases() {
        assert_eq!(serde_json::to_string(&Locale::Ua).unwrap(), "\"ua\"");
        let from_upper: Locale = serde_json::from_str("\"CN\"").unwrap();
        assert_eq!(from_upper, Locale::Cn);
        let from_alias: Locale = serde_yaml_ng::from_str("zh-hans").unwrap();
        assert_eq!(from_alias, Locale::Cn);
    }
}
