//! String normalization for localization comparisons
//!
//! Text read out of a rendered page rarely matches a copy deck byte for
//! byte: markup introduces HTML entities and non-breaking spaces, designers
//! swap hyphens for en/em dashes, and Russian copy drifts between "ё" and
//! "е". [`normalize`] folds all of that into one canonical form so the
//! verifier compares meaning, not markup accidents.
//!
//! Pipeline, in order: HTML-entity decoding, NBSP → space, en/em dash →
//! "-", "ё"/"Ё" → "е"/"Е", whitespace-run collapse, trim.
//!
//! Invariant: `normalize(normalize(s)) == normalize(s)` for every input.
//! Entity decoding runs to a fixpoint, so repeated normalization is stable
//! even for nested forms like `&amp;nbsp;`.

/// Named HTML entities that show up in web UI copy.
///
/// Unknown entities pass through undecoded; this set only needs to cover
/// what content systems actually emit into visible strings.
const NAMED_ENTITIES: &[(&str, char)] = &[
    ("amp", '&'),
    ("lt", '<'),
    ("gt", '>'),
    ("quot", '"'),
    ("apos", '\''),
    ("nbsp", '\u{00A0}'),
    ("ndash", '\u{2013}'),
    ("mdash", '\u{2014}'),
    ("hellip", '\u{2026}'),
    ("laquo", '\u{00AB}'),
    ("raquo", '\u{00BB}'),
    ("lsquo", '\u{2018}'),
    ("rsquo", '\u{2019}'),
    ("ldquo", '\u{201C}'),
    ("rdquo", '\u{201D}'),
    ("copy", '\u{00A9}'),
    ("reg", '\u{00AE}'),
    ("trade", '\u{2122}'),
    ("middot", '\u{00B7}'),
    ("shy", '\u{00AD}'),
];

/// Longest entity body we will consider between `&` and `;`.
const MAX_ENTITY_LEN: usize = 10;

/// Canonicalize a string for comparison.
///
/// Returns `""` for inputs that are empty or whitespace-only.
///
/// # Examples
///
/// ```
/// use cotejar::normalize;
///
/// assert_eq!(normalize("Email\u{00A0}Label"), "Email Label");
/// assert_eq!(normalize("día–feriado"), "día-feriado");
/// assert_eq!(normalize("ёлка"), "елка");
/// assert_eq!(normalize("  Sign\t Up \n"), "Sign Up");
/// ```
#[must_use]
pub fn normalize(s: &str) -> String {
    if s.trim().is_empty() {
        return String::new();
    }

    // Decode until stable; every successful decode strictly shrinks the
    // string, so this terminates.
    let mut decoded = decode_entities(s);
    loop {
        let next = decode_entities(&decoded);
        if next == decoded {
            break;
        }
        decoded = next;
    }

    let folded: String = decoded
        .chars()
        .map(|c| match c {
            '\u{00A0}' => ' ',
            '\u{2013}' | '\u{2014}' => '-',
            'ё' => 'е',
            'Ё' => 'Е',
            other => other,
        })
        .collect();

    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Ordinal equality of normalized forms (case-sensitive).
#[must_use]
pub fn eq_normalized(a: &str, b: &str) -> bool {
    normalize(a) == normalize(b)
}

/// Case-insensitive substring check on normalized forms.
///
/// An empty `needle` always matches, mirroring substring semantics.
#[must_use]
pub fn contains_normalized(haystack: &str, needle: &str) -> bool {
    normalize(haystack)
        .to_lowercase()
        .contains(&normalize(needle).to_lowercase())
}

/// One decoding pass over the input.
fn decode_entities(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];

        match parse_entity(rest) {
            Some((decoded, consumed)) => {
                out.push(decoded);
                rest = &rest[consumed..];
            }
            None => {
                out.push('&');
                rest = &rest['&'.len_utf8()..];
            }
        }
    }

    out.push_str(rest);
    out
}

/// Try to read one entity at the start of `s` (which begins with `&`).
///
/// Returns the decoded character and the byte length consumed, or `None`
/// for anything that is not a well-formed known entity.
fn parse_entity(s: &str) -> Option<(char, usize)> {
    let body_and_rest = s.strip_prefix('&')?;
    let semi = body_and_rest.find(';')?;
    if semi == 0 || semi > MAX_ENTITY_LEN {
        return None;
    }
    let body = &body_and_rest[..semi];
    if !body
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '#')
    {
        return None;
    }
    let consumed = 1 + semi + 1;

    if let Some(digits) = body.strip_prefix("#x").or_else(|| body.strip_prefix("#X")) {
        let code = u32::from_str_radix(digits, 16).ok()?;
        return char::from_u32(code).map(|c| (c, consumed));
    }
    if let Some(digits) = body.strip_prefix('#') {
        let code: u32 = digits.parse().ok()?;
        return char::from_u32(code).map(|c| (c, consumed));
    }

    NAMED_ENTITIES
        .iter()
        .find(|(name, _)| *name == body)
        .map(|(_, c)| (*c, consumed))
}
