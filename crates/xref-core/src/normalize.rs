//! Identifier cleaning and normalization.
//!
//! Part numbers arrive from spreadsheet exports and chat messages with stray
//! whitespace, BOM artifacts, inconsistent hyphenation, mixed case, and the
//! occasional Cyrillic look-alike letter typed on a RU keyboard layout.
//! [`clean_text`] produces the display form used to echo identifiers back to
//! the user; [`normalize`] additionally produces the matching form used for
//! every lookup key and query.

/// Cyrillic letters that render identically to their Latin counterparts.
///
/// The substitution is case-preserving and runs before case folding, so an
/// upper-case Cyrillic "А" becomes an upper-case Latin "A" first and folds
/// to "a" afterwards.
const CONFUSABLES: &[(char, char)] = &[
    ('А', 'A'),
    ('В', 'B'),
    ('Е', 'E'),
    ('К', 'K'),
    ('М', 'M'),
    ('Н', 'H'),
    ('О', 'O'),
    ('Р', 'P'),
    ('С', 'C'),
    ('Т', 'T'),
    ('У', 'Y'),
    ('Х', 'X'),
    ('а', 'a'),
    ('в', 'b'),
    ('е', 'e'),
    ('к', 'k'),
    ('м', 'm'),
    ('н', 'h'),
    ('о', 'o'),
    ('р', 'p'),
    ('с', 'c'),
    ('т', 't'),
    ('у', 'y'),
    ('х', 'x'),
];

/// Hyphen code points stripped by [`normalize`]. Hyphens carry no meaning
/// for matching: "CT-VNT11B" and "CTVNT11B" name the same part.
const HYPHENS: &[char] = &[
    '-',
    '\u{2010}', // hyphen
    '\u{2011}', // non-breaking hyphen
    '\u{2012}', // figure dash
    '\u{2013}', // en dash
    '\u{2014}', // em dash
];

/// Clean a raw identifier for display and pre-normalization dictionaries.
///
/// Trims the ends, strips carriage returns, line feeds, and a leading BOM
/// artifact, and collapses internal whitespace runs to a single space.
pub fn clean_text(raw: &str) -> String {
    let stripped: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, '\r' | '\n' | '\u{feff}'))
        .collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize a raw identifier into its matching form.
///
/// Applies [`clean_text`], maps confusable Cyrillic letters to their Latin
/// look-alikes, removes all hyphen characters, and folds to lowercase. The
/// result is a pure function of the input; distinct originals may collide
/// under one normalized key and callers must handle that.
///
/// A string that normalizes to the empty string is never a valid query or
/// index key.
pub fn normalize(raw: &str) -> String {
    clean_text(raw)
        .chars()
        .filter_map(|c| {
            let c = CONFUSABLES
                .iter()
                .find(|&&(confusable, _)| confusable == c)
                .map(|&(_, latin)| latin)
                .unwrap_or(c);
            if HYPHENS.contains(&c) {
                None
            } else {
                Some(c)
            }
        })
        .flat_map(char::to_lowercase)
        .collect()
}
