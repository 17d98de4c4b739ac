//! Static lexical data: stopwords, marker words, gazetteer.
//!
//! All of this is process-wide, read-only constant data. The sets are small on
//! purpose (bilingual Hindi/English newsroom vocabulary, not a general NLP
//! resource); linear scans over them are cheaper than hashing at these sizes.

/// English stopwords, also used to drop low-value slug segments.
pub const EN_STOPWORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "if", "then", "else", "when", "while", "of", "for",
    "to", "in", "on", "at", "from", "by", "with", "without", "as", "is", "are", "was", "were",
    "be", "been", "being", "this", "that", "these", "those", "it", "its", "has", "have", "had",
    "will", "would", "can", "could", "not",
];

/// Hindi (Devanagari) stopwords.
pub const HI_STOPWORDS: &[&str] = &[
    "के", "की", "का", "हैं", "है", "और", "या", "यह", "था", "थी", "थे", "तथा", "लेकिन", "पर", "से",
    "में", "हो", "होना", "रहे", "रही", "अगर", "तो", "भी", "लिए", "तक", "उन", "उस", "वही", "एवं",
    "क्योंकि", "जैसे", "द्वारा", "नहीं", "बिना", "सभी", "उनका", "उनकी", "उनके", "कभी", "हमेशा",
    "आदि", "प्रति", "गए", "गई", "गया", "करें", "करेगा", "करेंगी", "करना", "करने", "करता", "करती",
    "करते", "जिसमें", "जिससे", "जिसके", "जिन", "जिसे", "जितना", "जितनी", "जितने", "ने", "को", "इस",
    "वे", "हम", "आप", "कि", "उन्होंने", "इसके", "अपने", "कहा", "आज",
];

/// Generic journalism words excluded from keyword ranking (including
/// publisher-name tokens that dominate frequency counts without carrying
/// topical signal).
pub const KEYWORD_BLACKLIST: &[&str] = &[
    "news", "india", "indian", "said", "statement", "khabar", "patrika", "समाचार", "खबर",
];

/// Words that disqualify a capitalized sequence from being an entity
/// candidate (byline/caption vocabulary).
pub const AUTHOR_NOISE: &[&str] = &[
    "by", "staff", "reporter", "updated", "written", "photo", "image", "author",
];

/// Photo/credit caption markers (case-insensitive substring match).
pub const CREDIT_MARKERS: &[&str] = &[
    "photo", "image", "credit", "graphic", "फोटो", "तस्वीर", "साभार", "ग्राफिक",
];

/// Month names recognized by the calendar-date drop rule.
pub const MONTH_NAMES: &[&str] = &[
    "january", "february", "march", "april", "may", "june", "july", "august", "september",
    "october", "november", "december", "jan", "feb", "mar", "apr", "jun", "jul", "aug", "sep",
    "sept", "oct", "nov", "dec", "जनवरी", "फरवरी", "मार्च", "अप्रैल", "मई", "जून", "जुलाई",
    "अगस्त", "सितंबर", "अक्टूबर", "नवंबर", "दिसंबर",
];

/// Known proper-noun entity, checked before any capitalization heuristic.
///
/// Aliases are lowercase surface forms (Latin and Devanagari) matched as
/// substrings of the case-folded text; the canonical name is what callers get
/// back regardless of which alias hit.
#[derive(Debug, Clone, Copy)]
pub struct GazetteerEntry {
    pub canonical: &'static str,
    pub aliases: &'static [&'static str],
}

/// Ordered by priority: first hit wins.
pub const GAZETTEER: &[GazetteerEntry] = &[
    GazetteerEntry {
        canonical: "Shashi Tharoor",
        aliases: &["shashi tharoor", "शशि थरूर"],
    },
    GazetteerEntry {
        canonical: "Veer Savarkar",
        aliases: &["veer savarkar", "वीर सावरकर"],
    },
    GazetteerEntry {
        canonical: "Congress",
        aliases: &["congress", "कांग्रेस"],
    },
    GazetteerEntry {
        canonical: "BJP",
        aliases: &["bjp", "भाजपा", "बीजेपी"],
    },
    GazetteerEntry {
        canonical: "Rajasthan",
        aliases: &["rajasthan", "राजस्थान"],
    },
    GazetteerEntry {
        canonical: "Jaipur",
        aliases: &["jaipur", "जयपुर"],
    },
    GazetteerEntry {
        canonical: "Delhi",
        aliases: &["delhi", "दिल्ली"],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stopword_sets_are_lowercase() {
        assert!(EN_STOPWORDS.iter().all(|w| *w == w.to_lowercase()));
        assert!(KEYWORD_BLACKLIST.iter().all(|w| *w == w.to_lowercase()));
    }

    #[test]
    fn gazetteer_aliases_are_case_folded() {
        for e in GAZETTEER {
            assert!(!e.aliases.is_empty(), "{} has no aliases", e.canonical);
            for a in e.aliases {
                assert_eq!(*a, a.to_lowercase(), "alias {a} must be lowercase");
            }
        }
    }
}
