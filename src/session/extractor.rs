//! Heuristic user-profile extraction
//!
//! Best-effort signal gathering from free text. Trigger keywords match as
//! plain substrings of the lowercased message, so "rosemary" counts as a
//! floral hint. That looseness is intended; the profile only steers the
//! conversation, it is never shown back as fact.

use super::UserInfo;
use regex::Regex;

/// Strategy that folds one user message into the profile
pub trait UserInfoExtractor: Send + Sync {
    fn extract(&self, message: &str, info: &mut UserInfo);
}

/// A named category and the keywords that signal it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordCategory {
    pub name: String,
    pub triggers: Vec<String>,
}

impl KeywordCategory {
    pub fn new(name: &str, triggers: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            triggers: triggers.iter().map(|t| (*t).to_string()).collect(),
        }
    }

    fn matches(&self, lowered: &str) -> bool {
        self.triggers.iter().any(|t| lowered.contains(t.as_str()))
    }
}

/// Keyword tables and phrase lists driving [`KeywordExtractor`]
#[derive(Debug, Clone)]
pub struct ExtractionRules {
    /// Phrases that introduce a name, e.g. "call me"
    pub name_phrases: Vec<String>,
    pub scent_categories: Vec<KeywordCategory>,
    pub personality_traits: Vec<KeywordCategory>,
    /// Checked in order; the last matching category wins
    pub styles: Vec<KeywordCategory>,
    /// Nouns that can open an explicit scent mention ("smell", "perfume")
    pub mention_nouns: Vec<String>,
    /// Words joining the noun to the mentioned scent ("of", "like")
    pub mention_links: Vec<String>,
}

const NAME_PHRASES: &[&str] = &["my name is", "i'm", "i am", "call me"];

const SCENT_CATEGORIES: &[(&str, &[&str])] = &[
    ("floral", &["floral", "flowery", "rose", "jasmine", "lily", "lavender"]),
    ("woody", &["woody", "wood", "cedar", "sandalwood", "vetiver", "oak"]),
    ("citrus", &["citrus", "lemon", "orange", "bergamot", "grapefruit", "lime"]),
    ("spicy", &["spicy", "spice", "cinnamon", "pepper", "clove", "cardamom"]),
    ("fresh", &["fresh", "crisp", "airy", "green", "mint"]),
    ("sweet", &["sweet", "vanilla", "caramel", "honey", "sugar", "gourmand"]),
    ("earthy", &["earthy", "earth", "moss", "patchouli", "soil"]),
    ("aquatic", &["aquatic", "ocean", "marine", "sea breeze", "salty"]),
    ("oriental", &["oriental", "amber", "incense", "oud", "resin"]),
    ("fruity", &["fruity", "fruit", "berry", "apple", "peach", "pear"]),
];

const PERSONALITY_TRAITS: &[(&str, &[&str])] = &[
    ("adventurous", &["adventurous", "outgoing", "bold", "daring", "explorer"]),
    ("romantic", &["romantic", "passionate", "loving", "sentimental"]),
    ("sophisticated", &["sophisticated", "elegant", "refined", "classy"]),
    ("minimalist", &["minimalist", "simple", "clean", "understated"]),
    ("creative", &["creative", "artistic", "imaginative", "innovative"]),
];

const STYLES: &[(&str, &[&str])] = &[
    ("casual", &["casual", "everyday", "relaxed"]),
    ("formal", &["formal", "professional", "business"]),
    ("bohemian", &["bohemian", "boho", "free-spirited"]),
    ("classic", &["classic", "traditional", "timeless"]),
    ("modern", &["modern", "contemporary", "trendy"]),
];

const MENTION_NOUNS: &[&str] = &["smell", "scent", "fragrance", "perfume", "cologne"];
const MENTION_LINKS: &[&str] = &["of", "like", "with"];

fn categories(table: &[(&str, &[&str])]) -> Vec<KeywordCategory> {
    table
        .iter()
        .map(|(name, triggers)| KeywordCategory::new(name, triggers))
        .collect()
}

fn strings(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| (*w).to_string()).collect()
}

impl Default for ExtractionRules {
    fn default() -> Self {
        Self {
            name_phrases: strings(NAME_PHRASES),
            scent_categories: categories(SCENT_CATEGORIES),
            personality_traits: categories(PERSONALITY_TRAITS),
            styles: categories(STYLES),
            mention_nouns: strings(MENTION_NOUNS),
            mention_links: strings(MENTION_LINKS),
        }
    }
}

fn alternation(words: &[String]) -> String {
    words
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|")
}

/// Keyword/pattern based extractor
#[derive(Debug, Clone)]
pub struct KeywordExtractor {
    rules: ExtractionRules,
    name_pattern: Regex,
    mention_pattern: Regex,
}

impl KeywordExtractor {
    /// Build an extractor, compiling the phrase lists into patterns.
    ///
    /// Patterns run against the lowercased message; a name is the first
    /// run of ASCII letters after the phrase, a mention is everything made of
    /// letters and whitespace after the linking word.
    pub fn new(rules: ExtractionRules) -> Result<Self, regex::Error> {
        let name_pattern = Regex::new(&format!(
            r"(?:{})\s+([a-z]+)",
            alternation(&rules.name_phrases)
        ))?;
        let mention_pattern = Regex::new(&format!(
            r"(?:{})\s+(?:{})\s+([a-z\s]+)",
            alternation(&rules.mention_nouns),
            alternation(&rules.mention_links)
        ))?;

        Ok(Self {
            rules,
            name_pattern,
            mention_pattern,
        })
    }

    fn extract_name(&self, lowered: &str) -> Option<String> {
        let captured = self.name_pattern.captures(lowered)?.get(1)?.as_str();
        let mut chars = captured.chars();
        let first = chars.next()?;
        Some(first.to_uppercase().chain(chars).collect())
    }

    fn extract_mentions<'s>(&'s self, lowered: &'s str) -> impl Iterator<Item = &'s str> + 's {
        self.mention_pattern
            .captures_iter(lowered)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().trim())
            .filter(|scent| !scent.is_empty())
    }
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self::new(ExtractionRules::default()).expect("built-in extraction patterns compile")
    }
}

impl UserInfoExtractor for KeywordExtractor {
    fn extract(&self, message: &str, info: &mut UserInfo) {
        let lowered = message.to_lowercase();

        if info.name.is_none() {
            if let Some(name) = self.extract_name(&lowered) {
                info.set_name_once(name);
            }
        }

        for category in &self.rules.scent_categories {
            if category.matches(&lowered) {
                info.add_scent_preference(&category.name);
            }
        }

        for trait_category in &self.rules.personality_traits {
            if trait_category.matches(&lowered) {
                info.add_personality_trait(&trait_category.name);
            }
        }

        for style in &self.rules.styles {
            if style.matches(&lowered) {
                info.style = Some(style.name.clone());
            }
        }

        for scent in self.extract_mentions(&lowered) {
            info.add_mentioned_scent(scent);
        }
    }
}
