use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    core::defaults::default_bundle,
    error::CmsError,
    types::{Translations, WebsiteData},
};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    De,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::De => "de",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = CmsError;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        match code.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Language::En),
            "de" => Ok(Language::De),
            _ => Err(CmsError::UnsupportedLanguage(code.to_string())),
        }
    }
}

/// Picks the bundle for `language`, falling back to the built-in one when the
/// language was never populated.
pub fn resolve(translations: &Translations, language: Language) -> WebsiteData {
    match translations.get(language.code()) {
        Some(data) => data.clone(),
        None => default_bundle(language),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::defaults::default_translations;

    #[test]
    fn test_parse_codes() {
        assert_eq!("en".parse::<Language>().unwrap(), Language::En);
        assert_eq!(" DE ".parse::<Language>().unwrap(), Language::De);
        assert!(matches!(
            "fr".parse::<Language>(),
            Err(CmsError::UnsupportedLanguage(_))
        ));
    }

    #[test]
    fn test_resolve_prefers_stored_bundle() {
        let mut translations = default_translations();
        translations.get_mut("en").unwrap().projects_heading = "Edited".to_string();
        assert_eq!(
            resolve(&translations, Language::En).projects_heading,
            "Edited"
        );
    }

    #[test]
    fn test_resolve_falls_back_for_unpopulated_language() {
        let translations = default_translations();
        let de = resolve(&translations, Language::De);
        assert_eq!(de, default_bundle(Language::De));
    }
}
