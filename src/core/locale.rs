//! Compound locale codes (`US_en`) and ISO-639 language names.
//!
//! File names carry the compound `<region>_<language>` code; the translation
//! service only understands the bare language code.

use std::{fmt, str::FromStr};

use anyhow::{Result, bail};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale {
    region: String,
    language: String,
}

impl Locale {
    pub fn new(region: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            language: language.into(),
        }
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    /// ISO language code passed to the translation service.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Same region, different language: `US_en` + `es` is `US_es`.
    pub fn with_language(&self, language: &str) -> Self {
        Self::new(self.region.clone(), language)
    }

    /// File-name segment for this locale, e.g. `.US_en.`.
    pub fn file_segment(&self) -> String {
        format!(".{self}.")
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.region, self.language)
    }
}

impl FromStr for Locale {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        // Split on the first '_' so languages like "zh-TW" survive intact.
        match s.split_once('_') {
            Some((region, language)) if !region.is_empty() && !language.is_empty() => {
                Ok(Self::new(region, language))
            }
            _ => bail!(
                "Invalid locale \"{}\": expected <region>_<language>, e.g. US_en",
                s
            ),
        }
    }
}

/// English name of an ISO language code, if known.
pub fn language_name(code: &str) -> Option<&'static str> {
    ISO_LANGUAGES
        .iter()
        .find(|(iso, _)| *iso == code)
        .map(|(_, name)| *name)
}

/// ISO code for an English language name (case-insensitive).
pub fn language_code(name: &str) -> Option<&'static str> {
    ISO_LANGUAGES
        .iter()
        .find(|(_, lang)| lang.eq_ignore_ascii_case(name))
        .map(|(iso, _)| *iso)
}

/// Language codes understood by the translation service.
pub const ISO_LANGUAGES: &[(&str, &str)] = &[
    ("af", "Afrikaans"),
    ("sq", "Albanian"),
    ("am", "Amharic"),
    ("ar", "Arabic"),
    ("hy", "Armenian"),
    ("az", "Azerbaijani"),
    ("eu", "Basque"),
    ("be", "Belarusian"),
    ("bn", "Bengali"),
    ("bs", "Bosnian"),
    ("bg", "Bulgarian"),
    ("ca", "Catalan"),
    ("ceb", "Cebuano"),
    ("ny", "Chichewa"),
    ("zh-CN", "Chinese (Simplified)"),
    ("zh-TW", "Chinese (Traditional)"),
    ("co", "Corsican"),
    ("hr", "Croatian"),
    ("cs", "Czech"),
    ("da", "Danish"),
    ("nl", "Dutch"),
    ("en", "English"),
    ("eo", "Esperanto"),
    ("et", "Estonian"),
    ("tl", "Filipino"),
    ("fi", "Finnish"),
    ("fr", "French"),
    ("fy", "Frisian"),
    ("gl", "Galician"),
    ("ka", "Georgian"),
    ("de", "German"),
    ("el", "Greek"),
    ("gu", "Gujarati"),
    ("ht", "Haitian Creole"),
    ("ha", "Hausa"),
    ("haw", "Hawaiian"),
    ("iw", "Hebrew"),
    ("hi", "Hindi"),
    ("hmn", "Hmong"),
    ("hu", "Hungarian"),
    ("is", "Icelandic"),
    ("ig", "Igbo"),
    ("id", "Indonesian"),
    ("ga", "Irish"),
    ("it", "Italian"),
    ("ja", "Japanese"),
    ("jw", "Javanese"),
    ("kn", "Kannada"),
    ("kk", "Kazakh"),
    ("km", "Khmer"),
    ("ko", "Korean"),
    ("ku", "Kurdish (Kurmanji)"),
    ("ky", "Kyrgyz"),
    ("lo", "Lao"),
    ("la", "Latin"),
    ("lv", "Latvian"),
    ("lt", "Lithuanian"),
    ("lb", "Luxembourgish"),
    ("mk", "Macedonian"),
    ("mg", "Malagasy"),
    ("ms", "Malay"),
    ("ml", "Malayalam"),
    ("mt", "Maltese"),
    ("mi", "Maori"),
    ("mr", "Marathi"),
    ("mn", "Mongolian"),
    ("my", "Myanmar (Burmese)"),
    ("ne", "Nepali"),
    ("no", "Norwegian"),
    ("ps", "Pashto"),
    ("fa", "Persian"),
    ("pl", "Polish"),
    ("pt", "Portuguese"),
    ("pa", "Punjabi"),
    ("ro", "Romanian"),
    ("ru", "Russian"),
    ("sm", "Samoan"),
    ("gd", "Scots Gaelic"),
    ("sr", "Serbian"),
    ("st", "Sesotho"),
    ("sn", "Shona"),
    ("sd", "Sindhi"),
    ("si", "Sinhala"),
    ("sk", "Slovak"),
    ("sl", "Slovenian"),
    ("so", "Somali"),
    ("es", "Spanish"),
    ("su", "Sundanese"),
    ("sw", "Swahili"),
    ("sv", "Swedish"),
    ("tg", "Tajik"),
    ("ta", "Tamil"),
    ("te", "Telugu"),
    ("th", "Thai"),
    ("tr", "Turkish"),
    ("uk", "Ukrainian"),
    ("ur", "Urdu"),
    ("uz", "Uzbek"),
    ("vi", "Vietnamese"),
    ("cy", "Welsh"),
    ("xh", "Xhosa"),
    ("yi", "Yiddish"),
    ("yo", "Yoruba"),
    ("zu", "Zulu"),
];
