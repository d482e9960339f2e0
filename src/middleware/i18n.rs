// src/middleware/i18n.rs

use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, header, request::Parts};

// Extrator de idioma a partir do Accept-Language.
pub struct Locale(pub String);

const DEFAULT_LANG: &str = "en";

impl Locale {
    // Também usado fora de extractors (ex: dentro do middleware de sessão)
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let lang = headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|header_value| header_value.to_str().ok())
            .map(primary_language)
            .unwrap_or_else(|| DEFAULT_LANG.to_string());
        Locale(lang)
    }
}

// "pt-BR, en;q=0.8" -> "pt"
fn primary_language(header_str: &str) -> String {
    accept_language::parse(header_str)
        .first()
        .map(|tag| tag.split('-').next().unwrap_or(tag).to_string())
        .unwrap_or_else(|| DEFAULT_LANG.to_string())
}

impl<S> FromRequestParts<S> for Locale
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Locale::from_headers(&parts.headers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_region_subtag() {
        assert_eq!(primary_language("pt-BR,pt;q=0.9,en;q=0.8"), "pt");
    }

    #[test]
    fn keeps_bare_language() {
        assert_eq!(primary_language("en"), "en");
    }

    #[test]
    fn garbage_falls_back_to_default() {
        assert_eq!(primary_language(";;;"), DEFAULT_LANG);
    }

    #[test]
    fn missing_header_falls_back_to_default() {
        let locale = Locale::from_headers(&HeaderMap::new());
        assert_eq!(locale.0, DEFAULT_LANG);
    }
}
