// src/common/i18n.rs

use std::collections::HashMap;
use std::sync::Arc;

// Catálogo de mensagens voltadas ao cliente, resolvidas pelo idioma
// extraído do Accept-Language. "en" é o idioma de fallback.
#[derive(Clone)]
pub struct I18nStore {
    // idioma -> (chave -> mensagem)
    messages: Arc<HashMap<&'static str, HashMap<&'static str, &'static str>>>,
}

const FALLBACK_LANG: &str = "en";

impl I18nStore {
    pub fn new() -> Self {
        let catalog: &[(&'static str, &'static str, &'static str)] = &[
            ("validation", "One or more fields are invalid.", "Um ou mais campos são inválidos."),
            ("email_exists", "This e-mail is already in use.", "Este e-mail já está em uso."),
            ("invalid_credentials", "Invalid e-mail or password.", "E-mail ou senha inválidos."),
            ("invalid_session", "Invalid or missing session.", "Sessão inválida ou ausente."),
            ("account_disabled", "This account has been disabled.", "Esta conta foi desativada."),
            ("company_disabled", "This company has been disabled.", "Esta empresa foi desativada."),
            ("forbidden", "Access denied.", "Acesso negado."),
            ("bootstrap_closed", "A super admin already exists.", "Já existe um super admin."),
            ("missing_company", "No company is bound to this session.", "Nenhuma empresa vinculada a esta sessão."),
            ("user_not_found", "User not found.", "Usuário não encontrado."),
            ("company_not_found", "Company not found.", "Empresa não encontrada."),
            ("category_not_found", "Category not found.", "Categoria não encontrada."),
            ("product_not_found", "Product not found.", "Produto não encontrado."),
            ("supplier_not_found", "Supplier not found.", "Fornecedor não encontrado."),
            ("file_not_found", "File not found.", "Arquivo não encontrado."),
            ("insufficient_stock", "Insufficient stock for this exit.", "Estoque insuficiente para esta saída."),
            ("invalid_upload", "Only images are allowed.", "Apenas imagens são permitidas."),
            ("invalid_multipart", "Malformed multipart request.", "Requisição multipart malformada."),
            ("internal", "An unexpected error occurred.", "Ocorreu um erro inesperado."),
        ];

        let mut en = HashMap::new();
        let mut pt = HashMap::new();
        for (key, msg_en, msg_pt) in catalog {
            en.insert(*key, *msg_en);
            pt.insert(*key, *msg_pt);
        }

        let mut messages = HashMap::new();
        messages.insert("en", en);
        messages.insert("pt", pt);

        Self {
            messages: Arc::new(messages),
        }
    }

    pub fn translate(&self, locale: &str, key: &str) -> String {
        let lang = self
            .messages
            .get(locale)
            .unwrap_or_else(|| &self.messages[FALLBACK_LANG]);

        lang.get(key)
            .or_else(|| self.messages[FALLBACK_LANG].get(key))
            .map(|s| s.to_string())
            // Chave desconhecida: devolve a própria chave em vez de 500
            .unwrap_or_else(|| key.to_string())
    }
}

impl Default for I18nStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translates_known_locale() {
        let store = I18nStore::new();
        assert_eq!(
            store.translate("pt", "invalid_credentials"),
            "E-mail ou senha inválidos."
        );
    }

    #[test]
    fn falls_back_to_english_for_unknown_locale() {
        let store = I18nStore::new();
        assert_eq!(
            store.translate("fr", "invalid_credentials"),
            "Invalid e-mail or password."
        );
    }

    #[test]
    fn unknown_key_returns_key() {
        let store = I18nStore::new();
        assert_eq!(store.translate("en", "nope"), "nope");
    }
}
