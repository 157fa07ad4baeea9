//! Message resolution port.
//!
//! User-facing messages are written in English and used as lookup keys.
//! Services receive a [`Translator`] instead of reaching for global state.

use std::sync::Arc;

/// Resolves a message id for a locale.
pub trait MessageResolver: Send + Sync {
    /// Returns the translation of `msgid` for `locale`, or `None` when the
    /// catalog has no entry.
    fn lookup(&self, locale: &str, msgid: &str) -> Option<String>;
}

/// Resolver that never translates; messages come out as written.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityResolver;

impl MessageResolver for IdentityResolver {
    fn lookup(&self, _locale: &str, _msgid: &str) -> Option<String> {
        None
    }
}

/// A resolver bound to one locale.
#[derive(Clone)]
pub struct Translator {
    resolver: Arc<dyn MessageResolver>,
    locale: String,
}

impl Translator {
    pub fn new(resolver: Arc<dyn MessageResolver>, locale: impl Into<String>) -> Self {
        Self {
            resolver,
            locale: locale.into(),
        }
    }

    pub fn identity() -> Self {
        Self::new(Arc::new(IdentityResolver), "en")
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Translates `msgid`, falling back to the id itself.
    pub fn tr(&self, msgid: &str) -> String {
        self.resolver
            .lookup(&self.locale, msgid)
            .unwrap_or_else(|| msgid.to_string())
    }
}

impl Default for Translator {
    fn default() -> Self {
        Self::identity()
    }
}

impl std::fmt::Debug for Translator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Translator")
            .field("locale", &self.locale)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Spanish;

    impl MessageResolver for Spanish {
        fn lookup(&self, locale: &str, msgid: &str) -> Option<String> {
            (locale == "es" && msgid == "hello").then(|| "hola".to_string())
        }
    }

    #[test]
    fn test_identity_returns_msgid() {
        assert_eq!(Translator::identity().tr("hello"), "hello");
    }

    #[test]
    fn test_locale_is_passed_to_resolver() {
        let es = Translator::new(Arc::new(Spanish), "es");
        let gl = Translator::new(Arc::new(Spanish), "gl");
        assert_eq!(es.tr("hello"), "hola");
        assert_eq!(gl.tr("hello"), "hello");
    }
}
