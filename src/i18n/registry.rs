//! Locale registry: single source of truth for countries, languages, and
//! translation sets.
//!
//! The registry is pure reference data. It is validated once when it is
//! built (duplicate codes and dangling country→language references are
//! rejected at load time) and is immutable afterwards, so every lookup is
//! a plain read with no coordination.

use anyhow::{bail, Result};
use std::collections::HashMap;
use std::sync::OnceLock;

/// A country served by the platform.
///
/// `language` is the country's default language code and must reference an
/// entry in the language table; this is enforced when the registry is built.
#[derive(Debug, Clone)]
pub struct Country {
    /// ISO 3166-1 alpha-2 code (e.g., "GB", "FR")
    pub code: &'static str,

    /// English display name
    pub name: &'static str,

    /// Flag glyph shown in the country picker
    pub flag: &'static str,

    /// ISO 4217 currency code (e.g., "GBP", "EUR")
    pub currency: &'static str,

    /// Region label used to group the country picker
    pub region: &'static str,

    /// Default language code for visitors from this country
    pub language: &'static str,
}

/// A language supported by the platform.
#[derive(Debug, Clone)]
pub struct LanguageInfo {
    /// ISO 639-1 language code (e.g., "en", "es")
    pub code: &'static str,

    /// English name of the language (e.g., "Spanish")
    pub name: &'static str,

    /// Native name of the language (e.g., "Español")
    pub native_name: &'static str,
}

/// Per-language translation set: string key → localized string.
pub type TranslationSet = HashMap<&'static str, &'static str>;

/// Per-language ordered message arrays for one rotation category.
pub type RotationMessages = HashMap<&'static str, Vec<&'static str>>;

/// Global locale registry.
///
/// Holds all reference data the engine resolves against. Obtain the
/// process-wide instance with [`LocaleRegistry::get`]; tests that need
/// custom data can construct one with [`LocaleRegistry::new`].
#[derive(Debug)]
pub struct LocaleRegistry {
    countries: Vec<Country>,
    languages: Vec<LanguageInfo>,
    translations: HashMap<&'static str, TranslationSet>,
    promotional: RotationMessages,
    emotional: RotationMessages,
}

/// The reference language: the set all fallback and completeness decisions
/// are measured against.
pub const REFERENCE_LANGUAGE: &str = "en";

/// Global registry instance (initialized lazily)
static REGISTRY: OnceLock<LocaleRegistry> = OnceLock::new();

impl LocaleRegistry {
    /// Get the global registry instance.
    ///
    /// Initialized from the built-in catalog data on first call. The
    /// built-in data is covered by tests, so validation cannot fail here.
    pub fn get() -> &'static LocaleRegistry {
        REGISTRY.get_or_init(|| {
            Self::new(
                default_countries(),
                default_languages(),
                default_translations(),
                default_promotional_messages(),
                default_emotional_messages(),
            )
            .expect("built-in locale data is valid")
        })
    }

    /// Build a registry from explicit data, validating its invariants.
    ///
    /// # Errors
    /// Fails if a country or language code is duplicated, if a country's
    /// default language is not in the language table, if a translation set
    /// or message array is keyed by an unknown language, or if any
    /// non-reference set contains a key absent from the reference set.
    pub fn new(
        countries: Vec<Country>,
        languages: Vec<LanguageInfo>,
        translations: HashMap<&'static str, TranslationSet>,
        promotional: RotationMessages,
        emotional: RotationMessages,
    ) -> Result<Self> {
        let mut seen_languages = Vec::new();
        for lang in &languages {
            if seen_languages.contains(&lang.code) {
                bail!("duplicate language code '{}' in registry", lang.code);
            }
            seen_languages.push(lang.code);
        }

        let mut seen_countries = Vec::new();
        for country in &countries {
            if seen_countries.contains(&country.code) {
                bail!("duplicate country code '{}' in registry", country.code);
            }
            seen_countries.push(country.code);

            if !seen_languages.contains(&country.language) {
                bail!(
                    "country '{}' references unknown language '{}'",
                    country.code,
                    country.language
                );
            }
        }

        let reference_keys: Vec<&str> = translations
            .get(REFERENCE_LANGUAGE)
            .map(|set| set.keys().copied().collect())
            .unwrap_or_default();

        for (lang, set) in &translations {
            if !seen_languages.contains(lang) {
                bail!("translation set for unknown language '{}'", lang);
            }
            if *lang == REFERENCE_LANGUAGE {
                continue;
            }
            for key in set.keys() {
                if !reference_keys.contains(key) {
                    bail!(
                        "key '{}' in '{}' is missing from the reference set",
                        key,
                        lang
                    );
                }
            }
        }

        for messages in [&promotional, &emotional] {
            for lang in messages.keys() {
                if !seen_languages.contains(lang) {
                    bail!("rotation messages for unknown language '{}'", lang);
                }
            }
        }

        Ok(Self {
            countries,
            languages,
            translations,
            promotional,
            emotional,
        })
    }

    /// All countries, in registry order.
    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    /// All supported languages, in registry order. This is the closed
    /// allow-list the detector and SEO generators work from.
    pub fn languages(&self) -> &[LanguageInfo] {
        &self.languages
    }

    /// Look up a country by its ISO2 code.
    pub fn country_by_code(&self, code: &str) -> Option<&Country> {
        self.countries.iter().find(|c| c.code == code)
    }

    /// Look up a language by its code.
    pub fn language_by_code(&self, code: &str) -> Option<&LanguageInfo> {
        self.languages.iter().find(|l| l.code == code)
    }

    /// The translation set for a language, if one exists at all.
    pub fn translation_set(&self, language: &str) -> Option<&TranslationSet> {
        self.translations.get(language)
    }

    /// Default country for a language: the alphabetically-first country
    /// code among countries whose default language matches. Alphabetical
    /// order makes the pick independent of registry insertion order.
    pub fn default_country_for(&self, language: &str) -> Option<&Country> {
        self.countries
            .iter()
            .filter(|c| c.language == language)
            .min_by_key(|c| c.code)
    }

    /// Promotional rotation messages for a language (may be empty).
    pub fn promotional_messages(&self, language: &str) -> &[&'static str] {
        self.promotional
            .get(language)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Emotional rotation messages for a language (may be empty).
    pub fn emotional_messages(&self, language: &str) -> &[&'static str] {
        self.emotional
            .get(language)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

// ==================== Built-in catalog data ====================

#[rustfmt::skip]
fn default_countries() -> Vec<Country> {
    vec![
        Country { code: "GB", name: "United Kingdom", flag: "🇬🇧", currency: "GBP", region: "Europe", language: "en" },
        Country { code: "IE", name: "Ireland", flag: "🇮🇪", currency: "EUR", region: "Europe", language: "en" },
        Country { code: "FR", name: "France", flag: "🇫🇷", currency: "EUR", region: "Europe", language: "fr" },
        Country { code: "DE", name: "Germany", flag: "🇩🇪", currency: "EUR", region: "Europe", language: "de" },
        Country { code: "ES", name: "Spain", flag: "🇪🇸", currency: "EUR", region: "Europe", language: "es" },
        Country { code: "IT", name: "Italy", flag: "🇮🇹", currency: "EUR", region: "Europe", language: "it" },
        Country { code: "PT", name: "Portugal", flag: "🇵🇹", currency: "EUR", region: "Europe", language: "pt" },
        Country { code: "RU", name: "Russia", flag: "🇷🇺", currency: "RUB", region: "Europe", language: "ru" },
        Country { code: "US", name: "United States", flag: "🇺🇸", currency: "USD", region: "North America", language: "en" },
        Country { code: "MX", name: "Mexico", flag: "🇲🇽", currency: "MXN", region: "North America", language: "es" },
        Country { code: "BR", name: "Brazil", flag: "🇧🇷", currency: "BRL", region: "South America", language: "pt" },
        Country { code: "JP", name: "Japan", flag: "🇯🇵", currency: "JPY", region: "Asia", language: "ja" },
        Country { code: "KR", name: "South Korea", flag: "🇰🇷", currency: "KRW", region: "Asia", language: "ko" },
        Country { code: "CN", name: "China", flag: "🇨🇳", currency: "CNY", region: "Asia", language: "zh" },
        Country { code: "IN", name: "India", flag: "🇮🇳", currency: "INR", region: "Asia", language: "hi" },
        Country { code: "AE", name: "United Arab Emirates", flag: "🇦🇪", currency: "AED", region: "Middle East", language: "ar" },
    ]
}

#[rustfmt::skip]
fn default_languages() -> Vec<LanguageInfo> {
    vec![
        LanguageInfo { code: "en", name: "English", native_name: "English" },
        LanguageInfo { code: "es", name: "Spanish", native_name: "Español" },
        LanguageInfo { code: "fr", name: "French", native_name: "Français" },
        LanguageInfo { code: "de", name: "German", native_name: "Deutsch" },
        LanguageInfo { code: "it", name: "Italian", native_name: "Italiano" },
        LanguageInfo { code: "pt", name: "Portuguese", native_name: "Português" },
        LanguageInfo { code: "ru", name: "Russian", native_name: "Русский" },
        LanguageInfo { code: "ja", name: "Japanese", native_name: "日本語" },
        LanguageInfo { code: "ko", name: "Korean", native_name: "한국어" },
        LanguageInfo { code: "zh", name: "Chinese", native_name: "中文" },
        LanguageInfo { code: "ar", name: "Arabic", native_name: "العربية" },
        LanguageInfo { code: "hi", name: "Hindi", native_name: "हिन्दी" },
    ]
}

fn default_translations() -> HashMap<&'static str, TranslationSet> {
    let mut sets = HashMap::new();

    // English is the reference set; every key used anywhere lives here.
    sets.insert(
        "en",
        HashMap::from([
            ("nav.services", "Services"),
            ("nav.trade_lanes", "Trade Lanes"),
            ("nav.developer_hub", "Developer Hub"),
            ("nav.track_shipment", "Track Shipment"),
            ("nav.sign_in", "Sign In"),
            ("nav.ship_now", "Ship Now"),
            ("hero.title", "Ship Anything, Anywhere"),
            ("hero.subtitle", "Global logistics and shipping solutions connecting businesses worldwide"),
            ("service.express_parcel", "Express Parcel"),
            ("service.express_parcel_desc", "Fast and affordable door-to-door delivery"),
            ("service.fcl", "FCL Shipping"),
            ("service.fcl_desc", "Full container loads across our global port network"),
            ("service.air_freight", "Air Freight"),
            ("service.air_freight_desc", "Express air cargo with 48-hour delivery"),
            ("service.lcl", "LCL Shipping"),
            ("service.lcl_desc", "Cost-effective less-than-container loads"),
            ("quote.get_quote", "Get Quote"),
            ("quote.from", "from"),
            ("dashboard.title", "Live Shipping Dashboard"),
            ("dashboard.active_shipments", "Active Shipments"),
            ("dashboard.in_transit", "In Transit"),
            ("dashboard.monthly_volume", "Monthly Volume"),
            ("offers.title", "Special Offers"),
            ("offers.first_time_express", "off your first express shipment"),
            ("offers.claim_offer", "Claim Offer"),
            ("seo.description", "Global logistics and shipping solutions connecting businesses worldwide"),
        ]),
    );

    // Complete translation.
    sets.insert(
        "es",
        HashMap::from([
            ("nav.services", "Servicios"),
            ("nav.trade_lanes", "Rutas Comerciales"),
            ("nav.developer_hub", "Portal de Desarrolladores"),
            ("nav.track_shipment", "Rastrear Envío"),
            ("nav.sign_in", "Iniciar Sesión"),
            ("nav.ship_now", "Enviar Ahora"),
            ("hero.title", "Envía Cualquier Cosa, a Cualquier Lugar"),
            ("hero.subtitle", "Soluciones globales de logística y envío que conectan empresas en todo el mundo"),
            ("service.express_parcel", "Paquete Exprés"),
            ("service.express_parcel_desc", "Entrega puerta a puerta rápida y asequible"),
            ("service.fcl", "Envío FCL"),
            ("service.fcl_desc", "Contenedores completos a través de nuestra red global de puertos"),
            ("service.air_freight", "Carga Aérea"),
            ("service.air_freight_desc", "Carga aérea exprés con entrega en 48 horas"),
            ("service.lcl", "Envío LCL"),
            ("service.lcl_desc", "Carga consolidada económica"),
            ("quote.get_quote", "Obtener Cotización"),
            ("quote.from", "desde"),
            ("dashboard.title", "Panel de Envíos en Vivo"),
            ("dashboard.active_shipments", "Envíos Activos"),
            ("dashboard.in_transit", "En Tránsito"),
            ("dashboard.monthly_volume", "Volumen Mensual"),
            ("offers.title", "Ofertas Especiales"),
            ("offers.first_time_express", "de descuento en tu primer envío exprés"),
            ("offers.claim_offer", "Reclamar Oferta"),
            ("seo.description", "Soluciones globales de logística y envío que conectan empresas en todo el mundo"),
        ]),
    );

    // Partial translation, above the picker threshold. The whitespace-only
    // value for offers.title counts as missing.
    sets.insert(
        "fr",
        HashMap::from([
            ("nav.services", "Services"),
            ("nav.trade_lanes", "Routes Commerciales"),
            ("nav.track_shipment", "Suivre l'Envoi"),
            ("nav.sign_in", "Se Connecter"),
            ("nav.ship_now", "Expédier"),
            ("hero.title", "Expédiez Tout, Partout"),
            ("hero.subtitle", "Solutions logistiques mondiales reliant les entreprises du monde entier"),
            ("service.express_parcel", "Colis Express"),
            ("service.fcl", "Transport FCL"),
            ("service.air_freight", "Fret Aérien"),
            ("service.lcl", "Transport LCL"),
            ("quote.get_quote", "Obtenir un Devis"),
            ("quote.from", "à partir de"),
            ("offers.title", "   "),
            ("seo.description", "Solutions logistiques mondiales reliant les entreprises du monde entier"),
        ]),
    );

    // Partial translation, above the picker threshold.
    sets.insert(
        "de",
        HashMap::from([
            ("nav.services", "Dienstleistungen"),
            ("nav.track_shipment", "Sendung Verfolgen"),
            ("nav.sign_in", "Anmelden"),
            ("nav.ship_now", "Jetzt Versenden"),
            ("hero.title", "Versenden Sie Alles, Überall"),
            ("hero.subtitle", "Globale Logistiklösungen, die Unternehmen weltweit verbinden"),
            ("service.express_parcel", "Expresspaket"),
            ("service.fcl", "FCL-Versand"),
            ("service.air_freight", "Luftfracht"),
            ("service.lcl", "LCL-Versand"),
            ("quote.get_quote", "Angebot Anfordern"),
            ("seo.description", "Globale Logistiklösungen, die Unternehmen weltweit verbinden"),
        ]),
    );

    // Below the picker threshold.
    sets.insert(
        "it",
        HashMap::from([
            ("nav.services", "Servizi"),
            ("nav.track_shipment", "Traccia Spedizione"),
            ("hero.title", "Spedisci Qualsiasi Cosa, Ovunque"),
            ("quote.get_quote", "Richiedi Preventivo"),
        ]),
    );

    sets.insert(
        "pt",
        HashMap::from([
            ("nav.services", "Serviços"),
            ("hero.title", "Envie Qualquer Coisa, Para Qualquer Lugar"),
            ("quote.get_quote", "Obter Cotação"),
        ]),
    );

    sets
}

fn default_promotional_messages() -> RotationMessages {
    HashMap::from([
        (
            "en",
            vec![
                "Global shipping made simple and affordable",
                "Door-to-door delivery in over 190 countries",
                "Real-time tracking on every shipment",
                "Trusted by 10,000+ businesses worldwide",
            ],
        ),
        (
            "es",
            vec![
                "Envíos globales simples y asequibles",
                "Entrega puerta a puerta en más de 190 países",
                "Seguimiento en tiempo real de cada envío",
                "La confianza de más de 10.000 empresas",
            ],
        ),
        (
            "fr",
            vec![
                "L'expédition mondiale, simple et abordable",
                "Livraison porte-à-porte dans plus de 190 pays",
                "Suivi en temps réel de chaque envoi",
            ],
        ),
    ])
}

fn default_emotional_messages() -> RotationMessages {
    HashMap::from([
        (
            "en",
            vec![
                "Your loved ones are far away, but we'll deliver their gifts.",
                "Every parcel carries a story. We carry it safely.",
                "Distance is just a number when delivery is this easy.",
                "From your hands to theirs, wherever they are.",
            ],
        ),
        (
            "es",
            vec![
                "Tus seres queridos están lejos, pero nosotros entregamos sus regalos.",
                "Cada paquete lleva una historia. Nosotros la llevamos a salvo.",
                "La distancia es solo un número cuando enviar es así de fácil.",
                "De tus manos a las suyas, estén donde estén.",
            ],
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lang(code: &'static str) -> LanguageInfo {
        LanguageInfo {
            code,
            name: "Test",
            native_name: "Test",
        }
    }

    fn country(code: &'static str, language: &'static str) -> Country {
        Country {
            code,
            name: "Test",
            flag: "🏳️",
            currency: "USD",
            region: "Test",
            language,
        }
    }

    // ==================== Validation Tests ====================

    #[test]
    fn test_builtin_data_is_valid() {
        let registry = LocaleRegistry::new(
            default_countries(),
            default_languages(),
            default_translations(),
            default_promotional_messages(),
            default_emotional_messages(),
        );
        assert!(registry.is_ok());
    }

    #[test]
    fn test_duplicate_language_code_rejected() {
        let result = LocaleRegistry::new(
            vec![],
            vec![lang("en"), lang("en")],
            HashMap::new(),
            HashMap::new(),
            HashMap::new(),
        );
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("duplicate language code 'en'"));
    }

    #[test]
    fn test_duplicate_country_code_rejected() {
        let result = LocaleRegistry::new(
            vec![country("GB", "en"), country("GB", "en")],
            vec![lang("en")],
            HashMap::new(),
            HashMap::new(),
            HashMap::new(),
        );
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("duplicate country code 'GB'"));
    }

    #[test]
    fn test_dangling_country_language_rejected() {
        let result = LocaleRegistry::new(
            vec![country("FR", "fr")],
            vec![lang("en")],
            HashMap::new(),
            HashMap::new(),
            HashMap::new(),
        );
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("unknown language 'fr'"));
    }

    #[test]
    fn test_translation_set_for_unknown_language_rejected() {
        let result = LocaleRegistry::new(
            vec![],
            vec![lang("en")],
            HashMap::from([("xx", HashMap::from([("k", "v")]))]),
            HashMap::new(),
            HashMap::new(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_key_missing_from_reference_rejected() {
        let result = LocaleRegistry::new(
            vec![],
            vec![lang("en"), lang("es")],
            HashMap::from([
                ("en", HashMap::from([("hero.title", "Hello")])),
                ("es", HashMap::from([("hero.extra", "Hola")])),
            ]),
            HashMap::new(),
            HashMap::new(),
        );
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("missing from the reference set"));
    }

    #[test]
    fn test_rotation_messages_for_unknown_language_rejected() {
        let result = LocaleRegistry::new(
            vec![],
            vec![lang("en")],
            HashMap::new(),
            HashMap::from([("xx", vec!["msg"])]),
            HashMap::new(),
        );
        assert!(result.is_err());
    }

    // ==================== Lookup Tests ====================

    #[test]
    fn test_registry_get_returns_singleton() {
        let registry1 = LocaleRegistry::get();
        let registry2 = LocaleRegistry::get();
        assert!(std::ptr::eq(registry1, registry2));
    }

    #[test]
    fn test_registry_is_debuggable() {
        // Validation errors are surfaced via unwrap_err in tests, which
        // needs the registry itself to format.
        let rendered = format!("{:?}", LocaleRegistry::get());
        assert!(rendered.contains("countries"));
        assert!(rendered.contains("GB"));
    }

    #[test]
    fn test_country_by_code() {
        let registry = LocaleRegistry::get();
        let gb = registry.country_by_code("GB").expect("GB exists");
        assert_eq!(gb.name, "United Kingdom");
        assert_eq!(gb.currency, "GBP");
        assert_eq!(gb.language, "en");
    }

    #[test]
    fn test_country_by_code_unknown() {
        assert!(LocaleRegistry::get().country_by_code("ZZ").is_none());
    }

    #[test]
    fn test_language_by_code() {
        let registry = LocaleRegistry::get();
        let es = registry.language_by_code("es").expect("es exists");
        assert_eq!(es.name, "Spanish");
        assert_eq!(es.native_name, "Español");
    }

    #[test]
    fn test_language_by_code_unknown() {
        assert!(LocaleRegistry::get().language_by_code("xx").is_none());
    }

    #[test]
    fn test_twelve_supported_languages() {
        assert_eq!(LocaleRegistry::get().languages().len(), 12);
    }

    #[test]
    fn test_every_country_language_resolves() {
        let registry = LocaleRegistry::get();
        for country in registry.countries() {
            assert!(
                registry.language_by_code(country.language).is_some(),
                "country {} has dangling language {}",
                country.code,
                country.language
            );
        }
    }

    // ==================== Default Country Tests ====================

    #[test]
    fn test_default_country_alphabetical_tie_break() {
        // GB, IE, and US all default to English; GB sorts first.
        let registry = LocaleRegistry::get();
        assert_eq!(registry.default_country_for("en").unwrap().code, "GB");
    }

    #[test]
    fn test_default_country_portuguese() {
        // BR sorts before PT.
        let registry = LocaleRegistry::get();
        assert_eq!(registry.default_country_for("pt").unwrap().code, "BR");
    }

    #[test]
    fn test_default_country_single_match() {
        let registry = LocaleRegistry::get();
        assert_eq!(registry.default_country_for("ja").unwrap().code, "JP");
    }

    #[test]
    fn test_default_country_no_match() {
        let registry = LocaleRegistry::new(
            vec![country("GB", "en")],
            vec![lang("en"), lang("es")],
            HashMap::new(),
            HashMap::new(),
            HashMap::new(),
        )
        .unwrap();
        assert!(registry.default_country_for("es").is_none());
    }

    // ==================== Rotation Message Tests ====================

    #[test]
    fn test_promotional_messages_present() {
        let registry = LocaleRegistry::get();
        assert_eq!(registry.promotional_messages("en").len(), 4);
        assert_eq!(registry.promotional_messages("fr").len(), 3);
    }

    #[test]
    fn test_rotation_messages_absent_language_is_empty() {
        let registry = LocaleRegistry::get();
        assert!(registry.promotional_messages("ja").is_empty());
        assert!(registry.emotional_messages("xx").is_empty());
    }
}
