use storyteller_core::LanguageCode;

#[test]
fn accepts_common_codes() {
    for raw in ["en", "fr", "de", "ja", "yue", "zh-CN", "zh-TW", "pt-BR", "sr-Latn"] {
        assert!(LanguageCode::parse(raw).is_ok(), "{raw} should parse");
    }
}

#[test]
fn normalizes_case() {
    assert_eq!(LanguageCode::parse("EN").unwrap().as_str(), "en");
    assert_eq!(LanguageCode::parse("en-gb").unwrap().as_str(), "en-GB");
    assert_eq!(LanguageCode::parse(" fr ").unwrap().as_str(), "fr");
}

#[test]
fn rejects_malformed_codes() {
    for raw in ["", "e", "invalid_lang", "english", "en-", "en-US-x", "1a", "en-toolong"] {
        assert!(LanguageCode::parse(raw).is_err(), "{raw:?} should be rejected");
    }
}

#[test]
fn default_is_english() {
    assert_eq!(LanguageCode::default().as_str(), "en");
}

#[test]
fn serde_goes_through_validation() {
    let code: LanguageCode = serde_json::from_str(r#""es""#).unwrap();
    assert_eq!(code.as_str(), "es");
    assert!(serde_json::from_str::<LanguageCode>(r#""not a code""#).is_err());
    assert_eq!(serde_json::to_string(&code).unwrap(), r#""es""#);
}
