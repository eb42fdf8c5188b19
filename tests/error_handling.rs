use cssmatch::{MatchConfig, MatchError, match_stylesheets};

#[test]
fn input_without_rules_is_fatal() {
    let valid = ".aaaaaaaaaaaaaaaaaaaa{color:red}";
    assert_eq!(
        match_stylesheets("", valid, &MatchConfig::default()),
        Err(MatchError::EmptyStylesheet("A"))
    );
    assert_eq!(
        match_stylesheets(valid, "/* comments only */", &MatchConfig::default()),
        Err(MatchError::EmptyStylesheet("B"))
    );
}

#[test]
fn invalid_config_is_rejected_before_parsing() {
    let valid = ".aaaaaaaaaaaaaaaaaaaa{color:red}";
    let cfg = MatchConfig {
        distance_threshold: 1.5,
        ..Default::default()
    };
    assert!(matches!(
        match_stylesheets(valid, valid, &cfg),
        Err(MatchError::InvalidConfig(_))
    ));
}

#[test]
fn stylesheets_without_class_tokens_yield_an_empty_report() {
    // Parsable rules, but no 20-character tokens anywhere.
    let a = ".header{color:red}";
    let b = ".footer{color:red}";
    let report = match_stylesheets(a, b, &MatchConfig::default()).unwrap();
    assert!(report.all_pairs.is_empty());
    assert!(report.pairs.is_empty());
}

#[test]
fn zero_declaration_selectors_do_not_crash_the_metric() {
    // Both classes live on declaration-less rules; identical empty sets
    // compare at distance zero and the pair survives the threshold.
    let a = ".gggggggggggggggggggg{}";
    let b = ".hhhhhhhhhhhhhhhhhhhh{}";
    let report = match_stylesheets(a, b, &MatchConfig::default()).unwrap();
    assert_eq!(report.all_pairs[0].2, 0.0);
    assert_eq!(report.pairs["gggggggggggggggggggg"], "hhhhhhhhhhhhhhhhhhhh");
}

#[test]
fn empty_against_declared_rules_stay_apart() {
    let a = ".gggggggggggggggggggg{}";
    let b = ".hhhhhhhhhhhhhhhhhhhh{color:red;margin:0}";
    let report = match_stylesheets(a, b, &MatchConfig::default()).unwrap();
    assert_eq!(report.all_pairs[0].2, 1.0);
    assert!(report.pairs.is_empty());
}

#[test]
fn malformed_rules_are_recovered_not_fatal() {
    let a = "x;;.aaaaaaaaaaaaaaaaaaaa{color:red;broken}";
    let b = ".aaaaaaaaaaaaaaaaaaaa{color:red}";
    let report = match_stylesheets(a, b, &MatchConfig::default()).unwrap();
    assert_eq!(report.pairs["aaaaaaaaaaaaaaaaaaaa"], "aaaaaaaaaaaaaaaaaaaa");
    assert_eq!(report.all_pairs[0].2, 0.0);
}
