//! Tests for library catalog construction and queries.

use lslcheck::{
    CatalogError, DuplicateHandling, FunctionSignature, LibraryCatalog, Parameter, TagSet,
    ValueType,
};

const OVERLOAD_DOCUMENT: &str = r#"<LSLLibraryData>
    <LibraryFunction Name="llSin" ReturnType="Float" Subsets="lsl">
        <Parameter Name="theta" Type="Float"/>
    </LibraryFunction>
    <LibraryFunction Name="llList2Key" ReturnType="Key" Subsets="lsl">
        <Parameter Name="src" Type="List"/>
        <Parameter Name="index" Type="Integer"/>
    </LibraryFunction>
    <LibraryFunction Name="llList2Key" ReturnType="Key" Subsets="ossl">
        <Parameter Name="src" Type="List"/>
    </LibraryFunction>
    <LibraryConstant Name="PI" Type="Float" Subsets="lsl" Value="3.14159"/>
    <EventHandler Name="touch_start" Subsets="lsl">
        <Parameter Name="num_detected" Type="Integer"/>
    </EventHandler>
</LSLLibraryData>"#;

fn subsets(tags: &[&str]) -> TagSet {
    tags.iter().copied().collect()
}

#[test]
fn test_all_sentinel_retains_every_record() {
    let catalog = LibraryCatalog::from_xml(
        OVERLOAD_DOCUMENT,
        subsets(&["all"]),
        DuplicateHandling::Strict,
    )
    .expect("document should load");

    // "all" forces accumulate mode, so both llList2Key shapes survive.
    assert_eq!(catalog.mode(), DuplicateHandling::Accumulate);
    let overloads = catalog.lookup_function_overloads("llList2Key");
    assert_eq!(overloads.len(), 2, "both overloads should be retained");
    assert_eq!(
        overloads[0].params.len(),
        2,
        "document order: two-parameter overload first"
    );
    assert_eq!(overloads[1].params.len(), 1);
}

#[test]
fn test_strict_mode_admits_only_desired_subsets() {
    let catalog = LibraryCatalog::from_xml(
        OVERLOAD_DOCUMENT,
        subsets(&["lsl"]),
        DuplicateHandling::Strict,
    )
    .expect("document should load");

    assert!(catalog.function_exists("llSin"));
    assert!(catalog.constant_exists("PI"));
    assert!(catalog.event_handler_exists("touch_start"));

    // The single-parameter llList2Key is tagged ossl only.
    let overloads = catalog.lookup_function_overloads("llList2Key");
    assert_eq!(overloads.len(), 1);
    assert_eq!(overloads[0].params.len(), 2);
}

#[test]
fn test_strict_duplicate_function_cites_second_definition_line() {
    let document = r#"<LSLLibraryData>
    <LibraryFunction Name="llSin" ReturnType="Float" Subsets="lsl">
        <Parameter Name="theta" Type="Float"/>
    </LibraryFunction>
    <LibraryFunction Name="llSin" ReturnType="Integer" Subsets="lsl">
        <Parameter Name="theta" Type="Float"/>
    </LibraryFunction>
</LSLLibraryData>"#;

    let err = LibraryCatalog::from_xml(document, subsets(&["lsl"]), DuplicateHandling::Strict)
        .expect_err("same parameter shape under strict mode must fail");

    match err {
        CatalogError::DuplicateSignature { line, name } => {
            assert_eq!(name, "llSin");
            assert_eq!(line, 5, "error should cite the colliding definition");
        }
        other => panic!("expected DuplicateSignature, got: {other}"),
    }
}

#[test]
fn test_colliding_document_succeeds_under_all() {
    // The same shape that fails strict construction loads fine under the
    // "all" sentinel, which forces accumulate mode.
    let document = r#"<LSLLibraryData>
    <LibraryFunction Name="llSin" ReturnType="Float" Subsets="lsl">
        <Parameter Name="theta" Type="Float"/>
    </LibraryFunction>
    <LibraryFunction Name="llSin" ReturnType="Integer" Subsets="lsl">
        <Parameter Name="theta" Type="Float"/>
    </LibraryFunction>
</LSLLibraryData>"#;

    let catalog =
        LibraryCatalog::from_xml(document, subsets(&["all"]), DuplicateHandling::Strict)
            .expect("all sentinel must disable uniqueness checks");
    let overloads = catalog.lookup_function_overloads("llSin");
    assert_eq!(overloads.len(), 2);
    assert_eq!(overloads[0].return_type, ValueType::Float);
    assert_eq!(overloads[1].return_type, ValueType::Integer);
}

#[test]
fn test_strict_duplicate_constant_rejected() {
    let document = r#"<LSLLibraryData>
    <LibraryConstant Name="PI" Type="Float" Subsets="lsl" Value="3.14159"/>
    <LibraryConstant Name="PI" Type="String" Subsets="lsl" Value="pie"/>
</LSLLibraryData>"#;

    let err = LibraryCatalog::from_xml(document, subsets(&["lsl"]), DuplicateHandling::Strict)
        .expect_err("duplicate constant under strict mode must fail");
    assert!(matches!(err, CatalogError::DuplicateSignature { .. }));
}

#[test]
fn test_strict_duplicate_outside_desired_subsets_is_harmless() {
    // The colliding second definition is tagged into a subset we never asked
    // for, so it is discarded before any uniqueness check.
    let document = r#"<LSLLibraryData>
    <LibraryConstant Name="PI" Type="Float" Subsets="lsl" Value="3.14159"/>
    <LibraryConstant Name="PI" Type="String" Subsets="ossl" Value="pie"/>
</LSLLibraryData>"#;

    let catalog =
        LibraryCatalog::from_xml(document, subsets(&["lsl"]), DuplicateHandling::Strict)
            .expect("collision outside desired subsets should not abort");
    assert_eq!(
        catalog.lookup_constant("PI").unwrap().ty,
        ValueType::Float
    );
}

#[test]
fn test_accumulate_mode_keeps_colliding_definitions() {
    let document = r#"<LSLLibraryData>
    <LibraryFunction Name="llSin" ReturnType="Float" Subsets="lsl">
        <Parameter Name="theta" Type="Float"/>
    </LibraryFunction>
    <LibraryFunction Name="llSin" ReturnType="Integer" Subsets="ossl">
        <Parameter Name="theta" Type="Float"/>
    </LibraryFunction>
</LSLLibraryData>"#;

    let catalog = LibraryCatalog::from_xml(
        document,
        subsets(&["lsl", "ossl"]),
        DuplicateHandling::Accumulate,
    )
    .expect("accumulate mode performs no uniqueness checks");
    assert_eq!(catalog.lookup_function_overloads("llSin").len(), 2);
}

#[test]
fn test_exact_signature_lookup_includes_return_type() {
    let catalog = LibraryCatalog::from_xml(
        OVERLOAD_DOCUMENT,
        subsets(&["all"]),
        DuplicateHandling::Strict,
    )
    .unwrap();

    let exact = FunctionSignature::new(
        ValueType::Float,
        "llSin",
        vec![Parameter::new("x", ValueType::Float)],
    );
    assert!(catalog.function_exists_exact(&exact), "parameter names do not matter");

    let wrong_return = FunctionSignature::new(
        ValueType::Integer,
        "llSin",
        vec![Parameter::new("x", ValueType::Float)],
    );
    assert!(!catalog.function_exists_exact(&wrong_return));
}

#[test]
fn test_is_considered_overload() {
    let catalog = LibraryCatalog::from_xml(
        OVERLOAD_DOCUMENT,
        subsets(&["all"]),
        DuplicateHandling::Strict,
    )
    .unwrap();

    // New parameter shape under an existing name: an overload.
    let fresh = FunctionSignature::new(
        ValueType::Key,
        "llList2Key",
        vec![
            Parameter::new("src", ValueType::List),
            Parameter::new("index", ValueType::Integer),
            Parameter::new("fallback", ValueType::Key),
        ],
    );
    assert!(catalog.is_considered_overload(&fresh));

    // Same shape as an existing definition: a duplicate, not an overload.
    let duplicate = FunctionSignature::new(
        ValueType::Key,
        "llList2Key",
        vec![Parameter::new("src", ValueType::List)],
    );
    assert!(!catalog.is_considered_overload(&duplicate));

    // Unknown name: nothing to overload.
    let unknown = FunctionSignature::new(ValueType::Void, "llNope", vec![]);
    assert!(!catalog.is_considered_overload(&unknown));
}

#[test]
fn test_enumerations_follow_document_order() {
    let catalog = LibraryCatalog::from_xml(
        OVERLOAD_DOCUMENT,
        subsets(&["all"]),
        DuplicateHandling::Strict,
    )
    .unwrap();

    let names: Vec<_> = catalog
        .function_groups()
        .map(|(name, _)| name.as_str().to_owned())
        .collect();
    assert_eq!(names, ["llSin", "llList2Key"]);

    let constants: Vec<_> = catalog.constants().map(|c| c.name.as_str()).collect();
    assert_eq!(constants, ["PI"]);
}

#[test]
fn test_constant_value_and_docs_captured() {
    let document = r#"<LSLLibraryData>
    <LibraryConstant Name="PI" Type="Float" Subsets="lsl" Value="3.14159">
        <DocumentationString>The ratio of a circle's circumference to its diameter.</DocumentationString>
    </LibraryConstant>
</LSLLibraryData>"#;

    let catalog =
        LibraryCatalog::from_xml(document, subsets(&["lsl"]), DuplicateHandling::Strict).unwrap();
    let pi = catalog.lookup_constant("PI").unwrap();
    assert_eq!(pi.value.as_deref(), Some("3.14159"));
    assert!(pi.docs.starts_with("The ratio"));
    assert_eq!(pi.signature_string(), "float PI");
}

#[test]
fn test_lookup_misses_return_none() {
    let catalog = LibraryCatalog::from_xml(
        OVERLOAD_DOCUMENT,
        subsets(&["lsl"]),
        DuplicateHandling::Strict,
    )
    .unwrap();

    assert!(catalog.lookup_constant("TAU").is_none());
    assert!(catalog.lookup_event_handler("on_rez").is_none());
    assert!(catalog.lookup_function_overloads("llNope").is_empty());
    assert!(!catalog.function_exists("llNope"));
}
