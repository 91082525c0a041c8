//! Tests for live subset filtering.

use lslcheck::{CatalogError, DuplicateHandling, LibraryCatalog, TagSet};

const MIXED_DOCUMENT: &str = r#"<LSLLibraryData>
    <LibraryFunction Name="llSin" ReturnType="Float" Subsets="lsl">
        <Parameter Name="theta" Type="Float"/>
    </LibraryFunction>
    <LibraryFunction Name="osTeleportAgent" ReturnType="Void" Subsets="ossl">
        <Parameter Name="agent" Type="Key"/>
        <Parameter Name="position" Type="Vector"/>
        <Parameter Name="lookat" Type="Vector"/>
    </LibraryFunction>
    <LibraryConstant Name="FOO" Type="Integer" Subsets="ossl" Value="1"/>
    <LibraryConstant Name="PI" Type="Float" Subsets="lsl" Value="3.14159"/>
    <EventHandler Name="touch_start" Subsets="lsl">
        <Parameter Name="num_detected" Type="Integer"/>
    </EventHandler>
</LSLLibraryData>"#;

fn subsets(tags: &[&str]) -> TagSet {
    tags.iter().copied().collect()
}

#[test]
fn test_live_catalog_starts_fully_visible() {
    let catalog = LibraryCatalog::live_filtered(MIXED_DOCUMENT).unwrap();

    assert!(catalog.is_live_filtering());
    assert!(catalog.function_exists("llSin"));
    assert!(catalog.function_exists("osTeleportAgent"));
    assert!(catalog.constant_exists("FOO"));
}

#[test]
fn test_visibility_toggles_without_reparse() {
    let mut catalog = LibraryCatalog::live_filtered(MIXED_DOCUMENT).unwrap();

    catalog.set_active_subsets(subsets(&["lsl"])).unwrap();
    assert!(catalog.constant_exists("PI"));
    assert!(
        !catalog.constant_exists("FOO"),
        "ossl-only constant must be invisible under lsl"
    );
    assert!(!catalog.function_exists("osTeleportAgent"));

    catalog.set_active_subsets(subsets(&["ossl"])).unwrap();
    assert!(
        catalog.constant_exists("FOO"),
        "previously hidden constant must reappear after a subset swap"
    );
    assert!(!catalog.constant_exists("PI"));

    // Back to everything via the sentinel.
    catalog.set_active_subsets(subsets(&["all"])).unwrap();
    assert!(catalog.constant_exists("FOO"));
    assert!(catalog.constant_exists("PI"));
}

#[test]
fn test_enumerations_respect_active_subsets() {
    let mut catalog = LibraryCatalog::live_filtered(MIXED_DOCUMENT).unwrap();
    catalog.set_active_subsets(subsets(&["lsl"])).unwrap();

    let constants: Vec<_> = catalog.constants().map(|c| c.name.as_str()).collect();
    assert_eq!(constants, ["PI"]);

    let functions: Vec<_> = catalog
        .function_groups()
        .map(|(name, _)| name.as_str().to_owned())
        .collect();
    assert_eq!(functions, ["llSin"]);

    let events: Vec<_> = catalog.event_handlers().map(|e| e.name.as_str()).collect();
    assert_eq!(events, ["touch_start"]);
}

#[test]
fn test_snapshot_outlives_swap() {
    let mut catalog = LibraryCatalog::live_filtered(MIXED_DOCUMENT).unwrap();
    catalog.set_active_subsets(subsets(&["lsl"])).unwrap();

    let before = catalog.active_subsets();
    catalog.set_active_subsets(subsets(&["ossl"])).unwrap();

    // The old snapshot is untouched by the swap.
    assert!(before.contains("lsl"));
    assert!(!before.contains("ossl"));
    assert!(catalog.active_subsets().contains("ossl"));
}

#[test]
fn test_swap_rejected_without_live_filtering() {
    let mut catalog = LibraryCatalog::from_xml(
        MIXED_DOCUMENT,
        subsets(&["lsl"]),
        DuplicateHandling::Strict,
    )
    .unwrap();

    assert!(!catalog.is_live_filtering());
    let err = catalog.set_active_subsets(subsets(&["ossl"])).unwrap_err();
    assert!(matches!(err, CatalogError::LiveFilteringDisabled));
}

#[test]
fn test_static_catalog_ignores_visibility_filter() {
    // A statically filtered catalog answers queries over everything it
    // admitted at build time.
    let catalog = LibraryCatalog::from_xml(
        MIXED_DOCUMENT,
        subsets(&["lsl", "ossl"]),
        DuplicateHandling::Strict,
    )
    .unwrap();
    assert!(catalog.constant_exists("FOO"));
    assert!(catalog.constant_exists("PI"));
}
