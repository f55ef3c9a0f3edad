//! End-to-end catalog flow: load a catalog file, build the index once,
//! then cross-reference identifiers both standalone and straight out of a
//! decoded barcode.

use std::fs;

use scandex_catalog::{load_catalog, CatalogError, CatalogIndex, CatalogSearcher};
use scandex_core::decode;

/// A catalog export the way the real data arrives: an object wrapping one
/// array-of-records property, records keyed by varying designator names.
const CATALOG_JSON: &str = r#"{
    "export": "articles 2024-11",
    "rows": [
        {
            "kennzeichen_udi": {
                "UDI (01)": "gs1",
                "ARI_Artikelkennzeichen": "04006381333931"
            },
            "kennzeichen_ref": {
                "(REF) Bestellnummer": "gs1",
                "ARI_Artikelkennzeichen": "81.29.31"
            },
            "bezeichnung": "Titanium Hip Stem Size 2"
        },
        {
            "kennzeichen_udi": {
                "Barcode UDI-DI": "gs1",
                "ARI_Artikelkennzeichen": "04012345678905"
            },
            "kennzeichen_ref": {
                "Artikel (REF)": "gs1",
                "ARI_Artikelkennzeichen": "55.01.77"
            },
            "bezeichnung": "Ceramic Liner 36mm"
        }
    ]
}"#;

fn fixture_searcher(name: &str) -> CatalogSearcher {
    let path = std::env::temp_dir().join(name);
    fs::write(&path, CATALOG_JSON).unwrap();
    let document = load_catalog(&path).unwrap();
    fs::remove_file(&path).ok();
    CatalogSearcher::new(CatalogIndex::build(document))
}

#[test]
fn load_build_and_roundtrip() {
    let searcher = fixture_searcher("scandex_flow_roundtrip.json");
    assert_eq!(searcher.index().len(), 2);

    // identifier → reference and back, for both records
    assert_eq!(
        searcher.resolve_reference("04006381333931").as_deref(),
        Some("81.29.31")
    );
    assert_eq!(
        searcher.resolve_identifier("81.29.31").as_deref(),
        Some("04006381333931")
    );
    assert_eq!(
        searcher.resolve_reference("04012345678905").as_deref(),
        Some("55.01.77")
    );
    assert_eq!(
        searcher.resolve_identifier("55.01.77").as_deref(),
        Some("04012345678905")
    );
}

#[test]
fn decoded_barcode_resolves_against_catalog() {
    let searcher = fixture_searcher("scandex_flow_decode.json");

    // "01" + identifier + "17" + expiry + "21" + serial
    let barcode = format!("01{}17{}21{}", "04006381333931", "250331", "SER777");
    let decoded = decode(&barcode).unwrap();

    assert!(decoded.identifier_valid);
    assert_eq!(decoded.expiry.as_deref(), Some("2025-03-31"));

    assert_eq!(
        searcher.resolve_reference(&decoded.identifier).as_deref(),
        Some("81.29.31")
    );
}

#[test]
fn description_substring_falls_back_to_first_token() {
    let searcher = fixture_searcher("scandex_flow_fallback.json");

    // Not an identifier, not an exact token: the substring fallback finds
    // the record through its indexed description leaf.
    assert_eq!(
        searcher.resolve_identifier("ceramic liner").as_deref(),
        Some("04012345678905")
    );
}

#[test]
fn missing_catalog_is_a_load_error_and_lookups_degrade() {
    let err = load_catalog("/no/such/catalog.json").unwrap_err();
    assert!(matches!(err, CatalogError::FileNotFound(_)));

    // The documented degradation: keep going on the empty index.
    let searcher = CatalogSearcher::new(CatalogIndex::empty());
    assert_eq!(searcher.resolve_reference("04006381333931"), None);
}
