//! # ScanDex CLI
//!
//! Terminal front-end for decoding barcodes and cross-referencing the
//! product catalog.
//!
//! ## Usage
//! ```bash
//! # Decode a barcode
//! scandex 01111111111111141725033121LOT42
//!
//! # Decode and resolve the reference number against a catalog
//! scandex --catalog articles.json 0104006381333931172503312155A7
//!
//! # Catalog-only lookup: identifier → reference number
//! scandex --catalog articles.json --lookup 04006381333931
//!
//! # Reverse lookup: reference number → identifier
//! scandex --catalog articles.json --lookup 81.29.31 --reverse
//! ```
//!
//! The catalog path falls back to the `SCANDEX_CATALOG` environment
//! variable when `--catalog` is not given.

use std::env;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use scandex_catalog::{load_catalog, CatalogIndex, CatalogSearcher};
use scandex_core::decode;

fn main() {
    init_tracing();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut catalog_path: Option<String> = env::var("SCANDEX_CATALOG").ok();
    let mut lookup_term: Option<String> = None;
    let mut reverse = false;
    let mut barcode: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--catalog" | "-c" => {
                if i + 1 < args.len() {
                    catalog_path = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--lookup" | "-l" => {
                if i + 1 < args.len() {
                    lookup_term = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--reverse" | "-r" => {
                reverse = true;
            }
            "--help" | "-h" => {
                print_help();
                return;
            }
            other => {
                barcode = Some(other.to_string());
            }
        }
        i += 1;
    }

    match (lookup_term, barcode) {
        (Some(term), _) => run_lookup(&term, reverse, catalog_path.as_deref()),
        (None, Some(barcode)) => run_decode(&barcode, catalog_path.as_deref()),
        (None, None) => {
            eprintln!("✗ No barcode or --lookup term given. See --help.");
            std::process::exit(1);
        }
    }
}

/// Decode one barcode; resolve the reference number when a catalog is
/// available.
fn run_decode(barcode: &str, catalog_path: Option<&str>) {
    let decoded = match decode(barcode) {
        Ok(decoded) => decoded,
        Err(e) => {
            eprintln!("✗ {e}");
            std::process::exit(1);
        }
    };

    println!("Identifier:  {}", decoded.identifier);
    println!(
        "Valid:       {}",
        if decoded.identifier_valid { "yes" } else { "no (check digit)" }
    );
    println!("Expiry:      {}", decoded.expiry.as_deref().unwrap_or("-"));
    println!("Serial:      {}", decoded.serial.as_deref().unwrap_or("-"));

    if catalog_path.is_some() {
        let searcher = open_catalog(catalog_path);
        match searcher.resolve_reference(&decoded.identifier) {
            Some(reference) => println!("Reference:   {reference}"),
            None => println!("Reference:   not found"),
        }
    }
}

/// Catalog-only resolution: identifier → reference, or the reverse.
fn run_lookup(term: &str, reverse: bool, catalog_path: Option<&str>) {
    if catalog_path.is_none() {
        eprintln!("✗ --lookup needs a catalog (--catalog or SCANDEX_CATALOG).");
        std::process::exit(1);
    }

    let searcher = open_catalog(catalog_path);
    let resolved = if reverse {
        searcher.resolve_identifier(term)
    } else {
        searcher.resolve_reference(term)
    };

    match resolved {
        Some(found) => println!("{found}"),
        None => {
            println!("not found");
            std::process::exit(1);
        }
    }
}

/// Loads the catalog and builds its index once. A failed load is reported
/// and degrades to the empty index: lookups simply find nothing.
fn open_catalog(catalog_path: Option<&str>) -> CatalogSearcher {
    let index = match catalog_path {
        Some(path) => match load_catalog(path) {
            Ok(document) => {
                let index = CatalogIndex::build(document);
                info!(records = index.len(), "catalog ready");
                index
            }
            Err(e) => {
                eprintln!("⚠ Catalog unavailable: {e}");
                warn!(error = %e, "continuing with empty catalog index");
                CatalogIndex::empty()
            }
        },
        None => CatalogIndex::empty(),
    };

    CatalogSearcher::new(index)
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=scandex=trace` - Trace the scandex crates only
/// - Default: WARN level, so the printed output stays clean
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn print_help() {
    println!("ScanDex - barcode decode and catalog cross-reference");
    println!();
    println!("Usage: scandex [OPTIONS] <BARCODE>");
    println!("       scandex [OPTIONS] --lookup <TERM>");
    println!();
    println!("Options:");
    println!("  -c, --catalog <PATH>  Catalog JSON file (or SCANDEX_CATALOG env var)");
    println!("  -l, --lookup <TERM>   Resolve identifier → reference number");
    println!("  -r, --reverse         With --lookup: reference number → identifier");
    println!("  -h, --help            Show this help message");
}
