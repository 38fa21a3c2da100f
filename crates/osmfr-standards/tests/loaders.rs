//! File-backed loader tests over small registry fixtures.

use std::fs;
use std::path::PathBuf;

use osmfr_standards::{Catalogs, PostalCatalog, StreetCatalog, WayTypeCatalog};

fn write_fixture(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("write fixture");
    path
}

const WAY_TYPES_CSV: &str = "TYPE;TYPE_NAME\nRUE;RUE\nAV;AVENUE\nCHE;CHEMIN\nLOT;LOTISSEMENT\n";

fn fantoir_lines() -> String {
    // fixed-width records: rivoli key [0,11), nature-of-way code [11,15),
    // label [15,41), then registry tail we must ignore
    let mut out = String::new();
    out.push_str("FANTOIR HEADER LINE\n");
    // commune record: short first token, must be skipped
    out.push_str("974401     SAINT JOSEPH                    0000\n");
    out.push_str(&format!(
        "{:<11}{:<4}{:<26}{}\n",
        "974401A001V", "LOT", "PITON ROUGE", "00000000 TAIL"
    ));
    out.push_str(&format!(
        "{:<11}{:<4}{:<26}{}\n",
        "974401B002W", "RUE", "GENERAL LECLERC", "00000000 TAIL"
    ));
    out.push_str(&format!(
        "{:<11}{:<4}{:<26}{}\n",
        "974412C003X", "CHE", "LIGNE PARADIS", "00000000 TAIL"
    ));
    // unknown nature-of-way code: dropped
    out.push_str(&format!(
        "{:<11}{:<4}{:<26}{}\n",
        "974401D004Y", "ZZZ", "NULLE PART", "00000000 TAIL"
    ));
    // other department: dropped
    out.push_str(&format!(
        "{:<11}{:<4}{:<26}{}\n",
        "973101E005Z", "RUE", "CAYENNE", "00000000 TAIL"
    ));
    out
}

const POSTAL_CSV: &str = "Code_postal;Nom_commune;Libelle_acheminement\n\
                          97480;Saint-Joseph;ST JOSEPH\n\
                          97429;Petite-Île;PETITE ILE\n";

#[test]
fn loads_way_type_nomenclature() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_fixture(&dir, "way-types.csv", WAY_TYPES_CSV);

    let catalog = WayTypeCatalog::load(&path).expect("load way types");
    assert_eq!(catalog.len(), 4);
    assert_eq!(catalog.name_for_code("AV"), Some("AVENUE"));
    assert_eq!(catalog.name_for_code("av"), Some("AVENUE"));
    assert_eq!(catalog.name_for_code("XXX"), None);

    let tokens = catalog.street_tokens();
    assert!(tokens.contains("Avenue"));
    assert!(tokens.contains("AV"));
    assert!(tokens.contains("place"));
}

#[test]
fn loads_street_catalog_for_area() {
    let dir = tempfile::tempdir().expect("tempdir");
    let way_types_path = write_fixture(&dir, "way-types.csv", WAY_TYPES_CSV);
    let fantoir_path = write_fixture(&dir, "FANTOIR", &fantoir_lines());

    let way_types = WayTypeCatalog::load(&way_types_path).expect("load way types");
    let streets = StreetCatalog::load(&fantoir_path, "974", &way_types).expect("load streets");

    assert_eq!(streets.len(), 3);
    assert!(streets.contains_name("PITON ROUGE"));
    assert!(streets.contains_name("Général Leclerc"));
    assert!(!streets.contains_name("NULLE PART"));
    assert!(!streets.contains_name("CAYENNE"));

    let locality = streets
        .names_for_locality("974401")
        .expect("known locality");
    assert!(locality.contains("PITON ROUGE"));
    assert!(locality.contains("GENERAL LECLERC"));
    assert!(!locality.contains("LIGNE PARADIS"));
    assert!(streets.names_for_locality("974412").is_some());
    assert!(streets.names_for_locality("999999").is_none());
}

#[test]
fn loads_postal_registry_both_ways() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_fixture(&dir, "laposte.csv", POSTAL_CSV);

    let postal = PostalCatalog::load(&path).expect("load postal registry");
    assert_eq!(postal.len(), 2);
    assert!(postal.known_postcode("97480"));
    assert!(!postal.known_postcode("97999"));
    assert!(postal.known_locality("ST JOSEPH"));
    assert!(postal.known_locality("Petite Île"));
    assert!(postal.known_locality("PETITE ILE"));
    assert!(!postal.known_locality("CILAOS"));
    assert_eq!(postal.city_for_postcode("97480"), Some("Saint-Joseph"));
    assert_eq!(postal.postcode_for_locality("ST JOSEPH"), Some("97480"));
    assert_eq!(postal.locality_for_postcode("97429"), Some("PETITE ILE"));
}

#[test]
fn bundles_catalogs_with_grammar_tokens() {
    let dir = tempfile::tempdir().expect("tempdir");
    let way_types_path = write_fixture(&dir, "way-types.csv", WAY_TYPES_CSV);
    let fantoir_path = write_fixture(&dir, "FANTOIR", &fantoir_lines());
    let postal_path = write_fixture(&dir, "laposte.csv", POSTAL_CSV);

    let catalogs =
        Catalogs::load(&way_types_path, &fantoir_path, "974", &postal_path).expect("load bundle");
    assert!(catalogs.street_tokens().contains("chemin"));
    assert!(catalogs.streets.contains_name("LIGNE PARADIS"));
    assert!(catalogs.postal.known_postcode("97429"));
}

#[test]
fn missing_file_reports_path() {
    let error = WayTypeCatalog::load(std::path::Path::new("/nonexistent/way-types.csv"))
        .expect_err("missing file must fail");
    assert!(error.to_string().contains("way-types.csv"));
}
