//! Shared test doubles: a scripted session, a recording notifier, and a
//! recording report sink.

pub mod notifier;
pub mod session;
pub mod sink;

use std::io::Write;

use mule::catalog::ItemCatalog;

/// Build a small catalog covering every tier used by the integration tests.
pub fn test_catalog() -> ItemCatalog {
    let json = r#"[
        {"id": 1, "name": "Dog", "type": "Pet", "rarity": "common", "sellPrice": 10},
        {"id": 2, "name": "Cat", "type": "Pet", "rarity": "common", "sellPrice": 12},
        {"id": 3, "name": "Fox", "type": "Pet", "rarity": "rare", "sellPrice": 80},
        {"id": 4, "name": "Griffin", "type": "Pet", "rarity": "epic", "sellPrice": 400},
        {"id": 5, "name": "Unicorn", "type": "Pet", "rarity": "legendary", "sellPrice": 2000},
        {"id": 6, "name": "Dragon", "type": "Pet", "rarity": "mythic", "sellPrice": 9000},
        {"id": 7, "name": "Phoenix", "type": "Pet", "rarity": "secret", "sellPrice": 50000}
    ]"#;

    let mut file = tempfile::NamedTempFile::new().expect("create temp catalog");
    file.write_all(json.as_bytes()).expect("write temp catalog");
    ItemCatalog::load(file.path()).expect("load test catalog")
}
