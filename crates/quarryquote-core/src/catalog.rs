use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{AppConfig, ConfigError};

/// A material sold at a fixed price from one quarry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: i64,
    pub name: String,
    pub quarry_id: String,
    pub price: Decimal,
    /// Sales tax as a fraction, e.g. `0.09`.
    pub tax_rate: Decimal,
}

/// Round-trip travel minutes from each quarry to each known destination.
///
/// Read-only after construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DistanceIndex {
    routes: BTreeMap<String, BTreeMap<String, u32>>,
}

impl DistanceIndex {
    #[must_use]
    pub fn new(routes: BTreeMap<String, BTreeMap<String, u32>>) -> Self {
        Self { routes }
    }

    /// Round-trip minutes from `quarry_id` to `destination_id`, or `None`
    /// when no route is known.
    #[must_use]
    pub fn rtt_minutes(&self, quarry_id: &str, destination_id: &str) -> Option<u32> {
        self.routes.get(quarry_id)?.get(destination_id).copied()
    }

    /// Every destination reachable from at least one quarry, sorted.
    #[must_use]
    pub fn destinations(&self) -> Vec<&str> {
        let mut all: Vec<&str> = self
            .routes
            .values()
            .flat_map(|dests| dests.keys().map(String::as_str))
            .collect();
        all.sort_unstable();
        all.dedup();
        all
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// The material list together with the distance index used to quote it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub materials: Vec<CatalogEntry>,
    #[serde(default)]
    pub routes: DistanceIndex,
}

impl Catalog {
    #[must_use]
    pub fn material(&self, id: i64) -> Option<&CatalogEntry> {
        self.materials.iter().find(|m| m.id == id)
    }
}

/// Load and validate a catalog from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_catalog(path: &Path) -> Result<Catalog, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CatalogFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let catalog: Catalog = serde_yaml::from_str(&content)?;

    validate_catalog(&catalog)?;

    Ok(catalog)
}

/// The catalog named by `config`, or [`default_catalog`] when none is set.
///
/// # Errors
///
/// Returns `ConfigError` if a configured catalog file fails to load.
pub fn catalog_from_config(config: &AppConfig) -> Result<Catalog, ConfigError> {
    match config.catalog_path.as_deref() {
        Some(path) => load_catalog(path),
        None => Ok(default_catalog()),
    }
}

fn validate_catalog(catalog: &Catalog) -> Result<(), ConfigError> {
    let mut seen_ids = HashSet::new();

    for material in &catalog.materials {
        if material.name.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "material {} has an empty name",
                material.id
            )));
        }

        if material.quarry_id.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "material '{}' has an empty quarry_id",
                material.name
            )));
        }

        if material.price.is_sign_negative() {
            return Err(ConfigError::Validation(format!(
                "material '{}' has negative price {}",
                material.name, material.price
            )));
        }

        if material.tax_rate.is_sign_negative() || material.tax_rate >= Decimal::ONE {
            return Err(ConfigError::Validation(format!(
                "material '{}' has tax_rate {}; must be a fraction in [0, 1)",
                material.name, material.tax_rate
            )));
        }

        if !seen_ids.insert(material.id) {
            return Err(ConfigError::Validation(format!(
                "duplicate material id: {}",
                material.id
            )));
        }
    }

    Ok(())
}

/// The plant list and distance table shipped with the service.
#[must_use]
pub fn default_catalog() -> Catalog {
    let tax = Decimal::new(9, 2);
    let entry = |id: i64, name: &str, quarry_id: &str, price: Decimal| CatalogEntry {
        id,
        name: name.to_string(),
        quarry_id: quarry_id.to_string(),
        price,
        tax_rate: tax,
    };

    let materials = vec![
        entry(1, "1 1/2\" Crusher Run (594-Cherokee)", "Q_594", Decimal::new(1400, 2)),
        entry(4, "#57 Stone (594-Cherokee)", "Q_594", Decimal::new(1700, 2)),
        entry(9, "Surge Stone (594-Cherokee)", "Q_594", Decimal::new(1500, 2)),
        entry(10, "1 1/2\" Crusher Run (71501-Laceys)", "Q_71501", Decimal::new(1200, 2)),
        entry(12, "#57 Washed (71501-Laceys)", "Q_71501", Decimal::new(2000, 2)),
        entry(16, "1 1/2\" Crusher Run (591-Mt Hope)", "Q_591", Decimal::new(1000, 2)),
        entry(17, "Dense Grade Base (591-Mt Hope)", "Q_591", Decimal::new(1150, 2)),
        entry(14, "Concrete Sand (71087-Monteagle)", "Q_71087", Decimal::new(2800, 2)),
    ];

    let route = |hsv: u32, deca: u32, flor: u32| -> BTreeMap<String, u32> {
        BTreeMap::from([
            ("D_HSV_AVIA".to_string(), hsv),
            ("D_DECA_SITEA".to_string(), deca),
            ("D_FLOR_B".to_string(), flor),
        ])
    };

    let routes = DistanceIndex::new(BTreeMap::from([
        ("Q_594".to_string(), route(100, 65, 45)),
        ("Q_71501".to_string(), route(40, 50, 120)),
        ("Q_591".to_string(), route(110, 85, 60)),
        ("Q_71087".to_string(), route(90, 100, 150)),
    ]));

    Catalog { materials, routes }
}
