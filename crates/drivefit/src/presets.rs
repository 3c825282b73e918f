//! Preference categories, weight vectors, and the preset registry
//!
//! A preset is a named weight vector over the full category set. Presets are
//! validated once when the registry is built; after that every lookup is
//! infallible and always yields a complete vector.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use crate::error::PresetError;

/// One axis of vehicle suitability scored by the recommendation service
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
  WinterDriving,
  FuelEfficiency,
  PriceFit,
  OwnershipCost,
  Acceleration,
  Reliability,
  Safety,
}

impl Category {
  pub const ALL: [Category; 7] = [
    Category::WinterDriving,
    Category::FuelEfficiency,
    Category::PriceFit,
    Category::OwnershipCost,
    Category::Acceleration,
    Category::Reliability,
    Category::Safety,
  ];

  pub const COUNT: usize = Self::ALL.len();

  fn index(self) -> usize {
    self as usize
  }

  /// Key used for this category in outbound weights
  pub fn weight_key(&self) -> &'static str {
    match self {
      Category::WinterDriving => "winter_driving",
      Category::FuelEfficiency => "fuel_efficiency",
      Category::PriceFit => "price_fit",
      Category::OwnershipCost => "ownership_cost",
      Category::Acceleration => "acceleration",
      Category::Reliability => "reliability",
      Category::Safety => "safety",
    }
  }

  /// Key the service uses for this category's points on a scored candidate
  pub fn points_key(&self) -> &'static str {
    match self {
      Category::WinterDriving => "winter_points",
      Category::FuelEfficiency => "fuel_points",
      Category::PriceFit => "price_points",
      Category::OwnershipCost => "ownership_cost_points",
      Category::Acceleration => "acceleration_points",
      Category::Reliability => "reliability_points",
      Category::Safety => "safety_points",
    }
  }

  pub fn label(&self) -> &'static str {
    match self {
      Category::WinterDriving => "Winter",
      Category::FuelEfficiency => "Fuel",
      Category::PriceFit => "Price fit",
      Category::OwnershipCost => "Ownership",
      Category::Acceleration => "Accel",
      Category::Reliability => "Reliability",
      Category::Safety => "Safety",
    }
  }

  pub fn from_weight_key(key: &str) -> Option<Self> {
    Self::ALL.into_iter().find(|c| c.weight_key() == key)
  }
}

impl std::fmt::Display for Category {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.weight_key())
  }
}

/// A complete mapping from every category to a non-negative weight.
///
/// Weights are carried exactly as configured; nothing in this crate rescales them.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightVector {
  weights: [f64; Category::COUNT],
}

impl WeightVector {
  /// Build a vector from `(weight_key, weight)` entries, rejecting anything
  /// that is not exactly the full category set.
  pub fn from_entries<K, I>(preset: &str, entries: I) -> Result<Self, PresetError>
  where
    K: AsRef<str>,
    I: IntoIterator<Item = (K, f64)>,
  {
    let mut slots: [Option<f64>; Category::COUNT] = [None; Category::COUNT];

    for (key, weight) in entries {
      let key = key.as_ref();
      let category =
        Category::from_weight_key(key).ok_or_else(|| PresetError::unknown_category(preset, key))?;

      if !weight.is_finite() || weight < 0.0 {
        return Err(PresetError::invalid_weight(preset, category.weight_key(), weight));
      }

      slots[category.index()] = Some(weight);
    }

    let mut weights = [0.0; Category::COUNT];
    for category in Category::ALL {
      weights[category.index()] = slots[category.index()]
        .ok_or_else(|| PresetError::missing_category(preset, category.weight_key()))?;
    }

    Ok(Self { weights })
  }

  pub fn get(&self, category: Category) -> f64 {
    self.weights[category.index()]
  }

  /// Entries in category order
  pub fn iter(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
    Category::ALL.into_iter().map(move |c| (c, self.get(c)))
  }
}

impl Serialize for WeightVector {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(Category::COUNT))?;
    for (category, weight) in self.iter() {
      map.serialize_entry(category.weight_key(), &weight)?;
    }
    map.end()
  }
}

/// A named, immutable weight vector
#[derive(Debug, Clone, PartialEq)]
pub struct Preset {
  name: String,
  weights: WeightVector,
}

impl Preset {
  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn weights(&self) -> &WeightVector {
    &self.weights
  }
}

/// On-disk preset table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresetTable {
  pub version: u32,
  pub default: String,
  pub presets: Vec<PresetDefinition>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresetDefinition {
  pub name: String,
  pub weights: BTreeMap<String, f64>,
}

pub const PRESET_TABLE_VERSION: u32 = 1;
pub const DEFAULT_PRESET: &str = "balanced";

const BUILTIN_PRESETS: &[(&str, [f64; Category::COUNT])] = &[
  // winter, fuel, price, ownership, accel, reliability, safety
  ("balanced", [0.15, 0.15, 0.20, 0.15, 0.10, 0.15, 0.10]),
  ("budget", [0.10, 0.25, 0.35, 0.20, 0.05, 0.05, 0.00]),
  ("winter", [0.35, 0.15, 0.15, 0.10, 0.05, 0.10, 0.10]),
  ("performance", [0.10, 0.10, 0.10, 0.10, 0.35, 0.15, 0.10]),
];

impl PresetTable {
  /// The table shipped with the client
  pub fn builtin() -> Self {
    let presets = BUILTIN_PRESETS
      .iter()
      .map(|(name, weights)| PresetDefinition {
        name: name.to_string(),
        weights: Category::ALL
          .iter()
          .map(|c| (c.weight_key().to_string(), weights[c.index()]))
          .collect(),
      })
      .collect();

    Self { version: PRESET_TABLE_VERSION, default: DEFAULT_PRESET.to_string(), presets }
  }
}

/// The closed set of presets available for one process
#[derive(Debug, Clone)]
pub struct PresetRegistry {
  presets: Vec<Preset>,
  default_index: usize,
}

impl PresetRegistry {
  pub fn builtin() -> Result<Self, PresetError> {
    Self::from_table(PresetTable::builtin())
  }

  /// Validate and register every preset in the table
  pub fn from_table(table: PresetTable) -> Result<Self, PresetError> {
    if table.version != PRESET_TABLE_VERSION {
      return Err(PresetError::UnsupportedVersion {
        version: table.version,
        expected: PRESET_TABLE_VERSION,
      });
    }

    if table.presets.is_empty() {
      return Err(PresetError::EmptyTable);
    }

    let mut seen = HashSet::new();
    let mut presets = Vec::with_capacity(table.presets.len());

    for definition in table.presets {
      let name = definition.name.trim().to_string();
      if name.is_empty() {
        return Err(PresetError::EmptyName);
      }
      if !seen.insert(name.clone()) {
        return Err(PresetError::duplicate_name(name));
      }

      let weights = WeightVector::from_entries(&name, definition.weights)?;
      presets.push(Preset { name, weights });
    }

    let default_name = table.default.trim();
    let default_index = presets
      .iter()
      .position(|p| p.name == default_name)
      .ok_or_else(|| PresetError::unknown_default(default_name))?;

    Ok(Self { presets, default_index })
  }

  pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, PresetError> {
    let path = path.as_ref();
    let display = path.display().to_string();

    let content = std::fs::read_to_string(path)
      .map_err(|e| PresetError::Read { path: display.clone(), message: e.to_string() })?;
    let table: PresetTable = serde_json::from_str(&content)
      .map_err(|e| PresetError::Parse { path: display, message: e.to_string() })?;

    Self::from_table(table)
  }

  /// Resolve a preset name, falling back to the default for empty or unknown names
  pub fn resolve(&self, name: &str) -> &WeightVector {
    self.resolve_preset(name).weights()
  }

  /// Like [`resolve`](Self::resolve), but also reports which preset was used
  pub fn resolve_preset(&self, name: &str) -> &Preset {
    self.get(name).unwrap_or_else(|| self.default_preset())
  }

  /// Strict lookup; no fallback
  pub fn get(&self, name: &str) -> Option<&Preset> {
    let name = name.trim();
    self.presets.iter().find(|p| p.name == name)
  }

  pub fn default_preset(&self) -> &Preset {
    &self.presets[self.default_index]
  }

  pub fn iter(&self) -> impl Iterator<Item = &Preset> {
    self.presets.iter()
  }

  pub fn names(&self) -> Vec<&str> {
    self.presets.iter().map(|p| p.name()).collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::fs;
  use tempfile::TempDir;

  fn full_weights(value: f64) -> BTreeMap<String, f64> {
    Category::ALL.iter().map(|c| (c.weight_key().to_string(), value)).collect()
  }

  fn table_with(presets: Vec<PresetDefinition>, default: &str) -> PresetTable {
    PresetTable { version: PRESET_TABLE_VERSION, default: default.to_string(), presets }
  }

  #[test]
  fn test_every_builtin_preset_has_full_category_set() {
    let registry = PresetRegistry::builtin().unwrap();

    for preset in registry.iter() {
      let categories: Vec<Category> = registry.resolve(preset.name()).iter().map(|(c, _)| c).collect();
      assert_eq!(categories, Category::ALL.to_vec(), "preset {}", preset.name());
    }
  }

  #[test]
  fn test_builtin_names_in_registration_order() {
    let registry = PresetRegistry::builtin().unwrap();
    assert_eq!(registry.names(), vec!["balanced", "budget", "winter", "performance"]);
    assert_eq!(registry.default_preset().name(), "balanced");
  }

  #[test]
  fn test_empty_and_unknown_names_resolve_to_default() {
    let registry = PresetRegistry::builtin().unwrap();
    let default = registry.default_preset().weights();

    assert_eq!(registry.resolve(""), default);
    assert_eq!(registry.resolve("   "), default);
    assert_eq!(registry.resolve("sports-car"), default);
    assert_eq!(registry.resolve_preset("nope").name(), "balanced");
  }

  #[test]
  fn test_winter_preset_values() {
    let registry = PresetRegistry::builtin().unwrap();
    let winter = registry.resolve("winter");

    assert_eq!(winter.get(Category::WinterDriving), 0.35);
    assert_eq!(winter.get(Category::FuelEfficiency), 0.15);
    assert_eq!(winter.get(Category::PriceFit), 0.15);
    assert_eq!(winter.get(Category::OwnershipCost), 0.10);
    assert_eq!(winter.get(Category::Acceleration), 0.05);
    assert_eq!(winter.get(Category::Reliability), 0.10);
    assert_eq!(winter.get(Category::Safety), 0.10);
  }

  #[test]
  fn test_zero_weight_is_kept() {
    let registry = PresetRegistry::builtin().unwrap();
    assert_eq!(registry.resolve("budget").get(Category::Safety), 0.0);
  }

  #[test]
  fn test_missing_category_rejected_at_registration() {
    let mut weights = full_weights(0.1);
    weights.remove("safety");

    let err = PresetRegistry::from_table(table_with(
      vec![PresetDefinition { name: "six".to_string(), weights }],
      "six",
    ))
    .unwrap_err();

    assert!(matches!(err, PresetError::MissingCategory { ref preset, category: "safety" } if preset == "six"));
  }

  #[test]
  fn test_unknown_category_rejected() {
    let mut weights = full_weights(0.1);
    weights.insert("towing".to_string(), 0.2);

    let err = PresetRegistry::from_table(table_with(
      vec![PresetDefinition { name: "tow".to_string(), weights }],
      "tow",
    ))
    .unwrap_err();

    assert!(matches!(err, PresetError::UnknownCategory { ref key, .. } if key == "towing"));
  }

  #[test]
  fn test_negative_and_nan_weights_rejected() {
    for bad in [-0.1, f64::NAN, f64::INFINITY] {
      let mut weights = full_weights(0.1);
      weights.insert("reliability".to_string(), bad);

      let err = PresetRegistry::from_table(table_with(
        vec![PresetDefinition { name: "bad".to_string(), weights }],
        "bad",
      ))
      .unwrap_err();

      assert!(matches!(err, PresetError::InvalidWeight { category: "reliability", .. }));
    }
  }

  #[test]
  fn test_duplicate_names_rejected() {
    let err = PresetRegistry::from_table(table_with(
      vec![
        PresetDefinition { name: "twin".to_string(), weights: full_weights(0.1) },
        PresetDefinition { name: " twin ".to_string(), weights: full_weights(0.2) },
      ],
      "twin",
    ))
    .unwrap_err();

    assert!(matches!(err, PresetError::DuplicateName { ref name } if name == "twin"));
  }

  #[test]
  fn test_unknown_default_rejected() {
    let err = PresetRegistry::from_table(table_with(
      vec![PresetDefinition { name: "only".to_string(), weights: full_weights(0.1) }],
      "missing",
    ))
    .unwrap_err();

    assert!(matches!(err, PresetError::UnknownDefault { .. }));
  }

  #[test]
  fn test_empty_table_and_version_rejected() {
    assert!(matches!(
      PresetRegistry::from_table(table_with(Vec::new(), "x")).unwrap_err(),
      PresetError::EmptyTable
    ));

    let mut table = PresetTable::builtin();
    table.version = 2;
    assert!(matches!(
      PresetRegistry::from_table(table).unwrap_err(),
      PresetError::UnsupportedVersion { version: 2, expected: 1 }
    ));
  }

  #[test]
  fn test_weights_are_not_rescaled() {
    let registry = PresetRegistry::from_table(table_with(
      vec![PresetDefinition { name: "heavy".to_string(), weights: full_weights(3.0) }],
      "heavy",
    ))
    .unwrap();

    assert!(registry.resolve("heavy").iter().all(|(_, w)| w == 3.0));
  }

  #[test]
  fn test_load_from_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("presets.json");
    fs::write(&path, serde_json::to_string_pretty(&PresetTable::builtin()).unwrap()).unwrap();

    let registry = PresetRegistry::load_from_file(&path).unwrap();
    assert_eq!(registry.names().len(), 4);
  }

  #[test]
  fn test_load_from_malformed_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("presets.json");
    fs::write(&path, "{ not json").unwrap();

    let err = PresetRegistry::load_from_file(&path).unwrap_err();
    assert!(matches!(err, PresetError::Parse { .. }));

    let err = PresetRegistry::load_from_file(temp.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, PresetError::Read { .. }));
  }

  #[test]
  fn test_serializes_in_category_order() {
    let registry = PresetRegistry::builtin().unwrap();
    let json = serde_json::to_string(registry.resolve("balanced")).unwrap();

    assert_eq!(
      json,
      r#"{"winter_driving":0.15,"fuel_efficiency":0.15,"price_fit":0.2,"ownership_cost":0.15,"acceleration":0.1,"reliability":0.15,"safety":0.1}"#
    );
  }
}
