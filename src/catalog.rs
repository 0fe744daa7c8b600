//! Static hardware reference data.
//!
//! The catalog is compiled into the binary from `assets/catalog.json` and parsed once on
//! first use. Lookups never fail: an unknown id yields a synthesized placeholder record.

use crate::constants::{FEATURED_CATEGORIES, MAX_COMPARE_SELECTION};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

const CATALOG_JSON: &str = include_str!("../assets/catalog.json");

/// Identifier of a market model inside a hardware record.
pub type ModelId = u32;

/// Which schematic the detail page draws.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum DiagramType {
    Processor,
    Card,
    Generic,
}

/// A short concept blurb.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Concept {
    pub title: String,
    pub text: String,
}

/// One row of the specification matrix.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TechSpec {
    pub key: String,
    pub val: String,
}

/// One step of the manufacturing process.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ManufacturingStep {
    pub step: String,
    pub detail: String,
}

/// Key/value specs of a market model, kept in authoring order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpecSheet(Vec<(String, String)>);

impl SpecSheet {
    /// Value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Keys in authoring order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    /// Entries in authoring order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, String)> for SpecSheet {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Serialize for SpecSheet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for SpecSheet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SpecSheetVisitor;

        impl<'de> Visitor<'de> for SpecSheetVisitor {
            type Value = SpecSheet;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of spec names to values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, value)) = access.next_entry::<String, String>()? {
                    entries.push((key, value));
                }
                Ok(SpecSheet(entries))
            }
        }

        deserializer.deserialize_map(SpecSheetVisitor)
    }
}

/// A commercially available model used by the comparison engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MarketModel {
    pub id: ModelId,
    pub name: String,
    pub brand: String,
    pub description: String,
    pub specs: SpecSheet,
}

/// A hardware reference record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HardwareRecord {
    pub id: String,
    pub name: String,
    pub role: String,
    pub desc: String,
    pub image: String,
    pub diagram_type: DiagramType,
    #[serde(default)]
    pub concepts: Vec<Concept>,
    #[serde(default)]
    pub tech_specs: Vec<TechSpec>,
    #[serde(default)]
    pub architecture_deep_dive: Vec<String>,
    #[serde(default)]
    pub manufacturing_process: Vec<ManufacturingStep>,
    #[serde(default)]
    pub market_models: Vec<MarketModel>,
}

impl HardwareRecord {
    /// Synthesizes the record shown for an id that is not in the catalog.
    pub fn placeholder(id: &str) -> Self {
        Self {
            id: id.to_string(),
            name: capitalize_first(id),
            role: "Standard Component".to_string(),
            desc: "Critical component for system functionality. Technical deep-dive pending update."
                .to_string(),
            image: format!("https://picsum.photos/seed/{id}/800/600"),
            diagram_type: DiagramType::Generic,
            concepts: Vec::new(),
            tech_specs: Vec::new(),
            architecture_deep_dive: Vec::new(),
            manufacturing_process: Vec::new(),
            market_models: Vec::new(),
        }
    }

    /// Finds a market model by id.
    pub fn model(&self, id: ModelId) -> Option<&MarketModel> {
        self.market_models.iter().find(|m| m.id == id)
    }

    /// Pretty JSON of the record, shown by the raw data view.
    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

fn capitalize_first(id: &str) -> String {
    let mut chars = id.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[derive(Deserialize)]
struct CatalogFile {
    categories: Vec<String>,
    components: Vec<HardwareRecord>,
}

/// The read-only table of hardware records.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    categories: Vec<String>,
    records: HashMap<String, HardwareRecord>,
}

impl Catalog {
    /// Parses a catalog from its JSON form.
    ///
    /// Duplicate ids are rejected so lookups stay unambiguous.
    pub fn from_json(json: &str) -> Result<Self, String> {
        let file: CatalogFile = serde_json::from_str(json).map_err(|e| e.to_string())?;
        let mut records = HashMap::with_capacity(file.components.len());
        for record in file.components {
            if records.contains_key(&record.id) {
                return Err(format!("duplicate component id '{}'", record.id));
            }
            records.insert(record.id.clone(), record);
        }
        Ok(Self {
            categories: file.categories,
            records,
        })
    }

    /// The catalog compiled into the binary.
    pub fn builtin() -> &'static Catalog {
        static CATALOG: OnceLock<Catalog> = OnceLock::new();
        CATALOG.get_or_init(|| {
            Catalog::from_json(CATALOG_JSON).unwrap_or_else(|err| {
                log::error!("Built-in catalog failed to parse: {err}");
                Catalog::default()
            })
        })
    }

    /// Category ids in directory order.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Category ids featured on the dashboard.
    pub fn featured(&self) -> impl Iterator<Item = &'static str> {
        FEATURED_CATEGORIES.into_iter()
    }

    /// Stored record for `id`, if any.
    pub fn get(&self, id: &str) -> Option<&HardwareRecord> {
        self.records.get(id)
    }

    /// Stored record for `id`, or a placeholder carrying that id.
    pub fn lookup(&self, id: &str) -> Cow<'_, HardwareRecord> {
        match self.records.get(id) {
            Some(record) => Cow::Borrowed(record),
            None => Cow::Owned(HardwareRecord::placeholder(id)),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Why a model could not be added to the comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareError {
    /// Two models are already selected
    LimitReached,
}

impl fmt::Display for CompareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LimitReached => write!(
                f,
                "Comparison Limit Reached (Max {MAX_COMPARE_SELECTION}). Please unselect one first."
            ),
        }
    }
}

/// One row of the side-by-side comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonRow<'a> {
    pub key: &'a str,
    pub first: &'a str,
    /// Value of the same key on the second model; `None` renders blank
    pub second: Option<&'a str>,
}

/// The transient set of market models picked for comparison, at most two.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompareSelection {
    ids: Vec<ModelId>,
}

impl CompareSelection {
    /// Selected ids in selection order.
    pub fn ids(&self) -> &[ModelId] {
        &self.ids
    }

    pub fn contains(&self, id: ModelId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Selects or unselects a model.
    ///
    /// Unselecting always succeeds. Selecting a new id while the selection is full is
    /// rejected and leaves the selection unchanged.
    pub fn toggle(&mut self, id: ModelId) -> Result<(), CompareError> {
        if let Some(pos) = self.ids.iter().position(|&selected| selected == id) {
            self.ids.remove(pos);
            return Ok(());
        }
        if self.ids.len() >= MAX_COMPARE_SELECTION {
            return Err(CompareError::LimitReached);
        }
        self.ids.push(id);
        Ok(())
    }

    /// The two selected models, when exactly two are selected and both exist.
    pub fn pair<'a>(&self, record: &'a HardwareRecord) -> Option<(&'a MarketModel, &'a MarketModel)> {
        match self.ids.as_slice() {
            [a, b] => Some((record.model(*a)?, record.model(*b)?)),
            _ => None,
        }
    }

    /// Comparison matrix: one row per spec key of the first model, in its order.
    ///
    /// Empty unless exactly two models are selected.
    pub fn rows<'a>(&self, record: &'a HardwareRecord) -> Vec<ComparisonRow<'a>> {
        let Some((first, second)) = self.pair(record) else {
            return Vec::new();
        };
        first
            .specs
            .iter()
            .map(|(key, value)| ComparisonRow {
                key,
                first: value,
                second: second.specs.get(key),
            })
            .collect()
    }
}
