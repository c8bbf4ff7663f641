//! Per-room price tables.
//!
//! The canonical entry shape is `{ "price": 45000, "active": true }`.
//! Older records store a bare number (`"3_hours": 45000`); those are
//! adapted on deserialization to an active entry with that price. A
//! `null` entry, or a structured entry whose price is `null`, is dropped.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use kosan_core::types::Rupiah;

use crate::duration::DurationType;

/// One price-table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceEntry {
    /// Price for one unit of this duration.
    pub price: Rupiah,
    /// Whether the partner currently offers this duration.
    pub active: bool,
}

impl PriceEntry {
    /// An active entry with the given price.
    pub fn active(price: i64) -> Self {
        Self {
            price: Rupiah(price),
            active: true,
        }
    }

    /// An inactive entry with the given price.
    pub fn inactive(price: i64) -> Self {
        Self {
            price: Rupiah(price),
            active: false,
        }
    }

    /// A duration is bookable only when active and priced above zero.
    pub fn is_bookable(&self) -> bool {
        self.active && self.price.is_positive()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredPriceEntry {
    Bare(i64),
    Structured {
        price: Option<i64>,
        #[serde(default = "default_active")]
        active: bool,
    },
}

fn default_active() -> bool {
    true
}

impl StoredPriceEntry {
    fn into_entry(self) -> Option<PriceEntry> {
        match self {
            Self::Bare(price) => Some(PriceEntry::active(price)),
            Self::Structured { price, active } => price.map(|price| PriceEntry {
                price: Rupiah(price),
                active,
            }),
        }
    }
}

type StoredPriceTable = BTreeMap<String, Option<StoredPriceEntry>>;

/// Mapping from duration key to price entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredPriceTable")]
pub struct PriceTable(BTreeMap<String, PriceEntry>);

impl From<StoredPriceTable> for PriceTable {
    fn from(stored: StoredPriceTable) -> Self {
        Self(
            stored
                .into_iter()
                .filter_map(|(key, entry)| Some((key, entry?.into_entry()?)))
                .collect(),
        )
    }
}

impl PriceTable {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table of active entries from bare prices.
    pub fn from_prices<K: Into<String>>(prices: impl IntoIterator<Item = (K, i64)>) -> Self {
        Self(
            prices
                .into_iter()
                .map(|(key, price)| (key.into(), PriceEntry::active(price)))
                .collect(),
        )
    }

    /// Insert or replace an entry.
    pub fn insert(&mut self, key: impl Into<String>, entry: PriceEntry) -> Option<PriceEntry> {
        self.0.insert(key.into(), entry)
    }

    /// Remove an entry.
    pub fn remove(&mut self, key: &str) -> Option<PriceEntry> {
        self.0.remove(key)
    }

    /// The raw entry for `key`, bookable or not.
    pub fn get(&self, key: &str) -> Option<&PriceEntry> {
        self.0.get(key)
    }

    /// The price for `key` if that duration is currently bookable.
    pub fn bookable_price(&self, key: &str) -> Option<Rupiah> {
        self.get(key)
            .filter(|entry| entry.is_bookable())
            .map(|entry| entry.price)
    }

    /// Iterate over `(key, entry)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PriceEntry)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The `pricing_plan` stored on a room, split by duration type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredPricingPlan")]
pub struct PricingPlan {
    /// Hour-based prices, keyed like `"3_hours"`.
    pub hourly: PriceTable,
    /// Day-based prices, absent on older records.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily: Option<PriceTable>,
    /// Month-based prices.
    pub monthly: PriceTable,
}

/// One top-level value of a stored plan.
///
/// An object carrying a `price` key is an entry; any other object is a
/// section of entries.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredPlanValue {
    Bare(i64),
    Entry(KeyedPriceEntry),
    Section(StoredPriceTable),
}

#[derive(Deserialize)]
struct KeyedPriceEntry {
    #[serde(deserialize_with = "required_price")]
    price: Option<i64>,
    #[serde(default = "default_active")]
    active: bool,
}

/// `price` must be present but may be `null`.
fn required_price<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::deserialize(deserializer)
}

type StoredPricingPlan = BTreeMap<String, Option<StoredPlanValue>>;

impl From<StoredPricingPlan> for PricingPlan {
    fn from(stored: StoredPricingPlan) -> Self {
        let mut plan = Self::default();
        for (name, value) in stored {
            let entry = match value {
                None => continue,
                Some(StoredPlanValue::Bare(price)) => Some(PriceEntry::active(price)),
                Some(StoredPlanValue::Entry(KeyedPriceEntry { price, active })) => {
                    price.map(|price| PriceEntry {
                        price: Rupiah(price),
                        active,
                    })
                }
                Some(StoredPlanValue::Section(section)) => {
                    plan.merge_section(&name, PriceTable::from(section));
                    continue;
                }
            };
            if let Some(entry) = entry {
                plan.section_mut(section_for_key(&name)).insert(name, entry);
            }
        }
        plan
    }
}

/// Section a flat key belongs to: `"monthly"`, `"daily"`, else hourly.
fn section_for_key(key: &str) -> DurationType {
    match key {
        "monthly" => DurationType::Monthly,
        "daily" => DurationType::Daily,
        _ => DurationType::Hourly,
    }
}

impl PricingPlan {
    /// Split a flat legacy table into sections by its well-known keys.
    ///
    /// `"monthly"` lands in the monthly section, `"daily"` in the daily
    /// section, everything else is treated as hourly.
    pub fn from_flat(table: PriceTable) -> Self {
        let mut plan = Self::default();
        for (key, entry) in table.iter() {
            plan.section_mut(section_for_key(key)).insert(key, *entry);
        }
        plan
    }

    /// Flatten all sections into a single key → entry table.
    pub fn price_table(&self) -> PriceTable {
        let mut table = self.hourly.clone();
        if let Some(daily) = &self.daily {
            for (key, entry) in daily.iter() {
                table.insert(key, *entry);
            }
        }
        for (key, entry) in self.monthly.iter() {
            table.insert(key, *entry);
        }
        table
    }

    /// Set the entry for `key` in the section for `kind`.
    ///
    /// Any entry for the same key in another section is removed so a key
    /// resolves to exactly one price.
    pub fn set_entry(&mut self, kind: DurationType, key: &str, entry: PriceEntry) {
        self.hourly.remove(key);
        self.monthly.remove(key);
        if let Some(daily) = self.daily.as_mut() {
            daily.remove(key);
        }
        self.section_mut(kind).insert(key, entry);
    }

    /// Merge a stored section. Unrecognised section names are split by key.
    fn merge_section(&mut self, name: &str, table: PriceTable) {
        let kind = match name {
            "hourly" => Some(DurationType::Hourly),
            "daily" => Some(DurationType::Daily),
            "monthly" => Some(DurationType::Monthly),
            _ => None,
        };
        match kind {
            Some(kind) => {
                let section = self.section_mut(kind);
                for (key, entry) in table.iter() {
                    section.insert(key, *entry);
                }
            }
            None => {
                for (key, entry) in table.iter() {
                    self.section_mut(section_for_key(key)).insert(key, *entry);
                }
            }
        }
    }

    fn section_mut(&mut self, kind: DurationType) -> &mut PriceTable {
        match kind {
            DurationType::Hourly => &mut self.hourly,
            DurationType::Daily => self.daily.get_or_insert_with(PriceTable::new),
            DurationType::Monthly => &mut self.monthly,
        }
    }
}
