use serde::Serialize;
use std::fmt;

/// Number of slots in one bin (a 3x3 pod).
pub const BIN_CAPACITY: usize = 9;

/// Cluster numbers under each letter, in output order.
pub const CLUSTERS: [u8; 2] = [1, 2];

/// Name -> list of strings, in document order. Keys are unique once a
/// document has passed the loader.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mapping {
    entries: Vec<(String, Vec<String>)>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: String, values: Vec<String>) {
        self.entries.push((key, values));
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_slice())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V, S> FromIterator<(K, V)> for Mapping
where
    K: Into<String>,
    V: IntoIterator<Item = S>,
    S: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut mapping = Mapping::new();
        for (key, values) in iter {
            mapping.insert(key.into(), values.into_iter().map(Into::into).collect());
        }
        mapping
    }
}

/// A bin address such as `A1`: a column letter and a cluster number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BinId {
    pub letter: char,
    pub cluster: u8,
}

impl BinId {
    pub fn new(letter: char, cluster: u8) -> Self {
        Self { letter, cluster }
    }

    /// Parses `A1`..`Z2`. Anything else is rejected.
    pub fn parse(raw: &str) -> Option<Self> {
        let mut chars = raw.chars();
        let letter = chars.next()?;
        let digit = chars.next()?;
        if chars.next().is_some() || !letter.is_ascii_uppercase() {
            return None;
        }
        match digit {
            '1' => Some(Self::new(letter, 1)),
            '2' => Some(Self::new(letter, 2)),
            _ => None,
        }
    }

    /// Slot identifier within this bin, e.g. `A1-3`.
    pub fn slot_id(&self, slot: usize) -> String {
        format!("{}-{}", self, slot)
    }
}

impl fmt::Display for BinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.letter, self.cluster)
    }
}

/// The two documents a run starts from.
#[derive(Debug, Clone, Default)]
pub struct LayoutInputs {
    pub categories: Mapping,
    pub layout: Mapping,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinRecord {
    pub bin: BinId,
    /// `None` for bins no category claims.
    pub category: Option<String>,
    pub items: Vec<String>,
}

/// Every bin of the generated space, in canonical order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    pub bins: Vec<BinRecord>,
}

impl Manifest {
    pub fn get(&self, bin: BinId) -> Option<&BinRecord> {
        self.bins.iter().find(|record| record.bin == bin)
    }

    pub fn slot_count(&self) -> usize {
        self.bins.len() * BIN_CAPACITY
    }

    pub fn assigned_items(&self) -> usize {
        self.bins.iter().map(|record| record.items.len()).sum()
    }

    /// Per claimed category: its bins in output order and its item count.
    /// Categories appear in the order their first bin does.
    pub fn category_summary(&self) -> Vec<(String, Vec<BinId>, usize)> {
        let mut summary: Vec<(String, Vec<BinId>, usize)> = Vec::new();
        for record in &self.bins {
            let Some(category) = &record.category else {
                continue;
            };
            match summary.iter_mut().find(|(name, _, _)| name == category) {
                Some((_, bins, items)) => {
                    bins.push(record.bin);
                    *items += record.items.len();
                }
                None => summary.push((category.clone(), vec![record.bin], record.items.len())),
            }
        }
        summary
    }

    pub fn unassigned_bins(&self) -> usize {
        self.bins.iter().filter(|record| record.category.is_none()).count()
    }
}

/// One output row of the manifest CSV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotRow {
    #[serde(rename = "#")]
    pub index: usize,
    #[serde(rename = "ChestID")]
    pub chest_id: String,
    #[serde(rename = "Column")]
    pub column: char,
    #[serde(rename = "Cluster")]
    pub cluster: u8,
    #[serde(rename = "Number")]
    pub number: usize,
    #[serde(rename = "Categories")]
    pub category: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Locked")]
    pub locked: Option<String>,
    #[serde(rename = "Framed")]
    pub framed: Option<String>,
}
