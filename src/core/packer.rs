use crate::core::bins::BinSpace;
use crate::core::validator::casefold;
use crate::domain::model::{BinId, BinRecord, Manifest, Mapping, BIN_CAPACITY};
use crate::utils::error::{LayoutError, Result};
use std::collections::HashMap;

/// Sorts `items` case-insensitively and splits them across `bins` in
/// blocks of [`BIN_CAPACITY`], one block per bin in the order given.
///
/// Bins past the last block get an empty list. Equal-fold items keep their
/// input order.
pub fn pack_category(
    category: &str,
    items: &[String],
    bins: &[String],
) -> Result<Vec<(String, Vec<String>)>> {
    let capacity = bins.len() * BIN_CAPACITY;
    if items.len() > capacity {
        return Err(LayoutError::Capacity {
            category: category.to_string(),
            items: items.len(),
            capacity,
            bins: bins.to_vec(),
        });
    }

    let mut sorted = items.to_vec();
    sorted.sort_by_cached_key(|item| casefold(item));

    let mut chunks = sorted.chunks(BIN_CAPACITY);
    Ok(bins
        .iter()
        .map(|bin| {
            let block = chunks.next().map(<[String]>::to_vec).unwrap_or_default();
            (bin.clone(), block)
        })
        .collect())
}

/// Maps every bin of `space` to the category that claims it. Fails on the
/// first layout bin that is not part of the space.
pub fn assign_bins(space: &BinSpace, layout: &Mapping) -> Result<HashMap<BinId, String>> {
    let mut owners = HashMap::new();
    for (category, bins) in layout.iter() {
        for raw in bins {
            let bin = space.resolve(raw).ok_or_else(|| LayoutError::OutOfRange {
                bin: raw.clone(),
                range: space.range_label(),
            })?;
            owners.insert(bin, category.to_string());
        }
    }
    Ok(owners)
}

/// Builds the full manifest: every bin of `space`, claimed or not, with the
/// items packed into it.
///
/// Expects inputs that already passed validation; a layout category with no
/// item list packs as empty.
pub fn build_manifest(space: &BinSpace, categories: &Mapping, layout: &Mapping) -> Result<Manifest> {
    let owners = assign_bins(space, layout)?;

    let mut contents: HashMap<BinId, Vec<String>> = HashMap::new();
    for (category, bins) in layout.iter() {
        let items = categories.get(category).unwrap_or_default();
        let packed = pack_category(category, items, bins)?;
        tracing::debug!(
            "Packed {} items of '{}' into {} bins",
            items.len(),
            category,
            bins.len()
        );
        for (raw, block) in packed {
            if let Some(bin) = space.resolve(&raw) {
                contents.insert(bin, block);
            }
        }
    }

    let bins = space
        .bins()
        .iter()
        .map(|&bin| BinRecord {
            bin,
            category: owners.get(&bin).cloned(),
            items: contents.remove(&bin).unwrap_or_default(),
        })
        .collect();

    Ok(Manifest { bins })
}
