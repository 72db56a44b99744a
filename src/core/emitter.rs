use crate::domain::model::{Manifest, SlotRow, BIN_CAPACITY};
use crate::utils::error::Result;

pub const HEADERS: [&str; 9] = [
    "#",
    "ChestID",
    "Column",
    "Cluster",
    "Number",
    "Categories",
    "Description",
    "Locked",
    "Framed",
];

pub const DEFAULT_UNASSIGNED_LABEL: &str = "UNUSED";

/// Expands every bin of the manifest into its slots, numbering rows from 1
/// across the whole table.
pub fn slot_rows<'a>(
    manifest: &'a Manifest,
    unassigned_label: &'a str,
) -> impl Iterator<Item = SlotRow> + 'a {
    manifest
        .bins
        .iter()
        .flat_map(move |record| {
            let category = record
                .category
                .clone()
                .unwrap_or_else(|| unassigned_label.to_string());
            (1..=BIN_CAPACITY).map(move |slot| SlotRow {
                index: 0,
                chest_id: record.bin.slot_id(slot),
                column: record.bin.letter,
                cluster: record.bin.cluster,
                number: slot,
                category: category.clone(),
                description: record.items.get(slot - 1).cloned().unwrap_or_default(),
                locked: None,
                framed: None,
            })
        })
        .enumerate()
        .map(|(i, row)| SlotRow { index: i + 1, ..row })
}

/// Writes the header and one record per slot to `writer`.
pub fn write_manifest<W: std::io::Write>(
    manifest: &Manifest,
    unassigned_label: &str,
    writer: W,
) -> Result<usize> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::CRLF)
        .from_writer(writer);

    csv_writer.write_record(HEADERS)?;
    let mut written = 0;
    for row in slot_rows(manifest, unassigned_label) {
        csv_writer.serialize(row)?;
        written += 1;
    }
    csv_writer.flush()?;
    Ok(written)
}

/// Renders the whole manifest to CSV bytes. Nothing is written anywhere
/// until the full table has been produced.
pub fn render_manifest(manifest: &Manifest, unassigned_label: &str) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let rows = write_manifest(manifest, unassigned_label, &mut buffer)?;
    tracing::debug!("Rendered {} slot rows ({} bytes)", rows, buffer.len());
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{BinId, BinRecord};

    fn sample_manifest() -> Manifest {
        Manifest {
            bins: vec![
                BinRecord {
                    bin: BinId::new('A', 1),
                    category: Some("Tools".to_string()),
                    items: vec!["Axe".to_string(), "axe2".to_string()],
                },
                BinRecord {
                    bin: BinId::new('A', 2),
                    category: None,
                    items: vec![],
                },
            ],
        }
    }

    #[test]
    fn test_rows_are_numbered_without_gaps() {
        let manifest = sample_manifest();
        let rows: Vec<SlotRow> = slot_rows(&manifest, "UNUSED").collect();
        assert_eq!(rows.len(), 18);
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.index, i + 1);
        }
        assert_eq!(rows[0].chest_id, "A1-1");
        assert_eq!(rows[0].description, "Axe");
        assert_eq!(rows[1].description, "axe2");
        assert_eq!(rows[2].description, "");
        assert_eq!(rows[8].chest_id, "A1-9");
        assert_eq!(rows[9].chest_id, "A2-1");
        assert_eq!(rows[9].cluster, 2);
        assert_eq!(rows[9].number, 1);
    }

    #[test]
    fn test_unassigned_bins_use_label() {
        let manifest = sample_manifest();
        let rows: Vec<SlotRow> = slot_rows(&manifest, "unassigned").collect();
        assert!(rows[9..]
            .iter()
            .all(|row| row.category == "unassigned" && row.description.is_empty()));
    }

    #[test]
    fn test_render_csv_text() {
        let manifest = sample_manifest();
        let bytes = render_manifest(&manifest, "UNUSED").unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.split("\r\n").collect();

        assert_eq!(
            lines[0],
            "#,ChestID,Column,Cluster,Number,Categories,Description,Locked,Framed"
        );
        assert_eq!(lines[1], "1,A1-1,A,1,1,Tools,Axe,,");
        assert_eq!(lines[3], "3,A1-3,A,1,3,Tools,,,");
        assert_eq!(lines[18], "18,A2-9,A,2,9,UNUSED,,,");
        // header + 18 rows + trailing empty piece after the last terminator
        assert_eq!(lines.len(), 20);
        assert_eq!(lines[19], "");
    }

    #[test]
    fn test_descriptions_with_delimiters_are_quoted() {
        let manifest = Manifest {
            bins: vec![BinRecord {
                bin: BinId::new('B', 1),
                category: Some("Food, misc".to_string()),
                items: vec!["Bread, \"fresh\"".to_string()],
            }],
        };
        let text = String::from_utf8(render_manifest(&manifest, "UNUSED").unwrap()).unwrap();
        assert!(text.contains("1,B1-1,B,1,1,\"Food, misc\",\"Bread, \"\"fresh\"\"\",,"));
    }
}
