use crate::types::{BinType, RecyclableItemRecord};
use std::collections::HashMap;

/// Read-only reference catalog of disposal rules. Built once at startup and
/// shared across requests; the engine never mutates it.
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<RecyclableItemRecord>,
}

impl Catalog {
    pub fn new(items: Vec<RecyclableItemRecord>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[RecyclableItemRecord] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Parse a header-based CSV export into catalog records. List-valued
    /// cells (material_codes, known_labels, similar_items) are
    /// `;`-separated. Missing cells default to empty, unknown bin types fall
    /// back to trash with a warning.
    pub fn from_csv(content: &str) -> Self {
        let mut lines = content.trim().lines();
        let headers: Vec<String> = match lines.next() {
            Some(header) => header.split(',').map(|h| h.trim().to_lowercase()).collect(),
            None => return Self::new(Vec::new()),
        };

        let mut items = Vec::new();
        for line in lines {
            if line.trim().is_empty() {
                continue;
            }
            let values: Vec<&str> = line.split(',').map(|v| v.trim()).collect();
            let mut row: HashMap<&str, &str> = HashMap::new();
            for (i, header) in headers.iter().enumerate() {
                row.insert(header.as_str(), values.get(i).copied().unwrap_or(""));
            }

            let name = row.get("name").copied().unwrap_or("").to_string();
            if name.is_empty() {
                continue;
            }
            let bin_raw = row.get("bin_type").copied().unwrap_or("");
            let bin_type = BinType::from_str(bin_raw).unwrap_or_else(|| {
                tracing::warn!("unknown bin type '{}' for '{}', defaulting to trash", bin_raw, name);
                BinType::Trash
            });

            items.push(RecyclableItemRecord {
                name,
                category: row.get("category").copied().unwrap_or("").to_string(),
                is_recyclable: row
                    .get("recyclable")
                    .map(|v| v.eq_ignore_ascii_case("yes"))
                    .unwrap_or(false),
                bin_type,
                special_instructions: row.get("special_instructions").copied().unwrap_or("").to_string(),
                contamination_notes: row.get("contamination_notes").copied().unwrap_or("").to_string(),
                material_codes: split_list(row.get("material_codes").copied().unwrap_or("")),
                known_labels: split_list(row.get("known_labels").copied().unwrap_or("")),
                similar_item_names: split_list(row.get("similar_items").copied().unwrap_or("")),
            });
        }

        Self::new(items)
    }

    /// Case-insensitive substring search over item names and categories.
    pub fn search(&self, query: &str) -> Vec<&RecyclableItemRecord> {
        let query = query.to_lowercase();
        self.items
            .iter()
            .filter(|item| {
                item.name.to_lowercase().contains(&query)
                    || item.category.to_lowercase().contains(&query)
            })
            .collect()
    }
}

fn split_list(s: &str) -> Vec<String> {
    s.split(';')
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}

impl Default for Catalog {
    /// Built-in disposal rules covering the common curbside cases, for
    /// operation without an external catalog source.
    fn default() -> Self {
        fn item(
            name: &str,
            category: &str,
            is_recyclable: bool,
            bin_type: BinType,
            special_instructions: &str,
            contamination_notes: &str,
            material_codes: &[&str],
            known_labels: &[&str],
            similar_item_names: &[&str],
        ) -> RecyclableItemRecord {
            RecyclableItemRecord {
                name: name.to_string(),
                category: category.to_string(),
                is_recyclable,
                bin_type,
                special_instructions: special_instructions.to_string(),
                contamination_notes: contamination_notes.to_string(),
                material_codes: material_codes.iter().map(|s| s.to_string()).collect(),
                known_labels: known_labels.iter().map(|s| s.to_string()).collect(),
                similar_item_names: similar_item_names.iter().map(|s| s.to_string()).collect(),
            }
        }

        Self::new(vec![
            item(
                "Plastic Bottle (#1 or #2)",
                "Plastic",
                true,
                BinType::Recycling,
                "Rinse clean and remove cap",
                "No liquids remaining",
                &["PETE 1", "HDPE 2"],
                &["plastic bottle", "water bottle", "soda bottle", "bottle"],
                &["beverage container", "drink bottle"],
            ),
            item(
                "Aluminum Can",
                "Metal",
                true,
                BinType::Recycling,
                "Rinse clean",
                "No food residue",
                &[],
                &["aluminum can", "soda can", "beer can", "tin can", "can"],
                &["beverage can"],
            ),
            item(
                "Cardboard Box",
                "Paper",
                true,
                BinType::Recycling,
                "Flatten and remove tape",
                "Must be dry, no grease",
                &[],
                &["cardboard", "cardboard box", "shipping box", "carton"],
                &["box", "package"],
            ),
            item(
                "Glass Bottle or Jar",
                "Glass",
                true,
                BinType::Recycling,
                "Rinse clean and remove lid",
                "No broken glass in curbside bins",
                &[],
                &["glass bottle", "glass jar", "jar", "glass"],
                &["glass container"],
            ),
            item(
                "Newspaper and Magazines",
                "Paper",
                true,
                BinType::Recycling,
                "Keep dry and clean",
                "No wet or soiled paper",
                &[],
                &["newspaper", "magazine", "paper"],
                &["newsprint"],
            ),
            item(
                "Yogurt Cup (#5)",
                "Plastic",
                true,
                BinType::Recycling,
                "Rinse clean, replace foil lid in trash",
                "No food residue",
                &["PP 5"],
                &["yogurt cup", "plastic cup", "plastic container"],
                &["yogurt container"],
            ),
            item(
                "Plastic Bag",
                "Plastic",
                false,
                BinType::Special,
                "Take to grocery store plastic bag recycling bin",
                "Tangles sorting machinery, never curbside",
                &["LDPE 4"],
                &["plastic bag", "grocery bag", "shopping bag"],
                &["film plastic"],
            ),
            item(
                "Styrofoam",
                "Plastic",
                false,
                BinType::Trash,
                "",
                "Not accepted in any local program",
                &["PS 6"],
                &["styrofoam", "polystyrene", "foam"],
                &["foam cup", "packing foam"],
            ),
            item(
                "Battery",
                "Hazardous",
                false,
                BinType::Special,
                "Take to hazardous waste center",
                "Fire risk, never place in curbside bins",
                &[],
                &["battery", "alkaline battery", "aa battery"],
                &["batteries"],
            ),
            item(
                "Food Waste",
                "Organic",
                false,
                BinType::Compost,
                "Compost at home or via green bin where available",
                "Keep out of recycling",
                &[],
                &["food", "food waste", "organic matter"],
                &["food scraps", "leftovers"],
            ),
            item(
                "Clothing and Textiles",
                "Textile",
                false,
                BinType::Special,
                "Donate wearable clothing to charity",
                "",
                &[],
                &["clothing", "fabric", "textile", "clothes"],
                &["shirt", "garment"],
            ),
        ])
    }
}
