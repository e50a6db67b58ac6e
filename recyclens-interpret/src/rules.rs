use recyclens_core::{BinColor, Interpretation, VisionLabel};
use regex::Regex;

const HAZARDOUS_FACILITY: &str = "Vigo County Household Hazardous Waste Center";
const HAZARDOUS_ADDRESS: &str = "3025 S 4 1/2 St, Terre Haute, IN 47802";
const HAZARDOUS_PHONE: &str = "(812) 462-3370";

struct Rule {
    pattern: Regex,
    name: &'static str,
    preparation: &'static str,
}

impl Rule {
    fn new(pattern: &str, name: &'static str, preparation: &'static str) -> Self {
        Self {
            pattern: Regex::new(pattern).expect("Invalid regex pattern"),
            name,
            preparation,
        }
    }
}

/// Last resort in the interpretation chain. Pattern-matches the combined
/// label text against fixed category tables and always produces an answer,
/// so the pipeline terminates even with every external service down.
pub struct RuleInterpreter {
    recyclable: Vec<Rule>,
    compost: Vec<Rule>,
    trash: Vec<Rule>,
    hazardous: Vec<Rule>,
}

impl RuleInterpreter {
    pub fn new() -> Self {
        Self {
            recyclable: vec![
                Rule::new(
                    r"plastic bottle|water bottle",
                    "Plastic Bottle",
                    "Rinse clean and remove cap",
                ),
                Rule::new(r"aluminum can|soda can|beer can", "Aluminum Can", "Rinse clean"),
                Rule::new(r"cardboard|box", "Cardboard Box", "Flatten and remove tape"),
                Rule::new(r"paper|newspaper|magazine", "Paper", "Keep dry and clean"),
                Rule::new(
                    r"glass bottle|jar",
                    "Glass Container",
                    "Rinse clean and remove lid",
                ),
            ],
            compost: vec![Rule::new(
                r"food waste|organic|compost|fruit|vegetable",
                "Food Waste",
                "Remove any packaging",
            )],
            trash: vec![
                Rule::new(r"styrofoam|polystyrene", "Styrofoam", ""),
                Rule::new(r"plastic bag", "Plastic Bag", "Return to store drop-off"),
                Rule::new(r"diaper", "Diaper", ""),
                Rule::new(r"tissue|napkin|paper towel", "Used Paper Product", ""),
            ],
            hazardous: vec![
                Rule::new(r"battery", "Battery", "Take to hazardous waste center"),
                Rule::new(
                    r"electronics|computer|phone",
                    "Electronics",
                    "Take to e-waste recycling",
                ),
                Rule::new(
                    r"paint|chemical",
                    "Hazardous Material",
                    "Take to hazardous waste center",
                ),
                Rule::new(
                    r"light bulb|fluorescent",
                    "Light Bulb",
                    "Take to special recycling",
                ),
            ],
        }
    }

    /// Interpret without any possibility of failure. Labels are joined into
    /// one lowercase haystack, category tables are checked in fixed order.
    pub fn interpret(&self, labels: &[VisionLabel]) -> Interpretation {
        let haystack = labels
            .iter()
            .map(|l| l.name.to_lowercase())
            .collect::<Vec<_>>()
            .join(" ");

        for rule in &self.recyclable {
            if rule.pattern.is_match(&haystack) {
                return Interpretation {
                    item_name: rule.name.to_string(),
                    is_recyclable: true,
                    bin_color: BinColor::Blue,
                    disposal_method: "Place in recycling bin".to_string(),
                    preparation: rule.preparation.to_string(),
                    special_instructions: None,
                    disposal_location: None,
                    disposal_address: None,
                    disposal_phone: None,
                    confidence: 0.8,
                };
            }
        }

        for rule in &self.compost {
            if rule.pattern.is_match(&haystack) {
                return Interpretation {
                    item_name: rule.name.to_string(),
                    is_recyclable: false,
                    bin_color: BinColor::Green,
                    disposal_method: "Place in compost bin".to_string(),
                    preparation: rule.preparation.to_string(),
                    special_instructions: None,
                    disposal_location: None,
                    disposal_address: None,
                    disposal_phone: None,
                    confidence: 0.8,
                };
            }
        }

        for rule in &self.trash {
            if rule.pattern.is_match(&haystack) {
                return Interpretation {
                    item_name: rule.name.to_string(),
                    is_recyclable: false,
                    bin_color: BinColor::Black,
                    disposal_method: "Place in regular trash".to_string(),
                    preparation: rule.preparation.to_string(),
                    special_instructions: None,
                    disposal_location: None,
                    disposal_address: None,
                    disposal_phone: None,
                    confidence: 0.8,
                };
            }
        }

        for rule in &self.hazardous {
            if rule.pattern.is_match(&haystack) {
                return Interpretation {
                    item_name: rule.name.to_string(),
                    is_recyclable: false,
                    bin_color: BinColor::Special,
                    disposal_method: rule.preparation.to_string(),
                    preparation: String::new(),
                    special_instructions: Some(
                        "Do not put in regular trash or recycling".to_string(),
                    ),
                    disposal_location: Some(HAZARDOUS_FACILITY.to_string()),
                    disposal_address: Some(HAZARDOUS_ADDRESS.to_string()),
                    disposal_phone: Some(HAZARDOUS_PHONE.to_string()),
                    confidence: 0.8,
                };
            }
        }

        Interpretation {
            item_name: labels
                .first()
                .map(|l| l.name.clone())
                .unwrap_or_else(|| "Unknown Item".to_string()),
            is_recyclable: false,
            bin_color: BinColor::Black,
            disposal_method: "When in doubt, throw it out (regular trash)".to_string(),
            preparation: String::new(),
            special_instructions: None,
            disposal_location: None,
            disposal_address: None,
            disposal_phone: None,
            confidence: 0.5,
        }
    }
}

impl Default for RuleInterpreter {
    fn default() -> Self {
        Self::new()
    }
}
