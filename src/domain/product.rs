use mongodb::bson::{Bson, Document};

/// Represents a product document as far as stock reporting is concerned.
///
/// Only `_id`, `name` and `quantity` are read; any other fields of the
/// document are left alone by this tool.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: Bson,
    pub name: Option<String>,
    pub quantity: Option<i64>,
}

impl Product {
    #[allow(dead_code)]
    pub fn new(id: impl Into<Bson>, name: Option<&str>, quantity: Option<i64>) -> Self {
        Self {
            id: id.into(),
            name: name.map(str::to_string),
            quantity,
        }
    }

    /// Builds a product from a raw document.
    ///
    /// Returns `None` when the document has no `_id`. Integer quantities stored
    /// as Int32, Int64 or Double are all accepted; anything else (including an
    /// explicit null) is read as missing. A fractional Double above zero rounds
    /// up, so it never displays as 0 while the store counts it as in stock.
    pub fn from_document(doc: &Document) -> Option<Self> {
        let id = doc.get("_id")?.clone();
        let name = match doc.get("name") {
            Some(Bson::String(name)) => Some(name.clone()),
            _ => None,
        };
        let quantity = match doc.get("quantity") {
            Some(Bson::Int32(q)) => Some(i64::from(*q)),
            Some(Bson::Int64(q)) => Some(*q),
            Some(Bson::Double(q)) if *q > 0.0 => Some(q.ceil() as i64),
            Some(Bson::Double(q)) => Some(q.trunc() as i64),
            _ => None,
        };
        Some(Self { id, name, quantity })
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("N/A")
    }

    /// Quantity used for reporting. A missing field counts as zero.
    pub fn stock_level(&self) -> i64 {
        self.quantity.unwrap_or(0)
    }

    #[allow(dead_code)]
    pub fn is_out_of_stock(&self) -> bool {
        self.stock_level() == 0
    }
}
