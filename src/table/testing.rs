//! Minimal record used by the table tests.

use super::record::{CellValue, Record, RecordId};

#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub id: RecordId,
    pub name: String,
    pub amount: i64,
}

impl Row {
    pub fn new(id: RecordId, name: &str, amount: i64) -> Self {
        Self {
            id,
            name: name.to_string(),
            amount,
        }
    }
}

impl Record for Row {
    const FIELDS: &'static [&'static str] = &["name", "amount"];

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn field(&self, key: &str) -> CellValue {
        match key {
            "name" => CellValue::from(&self.name),
            "amount" => CellValue::from(self.amount),
            _ => CellValue::Empty,
        }
    }
}

pub fn sample() -> Vec<Row> {
    vec![
        Row::new(1, "Carrot", 30),
        Row::new(2, "apple", 10),
        Row::new(3, "Banana", 20),
        Row::new(4, "Artichoke", 10),
        Row::new(5, "Date", 40),
        Row::new(6, "Pear", 10),
    ]
}
