//! Seeded fake data for the demonstration tables.

use autotable_core::{ColumnInput, RowInput};
use itertools::Itertools;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use serde_json::{Value, json};

const FIRST_NAMES: &[&str] = &[
    "Jonathan", "Simon", "Hanna", "Karl", "Alice", "Bob", "Charlie", "Diana", "Eve", "Frank",
    "Grace", "Ivan", "Julia", "Leo", "Maja", "Nils", "Olivia", "Per", "Rosa", "Tove",
];
const LAST_NAMES: &[&str] = &[
    "Andersson", "Berg", "Carlsson", "Dahl", "Ek", "Fors", "Gustafsson", "Holm", "Isaksson",
    "Johansson", "Lind", "Nilsson", "Olsson", "Persson", "Sandberg", "Wallin",
];
const DOMAINS: &[&str] = &["example.com", "example.org", "mail.test", "inbox.test"];
const CITIES: &[&str] = &[
    "Gothenburg", "Stockholm", "Malmö", "Uppsala", "Oslo", "Copenhagen", "Helsinki", "Berlin",
    "Amsterdam", "Lisbon", "Dublin", "Prague",
];
const LOREM: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed", "do",
    "eiusmod", "tempor", "incididunt", "ut", "labore", "et", "dolore", "magna", "aliqua", "enim",
    "ad", "minim", "veniam", "quis", "nostrud", "exercitation", "ullamco", "laboris", "nisi",
];

/// Column keys of a sample person row, in display order.
pub const PERSON_KEYS: [&str; 5] = ["id", "name", "email", "city", "expenses"];

/// A fake data source. The same seed always gives the same data.
pub struct SampleData {
    rng: StdRng,
}

impl SampleData {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn pick(&mut self, from: &[&'static str]) -> &'static str {
        from.choose(&mut self.rng).copied().unwrap_or_default()
    }

    pub fn name(&mut self) -> String {
        format!("{} {}", self.pick(FIRST_NAMES), self.pick(LAST_NAMES))
    }

    pub fn email(&mut self, name: &str) -> String {
        let local = name.to_lowercase().split_whitespace().join(".");
        let suffix: u16 = self.rng.random_range(1..100);
        format!("{}{}@{}", local, suffix, self.pick(DOMAINS))
    }

    pub fn city(&mut self) -> String {
        self.pick(CITIES).to_string()
    }

    /// An amount between 0 and 1000 with two decimals, as text.
    pub fn amount(&mut self) -> String {
        let cents: u32 = self.rng.random_range(0..100_000);
        format!("{}.{:02}", cents / 100, cents % 100)
    }

    /// A sentence of `words` words, capitalised and ending in a period.
    pub fn sentence(&mut self, words: usize) -> String {
        let text = (0..words.max(1)).map(|_| self.pick(LOREM)).join(" ");
        let mut chars = text.chars();
        match chars.next() {
            Some(first) => format!("{}{}.", first.to_uppercase(), chars.as_str()),
            None => String::new(),
        }
    }

    /// One person as a JSON object keyed like [`PERSON_KEYS`].
    pub fn person(&mut self, id: usize) -> Value {
        let name = self.name();
        let email = self.email(&name);
        json!({
            "id": id,
            "name": name,
            "email": email,
            "city": self.city(),
            "expenses": self.amount(),
        })
    }

    /// `count` people as JSON objects, ids starting at 1.
    pub fn people(&mut self, count: usize) -> Vec<Value> {
        (1..=count).map(|id| self.person(id)).collect()
    }

    /// `count` keyed body rows, ids starting at 1.
    pub fn body_rows(&mut self, count: usize) -> Vec<RowInput> {
        (1..=count)
            .map(|id| {
                let person = self.person(id);
                RowInput::keyed(
                    PERSON_KEYS
                        .iter()
                        .map(|key| (*key, person.get(*key).cloned().unwrap_or(Value::Null))),
                )
            })
            .collect()
    }
}

/// The standard head row of the people tables.
pub fn head_rows() -> Vec<RowInput> {
    vec![RowInput::keyed([
        ("id", "ID"),
        ("name", "Name"),
        ("email", "Email"),
        ("city", "City"),
        ("expenses", "Expenses"),
    ])]
}

/// Column definitions with headers, for the `columns` style of input.
pub fn columns() -> Vec<ColumnInput> {
    vec![
        ColumnInput::new("ID", "id"),
        ColumnInput::new("Name", "name"),
        ColumnInput::new("Email", "email"),
        ColumnInput::new("City", "city"),
        ColumnInput::new("Exp", "expenses"),
    ]
}
