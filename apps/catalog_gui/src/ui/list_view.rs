//! Pure rendering of catalog entries into display rows.

use shared::domain::{CatalogEntry, Price, ProductId};

pub const LOADING_TEXT: &str = "Loading ...";

/// US dollars: `$` prefix, comma thousands separators, two decimals.
pub fn format_usd(price: Price) -> String {
    let units = price.whole_units().to_string();
    let mut grouped = String::with_capacity(units.len() + units.len() / 3);
    for (index, digit) in units.chars().enumerate() {
        if index > 0 && (units.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    format!("${grouped}.{:02}", price.fractional_cents())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRow {
    pub id: ProductId,
    pub name: String,
    pub price: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListView {
    rows: Vec<ListRow>,
}

impl ListView {
    pub fn from_entries(entries: &[CatalogEntry]) -> Self {
        let rows = entries
            .iter()
            .map(|entry| ListRow {
                id: entry.id,
                name: entry.name.clone(),
                price: format_usd(entry.price),
            })
            .collect();
        Self { rows }
    }

    pub fn rows(&self) -> &[ListRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn render_text(&self) -> String {
        self.rows
            .iter()
            .map(|row| format!("{} - {}", row.name, row.price))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// What the view shows at one instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Loading,
    List(ListView),
}

impl Screen {
    pub fn render_text(&self) -> String {
        match self {
            Self::Loading => LOADING_TEXT.to_string(),
            Self::List(view) => view.render_text(),
        }
    }
}
