use shared::domain::{CatalogEntry, Price, ProductId};

const DEMO_BOOKS: [(i64, &str, u64); 10] = [
    (1, "React Book", 3250),
    (2, "JS Book", 4599),
    (3, "Vue Book", 3999),
    (4, "C# Book", 2999),
    (5, "Aangular Book", 3450),
    (6, "Python Book", 4200),
    (7, "Php Book", 3799),
    (8, "Django Book", 2850),
    (9, "Macchine Learning Book", 4499),
    (10, "HTML and CSS Book (Responsive Design)", 4999),
];

/// The built-in demo catalog, in display order.
pub fn default_catalog() -> Vec<CatalogEntry> {
    DEMO_BOOKS
        .iter()
        .map(|&(id, name, cents)| CatalogEntry {
            id: ProductId(id),
            name: name.to_string(),
            price: Price::from_cents(cents),
        })
        .collect()
}
