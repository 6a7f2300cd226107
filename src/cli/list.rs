use super::ui;
use crate::core::item::ShoppingItem;
use crate::core::store::ItemStore;
use anyhow::Result;
use comfy_table::Cell;

/// Renders a snapshot of the list as a table.
pub fn render_table(items: &[ShoppingItem], base_currency: &str) -> String {
    let mut table = ui::new_styled_table();

    table.set_header(vec![
        ui::header_cell("Id"),
        ui::header_cell("Name"),
        ui::header_cell("Description"),
        ui::header_cell("Category"),
        ui::header_cell(&format!("Price ({base_currency})")),
        ui::header_cell("Purchased"),
    ]);

    for item in items {
        table.add_row(vec![
            Cell::new(item.id),
            Cell::new(&item.name),
            Cell::new(&item.description),
            Cell::new(&item.category),
            ui::price_cell(item.estimated_price),
            ui::bought_cell(item.is_bought),
        ]);
    }

    table.to_string()
}

pub fn run(store: &dyn ItemStore, category: Option<&str>, base_currency: &str) -> Result<()> {
    let snapshot = store.subscribe_all().borrow().clone();
    let items: Vec<ShoppingItem> = snapshot
        .into_iter()
        .filter(|item| category.is_none_or(|c| item.category == c))
        .collect();

    if items.is_empty() {
        println!(
            "{}",
            ui::style_text("The shopping list is empty.", ui::StyleType::Subtle)
        );
        return Ok(());
    }

    println!("{}", render_table(&items, base_currency));

    let remaining: u64 = items
        .iter()
        .filter(|item| !item.is_bought)
        .map(|item| u64::from(item.estimated_price))
        .sum();
    println!(
        "\nStill to buy ({}): {}",
        ui::style_text(base_currency, ui::StyleType::TotalLabel),
        ui::style_text(&remaining.to_string(), ui::StyleType::TotalValue)
    );

    Ok(())
}
