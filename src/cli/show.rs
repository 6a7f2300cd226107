use super::ui;
use crate::core::config::AppConfig;
use crate::core::rates::RateProvider;
use crate::core::store::ItemStore;
use crate::details::load_details;
use anyhow::Result;
use comfy_table::Cell;

/// The detail screen: fetches the item and the current rates concurrently,
/// then renders the record with its price converted into every configured
/// target currency. A rate failure still renders the record itself.
pub async fn run(
    store: &dyn ItemStore,
    provider: &dyn RateProvider,
    id: u64,
    config: &AppConfig,
) -> Result<()> {
    let details = load_details(
        store,
        provider,
        id,
        &config.base_currency,
        &config.target_currencies,
    )
    .await?;
    let item = &details.item;

    println!("{}\n", ui::style_text("Item Details", ui::StyleType::Title));

    let mut table = ui::new_styled_table();
    table.add_row(vec![ui::header_cell("Name"), Cell::new(&item.name)]);
    table.add_row(vec![
        ui::header_cell("Description"),
        Cell::new(&item.description),
    ]);
    table.add_row(vec![ui::header_cell("Category"), Cell::new(&item.category)]);
    table.add_row(vec![
        ui::header_cell(&format!("Price in {}", config.base_currency)),
        ui::price_cell(item.estimated_price),
    ]);
    table.add_row(vec![
        ui::header_cell("Purchased"),
        Cell::new(if item.is_bought { "Yes" } else { "No" }),
    ]);

    for code in &config.target_currencies {
        if let Some(value) = details.converted(code) {
            table.add_row(vec![
                ui::header_cell(&format!("Price in {code}")),
                Cell::new(format!("{value:.2}")),
            ]);
        }
    }

    println!("{table}");

    if let Err(e) = &details.rates {
        println!(
            "\n{}",
            ui::style_text(
                &format!("Error fetching currency rates: {e}"),
                ui::StyleType::Error
            )
        );
    }

    Ok(())
}
