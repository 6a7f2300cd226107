use super::{list, ui};
use crate::core::store::ItemStore;
use anyhow::Result;

/// Streams the live sequence: prints the current list immediately, then a
/// fresh table on every committed change, until the store goes away or the
/// user interrupts.
pub async fn run(store: &dyn ItemStore, base_currency: &str) -> Result<()> {
    let mut rx = store.subscribe_all();

    loop {
        let snapshot = rx.borrow_and_update().clone();
        if snapshot.is_empty() {
            println!(
                "{}",
                ui::style_text("The shopping list is empty.", ui::StyleType::Subtle)
            );
        } else {
            println!("{}", list::render_table(&snapshot, base_currency));
        }

        if rx.changed().await.is_err() {
            return Ok(());
        }
        ui::print_separator();
    }
}
