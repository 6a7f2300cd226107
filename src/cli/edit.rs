use super::ui;
use crate::core::item::{KNOWN_CATEGORIES, NewItem, ShoppingItem};
use crate::core::store::{ItemStore, StoreError};
use anyhow::Result;
use tracing::warn;

pub async fn run_add(
    store: &dyn ItemStore,
    name: &str,
    description: &str,
    price: &str,
    category: &str,
    bought: bool,
) -> Result<()> {
    // Validation happens here, before anything touches the store.
    let draft = match NewItem::parse(name, description, price, category, bought) {
        Ok(draft) => draft,
        Err(e) => {
            warn!(error = %e, "Rejected item input");
            println!(
                "{}",
                ui::style_text(
                    &format!("Please enter valid details: {e}"),
                    ui::StyleType::Error
                )
            );
            return Ok(());
        }
    };

    if !KNOWN_CATEGORIES.contains(&draft.category.as_str()) {
        println!(
            "{}",
            ui::style_text(
                &format!("Note: '{}' is not a known category", draft.category),
                ui::StyleType::Subtle
            )
        );
    }

    let id = store.insert(draft).await?;
    println!("Item added successfully (id {id})");
    Ok(())
}

pub async fn run_toggle(store: &dyn ItemStore, id: u64) -> Result<()> {
    let item = store
        .get_by_id(id)
        .await?
        .ok_or(StoreError::NotFound(id))?;
    let toggled = ShoppingItem {
        is_bought: !item.is_bought,
        ..item
    };
    let now_bought = toggled.is_bought;
    store.update(toggled).await?;

    println!(
        "Item {id} marked as {}",
        if now_bought { "purchased" } else { "not purchased" }
    );
    Ok(())
}

pub async fn run_delete(store: &dyn ItemStore, id: u64) -> Result<()> {
    store.delete_by_id(id).await?;
    println!("Item deleted successfully");
    Ok(())
}

pub async fn run_clear(store: &dyn ItemStore, yes: bool) -> Result<()> {
    if !yes {
        let term = console::Term::stdout();
        term.write_str("Delete all items? This action cannot be undone. [y/N] ")?;
        let answer = term.read_line()?;
        if !matches!(answer.trim().to_lowercase().as_str(), "y" | "yes") {
            println!("{}", ui::style_text("Aborted.", ui::StyleType::Subtle));
            return Ok(());
        }
    }

    store.delete_all().await?;
    println!("All items deleted");
    Ok(())
}
