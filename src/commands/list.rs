//! List stored content

use anyhow::Result;

use crate::content::{select_for_audience, Audience, ContentItem};
use crate::Greetings;

/// Print stored content, newest first, or the selection for one audience
pub fn run(app: &Greetings, audience: Option<Audience>) -> Result<()> {
    let store = app.open_store(false)?;
    let items = store.list_all()?;

    let items = match audience {
        Some(audience) => {
            let selected = select_for_audience(audience, items);
            println!("Content for {} ({}):", audience, selected.len());
            selected
        }
        None => {
            println!("Content ({}):", items.len());
            items
        }
    };

    for item in &items {
        println!("  {}", format_line(item));
    }

    Ok(())
}

fn format_line(item: &ContentItem) -> String {
    let audiences = if item.category.is_empty() {
        "all".to_string()
    } else {
        item.category
            .iter()
            .map(|a| a.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };
    let state = if item.enabled { "" } else { " (disabled)" };
    format!(
        "{} - {} {} [{}]{}",
        item.created_at.format("%Y-%m-%d"),
        item.kind.label(),
        item.title,
        audiences,
        state
    )
}
