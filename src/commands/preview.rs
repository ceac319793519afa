//! Preview personalized content in the terminal

use anyhow::Result;

use crate::content::{render, select_for_audience, Audience, ContentItem, FormData};
use crate::Greetings;

/// Print the slideshow a visitor would see, placeholders filled in
pub fn run(app: &Greetings, audience: Audience, form: &FormData) -> Result<()> {
    let store = app.open_store(false)?;
    let slides = select_for_audience(audience, store.list_all()?);

    if slides.is_empty() {
        println!("No enabled content for {}", audience);
        return Ok(());
    }

    println!(
        "Slideshow for {} & {} ({} slides):",
        form.name1,
        form.name2,
        slides.len()
    );
    for (i, item) in slides.iter().enumerate() {
        println!();
        println!("{}", format_slide(i + 1, item, form));
    }

    Ok(())
}

fn format_slide(index: usize, item: &ContentItem, form: &FormData) -> String {
    let mut slide = format!(
        "[{}] {} - {}\n{}",
        index,
        item.kind.label(),
        item.title,
        render(item, form)
    );
    if let Some(url) = &item.image_url {
        slide.push_str(&format!("\n  image: {}", url));
    }
    if let Some(url) = &item.video_url {
        slide.push_str(&format!("\n  video: {}", url));
    }
    slide
}
