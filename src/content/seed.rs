//! Default content inserted into an empty store

use chrono::{Duration, Utc};

use super::{Audience, ContentItem, ContentType};

/// (type, title, content, category, tags)
type SeedRow = (
    ContentType,
    &'static str,
    &'static str,
    &'static [Audience],
    &'static [&'static str],
);

const BOTH: &[Audience] = &[Audience::Couple, Audience::Friends];
const COUPLE: &[Audience] = &[Audience::Couple];
const FRIENDS: &[Audience] = &[Audience::Friends];

const SEED: &[SeedRow] = &[
    (
        ContentType::Quote,
        "New Year Quote 1",
        "May this New Year bring you happiness, peace, and prosperity. Wishing you a joyous year ahead!",
        BOTH,
        &["inspirational", "happy"],
    ),
    (
        ContentType::Shayri,
        "New Year Shayri",
        "Naya saal aaya hai, nayi ummeed le kar,\nKhushiyan aapke kadam chumein,\nHar pal aapke liye khushiyan laaye.",
        BOTH,
        &["hindi", "poetry"],
    ),
    (
        ContentType::Comedy,
        "Funny New Year",
        "New Year Resolution: I will not make any more New Year resolutions! 😂",
        FRIENDS,
        &["funny", "humor"],
    ),
    (
        ContentType::Quote,
        "Couple Quote",
        "Together we will make this year the best one yet. Happy New Year, my love! 💕",
        COUPLE,
        &["romantic", "love"],
    ),
    (
        ContentType::Quote,
        "Personalized Couple Quote",
        "Dear {name1} and {name2}, as you celebrate {relationship} together, may this New Year bring you endless joy and beautiful memories! 💑",
        COUPLE,
        &["romantic", "personalized"],
    ),
    (
        ContentType::Shayri,
        "Romantic Shayri",
        "Naya saal aaya hai, aap dono ke liye,\n{name1} aur {name2} ke liye,\nHar pal khushiyan laaye, har din naya ho,\nAapka pyaar hamesha bana rahe.",
        COUPLE,
        &["hindi", "romantic", "shayri"],
    ),
    (
        ContentType::Quote,
        "Friends Quote",
        "To {name1} and {name2}, friends for {relationship} - may this New Year strengthen our bond even more! 🎉",
        FRIENDS,
        &["friendship", "personalized"],
    ),
    (
        ContentType::Comedy,
        "Funny Friends",
        "New Year Resolution for {name1} and {name2}: Let's promise to be even more awesome friends this year! (And maybe share more memes 😂)",
        FRIENDS,
        &["funny", "humor", "memes"],
    ),
    (
        ContentType::Activity,
        "New Year Activity",
        "Plan a surprise date night to celebrate the New Year together!",
        COUPLE,
        &["activity", "date"],
    ),
    (
        ContentType::Anime,
        "Anime Character Wish",
        "May your New Year be as exciting as an anime adventure! 🎌",
        FRIENDS,
        &["anime", "fun"],
    ),
];

/// Build the seed set with fresh ids.
///
/// Timestamps step back one millisecond per row so the listing order
/// matches the order above.
pub fn default_content() -> Vec<ContentItem> {
    let now = Utc::now();
    SEED.iter()
        .enumerate()
        .map(|(i, (kind, title, content, category, tags))| {
            let mut item = ContentItem::new(*kind, *title, *content);
            item.category = category.to_vec();
            item.tags = tags.iter().map(|t| t.to_string()).collect();
            item.created_at = now - Duration::milliseconds(i as i64);
            item
        })
        .collect()
}
