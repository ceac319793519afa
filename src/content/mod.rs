//! Content module - greeting items, seed data, selection and templating

mod item;
pub mod seed;
pub mod select;
pub mod template;

pub use item::{Audience, ContentItem, ContentPatch, ContentType, NewContent};
pub use select::{select_for_audience, shuffle};
pub use template::{render, substitute, FormData};
