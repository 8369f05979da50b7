mod emoji;
mod emoji_record;
mod resolution;
mod word_entry;

pub use emoji::{Emoji, InvalidEmoji};
pub use emoji_record::EmojiRecord;
pub use resolution::{Resolution, ResolutionIndex};
pub use word_entry::{CategoryFilter, WordEntry};
