//! Pagination state carried inside inline-button callback payloads.
//!
//! A cursor is the only state that survives between updates: the bot
//! itself keeps nothing, so "load more" has to find the offset, the
//! query and the message it belongs to inside the payload string.

use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};

use crate::domain::category::Category;

/// What the cursor resumes: a free-text search or a category listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CursorScope {
    Text(String),
    Category(Category),
}

/// Position of a paginated search, addressed back to the message that
/// started it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    pub offset: u32,
    pub scope: CursorScope,
    pub origin_message: i32,
}

const TEXT_PREFIX: &str = "load_more_";
const CATEGORY_PREFIX: &str = "category_load_more_";

// The payload delimiter is `_`, so the free-text segment must never
// contain one. Escaping `%` keeps decoding unambiguous.
const QUERY_ESCAPE: &AsciiSet = &CONTROLS.add(b'_').add(b'%');

impl Cursor {
    /// The cursor for the page after this one.
    pub fn next_page(&self, page_size: u32) -> Self {
        Self {
            offset: self.offset + page_size,
            scope: self.scope.clone(),
            origin_message: self.origin_message,
        }
    }

    /// Encodes the cursor as `<prefix>_<offset>_<query>_<origin>`.
    pub fn encode(&self) -> String {
        match &self.scope {
            CursorScope::Text(query) => format!(
                "{TEXT_PREFIX}{}_{}_{}",
                self.offset,
                utf8_percent_encode(query, QUERY_ESCAPE),
                self.origin_message,
            ),
            CursorScope::Category(category) => format!(
                "{CATEGORY_PREFIX}{}_{}_{}",
                self.offset,
                category.id(),
                self.origin_message,
            ),
        }
    }

    /// Decodes a callback payload. Returns `None` for anything malformed
    /// instead of guessing at field positions.
    pub fn decode(data: &str) -> Option<Self> {
        // The category prefix starts with the text prefix, so try it first.
        if let Some(rest) = data.strip_prefix(CATEGORY_PREFIX) {
            let (offset, id, origin_message) = split_fields(rest)?;
            Some(Self {
                offset,
                scope: CursorScope::Category(Category::from_id(id)?),
                origin_message,
            })
        } else if let Some(rest) = data.strip_prefix(TEXT_PREFIX) {
            let (offset, query, origin_message) = split_fields(rest)?;
            let query = percent_decode_str(query).decode_utf8().ok()?.into_owned();
            Some(Self {
                offset,
                scope: CursorScope::Text(query),
                origin_message,
            })
        } else {
            None
        }
    }
}

fn split_fields(rest: &str) -> Option<(u32, &str, i32)> {
    let (offset, rest) = rest.split_once('_')?;
    let (query, origin) = rest.rsplit_once('_')?;
    Some((offset.parse().ok()?, query, origin.parse().ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_cursor_round_trips() {
        let cursor = Cursor {
            offset: 15,
            scope: CursorScope::Text("siers".to_string()),
            origin_message: 42,
        };
        let encoded = cursor.encode();
        assert_eq!(encoded, "load_more_15_siers_42");
        assert_eq!(Cursor::decode(&encoded), Some(cursor));
    }

    #[test]
    fn query_with_delimiter_round_trips() {
        let cursor = Cursor {
            offset: 20,
            scope: CursorScope::Text("kaku_bariba 5%".to_string()),
            origin_message: 7,
        };
        assert_eq!(Cursor::decode(&cursor.encode()), Some(cursor));
    }

    #[test]
    fn category_cursor_round_trips() {
        let cursor = Cursor {
            offset: 15,
            scope: CursorScope::Category(Category::Dairy),
            origin_message: 42,
        };
        let encoded = cursor.encode();
        assert_eq!(encoded, "category_load_more_15_60_42");
        assert_eq!(Cursor::decode(&encoded), Some(cursor));
    }

    #[test]
    fn next_page_advances_offset_only() {
        let cursor = Cursor {
            offset: 15,
            scope: CursorScope::Text("siers".to_string()),
            origin_message: 42,
        };
        let next = cursor.next_page(5);
        assert_eq!(next.offset, 20);
        assert_eq!(next.scope, cursor.scope);
        assert_eq!(next.origin_message, 42);
    }

    #[test]
    fn malformed_payloads_decode_to_none() {
        assert_eq!(Cursor::decode("something_else"), None);
        assert_eq!(Cursor::decode("load_more_abc_siers_42"), None);
        assert_eq!(Cursor::decode("load_more_15_siers"), None);
        assert_eq!(Cursor::decode("category_load_more_15_999_42"), None);
    }
}
