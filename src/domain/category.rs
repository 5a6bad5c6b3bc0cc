/// Catalog categories of the offer listing, keyed by the numeric
/// identifiers the site's `categories[]` query parameter expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Meat,
    Veggies,
    Bread,
    Dairy,
    Fish,
    Gastronomy,
    Bakery,
    Sweets,
}

impl Category {
    /// Identifier sent in the `categories[]` query parameter.
    pub fn id(self) -> &'static str {
        match self {
            Category::Meat => "67",
            Category::Veggies => "56",
            Category::Bread => "61",
            Category::Dairy => "60",
            Category::Fish => "49",
            Category::Gastronomy => "65",
            Category::Bakery => "41",
            Category::Sweets => "54",
        }
    }

    /// Reverse lookup for identifiers carried in pagination cursors.
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "67" => Some(Category::Meat),
            "56" => Some(Category::Veggies),
            "61" => Some(Category::Bread),
            "60" => Some(Category::Dairy),
            "49" => Some(Category::Fish),
            "65" => Some(Category::Gastronomy),
            "41" => Some(Category::Bakery),
            "54" => Some(Category::Sweets),
            _ => None,
        }
    }

    /// Maps chat shortcuts to categories, so a plain-text "/meat" routes
    /// to a category search even when it arrives outside command parsing.
    pub fn from_keyword(text: &str) -> Option<Self> {
        match text {
            "/meat" => Some(Category::Meat),
            "/veggies" => Some(Category::Veggies),
            "/bread" => Some(Category::Bread),
            "/fish" => Some(Category::Fish),
            "/dairy" => Some(Category::Dairy),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_round_trips() {
        for category in [
            Category::Meat,
            Category::Veggies,
            Category::Bread,
            Category::Dairy,
            Category::Fish,
            Category::Gastronomy,
            Category::Bakery,
            Category::Sweets,
        ] {
            assert_eq!(Category::from_id(category.id()), Some(category));
        }
    }

    #[test]
    fn keyword_lookup_covers_menu_shortcuts() {
        assert_eq!(Category::from_keyword("/dairy"), Some(Category::Dairy));
        assert_eq!(Category::from_keyword("piens"), None);
    }
}
