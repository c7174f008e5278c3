//! Star subtype parsing for the compact class/description lines.

/// Star class and human description split out of an EDSM subtype string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StarTypeData {
    /// Spectral class, e.g. `K`.
    pub class: String,
    /// Description line, e.g. `Yellow-Orange Star`.
    pub desc: String,
}

/// Split a subtype such as `"K (Yellow-Orange) Star"` into `K` / `Yellow-Orange Star`.
///
/// Subtypes without a parenthesised part keep their first word as the class
/// and the whole string as the description (`"Black Hole"` → `Black` /
/// `Black Hole`). An empty subtype yields `?` / empty.
#[must_use]
pub fn parse_star_type(subtype: &str) -> StarTypeData {
    let subtype = subtype.trim();
    if subtype.is_empty() {
        return StarTypeData {
            class: "?".to_string(),
            desc: String::new(),
        };
    }

    if let Some(open) = subtype.find('(')
        && let Some(close) = subtype[open..].find(')')
    {
        let class = subtype[..open].trim();
        let inner = subtype[open + 1..open + close].trim();
        return StarTypeData {
            class: if class.is_empty() { "?" } else { class }.to_string(),
            desc: format!("{inner} Star"),
        };
    }

    StarTypeData {
        class: subtype
            .split_whitespace()
            .next()
            .unwrap_or("?")
            .to_string(),
        desc: subtype.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn main_sequence_star() {
        let parsed = parse_star_type("K (Yellow-Orange) Star");
        assert_eq!(parsed.class, "K");
        assert_eq!(parsed.desc, "Yellow-Orange Star");
    }

    #[test]
    fn multi_word_class() {
        let parsed = parse_star_type("White Dwarf (DA) Star");
        assert_eq!(parsed.class, "White Dwarf");
        assert_eq!(parsed.desc, "DA Star");
    }

    #[test]
    fn no_parentheses() {
        let parsed = parse_star_type("Black Hole");
        assert_eq!(parsed.class, "Black");
        assert_eq!(parsed.desc, "Black Hole");
    }

    #[test]
    fn empty_subtype() {
        let parsed = parse_star_type("  ");
        assert_eq!(parsed.class, "?");
        assert!(parsed.desc.is_empty());
    }
}
