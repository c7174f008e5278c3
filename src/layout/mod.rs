//! Text layout for the 16-column MFD: justification, centering, number formatting.

pub mod justify;
pub mod star;

pub use justify::{
    center, credits, fill_between, fill_chars, group_thousands, right_justify, space_between,
    surround,
};
pub use star::{StarTypeData, parse_star_type};

/// Characters per MFD line.
pub const PAGE_WIDTH: usize = 16;
