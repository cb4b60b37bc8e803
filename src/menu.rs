use colored::*;
use thiserror::Error;

pub const MENU_HEADER: &str = "********** My Movies Database **********";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Exit = 0,
    List = 1,
    Add = 2,
    Delete = 3,
    Update = 4,
    Stats = 5,
    Random = 6,
    Search = 7,
    SortedByRating = 8,
    Histogram = 9,
    Website = 10,
}

impl MenuChoice {
    /// Menu order; the index of each entry is the number the user types.
    pub const ALL: [MenuChoice; 11] = [
        MenuChoice::Exit,
        MenuChoice::List,
        MenuChoice::Add,
        MenuChoice::Delete,
        MenuChoice::Update,
        MenuChoice::Stats,
        MenuChoice::Random,
        MenuChoice::Search,
        MenuChoice::SortedByRating,
        MenuChoice::Histogram,
        MenuChoice::Website,
    ];

    pub fn number(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuChoice::Exit => "Exit",
            MenuChoice::List => "List movies",
            MenuChoice::Add => "Add movie",
            MenuChoice::Delete => "Delete movie",
            MenuChoice::Update => "Update movie",
            MenuChoice::Stats => "Stats",
            MenuChoice::Random => "Random movie",
            MenuChoice::Search => "Search movie",
            MenuChoice::SortedByRating => "Movies sorted by rating",
            MenuChoice::Histogram => "Create Rating Histogram",
            MenuChoice::Website => "Generate website",
        }
    }

    pub fn max_number() -> usize {
        Self::ALL.len() - 1
    }

    pub fn parse(input: &str) -> Result<Self, MenuError> {
        let number: i64 = input.trim().parse().map_err(|_| MenuError::NotANumber)?;
        usize::try_from(number)
            .ok()
            .and_then(|n| Self::ALL.get(n).copied())
            .ok_or(MenuError::OutOfRange {
                choice: number,
                max: Self::max_number(),
            })
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MenuError {
    #[error("Please enter a valid number.")]
    NotANumber,

    #[error("Invalid choice. Please enter a number between 0 and {max}.")]
    OutOfRange { choice: i64, max: usize },
}

/// The full menu block, ready to print.
pub fn render_menu() -> String {
    let mut out = format!("{}\n\n{}\n", MENU_HEADER, "Menu:".blue());
    for choice in MenuChoice::ALL {
        out.push_str(&format!("{}\n", format!("{}. {}", choice.number(), choice.label()).blue()));
    }
    out
}

pub fn choice_prompt() -> String {
    format!("Enter choice (0-{}): ", MenuChoice::max_number())
}
