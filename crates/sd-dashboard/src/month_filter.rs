use sd_core::{CoreError, Month};

use std::str::FromStr;

/// Month selector over the chart: every month, or exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonthFilter {
    #[default]
    All,
    Month(Month),
}

impl MonthFilter {
    /// Every selectable option, `All` first.
    pub fn options() -> impl Iterator<Item = MonthFilter> {
        std::iter::once(Self::All).chain(Month::ALL.into_iter().map(Self::Month))
    }

    /// Value as used on the command line (`all`, `Jan`, ...).
    pub fn value(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Month(month) => month.short(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "All Months",
            Self::Month(month) => month.label(),
        }
    }
}

impl FromStr for MonthFilter {
    type Err = CoreError;

    #[track_caller]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse().map(Self::Month)
    }
}

impl std::fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.value())
    }
}
