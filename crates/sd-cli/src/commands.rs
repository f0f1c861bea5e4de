use clap::Subcommand;
use sd_dashboard::MonthFilter;

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Log in and remember the session
    Login {
        #[arg(long)]
        user_id: String,

        #[arg(long)]
        password: String,
    },

    /// Forget the session
    Logout,

    /// Show the logged-in user
    Whoami,

    /// Fetch the profile again, ignoring the cache
    Refresh,

    /// List customers
    Customers,

    /// Monthly spending of one customer
    Spending {
        /// Customer id
        #[arg(long)]
        customer: i64,

        /// Year (defaults to the current year)
        #[arg(long)]
        year: Option<i32>,

        /// `all` or a month name (Jan..Dec)
        #[arg(long, default_value = "all")]
        month: MonthFilter,

        /// Print the chart as JSON instead of text
        #[arg(long)]
        json: bool,
    },
}
