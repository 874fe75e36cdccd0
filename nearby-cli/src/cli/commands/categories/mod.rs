pub mod handler;

use clap::Args;

pub use handler::handle_categories_command;

#[derive(Args)]
pub struct CategoriesCommands {
    /// Restrict to one domain (key such as `real-estate`, or its label)
    #[arg(long)]
    pub domain: Option<String>,

    /// Fuzzy-search variants instead of listing them
    #[arg(long)]
    pub search: Option<String>,

    /// Maximum number of search results
    #[arg(long, default_value_t = 10)]
    pub limit: usize,
}
