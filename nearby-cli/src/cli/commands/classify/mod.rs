pub mod handler;

use clap::Args;

pub use handler::handle_classify_command;

#[derive(Args)]
pub struct ClassifyCommands {
    /// Category labels to classify
    #[arg(required = true)]
    pub labels: Vec<String>,

    /// Print one JSON object per label
    #[arg(long)]
    pub json: bool,

    /// Also list every domain with a matching variant
    #[arg(long)]
    pub explain: bool,
}
