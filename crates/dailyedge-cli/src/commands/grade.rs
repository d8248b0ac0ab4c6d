use clap::Subcommand;
use dailyedge_core::grade::{self, Category};

use crate::app::{print_json, CliResult};

#[derive(Subcommand)]
pub enum GradeAction {
    /// Percentage from points earned and points possible
    Simple {
        #[arg(allow_negative_numbers = true)]
        earned: String,
        #[arg(allow_negative_numbers = true)]
        possible: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Final grade from weighted categories
    Weighted {
        /// NAME:EARNED/POSSIBLE[@WEIGHT]; repeat for each category
        #[arg(short, long = "category", value_name = "CATEGORY")]
        categories: Vec<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: GradeAction) -> CliResult {
    match action {
        GradeAction::Simple {
            earned,
            possible,
            json,
        } => {
            let result = grade::simple(
                grade::parse_lenient(&earned),
                grade::parse_lenient(&possible),
            )?;
            if json {
                print_json(&result)?;
            } else {
                println!("{result}");
            }
        }
        GradeAction::Weighted { categories, json } => {
            let rows = if categories.is_empty() {
                Category::defaults()
            } else {
                categories
                    .iter()
                    .map(|raw| raw.parse::<Category>())
                    .collect::<Result<Vec<_>, _>>()?
            };
            let result = grade::weighted(&rows)?;
            if json {
                print_json(&result)?;
            } else {
                println!("{result}");
            }
        }
    }
    Ok(())
}
