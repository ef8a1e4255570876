use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use storefront::model::Category;
use storefront::query::SortOrder;

#[derive(Parser, Debug)]
#[command(name = "storefront", bin_name = "storefront", version)]
#[command(about = "Browse and manage a local product catalog", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding the catalog and session files
    #[arg(long, global = true, env = "STOREFRONT_DATA_DIR", help_heading = "Options")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List products, with optional filters
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show every product of one category
    Category {
        /// silk or cotton
        category: Category,
    },

    /// Show the newest arrivals
    New,

    /// Show a product's details
    #[command(alias = "v")]
    View {
        id: String,

        /// Image to show, starting at 1 (wraps around)
        #[arg(long)]
        image: Option<usize>,
    },

    /// Compose an order message for a product
    Order { id: String },

    /// Log in as the shop admin
    Login { username: String, password: String },

    /// End the admin session
    Logout,

    /// Show whether an admin session is active
    Status,

    /// Admin dashboard: every product, newest first
    Admin {
        /// Filter by name, description or type
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Add a product (admin)
    #[command(alias = "n")]
    Add(ProductArgs),

    /// Edit a product (admin). Omitted fields keep their current value.
    #[command(alias = "e")]
    Edit {
        id: String,

        #[command(flatten)]
        fields: ProductArgs,

        /// Drop the current images before adding new ones
        #[arg(long)]
        clear_images: bool,

        /// Remove the new arrival flag
        #[arg(long, conflicts_with = "new")]
        not_new: bool,
    },

    /// Delete a product (admin)
    #[command(alias = "rm")]
    Delete { id: String },

    /// Get or set configuration
    Config {
        /// Configuration key (e.g., price-ceiling, order-phone)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    #[arg(short, long)]
    pub category: Option<Category>,

    /// Exact product type, e.g. "Banarasi Silk"
    #[arg(short = 't', long = "type")]
    pub product_type: Option<String>,

    /// Minimum price (inclusive)
    #[arg(long)]
    pub min: Option<f64>,

    /// Maximum price (inclusive, defaults to the configured ceiling)
    #[arg(long)]
    pub max: Option<f64>,

    /// Text to look for in name, description or type
    #[arg(short, long)]
    pub search: Option<String>,

    /// Only products marked as new arrivals
    #[arg(long)]
    pub new: bool,

    /// newest, price-asc or price-high
    #[arg(long, default_value = "newest")]
    pub sort: SortOrder,

    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Args, Debug, Default)]
pub struct ProductArgs {
    #[arg(long)]
    pub name: Option<String>,

    /// silk or cotton
    #[arg(short, long)]
    pub category: Option<String>,

    /// Defaults to the category's standard type
    #[arg(short = 't', long = "type")]
    pub product_type: Option<String>,

    #[arg(short, long)]
    pub price: Option<String>,

    #[arg(short, long)]
    pub description: Option<String>,

    /// Image URI (repeatable)
    #[arg(long = "image")]
    pub images: Vec<String>,

    /// Local image file to upload to the image host (repeatable)
    #[arg(long = "upload")]
    pub uploads: Vec<PathBuf>,

    /// Mark as a new arrival
    #[arg(long)]
    pub new: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_list_filters() {
        let cli = Cli::try_parse_from([
            "storefront", "list", "--category", "Silk", "--type", "Dola Silk", "--max", "5000",
            "--sort", "price-low",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::List(args)) => {
                assert_eq!(args.category, Some(Category::Silk));
                assert_eq!(args.product_type.as_deref(), Some("Dola Silk"));
                assert_eq!(args.max, Some(5000.0));
                assert_eq!(args.sort, SortOrder::PriceAsc);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn rejects_unknown_sort_and_category() {
        assert!(Cli::try_parse_from(["storefront", "list", "--sort", "cheap"]).is_err());
        assert!(Cli::try_parse_from(["storefront", "category", "wool"]).is_err());
    }

    #[test]
    fn parses_repeatable_images() {
        let cli = Cli::try_parse_from([
            "storefront", "add", "--name", "A", "--price", "10", "--image", "u1", "--image", "u2",
            "--upload", "/tmp/a.jpg",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Add(args)) => {
                assert_eq!(args.images, vec!["u1", "u2"]);
                assert_eq!(args.uploads.len(), 1);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn edit_new_flags_conflict() {
        assert!(Cli::try_parse_from(["storefront", "edit", "1", "--new", "--not-new"]).is_err());
    }
}
