//! CLI commands

use anyhow::Result;
use clap::Subcommand;
use serde::Serialize;
use volant_http::VolantClient;
use volant_http::types::{LoginRequest, NewCategory, ProductFilter, ReviewFilter};

use crate::config::CliContext;

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in and store the session token pair
    Login {
        /// Admin account email
        email: String,

        /// Password, falls back to VOLANT_PASSWORD
        #[arg(long, env = "VOLANT_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Sign out and discard the stored token pair
    Logout,

    /// Show the signed-in admin profile
    Me,

    /// Manage the product catalog
    Products {
        #[command(subcommand)]
        command: ProductCommands,
    },

    /// Manage product categories
    Categories {
        #[command(subcommand)]
        command: CategoryCommands,
    },

    /// Work through the contact inbox
    Messages {
        #[command(subcommand)]
        command: MessageCommands,
    },

    /// Moderate customer reviews
    Reviews {
        #[command(subcommand)]
        command: ReviewCommands,
    },

    /// Show store-wide counters
    Dashboard,
}

#[derive(Subcommand)]
pub enum ProductCommands {
    /// List products
    List {
        /// Filter by category slug
        #[arg(long)]
        category: Option<String>,

        /// Full-text search over name and description
        #[arg(long)]
        search: Option<String>,

        /// Page number
        #[arg(long)]
        page: Option<u32>,

        /// Page size
        #[arg(long)]
        per_page: Option<u32>,
    },

    /// Show one product
    Get {
        /// Product id
        id: i64,
    },

    /// Delete a product
    Delete {
        /// Product id
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List categories
    List,

    /// Create a category
    Add {
        /// Category name
        name: String,
    },

    /// Delete a category
    Delete {
        /// Category id
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum MessageCommands {
    /// List contact messages
    List {
        /// Page number
        #[arg(long)]
        page: Option<u32>,
    },

    /// Mark a message as read
    Read {
        /// Message id
        id: i64,
    },

    /// Delete a message
    Delete {
        /// Message id
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum ReviewCommands {
    /// List reviews
    List {
        /// Only reviews still awaiting approval
        #[arg(long)]
        pending: bool,

        /// Filter by product id
        #[arg(long)]
        product: Option<i64>,
    },

    /// Approve a review
    Approve {
        /// Review id
        id: i64,
    },

    /// Delete a review
    Delete {
        /// Review id
        id: i64,
    },
}

impl Commands {
    pub async fn execute(self, ctx: &CliContext) -> Result<()> {
        let client = ctx.client()?;

        match self {
            Commands::Login { email, password } => {
                let admin = client.login(&LoginRequest { email, password }).await?;
                println!("Signed in as {} <{}>", admin.name, admin.email);
                Ok(())
            }
            Commands::Logout => {
                client.logout().await?;
                println!("Signed out");
                Ok(())
            }
            Commands::Me => print_json(&client.me().await?),
            Commands::Products { command } => command.execute(&client).await,
            Commands::Categories { command } => command.execute(&client).await,
            Commands::Messages { command } => command.execute(&client).await,
            Commands::Reviews { command } => command.execute(&client).await,
            Commands::Dashboard => print_json(&client.dashboard_summary().await?),
        }
    }
}

impl ProductCommands {
    pub async fn execute(self, client: &VolantClient) -> Result<()> {
        match self {
            ProductCommands::List {
                category,
                search,
                page,
                per_page,
            } => {
                let filter = ProductFilter {
                    category,
                    search,
                    page,
                    per_page,
                };
                print_json(&client.list_products(&filter).await?)
            }
            ProductCommands::Get { id } => print_json(&client.get_product(id).await?),
            ProductCommands::Delete { id } => {
                client.delete_product(id).await?;
                println!("Deleted product {id}");
                Ok(())
            }
        }
    }
}

impl CategoryCommands {
    pub async fn execute(self, client: &VolantClient) -> Result<()> {
        match self {
            CategoryCommands::List => print_json(&client.list_categories().await?),
            CategoryCommands::Add { name } => {
                let category = client
                    .create_category(&NewCategory {
                        name,
                        image_url: None,
                    })
                    .await?;
                println!("Created category {} ({})", category.name, category.id);
                Ok(())
            }
            CategoryCommands::Delete { id } => {
                client.delete_category(id).await?;
                println!("Deleted category {id}");
                Ok(())
            }
        }
    }
}

impl MessageCommands {
    pub async fn execute(self, client: &VolantClient) -> Result<()> {
        match self {
            MessageCommands::List { page } => print_json(&client.list_messages(page).await?),
            MessageCommands::Read { id } => {
                client.mark_message_read(id).await?;
                println!("Marked message {id} as read");
                Ok(())
            }
            MessageCommands::Delete { id } => {
                client.delete_message(id).await?;
                println!("Deleted message {id}");
                Ok(())
            }
        }
    }
}

impl ReviewCommands {
    pub async fn execute(self, client: &VolantClient) -> Result<()> {
        match self {
            ReviewCommands::List { pending, product } => {
                let filter = ReviewFilter {
                    approved: pending.then_some(false),
                    product_id: product,
                };
                print_json(&client.list_reviews(&filter).await?)
            }
            ReviewCommands::Approve { id } => {
                let review = client.approve_review(id).await?;
                println!("Approved review {} by {}", review.id, review.author);
                Ok(())
            }
            ReviewCommands::Delete { id } => {
                client.delete_review(id).await?;
                println!("Deleted review {id}");
                Ok(())
            }
        }
    }
}

fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
