//! Operator CLI: inspect the feed, the classifier, and the blog content
//! without starting the server.

use clap::{Parser, Subcommand};

use flylady_core::{category_catalog, classify, Product};
use flylady_feed::{FeedCatalog, FeedClient};

#[derive(Debug, Parser)]
#[command(name = "flylady-cli")]
#[command(about = "Flylady catalog command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch the feed and print the aviation products as JSON.
    Products,
    /// Fetch the feed, classify it, and print per-category counts.
    Categories,
    /// List the blog posts found in the configured content directory.
    Posts,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = flylady_core::load_app_config()?;
    let cli = Cli::parse();

    match cli.command {
        Commands::Products => {
            let catalog = load_catalog(&config).await?;
            let products: Vec<&Product> = catalog.aviation_products();
            println!("{}", serde_json::to_string_pretty(&products)?);
        }
        Commands::Categories => {
            let catalog = load_catalog(&config).await?;
            let aviation: Vec<Product> =
                catalog.aviation_products().into_iter().cloned().collect();
            let classified = classify(&aviation, category_catalog());
            for group in &classified.groups {
                println!("{:<24} {}", group.category.slug, group.products.len());
            }
            println!("{:<24} {}", "(unclassified)", classified.remaining.len());
        }
        Commands::Posts => {
            let posts = flylady_blog::load_posts(&config.blog_dir)?;
            for post in &posts {
                let date = post
                    .date
                    .map_or_else(|| "----------".to_string(), |d| d.to_string());
                println!("{date}  {:<40} {}", post.slug, post.title);
            }
        }
    }

    Ok(())
}

async fn load_catalog(config: &flylady_core::AppConfig) -> anyhow::Result<FeedCatalog> {
    let client = FeedClient::new(
        config.feed_url.clone(),
        config.feed_timeout_secs,
        &config.feed_user_agent,
    )?;
    Ok(FeedCatalog::load(&client).await?)
}
