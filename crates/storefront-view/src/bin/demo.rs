//! # Storefront Demo
//!
//! Runs the store and blog list logic against a catalog file and prints
//! what the pages would show.
//!
//! ## Usage
//! ```bash
//! # Bundled catalog, default filters
//! cargo run -p storefront-view --bin storefront-demo
//!
//! # Search, filter and sort
//! cargo run -p storefront-view --bin storefront-demo -- --search platform --sort price-low
//!
//! # Your own catalog, in-stock only, up to ₹3,000
//! cargo run -p storefront-view --bin storefront-demo -- --catalog ./catalog.json --in-stock --max-price 3000
//!
//! # Blog index and one post
//! cargo run -p storefront-view --bin storefront-demo -- --blog --open onboarding-new-distributors
//! ```

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use storefront_core::catalog::Catalog;
use storefront_core::filter::{PriceRange, SortOrder};
use storefront_core::money::{Currency, Money};
use storefront_core::rating::{five_stars, StarFill};
use storefront_core::types::{BlogPost, Product};
use storefront_view::{DetailLoader, ListView, Selection, StaticSource, ViewConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

const BUNDLED_CATALOG: &str = include_str!("../../data/catalog.json");
const BUNDLED_BLOG: &str = include_str!("../../data/blog.json");

/// Parsed command line.
#[derive(Debug, Default)]
struct Options {
    config: Option<PathBuf>,
    catalog: Option<PathBuf>,
    search: Option<String>,
    category: Option<String>,
    sort: SortOrder,
    max_price: Option<i64>,
    in_stock: bool,
    blog: bool,
    open: Option<String>,
}

fn print_help() {
    println!("Storefront Demo");
    println!();
    println!("Usage: storefront-demo [OPTIONS]");
    println!();
    println!("Options:");
    println!("      --config <PATH>     View config file (default: platform config dir)");
    println!("      --catalog <PATH>    Catalog JSON (default: bundled sample)");
    println!("  -s, --search <TEXT>     Search term");
    println!("  -c, --category <NAME>   Category filter (\"all\" for every category)");
    println!("      --sort <ORDER>      featured | price-low | price-high | name");
    println!("      --max-price <N>     Upper price bound");
    println!("      --in-stock          Hide out-of-stock products");
    println!("      --blog              Show the blog index instead of the store");
    println!("      --open <KEY>        Open a product id or blog slug in the detail view");
    println!("  -h, --help              Show this help message");
}

/// Returns `None` when help was printed.
fn parse_args() -> Result<Option<Options>, Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    let mut options = Options::default();

    let mut i = 1;
    while i < args.len() {
        let value = args.get(i + 1).cloned();
        match args[i].as_str() {
            "--config" => {
                options.config = value.map(PathBuf::from);
                i += 1;
            }
            "--catalog" => {
                options.catalog = value.map(PathBuf::from);
                i += 1;
            }
            "--search" | "-s" => {
                options.search = value;
                i += 1;
            }
            "--category" | "-c" => {
                options.category = value;
                i += 1;
            }
            "--sort" => {
                if let Some(sort) = value {
                    options.sort = sort.parse()?;
                }
                i += 1;
            }
            "--max-price" => {
                options.max_price = value.and_then(|v| v.parse().ok());
                i += 1;
            }
            "--in-stock" => options.in_stock = true,
            "--blog" => options.blog = true,
            "--open" => {
                options.open = value;
                i += 1;
            }
            "--help" | "-h" => {
                print_help();
                return Ok(None);
            }
            other => eprintln!("Ignoring unknown argument: {}", other),
        }
        i += 1;
    }

    Ok(Some(options))
}

/// Initializes the tracing subscriber.
///
/// `RUST_LOG` overrides the default `info,storefront=debug`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,storefront=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn render_stars(rating: f32) -> String {
    five_stars(rating)
        .into_iter()
        .map(|fill| match fill {
            StarFill::Full => '★',
            StarFill::Half => '½',
            StarFill::Empty => '☆',
        })
        .collect()
}

fn print_product(product: &Product, currency: &Currency) {
    let stock = if product.availability.is_in_stock() {
        ""
    } else {
        "  [out of stock]"
    };
    println!(
        "  {:<8} {:>10}  {:<10} {}{}",
        product.code,
        product.price.format(currency),
        product.category,
        product.description,
        stock
    );

    if let (Some(rating), Some(reviews)) = (product.rating, product.reviews) {
        println!("           {} ({} reviews)", render_stars(rating), reviews);
    }
    if let (Some(original), Some(percent)) = (product.original_price, product.discount_percent()) {
        println!("           was {} ({}% off)", original.format(currency), percent);
    }
}

fn print_post(post: &BlogPost) {
    let date = post
        .published_at
        .map(|at| at.format("%b %d, %Y").to_string())
        .unwrap_or_default();
    println!(
        "  {:<12} {:<14} {}",
        date,
        post.category_name.as_deref().unwrap_or(""),
        post.title
    );
}

async fn run_store(options: &Options, config: &ViewConfig) -> Result<(), Box<dyn std::error::Error>> {
    let catalog: Catalog<Product> = match &options.catalog {
        Some(path) => Catalog::from_json(&std::fs::read_to_string(path)?)?,
        None => Catalog::from_json(BUNDLED_CATALOG)?,
    };
    let source = StaticSource::from_catalog(catalog);

    let mut view: ListView<Product> = ListView::for_store(&config.store)?;
    view.mount(&source).await?;

    if let Some(term) = &options.search {
        view.set_search_term(term)?;
    }
    if let Some(category) = &options.category {
        view.set_category(category);
    }
    if let Some(max) = options.max_price {
        view.set_price_range(PriceRange::new(
            Money::from_minor(config.store.price_min),
            Money::from_minor(max),
        ));
    }
    view.set_hide_out_of_stock(options.in_stock || config.store.hide_out_of_stock);
    view.set_sort(options.sort);

    println!("Categories: all, {}", view.categories().join(", "));
    println!(
        "Showing {} of {} products (sort: {})",
        view.result_count(),
        view.items().len(),
        view.sort()
    );
    println!();

    for product in view.results() {
        print_product(product, &config.currency);
    }

    if let Some(key) = &options.open {
        let Some(summary) = view.find(key).cloned() else {
            println!();
            println!("No product with id {}", key);
            return Ok(());
        };
        let loader: DetailLoader<Product> = DetailLoader::new(Arc::new(source), &config.detail);
        if let Selection::Applied(detail) = loader.select(summary).await {
            println!();
            println!("Detail ({:?}):", detail.origin);
            print_product(&detail.record, &config.currency);
        }
    }

    Ok(())
}

async fn run_blog(options: &Options, config: &ViewConfig) -> Result<(), Box<dyn std::error::Error>> {
    let catalog: Catalog<BlogPost> = Catalog::from_json(BUNDLED_BLOG)?;
    let source = StaticSource::from_catalog(catalog);

    let mut view: ListView<BlogPost> = ListView::new(Default::default(), config.store.page_size)?;
    view.mount(&source).await?;

    if let Some(term) = &options.search {
        view.set_search_term(term)?;
    }
    if let Some(category) = &options.category {
        view.set_category(category);
    }

    println!("Blog ({} posts)", view.result_count());
    println!();
    for post in view.results() {
        print_post(post);
    }

    if let Some(slug) = &options.open {
        let Some(summary) = view.find(slug).cloned() else {
            println!();
            println!("No post with slug {}", slug);
            return Ok(());
        };
        let loader: DetailLoader<BlogPost> = DetailLoader::new(Arc::new(source), &config.detail);
        if let Selection::Applied(detail) = loader.select(summary).await {
            println!();
            println!("{} ({:?})", detail.record.title, detail.origin);
            if let Some(excerpt) = &detail.record.excerpt {
                println!("  {}", excerpt);
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let Some(options) = parse_args()? else {
        return Ok(());
    };

    init_tracing();

    let config = ViewConfig::load_or_default(options.config.clone());
    info!(
        page_size = config.store.page_size,
        cache = config.detail.cache_enabled,
        "Storefront demo starting"
    );

    if options.blog {
        run_blog(&options, &config).await?;
    } else {
        run_store(&options, &config).await?;
    }

    Ok(())
}
