use std::io::{self, BufRead, Write};
use std::time::Instant;

use anyhow::Result;
use clap::{Parser, Subcommand};
use sdgallery::cli::{
    run_config_get, run_config_set, run_delete, run_list, run_scan, run_show, ListOptions,
};
use sdgallery::config::{ClientConfig, DEFAULT_PAGE_SIZE, DEFAULT_SERVER};
use sdgallery::gallery::{PlatformFilter, Query, SortMode};
use sdgallery::logging::{init_logging, LOG_ENV};
use sdgallery::metadata::MetadataEntry;
use sdgallery::tui::run_tui;

#[derive(Parser)]
#[command(name = "sdgallery")]
#[command(about = "Terminal client for an AI image gallery server")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Gallery server URL (launches TUI if no subcommand)
    #[arg(long, global = true, env = "SDGALLERY_SERVER", default_value = DEFAULT_SERVER)]
    server: String,

    /// Images requested per page
    #[arg(long, global = true, env = "SDGALLERY_PAGE_SIZE", default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: u32,
}

#[derive(Subcommand)]
enum Commands {
    /// List one page of images
    List {
        /// Page number (starting at 1)
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Search text matched against prompts
        #[arg(short, long, default_value = "")]
        query: String,
        /// Sort order: random, desc (newest first) or asc (oldest first)
        #[arg(long, default_value = "random", value_parser = parse_sort)]
        sort: SortMode,
        /// Platform: all, NovelAI, StableDiffusion or none
        #[arg(long, default_value = "all", value_parser = parse_platform)]
        platform: PlatformFilter,
    },
    /// Show an image's metadata
    Show {
        /// Image id
        id: i64,
    },
    /// Show or change the server's source/destination directories
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
    /// Start a background scan for new images on the server
    Scan,
    /// Delete images by id
    Delete {
        /// Image ids to delete
        #[arg(required = true)]
        ids: Vec<i64>,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Set source and destination directories
    Set {
        /// Directory the server scans for new images
        source: String,
        /// Directory classified images are moved into
        dest: String,
    },
}

fn parse_sort(value: &str) -> Result<SortMode, String> {
    SortMode::from_param(value)
        .ok_or_else(|| format!("unknown sort '{}' (expected random, desc or asc)", value))
}

fn parse_platform(value: &str) -> Result<PlatformFilter, String> {
    PlatformFilter::from_param(value).ok_or_else(|| {
        format!(
            "unknown platform '{}' (expected all, NovelAI, StableDiffusion or none)",
            value
        )
    })
}

fn main() -> Result<()> {
    // Initialize logging - guard must be held for logs to flush
    let _guard = init_logging().ok();
    let verbose = std::env::var(LOG_ENV).is_ok();
    let start = Instant::now();

    let cli = Cli::parse();

    let result = run_command(cli);

    if verbose {
        let elapsed = start.elapsed();
        eprintln!("Completed in {:.2?}", elapsed);
    }

    result
}

fn run_command(cli: Cli) -> Result<()> {
    let config = ClientConfig::new(&cli.server, cli.page_size)?;

    match cli.command {
        Some(Commands::List {
            page,
            query,
            sort,
            platform,
        }) => {
            let options = ListOptions {
                page,
                query: Query::default()
                    .with_text(query)
                    .with_sort(sort)
                    .with_platform(platform),
            };
            let response = run_list(&config, options)?;
            if response.images.is_empty() && response.page == 1 {
                println!("No images found. Try scanning or changing your search.");
                return Ok(());
            }
            for image in &response.images {
                println!("{:>6}  {:<16}  {}", image.no, image.platform_label(), image.filepath);
            }
            println!(
                "Page {}/{} ({} images)",
                response.page,
                response.total_pages,
                response.images.len()
            );
            if response.has_more() {
                println!("More results: --page {}", response.page + 1);
            }
        }
        Some(Commands::Show { id }) => {
            let details = run_show(&config, id)?;
            println!("#{} {}", details.image.no, details.image.filepath);
            println!("Platform: {}", details.image.platform_label());
            if details.entries.is_empty() {
                println!("(no metadata)");
            } else {
                print_entries(&details.entries);
            }
        }
        Some(Commands::Config { action }) => match action {
            Some(ConfigAction::Set { source, dest }) => {
                let message = run_config_set(&config, &source, &dest)?;
                println!("{}", message);
            }
            None => match run_config_get(&config)? {
                Some(server_config) => {
                    println!("Source:      {}", server_config.image_file_path);
                    println!("Destination: {}", server_config.des_file_path);
                }
                None => {
                    println!(
                        "Server is not configured. Run 'sdgallery config set <source> <dest>'."
                    );
                }
            },
        },
        Some(Commands::Scan) => {
            let message = run_scan(&config)?;
            println!("{}", message);
        }
        Some(Commands::Delete { ids, yes }) => {
            if !yes && !confirm(&format!("Delete {} image(s)?", ids.len()))? {
                println!("Cancelled.");
                return Ok(());
            }
            let message = run_delete(&config, &ids)?;
            println!("{}", message);
        }
        None => {
            run_tui(&config)?;
        }
    }

    Ok(())
}

fn print_entries(entries: &[MetadataEntry]) {
    let (long, short): (Vec<_>, Vec<_>) = entries.iter().partition(|e| e.is_long());
    for entry in long {
        println!();
        println!("{}:", entry.key);
        for line in entry.value.lines() {
            println!("  {}", line);
        }
    }
    if !short.is_empty() {
        println!();
        println!("Details:");
        for entry in short {
            println!("  {}: {}", entry.key, entry.value);
        }
    }
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}
