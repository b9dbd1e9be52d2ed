use albumoto::album::{Category, Layout};
use albumoto::catalog::CatalogStore;
use albumoto::publish::{PublishOutcome, PublishRequest, publish};
use albumoto::resize::{MediaResizer, Quality};
use albumoto::staging::{IngestFile, StagingStore};
use albumoto::storage::JsonFileBackend;
use albumoto::{config, output};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

fn parse_category(s: &str) -> Result<Category, String> {
    match s {
        "personal" => Ok(Category::Personal),
        "family" => Ok(Category::Family),
        "travel" => Ok(Category::Travel),
        "events" => Ok(Category::Events),
        "nature" => Ok(Category::Nature),
        "other" => Ok(Category::Other),
        _ => Err(format!(
            "unknown category '{s}' (expected personal, family, travel, events, nature, or other)"
        )),
    }
}

fn parse_layout(s: &str) -> Result<Layout, String> {
    match s {
        "grid" => Ok(Layout::Grid),
        "masonry" => Ok(Layout::Masonry),
        "rows" => Ok(Layout::Rows),
        "columns" => Ok(Layout::Columns),
        "scrapbook" => Ok(Layout::Scrapbook),
        _ => Err(format!(
            "unknown layout '{s}' (expected grid, masonry, rows, columns, or scrapbook)"
        )),
    }
}

#[derive(Parser)]
#[command(name = "albumoto")]
#[command(about = "Album authoring and publication for personal photo feeds")]
#[command(long_about = "\
Album authoring and publication for personal photo feeds

Media files are staged, downscaled to a storage-friendly size, and published
as a self-contained album into a JSON catalog. Feed and album viewers read
the catalog as-is.

Publishing:

  albumoto publish photo1.jpg photo2.jpg clip.mp4 \\
      --title \"Summer Trip\" --category travel --layout scrapbook

  Up to 20 media files per album. Images are embedded as base64 data URIs,
  downscaled to 800px wide; videos get placeholder entries. If the catalog
  quota would be exceeded, the album is retried with placeholder media and
  published with a warning.

Managing the catalog:

  albumoto list                # the feed (hidden albums omitted)
  albumoto list --show-hidden
  albumoto show <album-id>     # full album detail with derived styling
  albumoto hide <album-id>     # keep in catalog, drop from the feed
  albumoto unhide <album-id>
  albumoto remove <album-id>

Run 'albumoto gen-config' to generate a documented albumoto.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Directory containing albumoto.toml
    #[arg(long, default_value = ".", global = true)]
    config_dir: PathBuf,

    /// Catalog file path (overrides storage.catalog_path from config)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Stage media files and publish them as a new album
    Publish {
        /// Media files to include, in album order
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Album title
        #[arg(long, default_value = "My Album")]
        title: String,

        /// Album category: personal, family, travel, events, nature, other
        #[arg(long, default_value = "personal", value_parser = parse_category)]
        category: Category,

        /// Album description
        #[arg(long, default_value = "")]
        description: String,

        /// Layout: grid, masonry, rows, columns, scrapbook
        #[arg(long, default_value = "grid", value_parser = parse_layout)]
        layout: Layout,

        /// Column count (1-5)
        #[arg(long, default_value_t = 3)]
        columns: u8,

        /// Gap step (0-8)
        #[arg(long, default_value_t = 2)]
        gap: u8,

        /// Background color token
        #[arg(long, default_value = "bg-amber-50")]
        background: String,
    },
    /// List the album feed
    List {
        /// Include hidden albums (marked [hidden])
        #[arg(long)]
        show_hidden: bool,
    },
    /// Show one album in full
    Show { album_id: String },
    /// Hide an album from the feed (it stays in the catalog)
    Hide { album_id: String },
    /// Return a hidden album to the feed
    Unhide { album_id: String },
    /// Delete an album from the catalog
    Remove { album_id: String },
    /// Print a stock albumoto.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let app_config = config::load_config(&cli.config_dir)?;
    let catalog_path = cli
        .catalog
        .clone()
        .unwrap_or_else(|| PathBuf::from(&app_config.storage.catalog_path));
    let backend = JsonFileBackend::with_quota(catalog_path, app_config.storage.quota_bytes);
    let catalog = CatalogStore::new(backend);

    match cli.command {
        Command::Publish {
            files,
            title,
            category,
            description,
            layout,
            columns,
            gap,
            background,
        } => {
            init_thread_pool(&app_config.processing);

            let mut staging = StagingStore::new();
            let ingest = read_ingest_files(&files)?;
            let staged_ids = staging.add(ingest)?;
            println!("Staged {} of {} files", staged_ids.len(), files.len());
            output::print_staged(staging.entries());

            let resizer = MediaResizer::new(
                app_config.images.max_width,
                Quality::new(app_config.images.quality),
            );
            let request = PublishRequest {
                title,
                category,
                description,
                layout,
                columns,
                gap,
                background,
            };

            let (tx, rx) = std::sync::mpsc::channel();
            let printer = std::thread::spawn(move || {
                for event in rx {
                    output::print_publish_event(&event);
                }
            });
            let outcome = publish(&mut staging, &catalog, &resizer, request, Some(tx));
            printer.join().unwrap();

            match outcome? {
                PublishOutcome::Published { album_id } => {
                    println!("Album id: {}", album_id);
                }
                PublishOutcome::PublishedDegraded { album_id, warning } => {
                    println!("Album id: {}", album_id);
                    println!("Warning: {}", warning);
                }
            }
        }
        Command::List { show_hidden } => {
            let albums = catalog.list()?;
            output::print_feed(&albums, show_hidden);
        }
        Command::Show { album_id } => {
            let album = catalog.find_by_id(&album_id)?;
            output::print_album_detail(&album);
        }
        Command::Hide { album_id } => {
            catalog.set_hidden(&album_id, true)?;
            println!("Hidden {}", album_id);
        }
        Command::Unhide { album_id } => {
            catalog.set_hidden(&album_id, false)?;
            println!("Unhidden {}", album_id);
        }
        Command::Remove { album_id } => {
            catalog.remove(&album_id)?;
            println!("Removed {}", album_id);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Read media files from disk into ingestion blobs, guessing MIME types from
/// file extensions. The staging store does its own filtering; unknown types
/// pass through as `application/octet-stream` and are dropped there.
fn read_ingest_files(paths: &[PathBuf]) -> Result<Vec<IngestFile>, std::io::Error> {
    paths
        .iter()
        .map(|path| {
            let bytes = std::fs::read(path)?;
            let mime = mime_guess::from_path(path)
                .first_or_octet_stream()
                .essence_str()
                .to_string();
            let name = path
                .file_name()
                .map(|f| f.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            Ok(IngestFile { name, mime, bytes })
        })
        .collect()
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores — user can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
