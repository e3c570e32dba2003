use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use flipbook_core::{
    DocumentSource, FlipbookRecord, ImageFormat, PageImage, ShareLink, ViewerOptions,
};
use flipbook_render::{
    PdfiumBackend, RenderPreset, RenderSettings, Renderer, load_document, open_bytes, probe,
    read_source,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

mod logger;
mod script;
mod view;

use logger::CliLogger;

const LOG_CAPACITY: usize = 500;

#[derive(Parser)]
#[command(name = "flipbook", about = "PDF flipbook viewer tools", version)]
struct Cli {
    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Don't echo log messages to stderr
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Viewer options JSON file; flags override it
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory containing the pdfium library
    #[arg(long, global = true)]
    pdfium_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show page count, version and title of a PDF
    Info {
        /// PDF file or http(s) URL
        source: String,

        /// Print the flipbook record as JSON
        #[arg(long)]
        json: bool,
    },

    /// Render pages to image files
    Render {
        /// PDF file or http(s) URL
        source: String,

        /// Output directory
        #[arg(short, long)]
        out: PathBuf,

        /// Pages to render, e.g. "3" or "2-5" (default: all)
        #[arg(long)]
        pages: Option<String>,

        /// Render scale
        #[arg(long)]
        scale: Option<f32>,

        /// JPEG quality (1-100)
        #[arg(long)]
        quality: Option<u8>,

        /// Output image format
        #[arg(long, default_value = "jpeg", value_enum)]
        format: FormatArg,
    },

    /// Render the thumbnail strip
    Thumbnails {
        /// PDF file or http(s) URL
        source: String,

        /// Output directory
        #[arg(short, long)]
        out: PathBuf,

        /// Thumbnail scale
        #[arg(long)]
        scale: Option<f32>,
    },

    /// Build or inspect share links
    Link {
        #[command(subcommand)]
        command: LinkCommand,
    },

    /// Drive a viewing session headlessly and print what the viewer emits
    View {
        /// PDF file or http(s) URL
        source: String,

        /// Comma separated steps: next, prev, first, last, goto:N, drag:DX,
        /// key:NAME, thumbs, wait:MS
        #[arg(long, default_value = "")]
        script: String,
    },
}

#[derive(Subcommand)]
enum LinkCommand {
    /// Link to a stored flipbook
    Stored {
        id: String,

        /// Viewer base URL
        #[arg(long)]
        base: Option<String>,
    },

    /// Link that opens a publicly reachable PDF
    Remote {
        url: String,

        /// Title shown instead of the file name
        #[arg(long)]
        title: Option<String>,

        /// Viewer base URL
        #[arg(long)]
        base: Option<String>,
    },

    /// Decode a link fragment
    Parse { fragment: String },
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Jpeg,
    Png,
}

impl From<FormatArg> for ImageFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Jpeg => Self::Jpeg,
            FormatArg::Png => Self::Png,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let logger = CliLogger::new(LOG_CAPACITY, CliLogger::level_for_verbosity(cli.verbose))
        .with_mirror(!cli.quiet);
    logger.clone().init()?;

    let options = match &cli.config {
        Some(path) => ViewerOptions::load(path)
            .await
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ViewerOptions::default(),
    };

    let backend = pdfium_backend(cli.pdfium_dir.as_deref());

    match cli.command {
        Commands::Info { source, json } => {
            let source = DocumentSource::from_arg(&source);
            let name = source.display_name();
            let data = read_source(source).await?;

            let (page_count, title, version) = match probe(&data) {
                Ok(info) => (info.page_count, info.title, Some(info.version)),
                Err(e) => {
                    log::warn!("lopdf could not parse the document ({}), asking pdfium", e);
                    let handle = open_bytes(name.clone(), data, backend).await?;
                    (handle.page_count, handle.title, None)
                }
            };

            let record = FlipbookRecord::new(title.unwrap_or(name), page_count);
            if json {
                println!("{}", serde_json::to_string_pretty(&record)?);
            } else {
                println!("Name:    {}", record.name);
                println!("Pages:   {}", record.total_pages);
                if let Some(version) = version {
                    println!("Version: {}", version);
                }
            }
        }

        Commands::Render {
            source,
            out,
            pages,
            scale,
            quality,
            format,
        } => {
            let mut options = options;
            if let Some(scale) = scale {
                options.view_scale = scale;
            }
            if let Some(quality) = quality {
                options.jpeg_quality = quality;
            }
            options.validate()?;

            let settings = RenderSettings {
                format: format.into(),
                ..RenderSettings::from(&options)
            };
            let renderer = Renderer::with_settings(backend, settings);
            let handle =
                load_document(DocumentSource::from_arg(&source), renderer.backend()).await?;

            let range = match pages {
                Some(text) => script::parse_page_range(&text, handle.page_count)?,
                None => 1..=handle.page_count,
            };

            tokio::fs::create_dir_all(&out).await?;
            let mut written = 0;
            for page in range {
                let image = renderer.render(&handle, page, RenderPreset::View).await?;
                write_image(&out, "page", &image).await?;
                written += 1;
            }
            println!(
                "Rendered {} page(s) of '{}' → {}",
                written,
                handle.display_title(),
                out.display()
            );
        }

        Commands::Thumbnails { source, out, scale } => {
            let mut options = options;
            if let Some(scale) = scale {
                options.thumbnail_scale = scale;
            }
            options.validate()?;

            let renderer = Renderer::with_settings(backend, RenderSettings::from(&options));
            let handle =
                load_document(DocumentSource::from_arg(&source), renderer.backend()).await?;

            tokio::fs::create_dir_all(&out).await?;
            for page in 1..=handle.page_count {
                let image = renderer
                    .render(&handle, page, RenderPreset::Thumbnail)
                    .await?;
                write_image(&out, "thumb", &image).await?;
            }
            println!(
                "Rendered {} thumbnail(s) → {}",
                handle.page_count,
                out.display()
            );
        }

        Commands::Link { command } => match command {
            LinkCommand::Stored { id, base } => {
                print_link(&ShareLink::Stored { id }, base.as_deref());
            }
            LinkCommand::Remote { url, title, base } => {
                let link = ShareLink::Remote {
                    pdf_url: url,
                    title,
                };
                print_link(&link, base.as_deref());
            }
            LinkCommand::Parse { fragment } => match ShareLink::parse(&fragment)? {
                ShareLink::Stored { id } => println!("Stored flipbook: {}", id),
                ShareLink::Remote { pdf_url, title } => {
                    println!("PDF:   {}", pdf_url);
                    if let Some(title) = title {
                        println!("Title: {}", title);
                    }
                }
            },
        },

        Commands::View { source, script } => {
            let steps = script::parse_script(&script)?;
            options.validate()?;
            let renderer = Renderer::with_settings(backend, RenderSettings::from(&options));

            let status = view::run(renderer, options, DocumentSource::from_arg(&source), steps)
                .await?;
            println!(
                "Finished on page {} of {} ({} pages cached)",
                status.current_page,
                status.total_pages,
                status.cached_pages.len()
            );

            let warnings = logger.warnings();
            if !warnings.is_empty() {
                println!("{} warning(s) during the session:", warnings.len());
                for entry in warnings {
                    println!(
                        "  {} {}",
                        entry.timestamp.format("%H:%M:%S"),
                        entry.message
                    );
                }
            }
        }
    }

    Ok(())
}

fn pdfium_backend(library_dir: Option<&Path>) -> Arc<PdfiumBackend> {
    Arc::new(match library_dir {
        Some(dir) => PdfiumBackend::with_library_dir(dir),
        None => PdfiumBackend::new(),
    })
}

async fn write_image(dir: &Path, prefix: &str, image: &PageImage) -> Result<()> {
    let path = dir.join(format!(
        "{}-{:03}.{}",
        prefix,
        image.page,
        image.format.extension()
    ));
    tokio::fs::write(&path, &image.data)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;
    log::info!("Wrote {}", path.display());
    Ok(())
}

fn print_link(link: &ShareLink, base: Option<&str>) {
    match base {
        Some(base) => println!("{}", link.viewer_url(base)),
        None => println!("{}", link.to_fragment()),
    }
}
