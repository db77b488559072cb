use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use pixel_pantry::gallery::url::api_url;
use pixel_pantry::gallery::{Artwork, GalleryClient};
use pixel_pantry::runtime::Runtime;
use pixel_pantry::{script, App, ClientConfig, BASE_URL_ENV};
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "pixel-pantry", version, about = "Tiny pixel editor & gallery")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct Remote {
    /// Store base URL
    #[arg(long, env = BASE_URL_ENV, default_value = "http://127.0.0.1:8000")]
    base: String,

    /// Request timeout in milliseconds
    #[arg(long, default_value_t = 30000)]
    timeout_ms: u64,
}

impl Remote {
    fn client(&self) -> Result<GalleryClient> {
        let cfg = ClientConfig {
            base_url: self.base.clone(),
            timeout_ms: self.timeout_ms,
            ..Default::default()
        };
        GalleryClient::new(cfg).context("building gallery client")
    }
}

#[derive(Subcommand)]
enum Command {
    /// Run the artwork store
    Serve {
        #[arg(long, default_value = "127.0.0.1:8000")]
        bind: String,
        #[arg(long, default_value = "pixel-data")]
        data_dir: PathBuf,
        /// Page size when a list request has no limit
        #[arg(long, default_value_t = 100)]
        default_limit: u32,
    },
    /// Print the gallery, newest first
    List {
        #[command(flatten)]
        remote: Remote,
    },
    /// Delete one artwork
    Delete {
        id: i64,
        #[command(flatten)]
        remote: Remote,
    },
    /// Download one artwork's PNG
    Fetch {
        id: i64,
        /// Output file (defaults to the stored filename, else art-ID.png)
        #[arg(long)]
        out: Option<PathBuf>,
        #[command(flatten)]
        remote: Remote,
    },
    /// Replay a drawing script (stdin when no file is given)
    Run {
        script: Option<PathBuf>,
        /// Where `download` writes PNGs
        #[arg(long, default_value = ".")]
        downloads: PathBuf,
        #[command(flatten)]
        remote: Remote,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Serve { bind, data_dir, default_limit } => {
            let config = pixel_pantry::store::StoreConfig { bind, data_dir, default_limit };
            let rt = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .context("starting tokio runtime")?;
            rt.block_on(pixel_pantry::store::serve(config)).context("store server failed")?;
        }
        Command::List { remote } => {
            let items = remote.client()?.list()?;
            if items.is_empty() {
                println!("No artworks yet.");
            }
            let mut out = io::stdout().lock();
            for a in &items {
                print_artwork(&mut out, a)?;
            }
        }
        Command::Delete { id, remote } => {
            remote.client()?.delete(id)?;
            println!("Deleted #{}", id);
        }
        Command::Fetch { id, out, remote } => {
            let client = remote.client()?;
            let bytes = client.fetch_url(&api_url(client.base_url(), &format!("/art/{}", id)))?;
            let path = match out {
                Some(p) => p,
                None => {
                    // stored filename when the record is listed
                    let items = client.list().unwrap_or_else(|e| {
                        log::warn!("could not list artworks for a filename: {}", e);
                        Vec::new()
                    });
                    default_fetch_path(&items, id)
                }
            };
            std::fs::write(&path, bytes).with_context(|| format!("writing {}", path.display()))?;
            println!("Wrote {}", path.display());
        }
        Command::Run { script: path, downloads, remote } => {
            let mut rt = Runtime::new(remote.client()?, downloads);
            let mut app = App::new();
            let mut out = io::stdout().lock();
            match path {
                Some(p) => {
                    let f = File::open(&p).with_context(|| format!("opening {}", p.display()))?;
                    script::run(BufReader::new(f), &mut app, &mut rt, &mut out)?;
                }
                None => script::run(io::stdin().lock(), &mut app, &mut rt, &mut out)?,
            }
        }
    }
    Ok(())
}

fn default_fetch_path(items: &[Artwork], id: i64) -> PathBuf {
    items
        .iter()
        .find(|a| a.id == id)
        .and_then(|a| Path::new(&a.filename).file_name().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(format!("art-{}.png", id)))
}

fn print_artwork<W: Write>(out: &mut W, a: &Artwork) -> io::Result<()> {
    writeln!(out, "#{:<5} {:>2}x{:<2}  {}  {}", a.id, a.width, a.height, a.created_at, a.url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn art(id: i64, filename: &str) -> Artwork {
        Artwork {
            id,
            filename: filename.to_string(),
            width: 16,
            height: 16,
            created_at: "2024-05-01T10:00:00".into(),
            url: format!("/api/art/{}", id),
        }
    }

    #[test]
    fn fetch_uses_stored_filename() {
        let items = [art(3, "art_1714557600000.png"), art(4, ""), art(5, "../../etc/x.png")];
        assert_eq!(default_fetch_path(&items, 3), PathBuf::from("art_1714557600000.png"));
        assert_eq!(default_fetch_path(&items, 4), PathBuf::from("art-4.png"));
        assert_eq!(default_fetch_path(&items, 5), PathBuf::from("x.png"));
        assert_eq!(default_fetch_path(&items, 9), PathBuf::from("art-9.png"));
    }
}
