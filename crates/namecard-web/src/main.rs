//! `server`: the namecard HTTP binary.
//!
//! Settings come from three layers, later ones winning: built-in defaults,
//! the TOML file given by `--config`, then `NAMECARD_*` environment
//! variables. The binary serves `/u/{slug}` profile pages, their vCard and QR
//! downloads, uploaded avatars and the authenticated `/api` surface.
//!
//! The admin password is stored as an argon2 PHC string. Produce one with:
//!
//! ```text
//! cargo run -p namecard-web --bin server -- --hash-password
//! ```

use std::{
  io::{BufRead as _, Write as _},
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use argon2::{Argon2, PasswordHasher, password_hash::SaltString};
use clap::Parser;
use namecard_store_sqlite::SqliteStore;
use namecard_web::{
  AppState, ServerConfig, auth::AuthConfig, avatars::FsObjectStore,
};
use rand_core::OsRng;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

const ENV_PREFIX: &str = "NAMECARD";

#[derive(Parser)]
#[command(author, version, about = "Serve namecard profiles and the admin API")]
struct Cli {
  /// TOML settings file; missing is fine, defaults and env still apply.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Prompt for the admin password, print its argon2 hash and exit.
  #[arg(long)]
  hash_password: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  if cli.hash_password {
    return print_password_hash();
  }

  let cfg = load_config(cli.config)?;

  tokio::fs::create_dir_all(&cfg.avatar_dir)
    .await
    .with_context(|| format!("cannot create avatar dir {:?}", cfg.avatar_dir))?;
  let store = SqliteStore::open(&cfg.store_path)
    .await
    .with_context(|| format!("cannot open contact db {:?}", cfg.store_path))?;
  let objects = FsObjectStore::new(cfg.avatar_dir.clone(), &cfg.avatar_base_url());

  let state = AppState {
    store:   Arc::new(store),
    objects: Arc::new(objects),
    auth:    Arc::new(AuthConfig {
      username:      cfg.auth_username.clone(),
      password_hash: cfg.auth_password_hash.clone(),
    }),
    config:  Arc::new(cfg.clone()),
  };

  let address = format!("{}:{}", cfg.host, cfg.port);
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("cannot bind {address}"))?;
  tracing::info!(
    %address,
    base_url = %cfg.base_url,
    db = ?cfg.store_path,
    "namecard server up"
  );

  axum::serve(listener, namecard_web::router(state))
    .await
    .context("server stopped")
}

/// Layer defaults, the settings file and the environment into a
/// [`ServerConfig`], with `~` resolved in both filesystem paths.
fn load_config(file: PathBuf) -> anyhow::Result<ServerConfig> {
  let mut cfg: ServerConfig = config::Config::builder()
    .set_default("host", "127.0.0.1")?
    .set_default("port", 8080)?
    .set_default("store_path", "namecard.db")?
    .set_default("avatar_dir", "avatars")?
    .add_source(config::File::from(file).required(false))
    .add_source(config::Environment::with_prefix(ENV_PREFIX))
    .build()
    .context("cannot assemble settings")?
    .try_deserialize()
    .context("invalid settings")?;

  let home = std::env::var_os("HOME").map(PathBuf::from);
  cfg.store_path = under_home(&cfg.store_path, home.as_deref());
  cfg.avatar_dir = under_home(&cfg.avatar_dir, home.as_deref());
  Ok(cfg)
}

/// `~/x` becomes `$HOME/x`; anything else, or no known home, is unchanged.
fn under_home(path: &Path, home: Option<&Path>) -> PathBuf {
  match (path.strip_prefix("~"), home) {
    (Ok(rest), Some(home)) => home.join(rest),
    _ => path.to_path_buf(),
  }
}

fn print_password_hash() -> anyhow::Result<()> {
  eprint!("Admin password: ");
  std::io::stderr().flush().ok();

  let mut line = String::new();
  std::io::stdin().lock().read_line(&mut line)?;
  let password = line.trim_end_matches(['\r', '\n']);
  anyhow::ensure!(!password.is_empty(), "empty password");

  let salt = SaltString::generate(&mut OsRng);
  let phc = Argon2::default()
    .hash_password(password.as_bytes(), &salt)
    .map_err(|e| anyhow::anyhow!("argon2: {e}"))?;
  println!("{phc}");
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn tilde_paths_resolve_against_home() {
    let home = Path::new("/home/op");
    assert_eq!(
      under_home(Path::new("~/cards/namecard.db"), Some(home)),
      PathBuf::from("/home/op/cards/namecard.db")
    );
    assert_eq!(under_home(Path::new("~"), Some(home)), PathBuf::from("/home/op"));
  }

  #[test]
  fn other_paths_are_untouched() {
    let home = Path::new("/home/op");
    assert_eq!(
      under_home(Path::new("/var/lib/namecard.db"), Some(home)),
      PathBuf::from("/var/lib/namecard.db")
    );
    assert_eq!(
      under_home(Path::new("~other/avatars"), Some(home)),
      PathBuf::from("~other/avatars")
    );
    assert_eq!(
      under_home(Path::new("~/avatars"), None),
      PathBuf::from("~/avatars")
    );
  }
}
