use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use lettings_site::db;
use lettings_site::diag::TracingDiag;
use lettings_site::observe::{ObserverSet, TracingObserver};
use lettings_site::{backfill, fixture, legacy, lettings, profiles, seed};

#[derive(Parser)]
#[command(version, about = "Lettings Site CLI")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Database housekeeping.
    Db(DbCmd),
    /// Legacy-schema upgrade steps.
    Legacy(LegacyCmd),
    /// Install demo data from a fixture file.
    Seed {
        #[arg(long, value_name = "FILE")]
        file: String,
        #[arg(long)]
        force: bool,
    },
}

#[derive(Args)]
struct DbCmd {
    #[command(subcommand)]
    sub: DbSub,
}

#[derive(Subcommand)]
enum DbSub {
    /// Apply pending embedded migrations.
    Migrate,
}

#[derive(Args)]
struct LegacyCmd {
    #[command(subcommand)]
    sub: LegacySub,
}

#[derive(Subcommand)]
enum LegacySub {
    /// Copy legacy rows into the per-domain tables.
    Copy,
    /// Drop the legacy tables. Only after a successful copy.
    Drop,
}

fn observers() -> ObserverSet {
    let mut set = ObserverSet::new();
    set.register(Box::new(TracingObserver));
    set
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let db_url = site_config::database_url()?;

    match cli.cmd {
        Cmd::Db(DbCmd { sub: DbSub::Migrate }) => {
            db::migrate::run(&db_url)?;
        }
        Cmd::Legacy(LegacyCmd { sub }) => {
            let mut conn = db::connection::connect_sqlite(&db_url)?;
            match sub {
                LegacySub::Copy => {
                    let lettings_repo = lettings::SqliteRepo::new(observers());
                    let profiles_repo = profiles::SqliteRepo::new(observers());
                    backfill::run_backfill(
                        &mut conn,
                        &lettings_repo,
                        &profiles_repo,
                        &TracingDiag,
                    )?;
                }
                LegacySub::Drop => {
                    legacy::drop_legacy_tables(&mut conn)?;
                }
            }
        }
        Cmd::Seed { file, force } => {
            let fixture = fixture::load_fixture_path(&file)?;
            let mut conn = db::connection::connect_sqlite(&db_url)?;
            let lettings_repo = lettings::SqliteRepo::new(observers());
            let profiles_repo = profiles::SqliteRepo::new(observers());
            seed::seed_site(
                &mut conn,
                &fixture,
                seed::SeedOptions { force },
                &lettings_repo,
                &profiles_repo,
                &TracingDiag,
            )?;
        }
    }

    Ok(())
}
