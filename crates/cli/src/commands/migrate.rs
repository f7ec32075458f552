//! Database migration command.
//!
//! Both binaries share one database; the schema is owned by the admin
//! crate, whose embedded migrations run here.
//!
//! ```bash
//! auric migrate
//! ```

use super::{CliError, connect};

/// Apply all pending migrations.
pub async fn run() -> Result<(), CliError> {
    let pool = connect().await?;

    tracing::info!("Running migrations...");
    auric_admin::db::migrator().run(&pool).await?;

    tracing::info!("Migrations complete");
    Ok(())
}
