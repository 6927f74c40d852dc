use std::sync::Arc;

use anyhow::Context;
use reminder_dashboard::{
    api::HttpDashboardApi,
    appsettings::AppSettings,
    dashboard::Dashboard,
    list::ListEntry,
    models::{ExportKind, GuildId},
};

fn print_session(dashboard: &Dashboard) {
    let Some(session) = dashboard.session() else {
        return;
    };

    for entry in session.reminders.entries() {
        match entry {
            ListEntry::Separator(separator) => println!("# {}", separator.label),
            ListEntry::Reminder(row) => {
                let form = &row.form;
                println!(
                    "  [{}] {} at {} (every {}) {}",
                    form.toggle_label(),
                    form.name,
                    form.time,
                    form.interval,
                    form.uid
                );
            }
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    pretty_env_logger::init();

    let settings = AppSettings::new().context("Failed to load appsettings")?;
    let cookie = settings.api.session_cookie.as_deref();
    let api = HttpDashboardApi::new(&settings.api.base_url, cookie)?;
    let mut dashboard = Dashboard::new(Arc::new(api), settings.dashboard_config()?);

    let user = dashboard.load_user().await?;
    log::info!("Dashboard ready for {}", user.name);

    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        None => {
            for guild in dashboard.load_guilds().await? {
                println!("{}\t{}", guild.id, guild.name);
            }
        }
        Some("personal") => {
            dashboard.load_personal_reminders().await?;
            print_session(&dashboard);
        }
        Some(guild) => {
            let guild: GuildId = guild.parse().context("Guild id must be a number")?;
            dashboard.load_guilds().await?;
            dashboard.switch_guild(guild).await?;

            match args.next() {
                Some(kind) => {
                    let kind: ExportKind = kind.parse().map_err(anyhow::Error::msg)?;
                    print!("{}", dashboard.export(kind).await?);
                }
                None => print_session(&dashboard),
            }
        }
    }

    Ok(())
}
