use crm_sync::{Config, jobs::sync_photo, telemetry};
use mimalloc::MiMalloc;
use std::process::ExitCode;
use tracing::{error, info};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cfg = Config::load();
    telemetry::init(cfg.as_ref().map(|c| c.loglevel.as_str()).unwrap_or("info"));
    let cfg = match cfg {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(error = %e, "failed to load configuration");
            return ExitCode::FAILURE;
        }
    };

    info!(
        token_url = %cfg.token_url,
        instance_url = %cfg.instance_url,
        api_version = %cfg.api_version,
        corp_domain = %cfg.corp_domain,
        proxy = %cfg.proxy.as_ref().map(|u| u.as_str()).unwrap_or("<none>"),
        "sync-photo starting"
    );

    match sync_photo::run(&cfg).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, kind = ?e.kind(), "sync-photo aborted");
            ExitCode::FAILURE
        }
    }
}
