use std::sync::Arc;

use tracing::info;

use signage_auth::config::AuthConfig;
use signage_auth::domain::clock::{SharedClock, SystemClock};
use signage_auth::infra::db::{self, DbOtpRepository};
use signage_auth::infra::mail::{MailSettings, SmtpMailSender};
use signage_auth::infra::password::BcryptHasher;
use signage_auth::router::build_router;
use signage_auth::state::AppState;
use signage_auth::usecase::sweep::{PurgeStaleCodesUseCase, spawn_sweeper};
use signage_core::config::Config;
use signage_core::tracing::init_tracing;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = AuthConfig::from_env();

    let db = db::connect(&config.database_url, config.store_timeout())
        .await
        .expect("failed to connect to database");

    let mailer = SmtpMailSender::new(&MailSettings {
        host: config.smtp_host.clone(),
        port: config.smtp_port,
        secure: config.smtp_secure,
        username: config.smtp_user.clone(),
        password: config.smtp_pass.clone(),
        from: config.smtp_from.clone(),
        timeout: config.mail_timeout(),
    })
    .expect("invalid SMTP configuration");

    let clock: SharedClock = Arc::new(SystemClock);

    if let Some(period) = config.otp_sweep_interval() {
        spawn_sweeper(
            PurgeStaleCodesUseCase {
                otps: DbOtpRepository { db: db.clone() },
                clock: clock.clone(),
            },
            period,
        );
    }

    let state = AppState {
        db,
        jwt_secret: config.jwt_secret.clone(),
        secure_cookies: config.is_production(),
        mailer,
        hasher: BcryptHasher {
            cost: config.bcrypt_cost,
        },
        clock,
        request_timeout: config.request_timeout(),
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.auth_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!(%addr, production = config.is_production(), "auth service listening");
    axum::serve(listener, router).await.expect("server error");
}
