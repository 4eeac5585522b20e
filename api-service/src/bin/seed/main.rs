use std::sync::Arc;

use api_service::config::Config;
use api_service::domain::user::models::CreateUserCommand;
use api_service::domain::user::models::EmailAddress;
use api_service::domain::user::models::Password;
use api_service::domain::user::models::Username;
use api_service::domain::user::ports::UserServicePort;
use api_service::domain::user::service::UserService;
use api_service::outbound::repositories::PostgresUserRepository;
use api_service::user::errors::UserError;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

struct SeedUser {
    email: &'static str,
    username: &'static str,
    full_name: &'static str,
    password: &'static str,
}

const SEED_USERS: &[SeedUser] = &[
    SeedUser {
        email: "demo@site.test",
        username: "demo",
        full_name: "Demo User",
        password: "Secret123",
    },
    SeedUser {
        email: "admin@site.test",
        username: "admin",
        full_name: "Admin User",
        password: "Admin123",
    },
];

/// Create the demo and admin accounts, reactivating them if deactivated.
#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api_service=info,seed=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;

    let pg_pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&config.database.url)
        .await?;
    sqlx::migrate!("./migrations").run(&pg_pool).await?;

    let user_service = UserService::new(
        Arc::new(PostgresUserRepository::new(pg_pool)),
        Arc::new(config.authenticator()?),
    );

    for seed in SEED_USERS {
        match user_service.get_user_by_email(seed.email).await {
            Ok(user) if user.is_active => {
                tracing::info!(email = seed.email, "Seed user already exists");
                continue;
            }
            Ok(user) => {
                user_service.activate_user(&user.id).await?;
                tracing::info!(user_id = %user.id, email = seed.email, "Seed user reactivated");
                continue;
            }
            Err(UserError::NotFoundByEmail(_)) => {}
            Err(e) => return Err(e.into()),
        }

        let command = CreateUserCommand::new(
            EmailAddress::new(seed.email.to_string())?,
            Username::new(seed.username.to_string())?,
            Some(seed.full_name.to_string()),
            Password::new(seed.password.to_string())?,
        );
        let user = user_service.create_user(command).await?;
        tracing::info!(user_id = %user.id, email = seed.email, "Seed user created");
    }

    tracing::info!("Database seeded");
    Ok(())
}
