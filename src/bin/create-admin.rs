//! Provisions the admin account. Admins are never created through the API;
//! run this against the target database instead.

use std::env;

use anyhow::Context;
use mongodb::{Client, bson::doc, options::ClientOptions};

use futebolada_back::{
    config::AppConfig,
    dao::models::{Role, UserEntity},
    services::auth_service,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().init();

    let uri = env::var("MONGO_URI").unwrap_or_else(|_| "mongodb://localhost:27017".into());
    let db_name = env::var("MONGO_DB").unwrap_or_else(|_| "futebolada".into());
    let email = env::var("ADMIN_EMAIL").context("ADMIN_EMAIL must be set")?;
    let password = env::var("ADMIN_PASSWORD").context("ADMIN_PASSWORD must be set")?;

    let options = ClientOptions::parse(&uri)
        .await
        .context("parsing MONGO_URI")?;
    let client = Client::with_options(options).context("building MongoDB client")?;
    let users = client.database(&db_name).collection::<UserEntity>("users");

    let hashed_password = auth_service::hash_password(&AppConfig::load(), &password)?;
    let user = UserEntity {
        email: email.trim().to_ascii_lowercase(),
        hashed_password,
        role: Role::Admin,
    };

    // Re-running the tool rotates the credentials of an existing admin.
    users
        .delete_many(doc! { "email": &user.email })
        .await
        .context("removing previous admin account")?;
    users
        .insert_one(&user)
        .await
        .context("inserting admin account")?;

    println!("admin account `{}` is ready", user.email);
    Ok(())
}
