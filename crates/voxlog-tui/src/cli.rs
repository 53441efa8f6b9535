//! One-shot command-line modes.
//!
//! `voxlog --upload <file>` is the smallest possible front-end over the same
//! core pipeline: read the stored token, send one request, print the result.
//! `--login` obtains and stores a token; `--history` lists past records.

use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use voxlog_core::api::{ApiClient, RedirectFlag};
use voxlog_core::auth::{KeyringTokenStore, Session, TokenStore};
use voxlog_core::config::Config;
use voxlog_core::models::Credentials;

use crate::utils::auth_error_message;
use crate::utils::format::{format_timestamp, preview};

fn pipeline() -> Result<(ApiClient, RedirectFlag, Arc<dyn TokenStore>)> {
    let store: Arc<dyn TokenStore> = Arc::new(KeyringTokenStore);
    let redirect = RedirectFlag::new();
    let api = ApiClient::new(Arc::clone(&store), Arc::new(redirect.clone()))?;
    Ok((api, redirect, store))
}

/// Exit with a login hint if the request tripped the forced-logout hook.
fn bail_if_logged_out(redirect: &RedirectFlag) -> Result<()> {
    if redirect.take() {
        anyhow::bail!("Session expired - run `voxlog --login` and try again");
    }
    Ok(())
}

pub async fn login() -> Result<()> {
    let mut config = Config::load().unwrap_or_default();

    let email = prompt_email(config.last_email.as_deref())?;
    let password = rpassword::prompt_password("Password: ")?;

    let (api, redirect, store) = pipeline()?;

    println!("Authenticating...");
    let payload = match api.login(&Credentials::new(email.clone(), password)).await {
        Ok(payload) => payload,
        Err(e) => {
            // A rejected login latches the redirect; in CLI mode there is
            // nowhere to redirect to, so just consume it.
            let _ = redirect.take();
            anyhow::bail!("Login failed: {}", auth_error_message(&e));
        }
    };

    let token = payload
        .token()
        .ok_or_else(|| anyhow::anyhow!("Login failed: token not received"))?;

    let mut session = Session::new(store);
    session.login(token.to_string());

    config.last_email = Some(email);
    let _ = config.save();

    println!("Login successful.");
    Ok(())
}

pub async fn upload(path: &str) -> Result<()> {
    let (api, redirect, _store) = pipeline()?;

    println!("Uploading {}...", path);
    match api.upload_audio(Path::new(path)).await {
        Ok(outcome) => {
            println!("\n--- Transcript ---");
            println!("{}", outcome.transcription);
            if !outcome.analysis.is_empty() {
                println!("\n--- Analysis ---");
                println!("{}", outcome.analysis);
            }
            if let Some(id) = outcome.record_id {
                println!("\nSaved as record {}", id);
            }
            Ok(())
        }
        Err(e) => {
            bail_if_logged_out(&redirect)?;
            anyhow::bail!("Upload failed: {}", e.user_message())
        }
    }
}

pub async fn history() -> Result<()> {
    let (api, redirect, _store) = pipeline()?;

    match api.history().await {
        Ok(entries) => {
            if entries.is_empty() {
                println!("No transcriptions yet.");
                return Ok(());
            }
            for entry in entries {
                println!(
                    "{:>6}  {:<34}  {}",
                    entry.id,
                    preview(&entry.original_file_name, 34),
                    format_timestamp(&entry.created_date)
                );
            }
            Ok(())
        }
        Err(e) => {
            bail_if_logged_out(&redirect)?;
            anyhow::bail!("History fetch failed: {}", e.user_message())
        }
    }
}

fn prompt_email(last: Option<&str>) -> Result<String> {
    match last {
        Some(last) => print!("Email [{}]: ", last),
        None => print!("Email: "),
    }
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let input = input.trim();

    if input.is_empty() {
        last.map(str::to_string)
            .ok_or_else(|| anyhow::anyhow!("Email required"))
    } else {
        Ok(input.to_string())
    }
}
