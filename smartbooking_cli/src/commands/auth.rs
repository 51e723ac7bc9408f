use std::io::ErrorKind;

use anyhow::{bail, Context, Result};
use clap::Args;
use smartbooking_lib::{decode_identity_claims, Client, Session, Settings};

use crate::output::{print_identity, OutputFormat};

#[derive(Args)]
pub struct LoginArgs {
    /// Account user name
    #[arg(long, short)]
    pub username: String,

    /// Password (falls back to SMARTBOOKING_PASSWORD)
    #[arg(long, short, env = "SMARTBOOKING_PASSWORD", hide_env_values = true)]
    pub password: String,
}

/// Session seeded from SMARTBOOKING_TOKEN, or from the token file left by `login`.
pub fn load_session(settings: &Settings) -> Result<Session> {
    if let Some(token) = &settings.token {
        return Ok(Session::with_token(token));
    }
    match std::fs::read_to_string(&settings.token_file) {
        Ok(token) if !token.trim().is_empty() => Ok(Session::with_token(token.trim())),
        Ok(_) => Ok(Session::new()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(Session::new()),
        Err(e) => Err(e).with_context(|| {
            format!("reading token file {}", settings.token_file.display())
        }),
    }
}

/// Client for commands that need a signed-in session.
pub fn authenticated_client(settings: &Settings) -> Result<Client> {
    let session = load_session(settings)?;
    if !session.is_authenticated() {
        bail!("not signed in; run `smartbooking login` first");
    }
    Ok(Client::with_timeout(&settings.api_url, session, settings.timeout)?)
}

pub async fn login(args: &LoginArgs, settings: &Settings) -> Result<()> {
    let client = Client::with_timeout(&settings.api_url, Session::new(), settings.timeout)?;
    let resp = client.login(&args.username, &args.password).await?;

    std::fs::write(&settings.token_file, &resp.token).with_context(|| {
        format!("writing token file {}", settings.token_file.display())
    })?;

    match resp.expires_at() {
        Some(at) => eprintln!("Signed in as {} (token expires {})", args.username, at),
        None => eprintln!("Signed in as {}", args.username),
    }
    Ok(())
}

pub fn logout(settings: &Settings) -> Result<()> {
    match std::fs::remove_file(&settings.token_file) {
        Ok(()) => eprintln!("Signed out"),
        Err(e) if e.kind() == ErrorKind::NotFound => eprintln!("Not signed in"),
        Err(e) => {
            return Err(e).with_context(|| {
                format!("removing token file {}", settings.token_file.display())
            })
        }
    }
    Ok(())
}

pub fn whoami(settings: &Settings, format: &OutputFormat) -> Result<()> {
    let session = load_session(settings)?;
    let Some(token) = session.token() else {
        bail!("not signed in; run `smartbooking login` first");
    };
    let identity = decode_identity_claims(&token)?;
    print_identity(&identity, format);
    Ok(())
}
