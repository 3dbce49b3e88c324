use clap::Subcommand;
use lifeline_core::error::{CoreError, Result};
use lifeline_core::storage::{load_user, save_user, Database};
use lifeline_core::DirectoryClient;

#[derive(Subcommand)]
pub enum DirectoryAction {
    /// Push the profile and contact list to the directory
    Sync {
        /// Directory base URL (or LIFELINE_DIRECTORY_URL)
        #[arg(long)]
        url: Option<String>,
    },
    /// Request a phone verification code
    RequestCode {
        #[arg(long)]
        url: Option<String>,
    },
    /// Verify a code and mark the profile verified
    Verify {
        code: String,
        #[arg(long)]
        url: Option<String>,
    },
}

fn base_url(arg: Option<String>) -> Result<String> {
    match arg.or_else(|| std::env::var("LIFELINE_DIRECTORY_URL").ok()) {
        Some(url) => Ok(url),
        None => Err(CoreError::custom(
            "no directory URL; pass --url or set LIFELINE_DIRECTORY_URL",
        )),
    }
}

pub fn run(action: DirectoryAction) -> Result<()> {
    let db = Database::open()?;
    let runtime = tokio::runtime::Runtime::new()?;

    match action {
        DirectoryAction::Sync { url } => {
            let user = load_user(&db)?.ok_or_else(|| CoreError::custom("no profile registered"))?;
            let client = DirectoryClient::new(base_url(url)?);
            runtime.block_on(client.sync_user(&user))?;
            println!("Synced {} and {} contact(s)", user.name, user.contacts.len());
        }
        DirectoryAction::RequestCode { url } => {
            let user = load_user(&db)?.ok_or_else(|| CoreError::custom("no profile registered"))?;
            let client = DirectoryClient::new(base_url(url)?);
            let code = runtime.block_on(client.request_code(&user.phone))?;
            println!("Verification code for {}: {code}", user.phone);
        }
        DirectoryAction::Verify { code, url } => {
            let mut user = load_user(&db)?.ok_or_else(|| CoreError::custom("no profile registered"))?;
            let client = DirectoryClient::new(base_url(url)?);
            if runtime.block_on(client.verify_code(&user.phone, &code))? {
                user.verified = true;
                save_user(&db, &user)?;
                println!("Phone verified.");
            } else {
                println!("Code rejected.");
                std::process::exit(1);
            }
        }
    }
    Ok(())
}
