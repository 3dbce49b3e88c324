use clap::Subcommand;
use lifeline_core::error::{CoreError, Result};
use lifeline_core::storage::{load_user, save_user, Database};
use lifeline_core::{Contact, User};

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Register the user profile (overwrites any existing profile)
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        age: String,
        #[arg(long)]
        address: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        gender: String,
    },
    /// Print the stored profile as JSON
    Show,
    /// Append an emergency contact (maximum 5)
    AddContact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        relationship: String,
    },
    /// Remove the contact at the given position
    RemoveContact {
        index: usize,
    },
    /// List emergency contacts in priority order
    Contacts,
}

pub fn run(action: ProfileAction) -> Result<()> {
    let db = Database::open()?;

    match action {
        ProfileAction::Register {
            name,
            age,
            address,
            phone,
            gender,
        } => {
            let user = User::new(name, age, address, phone, gender);
            save_user(&db, &user)?;
            println!("Profile registered for {}", user.name);
        }
        ProfileAction::Show => match load_user(&db)? {
            Some(user) => println!("{}", serde_json::to_string_pretty(&user)?),
            None => println!("No profile registered."),
        },
        ProfileAction::AddContact {
            name,
            phone,
            relationship,
        } => {
            let mut user = load_user(&db)?
                .ok_or_else(|| CoreError::custom("no profile registered; run `profile register` first"))?;
            user.add_contact(Contact {
                name,
                phone,
                relationship,
            })?;
            save_user(&db, &user)?;
            println!("Contact added ({} total)", user.contacts.len());
        }
        ProfileAction::RemoveContact { index } => {
            let mut user = load_user(&db)?.ok_or_else(|| CoreError::custom("no profile registered"))?;
            let removed = user.remove_contact(index)?;
            save_user(&db, &user)?;
            println!("Removed {} ({})", removed.name, removed.phone);
        }
        ProfileAction::Contacts => {
            let user = load_user(&db)?.ok_or_else(|| CoreError::custom("no profile registered"))?;
            if user.contacts.is_empty() {
                println!("No emergency contacts configured.");
            }
            for (i, contact) in user.contacts.iter().enumerate() {
                let marker = if i == 0 { " (priority)" } else { "" };
                println!(
                    "{i}: {} <{}> {}{marker}",
                    contact.name, contact.phone, contact.relationship
                );
            }
        }
    }
    Ok(())
}
