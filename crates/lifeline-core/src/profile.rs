//! User profile and emergency contact models.

use serde::{Deserialize, Serialize};

use crate::error::ProfileError;

/// Upper bound on the emergency contact list.
pub const MAX_CONTACTS: usize = 5;

/// One emergency contact.
///
/// Contacts are identified by position in the list, not by content;
/// duplicate entries are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    /// Raw user-entered phone number. Normalized only at dispatch time.
    pub phone: String,
    pub relationship: String,
}

/// The registered user.
///
/// Created once during onboarding and mutated by contact-list edits.
/// The contact-list cap is enforced here, not by deserialization --
/// a stored profile is trusted as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub age: String,
    pub address: String,
    pub phone: String,
    pub gender: String,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub contacts: Vec<Contact>,
}

impl User {
    pub fn new(
        name: impl Into<String>,
        age: impl Into<String>,
        address: impl Into<String>,
        phone: impl Into<String>,
        gender: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            age: age.into(),
            address: address.into(),
            phone: phone.into(),
            gender: gender.into(),
            verified: false,
            contacts: Vec::new(),
        }
    }

    /// Append an emergency contact, enforcing the list cap.
    pub fn add_contact(&mut self, contact: Contact) -> Result<(), ProfileError> {
        if self.contacts.len() >= MAX_CONTACTS {
            return Err(ProfileError::ContactLimitReached { max: MAX_CONTACTS });
        }
        self.contacts.push(contact);
        Ok(())
    }

    /// Remove the contact at `index`, preserving the order of the rest.
    pub fn remove_contact(&mut self, index: usize) -> Result<Contact, ProfileError> {
        if index >= self.contacts.len() {
            return Err(ProfileError::ContactOutOfBounds {
                index,
                len: self.contacts.len(),
            });
        }
        Ok(self.contacts.remove(index))
    }

    /// The priority contact is always the first entry.
    pub fn priority_contact(&self) -> Option<&Contact> {
        self.contacts.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(name: &str) -> Contact {
        Contact {
            name: name.to_string(),
            phone: "+1-555-0100".to_string(),
            relationship: "Friend".to_string(),
        }
    }

    #[test]
    fn contact_limit_enforced() {
        let mut user = User::new("Ana", "30", "1 Main St", "+1-555-0000", "female");
        for i in 0..MAX_CONTACTS {
            user.add_contact(contact(&format!("c{i}"))).unwrap();
        }
        let err = user.add_contact(contact("overflow")).unwrap_err();
        assert!(matches!(err, ProfileError::ContactLimitReached { max: 5 }));
        assert_eq!(user.contacts.len(), MAX_CONTACTS);
    }

    #[test]
    fn duplicates_are_allowed() {
        let mut user = User::new("Ana", "30", "1 Main St", "+1-555-0000", "female");
        user.add_contact(contact("same")).unwrap();
        user.add_contact(contact("same")).unwrap();
        assert_eq!(user.contacts.len(), 2);
        assert_eq!(user.contacts[0], user.contacts[1]);
    }

    #[test]
    fn remove_preserves_order() {
        let mut user = User::new("Ana", "30", "1 Main St", "+1-555-0000", "female");
        user.add_contact(contact("a")).unwrap();
        user.add_contact(contact("b")).unwrap();
        user.add_contact(contact("c")).unwrap();
        let removed = user.remove_contact(1).unwrap();
        assert_eq!(removed.name, "b");
        assert_eq!(user.contacts[0].name, "a");
        assert_eq!(user.contacts[1].name, "c");

        assert!(user.remove_contact(5).is_err());
    }

    #[test]
    fn priority_contact_is_first() {
        let mut user = User::new("Ana", "30", "1 Main St", "+1-555-0000", "female");
        assert!(user.priority_contact().is_none());
        user.add_contact(contact("first")).unwrap();
        user.add_contact(contact("second")).unwrap();
        assert_eq!(user.priority_contact().unwrap().name, "first");
    }
}
