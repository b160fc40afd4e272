use crate::common::{Contact, ContactId};

/// Fixed set of contacts, kept in display order.
#[derive(Debug, Clone)]
pub struct ContactDirectory {
    contacts: Vec<Contact>,
}

impl ContactDirectory {
    pub fn new(contacts: Vec<Contact>) -> Self {
        Self { contacts }
    }

    #[cfg(test)]
    pub fn builtin() -> Self {
        Self::new(default_contacts())
    }

    #[cfg(test)]
    pub fn all(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn get(&self, id: ContactId) -> Option<&Contact> {
        self.contacts.iter().find(|contact| contact.id == id)
    }

    /// Case-insensitive substring match on the name. Directory order is kept;
    /// an empty term matches everyone.
    pub fn filter(&self, search_term: &str) -> Vec<&Contact> {
        let needle = search_term.to_lowercase();
        self.contacts
            .iter()
            .filter(|contact| contact.name.to_lowercase().contains(&needle))
            .collect()
    }
}

fn contact(id: u32, name: &str, online: bool, avatar: &str, color: &str) -> Contact {
    Contact {
        id: ContactId(id),
        name: name.to_string(),
        online,
        avatar: avatar.to_string(),
        color: color.to_string(),
    }
}

pub fn default_contacts() -> Vec<Contact> {
    vec![
        contact(1, "Aarav Patel", true, "AP", "blue"),
        contact(2, "Priya Shah", true, "PS", "pink"),
        contact(3, "Rohan Mehta", false, "RM", "green"),
        contact(4, "Ananya Desai", true, "AD", "purple"),
        contact(5, "Karan Joshi", false, "KJ", "orange"),
        contact(6, "Diya Trivedi", true, "DT", "teal"),
    ]
}
