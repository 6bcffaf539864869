//! Contact Entity
//!
//! Address-book entries that can be assigned to tasks.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::Entity;

/// Hex digits used for generated colours; stops at `C` to keep them dark
const DARK_HEX_DIGITS: &[u8] = b"0123456789ABC";

/// Address-book entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: u32,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    /// Badge colour, `#RRGGBB`
    pub color: String,
    pub initials: String,
}

impl Contact {
    pub fn new(id: u32, name: String, email: String, phone: String, color: String) -> Self {
        let initials = initials_of(&name);
        Self { id, name, email, phone, color, initials }
    }

    /// First letter used for alphabetical grouping
    pub fn group_letter(&self) -> Option<char> {
        self.initials.chars().next().map(|c| c.to_ascii_uppercase())
    }
}

impl Entity for Contact {
    const COLLECTION: &'static str = "contacts";

    fn id(&self) -> u32 {
        self.id
    }

    fn set_id(&mut self, id: u32) {
        self.id = id;
    }
}

/// Initials of a name: first letter of the first and last word
pub fn initials_of(name: &str) -> String {
    let words: Vec<&str> = name.split_whitespace().collect();
    let first_letter = |word: &str| word.chars().next().map(|c| c.to_uppercase().collect::<String>());
    match words.as_slice() {
        [] => String::new(),
        [only] => first_letter(only).unwrap_or_default(),
        [first, .., last] => {
            let mut initials = first_letter(first).unwrap_or_default();
            initials.push_str(&first_letter(last).unwrap_or_default());
            initials
        }
    }
}

/// Random dark badge colour
pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut color = String::from("#");
    for _ in 0..6 {
        let digit = DARK_HEX_DIGITS[rng.gen_range(0..DARK_HEX_DIGITS.len())];
        color.push(digit as char);
    }
    color
}

/// Raw contact form input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl ContactDraft {
    pub fn from_contact(contact: &Contact) -> Self {
        Self {
            name: contact.name.clone(),
            email: contact.email.clone(),
            phone: contact.phone.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_initials() {
        assert_eq!(initials_of("Ada Lovelace"), "AL");
        assert_eq!(initials_of("  grace  brewster murray hopper "), "GH");
        assert_eq!(initials_of("linus"), "L");
        assert_eq!(initials_of("   "), "");
        assert_eq!(initials_of("Özlem Türeci"), "ÖT");
    }

    #[test]
    fn test_random_color_is_dark_hex() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let color = random_color(&mut rng);
            assert_eq!(color.len(), 7);
            assert!(color.starts_with('#'));
            assert!(color[1..].bytes().all(|b| DARK_HEX_DIGITS.contains(&b)));
        }
    }

    #[test]
    fn test_contact_new_computes_initials() {
        let contact = Contact::new(11, "Bill Gates".into(), "bill@example.com".into(), String::new(), "#123456".into());
        assert_eq!(contact.initials, "BG");
        assert_eq!(contact.group_letter(), Some('B'));
    }
}
