//! Address book used by the demo binary
//!
//! Contacts are `{name, email}` records loaded from
//! `~/.config/chipfield/contacts.json` (a JSON array), or a built-in sample
//! list. [`ContactDelegate`] shows a contact's name with its email as detail,
//! titles chips by email, and paints chips whose title is not an email red.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::FieldConfig;
use crate::delegate::TokenFieldDelegate;
use crate::theme::Color;
use crate::token::Token;
use crate::worker::SearchProvider;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    pub email: String,
}

impl Contact {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

const SAMPLE_CONTACTS: &[(&str, &str)] = &[
    ("Amy Pond", "amy.pond@tardis.example"),
    ("Clara Oswald", "clara@coalhill.example"),
    ("Donna Noble", "donna.noble@chiswick.example"),
    ("Martha Jones", "dr.jones@royalhope.example"),
    ("Rory Williams", "rory@leadworth.example"),
    ("Rose Tyler", "rose.tyler@powell.example"),
    ("River Song", "river@luna.example"),
    ("Wilfred Mott", "wilf@chiswick.example"),
];

#[derive(Debug, Clone, Default)]
pub struct ContactBook {
    contacts: Vec<Contact>,
}

impl ContactBook {
    pub fn new(contacts: Vec<Contact>) -> Self {
        Self { contacts }
    }

    /// Sample contacts used when no address book file exists
    pub fn builtin() -> Self {
        Self::new(
            SAMPLE_CONTACTS
                .iter()
                .map(|(name, email)| Contact::new(*name, *email))
                .collect(),
        )
    }

    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json)
            .map(Self::new)
            .map_err(|e| format!("Failed to parse contacts: {}", e))
    }

    pub fn load_from(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read contacts at {}: {}", path.display(), e))?;
        Self::from_json(&content).map_err(|e| format!("{} ({})", e, path.display()))
    }

    /// Load `contacts.json` from the config dir, or the built-in samples
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::contacts_file().filter(|p| p.exists()) else {
            tracing::debug!("No contacts file, using built-in samples");
            return Self::builtin();
        };
        match Self::load_from(&path) {
            Ok(book) => {
                tracing::info!("Loaded {} contacts from {}", book.len(), path.display());
                book
            }
            Err(e) => {
                tracing::warn!("{}", e);
                Self::builtin()
            }
        }
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    /// Case-insensitive substring match on email; "" matches everyone
    pub fn search(&self, query: &str) -> Vec<Contact> {
        if query.is_empty() {
            return self.contacts.clone();
        }
        let needle = query.to_lowercase();
        self.contacts
            .iter()
            .filter(|c| c.email.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }
}

impl SearchProvider<Contact> for ContactBook {
    fn search(&self, query: &str) -> Vec<Contact> {
        ContactBook::search(self, query)
    }
}

fn email_regex() -> Option<&'static Regex> {
    static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();
    EMAIL
        .get_or_init(|| Regex::new(r"^[A-Z0-9a-z._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,64}$").ok())
        .as_ref()
}

/// Whether `text` looks like a single email address
pub fn is_valid_email(text: &str) -> bool {
    email_regex().is_some_and(|re| re.is_match(text))
}

/// Field options the demo starts with when no config file exists
pub fn demo_config() -> FieldConfig {
    FieldConfig {
        prompt_text: String::new(),
        placeholder: "email list".to_string(),
        tokenizing_characters: vec![",".to_string(), " ".to_string()],
        display_already_tokenized: true,
        untokenize_on_end_editing: false,
        min_chars_to_search: 0,
        ..FieldConfig::default()
    }
}

/// Delegate for a field of contacts
#[derive(Debug, Clone)]
pub struct ContactDelegate {
    /// Background given to chips that are not valid emails
    pub invalid_background: Color,
}

impl Default for ContactDelegate {
    fn default() -> Self {
        Self {
            invalid_background: Color::RED,
        }
    }
}

impl TokenFieldDelegate<Contact> for ContactDelegate {
    fn display_title(&self, contact: &Contact) -> String {
        contact.name.clone()
    }

    fn display_detail(&self, contact: &Contact) -> Option<String> {
        Some(contact.email.clone())
    }

    fn token_title(&self, contact: &Contact) -> Option<String> {
        Some(contact.email.clone())
    }

    fn will_add(&mut self, token: &mut Token<Contact>) {
        if !is_valid_email(&token.title) {
            token.appearance.background_color = self.invalid_background;
        }
    }

    fn did_add(&mut self, token: &Token<Contact>) {
        tracing::info!("added {}", token.title);
    }

    fn did_delete(&mut self, token: &Token<Contact>) {
        tracing::info!("removed {}", token.title);
    }
}
