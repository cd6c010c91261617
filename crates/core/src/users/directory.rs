//! User directory parsing and authentication.

use bookgx_shared::config::UserEntry;
use bookgx_shared::{Card, SessionUser};
use serde::Serialize;

use crate::records::SheetTable;

const MIN_CELLS: usize = 3;

/// Roles that see the revenue chart by default.
const MANAGER_ROLES: [&str; 3] = ["branch manager", "sales officer", "artist manager"];

/// Returns the cards a role sees when the sheet leaves the cards cell blank.
#[must_use]
pub fn default_cards_for_role(role: &str) -> Vec<Card> {
    let role = role.trim().to_lowercase();
    if role == "admin" {
        Card::ALL.to_vec()
    } else if MANAGER_ROLES.contains(&role.as_str()) {
        vec![Card::ConnectionStatus, Card::StatsOverview, Card::RevenueChart]
    } else {
        vec![Card::ConnectionStatus, Card::StatsOverview]
    }
}

/// Parses a comma separated card list; quotes are stripped and unknown names
/// ignored.
#[must_use]
pub fn parse_cards(raw: &str) -> Vec<Card> {
    let mut cards = Vec::new();
    for card in raw
        .replace('"', "")
        .split(',')
        .filter_map(|name| name.parse::<Card>().ok())
    {
        if !cards.contains(&card) {
            cards.push(card);
        }
    }
    cards
}

/// A user listed in the directory.
#[derive(Clone, Serialize)]
pub struct DirectoryUser {
    /// Display name used to log in.
    pub name: String,
    /// Role label.
    pub role: String,
    /// Plain password.
    #[serde(skip)]
    password: String,
    /// Cards the user may see.
    pub cards: Vec<Card>,
}

impl std::fmt::Debug for DirectoryUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectoryUser")
            .field("name", &self.name)
            .field("role", &self.role)
            .field("password", &"[hidden]")
            .field("cards", &self.cards)
            .finish()
    }
}

impl DirectoryUser {
    /// Creates a user; a blank cards cell falls back to the role defaults.
    #[must_use]
    pub fn new(name: &str, role: &str, password: &str, cards: &str) -> Self {
        let parsed = parse_cards(cards);
        let cards = if cards.replace('"', "").trim().is_empty() {
            default_cards_for_role(role)
        } else {
            parsed
        };
        Self {
            name: name.trim().to_string(),
            role: role.trim().to_string(),
            password: password.to_string(),
            cards,
        }
    }

    /// Returns the session view of the user.
    #[must_use]
    pub fn session_user(&self) -> SessionUser {
        SessionUser {
            name: self.name.clone(),
            role: self.role.clone(),
            cards: self.cards.clone(),
        }
    }

    fn accepts(&self, name: &str, password: &str) -> bool {
        !self.password.is_empty()
            && self.name.eq_ignore_ascii_case(name.trim())
            && self.password == password
    }
}

impl From<&UserEntry> for DirectoryUser {
    fn from(entry: &UserEntry) -> Self {
        Self::new(
            &entry.name,
            &entry.role,
            &entry.password,
            entry.cards.as_deref().unwrap_or_default(),
        )
    }
}

/// The set of users allowed to open the dashboard.
#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    users: Vec<DirectoryUser>,
}

impl UserDirectory {
    /// Reads users from a sheet with positional columns Name, Role, Password,
    /// Cards. Rows with fewer than three cells or a blank name are skipped.
    #[must_use]
    pub fn from_table(table: &SheetTable) -> Self {
        let users = table
            .records()
            .iter()
            .filter(|record| record.cells().len() >= MIN_CELLS && !record.cell(0).is_empty())
            .map(|record| {
                DirectoryUser::new(record.cell(0), record.cell(1), record.cell(2), record.cell(3))
            })
            .collect();
        Self { users }
    }

    /// Builds the directory from configured users.
    #[must_use]
    pub fn from_entries(entries: &[UserEntry]) -> Self {
        Self {
            users: entries.iter().map(DirectoryUser::from).collect(),
        }
    }

    /// Finds the user matching `name` (case-insensitive) and `password` (exact).
    ///
    /// Users with a blank password never authenticate.
    #[must_use]
    pub fn authenticate(&self, name: &str, password: &str) -> Option<&DirectoryUser> {
        self.users.iter().find(|user| user.accepts(name, password))
    }

    /// Every user, in sheet order.
    #[must_use]
    pub fn users(&self) -> &[DirectoryUser] {
        &self.users
    }

    /// Number of users.
    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Returns true if the directory has no users.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
