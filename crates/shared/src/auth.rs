//! Session types: dashboard cards, JWT claims, and login payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role label that unlocks sheet administration and the users list.
pub const ADMIN_ROLE: &str = "Admin";

/// A dashboard card a user may be allowed to see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Card {
    /// Data source and freshness indicator.
    ConnectionStatus,
    /// Headline stats and breakdown pies.
    StatsOverview,
    /// Revenue trend, location performance, and the conversion funnel.
    RevenueChart,
    /// Performance ratios.
    PerformanceIndicators,
}

impl Card {
    /// Every card, in display order.
    pub const ALL: [Self; 4] = [
        Self::ConnectionStatus,
        Self::StatsOverview,
        Self::RevenueChart,
        Self::PerformanceIndicators,
    ];

    /// Returns the card name as written in the users sheet.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ConnectionStatus => "ConnectionStatus",
            Self::StatsOverview => "StatsOverview",
            Self::RevenueChart => "RevenueChart",
            Self::PerformanceIndicators => "PerformanceIndicators",
        }
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Card {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|card| card.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown card: {s}"))
    }
}

/// JWT claims for a dashboard session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user name).
    pub sub: String,
    /// Role label.
    pub role: String,
    /// Cards granted to the user.
    pub cards: Vec<Card>,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
}

impl Claims {
    /// Creates new claims for a user.
    #[must_use]
    pub fn new(user: &SessionUser, expires_at: DateTime<Utc>) -> Self {
        Self {
            sub: user.name.clone(),
            role: user.role.clone(),
            cards: user.cards.clone(),
            iat: Utc::now().timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Returns the user name from claims.
    #[must_use]
    pub fn user_name(&self) -> &str {
        &self.sub
    }

    /// Returns true if the session may see the card.
    #[must_use]
    pub fn has_card(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    /// Returns true if the session belongs to an administrator.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role.eq_ignore_ascii_case(ADMIN_ROLE)
    }

    /// Rebuilds the session user carried by these claims.
    #[must_use]
    pub fn to_user(&self) -> SessionUser {
        SessionUser {
            name: self.sub.clone(),
            role: self.role.clone(),
            cards: self.cards.clone(),
        }
    }
}

/// Authenticated user as exposed to the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    /// Display name.
    pub name: String,
    /// Role label.
    pub role: String,
    /// Cards the user may see.
    pub cards: Vec<Card>,
}

/// Login request payload.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    /// User name as listed in the users sheet.
    pub name: String,
    /// User password.
    pub password: String,
}

/// Login response payload.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    /// Authenticated user info.
    pub user: SessionUser,
    /// Session token.
    pub access_token: String,
    /// Token expiration in seconds.
    pub expires_in: i64,
}
