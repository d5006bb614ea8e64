use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Role tag used for dashboard RBAC.
///
/// The set is closed: route metadata naming anything else is a configuration error.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    /// Board member.
    Board,
    /// Seller (point-of-sale owner).
    Seller,
    /// Buyer approval committee.
    #[serde(rename = "BAC")]
    Bac,
}

impl Role {
    /// All roles, in the order the guard checks them.
    pub const ALL: [Role; 3] = [Role::Board, Role::Seller, Role::Bac];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Board => "Board",
            Role::Seller => "Seller",
            Role::Bac => "BAC",
        }
    }

    /// Exact tag lookup (`Board`, `Seller`, `BAC`).
    pub fn from_tag(tag: &str) -> Option<Role> {
        Role::ALL.into_iter().find(|role| role.as_str() == tag)
    }

    const fn bit(self) -> u8 {
        match self {
            Role::Board => 0b001,
            Role::Seller => 0b010,
            Role::Bac => 0b100,
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown role '{0}'")]
pub struct RoleParseError(pub String);

/// Forgiving parse: surrounding whitespace and case are ignored.
///
/// Route configuration goes through [`RoleSet::parse_strict`], which only
/// accepts the exact tags.
impl FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "board" => Ok(Role::Board),
            "seller" => Ok(Role::Seller),
            "bac" => Ok(Role::Bac),
            _ => Err(RoleParseError(s.to_string())),
        }
    }
}

/// A set of [`Role`]s.
///
/// Stored as a bitmask so it is `Copy` and comparisons are cheap; iteration
/// follows [`Role::ALL`].
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<Role>", into = "Vec<Role>")]
pub struct RoleSet(u8);

impl RoleSet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn insert(&mut self, role: Role) {
        self.0 |= role.bit();
    }

    pub fn with(mut self, role: Role) -> Self {
        self.insert(role);
        self
    }

    pub fn contains(&self, role: Role) -> bool {
        self.0 & role.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Roles in `self` that `held` does not contain.
    pub fn missing_from(self, held: RoleSet) -> RoleSet {
        Self(self.0 & !held.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = Role> + '_ {
        Role::ALL.into_iter().filter(|role| self.contains(*role))
    }

    /// Parse role tags, rejecting anything that is not spelled exactly as a known tag.
    pub fn parse_strict<I, S>(names: I) -> Result<Self, RoleParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names
            .into_iter()
            .map(|name| {
                let name = name.as_ref();
                Role::from_tag(name).ok_or_else(|| RoleParseError(name.to_string()))
            })
            .collect()
    }

    /// Parse role names, skipping unknown ones.
    ///
    /// Sessions may carry roles the dashboard does not gate on; those are
    /// irrelevant to routing, not errors.
    pub fn parse_lenient<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = RoleSet::empty();
        for name in names {
            match name.as_ref().parse::<Role>() {
                Ok(role) => set.insert(role),
                Err(e) => tracing::debug!(error = %e, "ignoring session role"),
            }
        }
        set
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<T: IntoIterator<Item = Role>>(iter: T) -> Self {
        let mut set = RoleSet::empty();
        for role in iter {
            set.insert(role);
        }
        set
    }
}

impl From<Vec<Role>> for RoleSet {
    fn from(value: Vec<Role>) -> Self {
        value.into_iter().collect()
    }
}

impl From<RoleSet> for Vec<Role> {
    fn from(value: RoleSet) -> Self {
        value.iter().collect()
    }
}

impl core::fmt::Display for RoleSet {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("{")?;
        for (i, role) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(role.as_str())?;
        }
        f.write_str("}")
    }
}
