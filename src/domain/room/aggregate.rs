//! Room aggregate - a shared list and the logins allowed to use it.

use serde::Serialize;

use super::RoomError;
use crate::domain::foundation::{Login, RoomId};

/// Minimum number of characters in a room name.
pub const MIN_ROOM_NAME_LEN: usize = 4;

/// A room with its owner and members.
///
/// Invariant: the owner is always among the members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    id: RoomId,
    owner: Login,
    name: String,
    users: Vec<Login>,
}

impl Room {
    /// Creates a room whose only member is its owner.
    pub fn create(owner: Login, name: impl Into<String>) -> Result<Self, RoomError> {
        let name = name.into();
        if name.chars().count() < MIN_ROOM_NAME_LEN {
            return Err(RoomError::InvalidName {
                min: MIN_ROOM_NAME_LEN,
            });
        }
        Ok(Self {
            id: RoomId::new(),
            users: vec![owner.clone()],
            owner,
            name,
        })
    }

    /// The room provisioned for a freshly registered user.
    pub fn personal(owner: Login) -> Self {
        let name = format!("{}'s room", owner);
        Self {
            id: RoomId::new(),
            users: vec![owner.clone()],
            owner,
            name,
        }
    }

    /// Rebuilds a room from persisted parts.
    pub fn reconstitute(id: RoomId, owner: Login, name: String, users: Vec<Login>) -> Self {
        Self {
            id,
            owner,
            name,
            users,
        }
    }

    pub fn id(&self) -> RoomId {
        self.id
    }

    pub fn owner(&self) -> &Login {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn users(&self) -> &[Login] {
        &self.users
    }

    pub fn is_owner(&self, login: &Login) -> bool {
        &self.owner == login
    }

    pub fn is_member(&self, login: &Login) -> bool {
        self.users.contains(login)
    }

    /// Fails with `Forbidden` unless `login` is a member.
    pub fn ensure_member(&self, login: &Login) -> Result<(), RoomError> {
        if self.is_member(login) {
            Ok(())
        } else {
            Err(RoomError::Forbidden)
        }
    }

    /// Fails with `NotOwner` unless `login` owns the room.
    pub fn ensure_owner(&self, login: &Login) -> Result<(), RoomError> {
        if self.is_owner(login) {
            Ok(())
        } else {
            Err(RoomError::NotOwner)
        }
    }

    /// Adds a member; already present logins are left as is.
    pub fn add_member(&mut self, login: Login) {
        if !self.users.contains(&login) {
            self.users.push(login);
        }
    }

    /// Removes a member; absent logins are ignored.
    pub fn remove_member(&mut self, login: &Login) {
        self.users.retain(|u| u != login);
    }

    pub fn summary_for(&self, login: &Login) -> RoomSummary {
        RoomSummary {
            id: self.id,
            name: self.name.clone(),
            owner: self.owner.clone(),
            is_owner: self.is_owner(login),
        }
    }
}

/// Room as seen by one of its members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummary {
    pub id: RoomId,
    pub name: String,
    pub owner: Login,
    pub is_owner: bool,
}
