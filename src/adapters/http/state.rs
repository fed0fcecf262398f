//! Shared state for every HTTP route.
//!
//! Holds the ports and builds application handlers on demand. Handlers are
//! thin wrappers around `Arc`s, so building one per request costs a few
//! reference count bumps.

use axum::extract::FromRef;
use std::sync::Arc;

use crate::adapters::events::LinkageHub;
use crate::application::handlers::auth::LoginHandler;
use crate::application::handlers::linkage::{BeginLinkHandler, CompleteRegistrationHandler};
use crate::application::handlers::room::{
    CreateRoomHandler, IssueInviteHandler, LeaveRoomHandler, ListRoomsHandler,
    RedeemInviteHandler, RemoveMemberHandler,
};
use crate::application::handlers::shop_list::{
    AddItemHandler, EditItemHandler, ListItemsHandler, RemoveItemHandler,
};
use crate::ports::{
    BotMessenger, InviteRepository, LinkRequestRepository, RoomRepository, SessionIssuer,
    SessionValidator, UserRepository,
};

use super::middleware::AuthState;

/// How the session cookie is written.
#[derive(Debug, Clone)]
pub struct CookieSettings {
    pub secure: bool,
    pub max_age_secs: u64,
}

impl Default for CookieSettings {
    fn default() -> Self {
        Self {
            secure: false,
            max_age_secs: 24 * 60 * 60,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub link_requests: Arc<dyn LinkRequestRepository>,
    pub users: Arc<dyn UserRepository>,
    pub rooms: Arc<dyn RoomRepository>,
    pub invites: Arc<dyn InviteRepository>,
    pub bot: Arc<dyn BotMessenger>,
    pub hub: LinkageHub,
    pub session_validator: Arc<dyn SessionValidator>,
    pub session_issuer: Arc<dyn SessionIssuer>,
    pub cookie: CookieSettings,
}

impl AppState {
    // === Linkage ===

    pub fn begin_link_handler(&self) -> BeginLinkHandler {
        BeginLinkHandler::new(self.link_requests.clone())
    }

    pub fn complete_registration_handler(&self) -> CompleteRegistrationHandler {
        CompleteRegistrationHandler::new(
            self.link_requests.clone(),
            self.users.clone(),
            self.rooms.clone(),
        )
    }

    // === Session ===

    pub fn login_handler(&self) -> LoginHandler {
        LoginHandler::new(
            self.users.clone(),
            self.session_issuer.clone(),
            self.bot.clone(),
        )
    }

    // === Rooms ===

    pub fn create_room_handler(&self) -> CreateRoomHandler {
        CreateRoomHandler::new(self.rooms.clone())
    }

    pub fn list_rooms_handler(&self) -> ListRoomsHandler {
        ListRoomsHandler::new(self.rooms.clone())
    }

    pub fn leave_room_handler(&self) -> LeaveRoomHandler {
        LeaveRoomHandler::new(self.rooms.clone())
    }

    pub fn issue_invite_handler(&self) -> IssueInviteHandler {
        IssueInviteHandler::new(self.rooms.clone(), self.invites.clone())
    }

    pub fn redeem_invite_handler(&self) -> RedeemInviteHandler {
        RedeemInviteHandler::new(self.rooms.clone(), self.invites.clone())
    }

    pub fn remove_member_handler(&self) -> RemoveMemberHandler {
        RemoveMemberHandler::new(self.rooms.clone())
    }

    // === Shop list ===

    pub fn list_items_handler(&self) -> ListItemsHandler {
        ListItemsHandler::new(self.rooms.clone())
    }

    pub fn add_item_handler(&self) -> AddItemHandler {
        AddItemHandler::new(self.rooms.clone())
    }

    pub fn edit_item_handler(&self) -> EditItemHandler {
        EditItemHandler::new(self.rooms.clone())
    }

    pub fn remove_item_handler(&self) -> RemoveItemHandler {
        RemoveItemHandler::new(self.rooms.clone())
    }
}

impl FromRef<AppState> for LinkageHub {
    fn from_ref(state: &AppState) -> Self {
        state.hub.clone()
    }
}

impl FromRef<AppState> for AuthState {
    fn from_ref(state: &AppState) -> Self {
        state.session_validator.clone()
    }
}
