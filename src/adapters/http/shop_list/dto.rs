//! Request and response bodies for shop list endpoints.
//!
//! Item bodies reuse the domain `NewItem`/`ItemPatch`/`ShopListItem` shapes
//! directly, since their JSON form is the wire format.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListItemsParams {
    #[serde(default)]
    pub query: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddItemResponse {
    pub uuid: String,
}
