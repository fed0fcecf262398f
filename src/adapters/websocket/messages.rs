//! Text frames pushed to linkage watchers.
//!
//! The browser splits on `;`: `confirmed;<telegram username>` or `cancelled`.

use crate::domain::linkage::LinkageEvent;

pub const CONFIRMED_FRAME: &str = "confirmed";
pub const CANCELLED_FRAME: &str = "cancelled";

pub fn linkage_frame(event: &LinkageEvent) -> String {
    match event {
        LinkageEvent::Confirmed { display_name, .. } => format!(
            "{};{}",
            CONFIRMED_FRAME,
            display_name.as_deref().unwrap_or("")
        ),
        LinkageEvent::Cancelled { .. } => CANCELLED_FRAME.to_string(),
    }
}
