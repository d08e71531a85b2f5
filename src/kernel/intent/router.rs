use serde::{Deserialize, Serialize};

pub const WHO_IS_X: &str = "who_is_X";
pub const CREATE_MEETING: &str = "createMeeting";

/// Sub-dialogue selected by the top intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntentRoute {
    WhoIsX,
    CreateMeeting,
    Unknown,
}

pub struct IntentRouter;

impl IntentRouter {
    /// Pure, total mapping. Anything unsupported falls through to `Unknown`.
    pub fn route(top_intent: &str) -> IntentRoute {
        match top_intent {
            WHO_IS_X => IntentRoute::WhoIsX,
            CREATE_MEETING => IntentRoute::CreateMeeting,
            _ => IntentRoute::Unknown,
        }
    }
}
