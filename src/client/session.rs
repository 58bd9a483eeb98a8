use chrono::Utc;
use uuid::Uuid;

const ID_SUFFIX_LEN: usize = 9;
const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Per-client mutable state: which conversation is on screen and whether a
/// send is outstanding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub active_chat_id: String,
    pub is_processing: bool,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            active_chat_id: generate_chat_id(),
            is_processing: false,
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

/// `chat_<unix millis>_<9 base36 chars>`. Not checked against stored ids.
pub fn generate_chat_id() -> String {
    let mut entropy = Uuid::new_v4().as_u128();
    let mut suffix = String::with_capacity(ID_SUFFIX_LEN);
    for _ in 0..ID_SUFFIX_LEN {
        suffix.push(BASE36[(entropy % 36) as usize] as char);
        entropy /= 36;
    }
    format!("chat_{}_{}", Utc::now().timestamp_millis(), suffix)
}
