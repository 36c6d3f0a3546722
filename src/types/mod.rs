mod jid;

pub use jid::{Jid, JidParseError, DEFAULT_USER_SERVER};

/// Message ID type (WhatsApp internal ID string).
pub type MessageId = String;
