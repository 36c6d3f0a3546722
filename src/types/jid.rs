use std::fmt;
use std::str::FromStr;

/// Routing domain for regular user accounts.
pub const DEFAULT_USER_SERVER: &str = "s.whatsapp.net";

/// A WhatsApp address: `user@server`, or `user.agent:device@server` for a
/// specific linked device.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Jid {
    pub user: String,
    pub raw_agent: u8,
    pub device: u16,
    pub server: String,
}

impl Jid {
    /// New regular JID (user@server).
    pub fn new(user: impl Into<String>, server: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            raw_agent: 0,
            device: 0,
            server: server.into(),
        }
    }

    /// Recipient address for a phone number.
    ///
    /// Accepts an already-qualified JID (anything containing `@`) when both the
    /// user and the server part are present. Otherwise a leading `+`, spaces,
    /// dashes, dots and parentheses are ignored and the remainder must be a
    /// non-empty run of ASCII digits.
    pub fn from_phone(phone: &str) -> Result<Self, JidParseError> {
        let trimmed = phone.trim();
        if trimmed.contains('@') {
            return trimmed.parse();
        }
        let number = trimmed.strip_prefix('+').unwrap_or(trimmed);
        let digits: String = number
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '.' | '(' | ')'))
            .collect();
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(JidParseError);
        }
        Ok(Self::new(digits, DEFAULT_USER_SERVER))
    }
}

impl FromStr for Jid {
    type Err = JidParseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (user, server) = match s.split_once('@') {
            Some((user, server))
                if !user.is_empty() && !server.is_empty() && !server.contains('@') =>
            {
                (user, server)
            }
            _ => return Err(JidParseError),
        };
        let mut jid = Self::new(user, server);
        if let Some((u, rest)) = user.split_once('.') {
            jid.user = u.to_string();
            let (agent, device) = match rest.split_once(':') {
                Some((agent, device)) => (agent, Some(device)),
                None => (rest, None),
            };
            jid.raw_agent = agent.parse().map_err(|_| JidParseError)?;
            if let Some(device) = device {
                jid.device = device.parse().map_err(|_| JidParseError)?;
            }
        } else if let Some((u, device)) = user.split_once(':') {
            jid.user = u.to_string();
            jid.device = device.parse().map_err(|_| JidParseError)?;
        }
        Ok(jid)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JidParseError;

impl fmt::Display for JidParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid JID or phone number")
    }
}

impl std::error::Error for JidParseError {}

impl fmt::Display for Jid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.raw_agent > 0 {
            write!(
                f,
                "{}.{}:{}@{}",
                self.user, self.raw_agent, self.device, self.server
            )
        } else if self.device > 0 {
            write!(f, "{}:{}@{}", self.user, self.device, self.server)
        } else {
            write!(f, "{}@{}", self.user, self.server)
        }
    }
}
