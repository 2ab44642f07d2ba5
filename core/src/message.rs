use alloc::string::String;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
    Info,
}

impl MessageKind {
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub kind: MessageKind,
}

impl Message {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: MessageKind::Success,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: MessageKind::Error,
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: MessageKind::Info,
        }
    }
}

/// Generation of a displayed message. Only the current token may hide it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MessageToken(u64);

/// The single message line. Newer messages overwrite older ones.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MessageSlot {
    current: Option<(MessageToken, Message)>,
    generation: u64,
}

impl MessageSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&Message> {
        self.current.as_ref().map(|(_, message)| message)
    }

    pub fn show(&mut self, message: Message) -> MessageToken {
        self.generation = self.generation.wrapping_add(1);
        let token = MessageToken(self.generation);
        log::debug!("message {:?}: {}", message.kind, message.text);
        self.current = Some((token, message));
        token
    }

    /// Hides the message if `token` is still the current one.
    pub fn expire(&mut self, token: MessageToken) -> bool {
        match self.current {
            Some((current, _)) if current == token => {
                self.current = None;
                true
            }
            _ => false,
        }
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}
