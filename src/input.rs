//! Keyboard → game command mapping plus a per-frame command buffer.

/// Player intent. Anything else on the keyboard is ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    Jump,
}

impl Command {
    /// Map a `KeyboardEvent.key` value.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "Left" => Some(Command::MoveLeft),
            "ArrowRight" | "Right" => Some(Command::MoveRight),
            "ArrowUp" | "Up" => Some(Command::Jump),
            _ => None,
        }
    }

    /// Map a legacy `KeyboardEvent.keyCode` value (37 left, 38 up, 39 right).
    pub fn from_key_code(code: u32) -> Option<Self> {
        match code {
            37 => Some(Command::MoveLeft),
            38 => Some(Command::Jump),
            39 => Some(Command::MoveRight),
            _ => None,
        }
    }
}

/// Commands collected between two frames, applied in arrival order before
/// the next physics step. Key repeat is kept: every press is one move.
#[derive(Debug, Default)]
pub struct CommandBuffer {
    pending: Vec<Command>,
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self { pending: Vec::with_capacity(8) }
    }

    pub fn push(&mut self, command: Command) {
        self.pending.push(command);
    }

    pub fn drain(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.pending)
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.pending.len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
