//! Transient notifications shown in the corner of the screen.

/// How long a toast stays up.
pub const TOAST_MS: u32 = 3000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl ToastLevel {
    pub fn icon(self) -> &'static str {
        match self {
            ToastLevel::Info => "ℹ",
            ToastLevel::Success => "✓",
            ToastLevel::Warning => "⚠",
            ToastLevel::Error => "✕",
        }
    }

    pub fn class(self) -> &'static str {
        match self {
            ToastLevel::Info => "toast info",
            ToastLevel::Success => "toast success",
            ToastLevel::Warning => "toast warning",
            ToastLevel::Error => "toast error",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub level: ToastLevel,
    pub message: String,
}

/// Live toasts, oldest first.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Toasts {
    entries: Vec<Toast>,
    next_id: u64,
}

impl Toasts {
    pub fn entries(&self) -> &[Toast] {
        &self.entries
    }

    /// Add a toast and return its id, for dismissing it when it times out.
    pub fn push(&mut self, level: ToastLevel, message: impl Into<String>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(Toast {
            id,
            level,
            message: message.into(),
        });
        id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.entries.retain(|t| t.id != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_dismiss() {
        let mut toasts = Toasts::default();
        let a = toasts.push(ToastLevel::Success, "Post created!");
        let b = toasts.push(ToastLevel::Error, "Failed");
        assert_ne!(a, b);
        assert_eq!(toasts.entries().len(), 2);

        toasts.dismiss(a);
        assert_eq!(toasts.entries().len(), 1);
        assert_eq!(toasts.entries()[0].message, "Failed");
        assert_eq!(toasts.entries()[0].level.class(), "toast error");

        // Unknown ids are ignored
        toasts.dismiss(a);
        assert_eq!(toasts.entries().len(), 1);
    }
}
