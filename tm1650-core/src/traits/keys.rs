//! Key change listener trait

/// Receives state changes for one key
///
/// Called synchronously from the scan, only when the key's state differs
/// from what it last reported.
pub trait KeyListener {
    /// The key is now pressed (`true`) or released (`false`)
    fn on_change(&mut self, pressed: bool);
}

/// Listener for keys that are tracked but not published
#[derive(Debug, Clone, Copy, Default)]
pub struct NoListener;

impl KeyListener for NoListener {
    fn on_change(&mut self, _pressed: bool) {}
}

// Blanket implementation for closures
impl<F: FnMut(bool)> KeyListener for F {
    fn on_change(&mut self, pressed: bool) {
        self(pressed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_listener() {
        let mut presses = 0;
        let mut listener = |pressed: bool| {
            if pressed {
                presses += 1;
            }
        };
        listener.on_change(true);
        listener.on_change(false);
        listener.on_change(true);
        assert_eq!(presses, 2);
    }
}
