/// Where keyboard focus was when a key arrived.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyTarget {
    Page,
    /// Text inputs, text areas and content-editable elements. Typing there
    /// never counts toward the sequence.
    Editable,
}

/// Watches key presses for a fixed word typed in order.
#[derive(Clone, Debug)]
pub struct SecretSequence {
    secret: String,
    buffer: String,
}

impl SecretSequence {
    pub fn new(secret: &str) -> Self {
        Self {
            secret: secret.to_uppercase(),
            buffer: String::new(),
        }
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }

    /// Feeds one `KeyboardEvent.key` value. Returns `true` exactly when the
    /// key completes the word; the buffer is cleared at that point.
    pub fn feed(&mut self, key: &str, target: KeyTarget) -> bool {
        if target == KeyTarget::Editable {
            return false;
        }

        let key = key.to_uppercase();
        self.buffer.push_str(&key);
        if !self.secret.starts_with(&self.buffer) {
            self.buffer = key;
        }

        if self.buffer == self.secret {
            self.buffer.clear();
            return true;
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed_all(sequence: &mut SecretSequence, keys: &[&str], target: KeyTarget) -> usize {
        keys.iter().filter(|key| sequence.feed(key, target)).count()
    }

    #[test]
    fn full_word_fires_once() {
        let mut sequence = SecretSequence::new("KARAN");
        assert_eq!(feed_all(&mut sequence, &["K", "A", "R", "A", "N"], KeyTarget::Page), 1);
    }

    #[test]
    fn lowercase_keys_count() {
        let mut sequence = SecretSequence::new("karan");
        assert_eq!(sequence.secret(), "KARAN");
        assert_eq!(feed_all(&mut sequence, &["k", "a", "r", "a", "n"], KeyTarget::Page), 1);
    }

    #[test]
    fn wrong_key_breaks_the_sequence() {
        let mut sequence = SecretSequence::new("KARAN");
        assert_eq!(feed_all(&mut sequence, &["K", "A", "X", "A", "N"], KeyTarget::Page), 0);
    }

    #[test]
    fn editable_focus_never_fires() {
        let mut sequence = SecretSequence::new("KARAN");
        assert_eq!(feed_all(&mut sequence, &["K", "A", "R", "A", "N"], KeyTarget::Editable), 0);
    }

    #[test]
    fn mismatch_restarts_from_the_new_key() {
        let mut sequence = SecretSequence::new("KARAN");
        let keys = ["K", "A", "R", "K", "A", "R", "A", "N"];
        assert_eq!(feed_all(&mut sequence, &keys, KeyTarget::Page), 1);
    }

    #[test]
    fn word_can_be_typed_again_after_firing() {
        let mut sequence = SecretSequence::new("KARAN");
        let keys = ["K", "A", "R", "A", "N", "K", "A", "R", "A", "N"];
        assert_eq!(feed_all(&mut sequence, &keys, KeyTarget::Page), 2);
    }

    #[test]
    fn named_keys_reset_the_buffer() {
        let mut sequence = SecretSequence::new("KARAN");
        let keys = ["K", "A", "Shift", "R", "A", "N"];
        assert_eq!(feed_all(&mut sequence, &keys, KeyTarget::Page), 0);
    }
}
