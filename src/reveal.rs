pub const REVEAL_CLASS: &str = "reveal";
pub const REVEALED_CLASS: &str = "in";
pub const AUTO_TARGET_SELECTOR: &str = ".section .container > *:not(.no-reveal)";
pub const CARD_SELECTOR: &str = ".card";
pub const OBSERVER_THRESHOLD: f64 = 0.12;
pub const OBSERVER_ROOT_MARGIN: &str = "0px 0px -40px 0px";

/// Stagger class for the `index`-th automatic reveal target.
pub fn stagger_class(index: usize) -> Option<&'static str> {
    match index % 3 {
        1 => Some("delay-1"),
        2 => Some("delay-2"),
        _ => None,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealMode {
    /// Mark everything revealed straight away.
    Immediate,
    /// Flip each element when it first scrolls into view.
    OnIntersect,
}

pub fn reveal_mode(prefers_reduced_motion: bool, observer_available: bool) -> RevealMode {
    if prefers_reduced_motion || !observer_available {
        RevealMode::Immediate
    } else {
        RevealMode::OnIntersect
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stagger_cycles_every_three_targets() {
        let classes: Vec<_> = (0..6).map(stagger_class).collect();
        assert_eq!(
            classes,
            vec![None, Some("delay-1"), Some("delay-2"), None, Some("delay-1"), Some("delay-2")]
        );
    }

    #[test]
    fn reduced_motion_or_missing_observer_reveals_immediately() {
        assert_eq!(reveal_mode(true, true), RevealMode::Immediate);
        assert_eq!(reveal_mode(false, false), RevealMode::Immediate);
        assert_eq!(reveal_mode(false, true), RevealMode::OnIntersect);
    }
}
