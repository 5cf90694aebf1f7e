//! Enable/disable and open/close state of the console.
//!
//! Pure state machine: transitions return the effects to fire, and
//! [`Console`](super::Console) turns them into notifications and host
//! requests.

/// Visibility state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConsoleState {
    /// The console ignores open requests.
    #[default]
    Disabled,
    /// Enabled but hidden.
    Closed,
    /// Enabled and shown.
    Open,
}

/// Side effect of a transition, in firing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEffect {
    /// Ask the host to freeze simulation time.
    Pause,
    /// Ask the host to resume simulation time.
    Resume,
    /// The console became visible.
    Opened,
    /// The console became hidden.
    Closed,
}

/// Lifecycle controller.
#[derive(Debug, Clone)]
pub struct Lifecycle {
    state: ConsoleState,
    /// Allow enabling in release builds.
    enabled_on_release_build: bool,
    /// Whether this is a release build.
    release_build: bool,
    /// Couple open/close to host pause.
    pause_enabled: bool,
    /// A pause was requested on open and not yet resumed.
    holding_pause: bool,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new(!cfg!(debug_assertions))
    }
}

impl Lifecycle {
    /// Create a disabled controller for the given build profile.
    pub fn new(release_build: bool) -> Self {
        Self {
            state: ConsoleState::Disabled,
            enabled_on_release_build: false,
            release_build,
            pause_enabled: false,
            holding_pause: false,
        }
    }

    /// Current state.
    #[inline]
    pub fn state(&self) -> ConsoleState {
        self.state
    }

    /// Whether the console is shown.
    #[inline]
    pub fn is_open(&self) -> bool {
        self.state == ConsoleState::Open
    }

    /// Whether the console accepts open requests.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.state != ConsoleState::Disabled
    }

    /// Whether enabling is currently blocked by the release-build gate.
    #[inline]
    pub fn release_gated(&self) -> bool {
        self.release_build && !self.enabled_on_release_build
    }

    /// Override the detected build profile.
    ///
    /// Switching to a gated release profile disables the console.
    pub fn set_release_build(&mut self, release_build: bool) -> Vec<LifecycleEffect> {
        self.release_build = release_build;
        if self.release_gated() {
            self.disable()
        } else {
            Vec::new()
        }
    }

    #[inline]
    pub fn enabled_on_release_build(&self) -> bool {
        self.enabled_on_release_build
    }

    /// Allow or forbid the console in release builds.
    ///
    /// Forbidding it in a release build disables the console.
    pub fn set_enabled_on_release_build(&mut self, enabled: bool) -> Vec<LifecycleEffect> {
        self.enabled_on_release_build = enabled;
        if self.release_gated() {
            self.disable()
        } else {
            Vec::new()
        }
    }

    #[inline]
    pub fn pause_enabled(&self) -> bool {
        self.pause_enabled
    }

    /// Couple or decouple open/close from host pause.
    ///
    /// Takes effect at the next open. A pause already requested is still
    /// resumed on close.
    pub fn set_pause_enabled(&mut self, enabled: bool) {
        self.pause_enabled = enabled;
    }

    /// `Disabled -> Closed`. Returns `false` when blocked by the release gate.
    pub fn enable(&mut self) -> bool {
        if self.release_gated() {
            return false;
        }
        if self.state == ConsoleState::Disabled {
            self.state = ConsoleState::Closed;
        }
        true
    }

    /// Any state -> `Disabled`, closing first if open.
    pub fn disable(&mut self) -> Vec<LifecycleEffect> {
        let effects = self.close();
        self.state = ConsoleState::Disabled;
        effects
    }

    /// `Closed -> Open`. No-op when disabled or already open.
    pub fn open(&mut self) -> Vec<LifecycleEffect> {
        if self.state != ConsoleState::Closed {
            return Vec::new();
        }

        self.state = ConsoleState::Open;
        let mut effects = Vec::with_capacity(2);
        if self.pause_enabled {
            self.holding_pause = true;
            effects.push(LifecycleEffect::Pause);
        }
        effects.push(LifecycleEffect::Opened);
        effects
    }

    /// `Open -> Closed`. No-op otherwise.
    pub fn close(&mut self) -> Vec<LifecycleEffect> {
        if self.state != ConsoleState::Open {
            return Vec::new();
        }

        self.state = ConsoleState::Closed;
        let mut effects = Vec::with_capacity(2);
        if std::mem::take(&mut self.holding_pause) {
            effects.push(LifecycleEffect::Resume);
        }
        effects.push(LifecycleEffect::Closed);
        effects
    }

    /// Flip between `Closed` and `Open`.
    pub fn toggle(&mut self) -> Vec<LifecycleEffect> {
        match self.state {
            ConsoleState::Open => self.close(),
            _ => self.open(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use LifecycleEffect::*;

    fn debug_build() -> Lifecycle {
        Lifecycle::new(false)
    }

    #[test]
    fn test_open_requires_enable() {
        let mut lc = debug_build();
        assert!(lc.open().is_empty());
        assert_eq!(lc.state(), ConsoleState::Disabled);

        assert!(lc.enable());
        assert_eq!(lc.state(), ConsoleState::Closed);
        assert_eq!(lc.open(), vec![Opened]);
        assert!(lc.is_open());
    }

    #[test]
    fn test_toggle() {
        let mut lc = debug_build();
        lc.enable();

        assert_eq!(lc.toggle(), vec![Opened]);
        assert_eq!(lc.toggle(), vec![Closed]);
        assert_eq!(lc.state(), ConsoleState::Closed);
    }

    #[test]
    fn test_repeated_open_close_are_noops() {
        let mut lc = debug_build();
        lc.enable();
        lc.open();
        assert!(lc.open().is_empty());
        lc.close();
        assert!(lc.close().is_empty());
    }

    #[test]
    fn test_disable_while_open_closes_first() {
        let mut lc = debug_build();
        lc.enable();
        lc.open();

        assert_eq!(lc.disable(), vec![Closed]);
        assert_eq!(lc.state(), ConsoleState::Disabled);
        assert!(lc.disable().is_empty());
    }

    #[test]
    fn test_pause_coupling() {
        let mut lc = debug_build();
        lc.set_pause_enabled(true);
        lc.enable();

        assert_eq!(lc.open(), vec![Pause, Opened]);
        assert_eq!(lc.close(), vec![Resume, Closed]);
    }

    #[test]
    fn test_pause_disabled_while_open_still_resumes() {
        let mut lc = debug_build();
        lc.set_pause_enabled(true);
        lc.enable();
        lc.open();
        lc.set_pause_enabled(false);

        assert_eq!(lc.disable(), vec![Resume, Closed]);
    }

    #[test]
    fn test_release_gate() {
        let mut lc = Lifecycle::new(true);
        assert!(!lc.enable());
        assert_eq!(lc.state(), ConsoleState::Disabled);

        lc.set_enabled_on_release_build(true);
        assert!(lc.enable());
        lc.open();

        assert_eq!(lc.set_enabled_on_release_build(false), vec![Closed]);
        assert_eq!(lc.state(), ConsoleState::Disabled);
    }

    #[test]
    fn test_gate_ignored_in_debug_builds() {
        let mut lc = debug_build();
        lc.set_enabled_on_release_build(false);
        assert!(lc.enable());
    }
}
