// crates/seccat-core/src/options.rs

/// Formatting switches for one invocation. Built once by the driver and
/// shared by reference with every input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FormatOptions {
    pub number: bool,
    pub number_nonblank: bool,
    pub squeeze_blank: bool,
    pub show_ends: bool,
    pub show_nonprinting: bool,
    pub show_tabs: bool,
    pub follow_symlinks: bool,
}

impl FormatOptions {
    /// True when no per-line decision is requested and the raw byte copy
    /// is output-equivalent to the line path.
    ///
    /// `follow_symlinks` is an access policy, not a formatting switch.
    pub fn is_passthrough(&self) -> bool {
        !(self.number
            || self.number_nonblank
            || self.squeeze_blank
            || self.show_ends
            || self.show_nonprinting
            || self.show_tabs)
    }

    /// The escaping table runs whenever either `-v` or `-T` is set, even
    /// `-T` alone (which therefore also escapes control and high bytes).
    pub fn escapes(&self) -> bool {
        self.show_nonprinting || self.show_tabs
    }

    /// Whether a line with the given blankness receives a counter.
    /// `-b` overrides `-n` rather than merging with it.
    pub fn numbers_line(&self, is_blank: bool) -> bool {
        (self.number && !self.number_nonblank) || (self.number_nonblank && !is_blank)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_passthrough() {
        assert!(FormatOptions::default().is_passthrough());
    }

    #[test]
    fn follow_symlinks_alone_keeps_passthrough() {
        let o = FormatOptions {
            follow_symlinks: true,
            ..Default::default()
        };
        assert!(o.is_passthrough());
    }

    #[test]
    fn nonblank_overrides_number() {
        let o = FormatOptions {
            number: true,
            number_nonblank: true,
            ..Default::default()
        };
        assert!(!o.numbers_line(true));
        assert!(o.numbers_line(false));

        let n = FormatOptions {
            number: true,
            ..Default::default()
        };
        assert!(n.numbers_line(true));
        assert!(n.numbers_line(false));
    }

    #[test]
    fn show_tabs_alone_enables_escaping() {
        let o = FormatOptions {
            show_tabs: true,
            ..Default::default()
        };
        assert!(o.escapes());
        assert!(!o.is_passthrough());
    }
}
