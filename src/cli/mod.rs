//! CLI command definitions and argument parsing.
//!
//! Uses clap derive macros for ergonomic argument definitions.

pub mod args;

/// Help banner with ANSI styling for clap help output.
pub const ABOUT_STYLED: &str =
    "\x1b[1mkeel\x1b[0m \x1b[2m· Resolve layered build settings, pinned dependencies and signing into one manifest.\x1b[0m";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn about_banner_names_the_tool() {
        assert!(ABOUT_STYLED.contains("keel"));
    }
}
