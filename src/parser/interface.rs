#[cfg(feature = "tracing_debug")]
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct WrapWidth(usize);

impl WrapWidth {
    pub(crate) fn new(width: usize) -> Result<Self, ()> {
        // width must be at least 1 (so every line makes progress)
        if width >= 1 {
            Ok(WrapWidth(width))
        } else {
            Err(())
        }
    }

    pub(crate) fn value(&self) -> usize {
        self.0
    }
}

/// Greedy line breaking, with a hard break when no break character is in range.
#[derive(Debug)]
pub(crate) struct LineWrapper {
    width: WrapWidth,
    break_chars: Vec<char>,
}

impl LineWrapper {
    pub(crate) fn new(width: WrapWidth, break_chars: &[char]) -> Self {
        Self {
            width,
            break_chars: break_chars.to_vec(),
        }
    }

    /// Wrap a single line (no `'\n'`) into lines of at most the configured width.
    pub(crate) fn wrap(&self, line: &str) -> Vec<String> {
        let width = self.width.value();
        let mut remaining: Vec<char> = line.chars().collect();
        let mut lines = Vec::default();

        while remaining.len() > width {
            let split = self.break_point(&remaining);
            let head: String = remaining[..split].iter().collect();
            let tail: String = remaining[split..].iter().collect();
            lines.push(head.trim().to_string());
            remaining = tail.trim_start().chars().collect();
        }

        // Trailing break whitespace leaves nothing after the last split.
        if lines.is_empty() || !remaining.is_empty() {
            lines.push(remaining.into_iter().collect());
        }

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Wrapped {} characters into {} line(s) of width {width}.", line.len(), lines.len());
        }

        lines
    }

    // The exclusive end of the next line.
    // Never looks past the width column, so a break character just beyond it goes unused.
    fn break_point(&self, remaining: &[char]) -> usize {
        let width = self.width.value();
        let start = std::cmp::min(width, remaining.len() - 1);

        for i in (1..=start).rev() {
            let c = remaining[i];

            // A trailing break character only fits when trimming removes it.
            if self.break_chars.contains(&c) && (i < width || c.is_whitespace()) {
                return i + 1;
            }
        }

        width
    }
}

pub(crate) trait UserInterface {
    fn print(&self, message: String);
    fn print_error(&self, message: String);
}

#[derive(Default)]
pub(crate) struct ConsoleInterface {}

impl UserInterface for ConsoleInterface {
    fn print(&self, message: String) {
        println!("{message}");
    }

    fn print_error(&self, message: String) {
        eprintln!("{message}");
    }
}
