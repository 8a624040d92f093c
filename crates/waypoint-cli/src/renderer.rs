//! Terminal rendering of markdown output via termimad, with a plain-text
//! mode for `--no-color` and pipes.

use anyhow::Result;
use termimad::{crossterm::style::Color, MadSkin};

pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();
        skin.set_headers_fg(Color::Cyan);
        skin.bold.set_fg(Color::Yellow);
        skin.inline_code.set_fg(Color::Green);
        skin.inline_code.set_bg(Color::AnsiValue(236));

        Self { rich_enabled, skin }
    }

    /// Prints markdown, styled unless rich output is disabled.
    pub fn render(&self, markdown: &str) -> Result<()> {
        if !self.rich_enabled {
            print!("{markdown}");
            return Ok(());
        }

        for line in markdown.lines() {
            // keep the hashes visible so headings still read as markdown
            if line.starts_with('#') {
                println!("\x1b[36m{line}\x1b[0m");
            } else if let Some(rest) = line.strip_prefix("- [x] ") {
                println!("\x1b[32m✓\x1b[0m {}", self.skin.inline(rest));
            } else if let Some(rest) = line.strip_prefix("- [ ] ") {
                println!("○ {}", self.skin.inline(rest));
            } else {
                println!("{}", self.skin.inline(line));
            }
        }
        Ok(())
    }

    /// Prints text verbatim with a trailing newline.
    pub fn print_plain(&self, text: &str) {
        println!("{text}");
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}
