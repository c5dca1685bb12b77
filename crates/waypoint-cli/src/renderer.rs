//! Terminal rendering of the markdown produced by the core display types.

use anyhow::Result;
use termimad::{crossterm::style::Color, MadSkin};

/// Renders markdown through termimad, or prints it verbatim when color is off.
///
/// In rich mode milestone headings are tinted by status so blocked and
/// completed work stands out in long listings.
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

/// Heading color for a `### n. name (icon status)` line, if it carries one.
fn status_color(line: &str) -> Option<Color> {
    if !line.starts_with("### ") || !line.ends_with(')') {
        return None;
    }
    let status = line.rsplit_once(" (")?.1;
    match status.chars().next()? {
        '✓' => Some(Color::Green),
        '➤' => Some(Color::Yellow),
        '✗' => Some(Color::Red),
        _ => None,
    }
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();
        skin.set_headers_fg(Color::Blue);
        skin.bold.set_fg(Color::Yellow);
        skin.quote_mark.set_fg(Color::Green);
        skin.code_block.set_bg(Color::AnsiValue(238));
        skin.inline_code.set_bg(Color::AnsiValue(238));

        Self { rich_enabled, skin }
    }

    /// Render markdown text to stdout.
    pub fn render(&self, markdown: &str) -> Result<()> {
        if !self.rich_enabled {
            print!("{markdown}");
            return Ok(());
        }

        // Plain blocks go through the skin as a whole so fenced code and
        // lists keep their layout; status headings are printed on their own.
        let mut block = String::new();
        for line in markdown.lines() {
            match status_color(line) {
                Some(color) => {
                    if !block.is_empty() {
                        self.skin.print_text(&block);
                        block.clear();
                    }
                    let mut heading = self.skin.clone();
                    heading.set_headers_fg(color);
                    heading.print_text(line);
                }
                None => {
                    block.push_str(line);
                    block.push('\n');
                }
            }
        }
        if !block.is_empty() {
            self.skin.print_text(&block);
        }
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}
