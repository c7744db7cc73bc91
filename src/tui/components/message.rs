use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};

use crate::core::turn::{Role, Turn};

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;

/// A stateless component that renders a single turn with role-based styling.
///
/// # Design
///
/// `Message` is a **transient component**: it's created fresh each frame
/// with the turn it draws. The text is handed to the `Paragraph` exactly as
/// stored, with no trimming and no markup interpretation.
///
/// # Styling
///
/// - **User** (green): tagged `you`
/// - **Agent** (blue): tagged with the assistant's name
///
/// Both carry the turn's local time in the border title.
#[derive(Clone, Copy)]
pub struct Message<'a> {
    pub turn: &'a Turn,
    pub assistant_name: &'a str,
}

impl<'a> Message<'a> {
    pub fn new(turn: &'a Turn, assistant_name: &'a str) -> Self {
        Self {
            turn,
            assistant_name,
        }
    }

    /// Height this turn occupies at `width`, borders included.
    ///
    /// Uses the same `Paragraph` that `render` draws, so the measured and
    /// drawn heights always agree. Saturates at `u16::MAX`, the tallest area
    /// ratatui can address; wrapped lines past that cap are not drawn.
    pub fn calculate_height(turn: &Turn, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            // Degenerate case: terminal too narrow for borders + padding.
            return 1;
        }
        let lines = paragraph(turn).line_count(content_width);
        u16::try_from(lines)
            .unwrap_or(u16::MAX)
            .max(1)
            .saturating_add(VERTICAL_OVERHEAD)
    }

    fn title(&self) -> String {
        let who = match self.turn.role {
            Role::User => Role::User.label(),
            Role::Agent => self.assistant_name,
        };
        format!(" {} · {} ", who, self.turn.time_label())
    }
}

pub(crate) fn role_style(role: Role) -> Style {
    match role {
        Role::User => Style::default().fg(Color::Green),
        Role::Agent => Style::default().fg(Color::Blue),
    }
}

fn paragraph(turn: &Turn) -> Paragraph<'_> {
    Paragraph::new(turn.text.as_str())
        .style(role_style(turn.role))
        .wrap(Wrap { trim: false })
}

impl Widget for Message<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = role_style(self.turn.role);
        let border_style = style.add_modifier(Modifier::DIM);

        let block = Block::bordered()
            .title(self.title())
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title_style(style)
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner_area = block.inner(area);
        block.render(area, buf);
        paragraph(self.turn).render(inner_area, buf);
    }
}
