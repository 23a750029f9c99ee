use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Flex, Layout, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Paragraph, Widget},
};

static TEXT: &[&str] = &[
    "h, LEFT         Select one week earlier",
    "l, RIGHT        Select one week later",
    "k, UP           Select the previous day",
    "j, DOWN         Select the next day",
    "0, HOME         Select today",
    "?               Show this help",
    "q, ESC          Quit",
    "",
    "Press the Any Key to dismiss.",
];

/// Popup listing the key bindings, centered in the area it's rendered to
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Help(pub(crate) Style);

impl Widget for Help {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = Text::from_iter(TEXT.iter().map(|&s| Line::raw(s)));
        // Add two for the border
        let height = u16::try_from(text.height())
            .unwrap_or(u16::MAX)
            .saturating_add(2)
            .min(area.height);
        let width = u16::try_from(text.width())
            .unwrap_or(u16::MAX)
            .saturating_add(2)
            .min(area.width);
        let [popup] = Layout::horizontal([width]).flex(Flex::Center).areas(area);
        let [popup] = Layout::vertical([height]).flex(Flex::Center).areas(popup);
        Clear.render(popup, buf);
        Paragraph::new(text)
            .block(
                Block::bordered()
                    .title(" Commands ")
                    .title_alignment(Alignment::Center),
            )
            .style(self.0)
            .render(popup, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_centered() {
        let area = Rect::new(0, 0, 61, 15);
        let mut buffer = Buffer::empty(area);
        Help(Style::new()).render(area, &mut buffer);
        // 39 columns of text plus borders, centered in 61
        let top = (0..area.width)
            .map(|x| buffer[(x, 2)].symbol())
            .collect::<String>();
        assert!(top.contains(" Commands "), "top border should carry the title");
        assert_eq!(buffer[(10, 3)].symbol(), "│");
        assert_eq!(buffer[(11, 3)].symbol(), "h");
        assert_eq!(buffer[(50, 3)].symbol(), "│");
    }

    #[test]
    fn test_render_tiny_area() {
        let area = Rect::new(0, 0, 5, 2);
        let mut buffer = Buffer::empty(area);
        Help(Style::new()).render(area, &mut buffer);
        assert_eq!(buffer[(0, 0)].symbol(), "┌");
    }
}
