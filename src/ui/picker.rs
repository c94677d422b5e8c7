use fastdial::{dial::HOURS_ON_DIAL, preset::FastingPreset};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, StatefulWidget, Widget},
};

const PICKER_WIDTH: u16 = 36;

/// Rect of `width` x `height` centred in `area`, shrunk to fit
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// The interval picker drawn over the dial
pub fn render(cursor: usize, selected: FastingPreset, area: Rect, buf: &mut Buffer) {
    let popup = centered_rect(area, PICKER_WIDTH, FastingPreset::ALL.len() as u16 + 2);
    Clear.render(popup, buf);

    let items: Vec<ListItem> = FastingPreset::ALL
        .iter()
        .map(|preset| {
            let marker = if *preset == selected { "*" } else { " " };
            ListItem::new(format!(
                "{marker} {:<6} {:>2}h fast / {:>2}h eat",
                preset.label(),
                preset.hours(),
                HOURS_ON_DIAL - preset.hours()
            ))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Select Fasting Interval"),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default().with_selected(Some(cursor));
    StatefulWidget::render(list, popup, buf, &mut state);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_fits_inside() {
        let area = Rect::new(0, 0, 80, 24);
        let rect = centered_rect(area, 36, 6);
        assert_eq!(rect, Rect::new(22, 9, 36, 6));

        let small = Rect::new(0, 0, 20, 4);
        assert_eq!(centered_rect(small, 36, 6), small);
    }

    #[test]
    fn test_render_lists_every_preset() {
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        render(2, FastingPreset::SixteenEight, area, &mut buf);

        let content: String = buf.content().iter().map(|c| c.symbol()).collect();
        for preset in FastingPreset::ALL {
            assert!(content.contains(&preset.label()), "missing {preset}");
        }
        assert!(content.contains("Select Fasting Interval"));
        assert!(content.contains("> "));
    }
}
