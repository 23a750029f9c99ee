use crate::calendar::{layout, CalendarLayout, CountSource, Heatmap, LayoutError, ViewConfig};
use crate::help::Help;
use crate::theme::BASE_STYLE;
use crossterm::event::{read, Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget, DefaultTerminal};
use std::io::{self, Write};
use time::{Date, Duration};

/// The most recent width reported by the terminal, `None` until the first
/// report arrives
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct WidthSubscription(Option<u16>);

impl WidthSubscription {
    pub(crate) fn current(&self) -> Option<u16> {
        self.0
    }

    // Returns `true` if the width differs from the last one reported
    pub(crate) fn notify(&mut self, width: u16) -> bool {
        self.0.replace(width) != Some(width)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct App<S> {
    config: ViewConfig<S>,
    width: WidthSubscription,
    layout: CalendarLayout,
    selected: Date,
    state: AppState,
}

impl<S: CountSource> App<S> {
    pub(crate) fn new(config: ViewConfig<S>) -> Result<App<S>, LayoutError> {
        let width = WidthSubscription::default();
        let layout = layout(&config, width.current())?;
        Ok(App {
            selected: config.today,
            config,
            width,
            layout,
            state: AppState::Calendar,
        })
    }

    pub(crate) fn run(mut self, terminal: &mut DefaultTerminal) -> anyhow::Result<()> {
        self.resize(terminal.size()?.width)?;
        while !self.quitting() {
            self.draw(terminal)?;
            self.handle_input()?;
        }
        Ok(())
    }

    fn draw(&self, terminal: &mut DefaultTerminal) -> io::Result<()> {
        terminal.draw(|frame| frame.render_widget(self, frame.area()))?;
        Ok(())
    }

    fn handle_input(&mut self) -> anyhow::Result<()> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        let event = read()?;
        if let Event::Resize(width, _) = event {
            self.resize(width)?;
        } else if let Some(KeyEvent {
            code, modifiers, ..
        }) = event.as_key_press_event()
        {
            if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                self.state = AppState::Quitting;
            } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                self.beep()?;
            }
        }
        // else: Redraw on anything else too; it's cheap
        Ok(())
    }

    /// Lays out the calendar again if `width` differs from the last width
    /// seen.  A selection that no longer fits is moved back to today.
    fn resize(&mut self, width: u16) -> Result<(), LayoutError> {
        if self.width.notify(width) {
            self.layout = layout(&self.config, self.width.current())?;
            if !self.layout.contains(self.selected) {
                tracing::debug!(
                    selected = %self.selected,
                    width,
                    "selected date scrolled out of view; selecting today"
                );
                self.selected = self.layout.today;
            }
        }
        Ok(())
    }

    // Returns `false` if the user pressed an invalid key
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match self.state {
            AppState::Calendar => match key {
                KeyCode::Char('h') | KeyCode::Left => self.move_selection(-7),
                KeyCode::Char('l') | KeyCode::Right => self.move_selection(7),
                KeyCode::Char('k') | KeyCode::Up => self.move_selection(-1),
                KeyCode::Char('j') | KeyCode::Down => self.move_selection(1),
                KeyCode::Char('0') | KeyCode::Home => {
                    self.selected = self.layout.today;
                    true
                }
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.state = AppState::Quitting;
                    true
                }
                KeyCode::Char('?') => {
                    self.state = AppState::Helping;
                    true
                }
                _ => false,
            },
            AppState::Helping => {
                self.state = AppState::Calendar;
                true
            }
            AppState::Quitting => false,
        }
    }

    fn move_selection(&mut self, days: i64) -> bool {
        match self.selected.checked_add(Duration::days(days)) {
            Some(date) if self.layout.contains(date) => {
                self.selected = date;
                true
            }
            _ => false,
        }
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }
}

impl<S: CountSource> Widget for &App<S> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        Heatmap::new(&self.layout, self.selected).render(area, buf);
        if self.state == AppState::Helping {
            Help(BASE_STYLE).render(area, buf);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Calendar,
    Helping,
    Quitting,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::HEATMAP_METRICS;
    use time::macros::date;

    fn one_each(_: Date) -> u32 {
        1
    }

    fn new_app() -> App<fn(Date) -> u32> {
        let source: fn(Date) -> u32 = one_each;
        let config =
            ViewConfig::new(date!(2025 - 01 - 22), HEATMAP_METRICS).count_source(source);
        App::new(config).unwrap()
    }

    #[test]
    fn test_width_subscription() {
        let mut sub = WidthSubscription::default();
        assert_eq!(sub.current(), None);
        assert!(sub.notify(80));
        assert!(!sub.notify(80));
        assert!(sub.notify(100));
        assert_eq!(sub.current(), Some(100));
    }

    #[test]
    fn test_unmeasured_start() {
        let app = new_app();
        assert_eq!(app.layout.week_count, 4);
        assert_eq!(app.selected, date!(2025 - 01 - 22));
    }

    #[test]
    fn test_resize_recomputes() {
        let mut app = new_app();
        app.resize(80).unwrap();
        // (80 - 7) / 3
        assert_eq!(app.layout.week_count, 24);
        app.resize(31).unwrap();
        assert_eq!(app.layout.week_count, 8);
        app.resize(0).unwrap();
        assert_eq!(app.layout.week_count, 4);
    }

    #[test]
    fn test_move_selection() {
        let mut app = new_app();
        app.resize(80).unwrap();
        assert!(app.handle_key(KeyCode::Left));
        assert_eq!(app.selected, date!(2025 - 01 - 15));
        assert!(app.handle_key(KeyCode::Char('k')));
        assert_eq!(app.selected, date!(2025 - 01 - 14));
        assert!(app.handle_key(KeyCode::Char('l')));
        assert_eq!(app.selected, date!(2025 - 01 - 21));
        assert!(app.handle_key(KeyCode::Down));
        assert_eq!(app.selected, date!(2025 - 01 - 22));
        // Nothing after today
        assert!(!app.handle_key(KeyCode::Down));
        assert!(!app.handle_key(KeyCode::Right));
        assert_eq!(app.selected, date!(2025 - 01 - 22));
        assert!(app.handle_key(KeyCode::Left));
        assert!(app.handle_key(KeyCode::Home));
        assert_eq!(app.selected, date!(2025 - 01 - 22));
    }

    #[test]
    fn test_move_selection_stops_at_start() {
        let mut app = new_app();
        // Four weeks: 2024-12-26 through 2025-01-22
        for expected in [
            date!(2025 - 01 - 15),
            date!(2025 - 01 - 08),
            date!(2025 - 01 - 01),
        ] {
            assert!(app.handle_key(KeyCode::Char('h')));
            assert_eq!(app.selected, expected);
        }
        assert!(!app.handle_key(KeyCode::Char('h')));
        assert_eq!(app.selected, date!(2025 - 01 - 01));
    }

    #[test]
    fn test_shrink_resets_selection() {
        let mut app = new_app();
        app.resize(80).unwrap();
        for _ in 0..10 {
            assert!(app.handle_key(KeyCode::Left));
        }
        assert_eq!(app.selected, date!(2024 - 11 - 13));
        app.resize(100).unwrap();
        assert_eq!(app.selected, date!(2024 - 11 - 13));
        app.resize(20).unwrap();
        assert_eq!(app.selected, date!(2025 - 01 - 22));
    }

    #[test]
    fn test_help_and_quit() {
        let mut app = new_app();
        assert!(!app.handle_key(KeyCode::Char('x')));
        assert!(app.handle_key(KeyCode::Char('?')));
        assert_eq!(app.state, AppState::Helping);
        assert!(app.handle_key(KeyCode::Char('x')));
        assert_eq!(app.state, AppState::Calendar);
        assert!(!app.quitting());
        assert!(app.handle_key(KeyCode::Char('q')));
        assert!(app.quitting());
    }

    #[test]
    fn test_render() {
        let mut app = new_app();
        app.resize(40).unwrap();
        let area = Rect::new(0, 0, 40, 12);
        let mut buffer = Buffer::empty(area);
        app.render(area, &mut buffer);
        let line = |y: u16| {
            (0..area.width)
                .map(|x| buffer[(x, y)].symbol())
                .collect::<String>()
        };
        assert_eq!(line(9).trim_end(), "77 contributions in the last 11 weeks");
        assert_eq!(line(10).trim_end(), "1 contributions on 2025-01-22");
        assert_eq!(buffer[(39, 11)].bg, ratatui::style::Color::Black);
    }
}
